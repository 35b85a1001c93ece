//! Shared status surface for the console.
//!
//! [`StatusSnapshot`] captures the sequencer counters together with the
//! transport statistics; [`StatusFormatter`] keeps the textual rendering
//! identical across front-ends.

use core::fmt;

use crate::scripts::{ControlSymbol, Phase};
use crate::sequencer::{CycleObserver, Sequencer};
use crate::transport::{PumpStats, ReportPump};

/// Point-in-time view of the macro.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub phase: Phase,
    pub script: &'static str,
    pub step_index: usize,
    pub step_count: usize,
    pub symbol: Option<ControlSymbol>,
    pub elapsed_ticks: u32,
    /// Ticks the current step still has to play, including the trailing one.
    pub ticks_left_in_step: u32,
    pub repeats_remaining: u8,
    pub feed_repeats: u8,
    pub total_ticks: u64,
    pub pulses: u32,
    pub transport: Option<PumpStats>,
}

impl StatusSnapshot {
    /// Captures the counters of `sequencer`.
    #[must_use]
    pub fn of_sequencer<O: CycleObserver>(sequencer: &Sequencer<O>) -> Self {
        let state = sequencer.state();
        let program = sequencer.program();
        let script = program.script(state.phase);
        let step = sequencer.current_step();

        Self {
            phase: state.phase,
            script: script.name(),
            step_index: state.step_index,
            step_count: script.step_count(),
            symbol: step.map(|step| step.symbol),
            elapsed_ticks: state.elapsed_ticks,
            ticks_left_in_step: step.map_or(0, |step| {
                step.held_ticks().saturating_sub(state.elapsed_ticks)
            }),
            repeats_remaining: state.repeats_remaining,
            feed_repeats: program.feed_repeats(),
            total_ticks: sequencer.total_ticks(),
            pulses: sequencer.pulse_count(),
            transport: None,
        }
    }

    /// Captures the sequencer counters plus the pump statistics.
    #[must_use]
    pub fn of_pump<O: CycleObserver>(pump: &ReportPump<O>) -> Self {
        Self {
            transport: Some(pump.stats()),
            ..Self::of_sequencer(pump.sequencer())
        }
    }
}

/// Renders a [`StatusSnapshot`] into console lines.
#[derive(Clone, Copy, Debug)]
pub struct StatusFormatter<'a> {
    snapshot: &'a StatusSnapshot,
}

impl<'a> StatusFormatter<'a> {
    #[must_use]
    pub const fn new(snapshot: &'a StatusSnapshot) -> Self {
        Self { snapshot }
    }

    /// Writes the phase line (e.g. `phase feed script=feed_item step=2/6 symbol=A`).
    ///
    /// # Errors
    ///
    /// Propagates failures from `writer`.
    pub fn write_phase_line<W: fmt::Write>(&self, writer: &mut W) -> fmt::Result {
        let snapshot = self.snapshot;
        write!(
            writer,
            "phase {} script={} step={}/{}",
            snapshot.phase,
            snapshot.script,
            snapshot.step_index + 1,
            snapshot.step_count
        )?;
        match snapshot.symbol {
            Some(symbol) => write!(writer, " symbol={symbol}"),
            None => writer.write_str(" symbol=n/a"),
        }
    }

    /// Writes the timing line (e.g. `timing elapsed=3 left=3 feed-repeats=9/10`).
    ///
    /// # Errors
    ///
    /// Propagates failures from `writer`.
    pub fn write_timing_line<W: fmt::Write>(&self, writer: &mut W) -> fmt::Result {
        let snapshot = self.snapshot;
        write!(
            writer,
            "timing elapsed={} left={} feed-repeats={}/{}",
            snapshot.elapsed_ticks,
            snapshot.ticks_left_in_step,
            snapshot.repeats_remaining,
            snapshot.feed_repeats
        )
    }

    /// Writes the counter line (e.g. `counters ticks=822 pulses=1 sent=822 dropped=0`).
    ///
    /// # Errors
    ///
    /// Propagates failures from `writer`.
    pub fn write_counters_line<W: fmt::Write>(&self, writer: &mut W) -> fmt::Result {
        let snapshot = self.snapshot;
        write!(
            writer,
            "counters ticks={} pulses={}",
            snapshot.total_ticks, snapshot.pulses
        )?;
        match snapshot.transport {
            Some(stats) => write!(
                writer,
                " sent={} dropped={}",
                stats.reports_sent, stats.inbound_discarded
            ),
            None => writer.write_str(" sent=n/a dropped=n/a"),
        }
    }

    /// Renders every status line.
    #[cfg(feature = "alloc")]
    #[must_use]
    pub fn lines(&self) -> alloc::vec::Vec<alloc::string::String> {
        use alloc::string::String;

        let writers: [fn(&Self, &mut String) -> fmt::Result; 3] = [
            Self::write_phase_line,
            Self::write_timing_line,
            Self::write_counters_line,
        ];
        writers
            .iter()
            .map(|write| {
                let mut line = String::new();
                // Writing into a `String` cannot fail.
                let _ = write(self, &mut line);
                line
            })
            .collect()
    }
}
