//! Transport-facing wrapper around the sequencer.
//!
//! The USB task (or the emulator) owns one [`ReportPump`]. Each time the host
//! is ready for an IN report it calls [`ReportPump::poll_outbound`]; each OUT
//! report the host sends goes through [`ReportPump::drain_inbound`], which
//! only counts it. Nothing the host sends can influence the macro.

use crate::report::{INPUT_REPORT_LEN, InputReport};
use crate::sequencer::{CycleObserver, MacroProgram, NoopObserver, Sequencer, SequencerState};

/// Counters kept by the pump for diagnostics.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct PumpStats {
    /// IN reports produced.
    pub reports_sent: u64,
    /// OUT frames received and dropped.
    pub inbound_discarded: u32,
    /// Bytes contained in the dropped OUT frames.
    pub inbound_bytes: u64,
}

/// Drives a [`Sequencer`] once per transport poll.
#[derive(Debug)]
pub struct ReportPump<O = NoopObserver> {
    sequencer: Sequencer<O>,
    stats: PumpStats,
}

impl ReportPump<NoopObserver> {
    #[must_use]
    pub const fn new(program: MacroProgram) -> Self {
        Self::from_sequencer(Sequencer::new(program))
    }
}

impl<O> ReportPump<O>
where
    O: CycleObserver,
{
    /// Creates a pump that forwards cycle pulses to `observer`.
    pub const fn with_observer(program: MacroProgram, observer: O) -> Self {
        Self::from_sequencer(Sequencer::with_observer(program, observer))
    }

    pub const fn from_sequencer(sequencer: Sequencer<O>) -> Self {
        Self {
            sequencer,
            stats: PumpStats {
                reports_sent: 0,
                inbound_discarded: 0,
                inbound_bytes: 0,
            },
        }
    }

    /// Advances the macro by one tick and returns the report to transmit.
    pub fn poll_outbound(&mut self) -> InputReport {
        self.stats.reports_sent = self.stats.reports_sent.wrapping_add(1);
        self.sequencer.tick()
    }

    /// Same as [`Self::poll_outbound`], already serialized for the endpoint.
    pub fn poll_outbound_bytes(&mut self) -> [u8; INPUT_REPORT_LEN] {
        self.poll_outbound().to_bytes()
    }

    /// Accepts one inbound frame and drops it.
    pub fn drain_inbound(&mut self, frame: &[u8]) {
        self.stats.inbound_discarded = self.stats.inbound_discarded.wrapping_add(1);
        self.stats.inbound_bytes = self.stats.inbound_bytes.wrapping_add(frame.len() as u64);
    }

    #[must_use]
    pub const fn stats(&self) -> PumpStats {
        self.stats
    }

    #[must_use]
    pub const fn state(&self) -> SequencerState {
        self.sequencer.state()
    }

    pub const fn sequencer(&self) -> &Sequencer<O> {
        &self.sequencer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        self.sequencer.observer_mut()
    }
}
