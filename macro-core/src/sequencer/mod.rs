//! Tick-driven macro automaton.
//!
//! [`Sequencer::tick`] is the single entry point: every call produces one
//! [`InputReport`] for the current step, advances the step counters, and
//! rolls the phase over when the active script has been fully replayed. The
//! state is owned by the [`Sequencer`] value and only `tick` mutates it, so
//! exclusive access is enforced by `&mut self` rather than by locking.
//!
//! Timing is counted in logical ticks. Pacing those ticks against real time
//! belongs to the caller (the firmware USB task or the host emulator).

use core::fmt;
use core::num::NonZeroU8;

use crate::report::{InputReport, apply_symbol};
use crate::scripts::{Phase, Script, ScriptError, Step};

pub mod log;

pub use log::{CYCLE_LOG_CAPACITY, CycleLog};

/// Number of `feed_item` passes per loop when the pouch has not been upgraded.
pub const DEFAULT_FEED_REPEATS: u8 = 10;

const DEFAULT_FEED_REPEATS_NZ: NonZeroU8 = match NonZeroU8::new(DEFAULT_FEED_REPEATS) {
    Some(value) => value,
    None => panic!("feed repeat count must be non-zero"),
};

/// Errors raised while assembling a [`MacroProgram`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ProgramError {
    /// The script supplied for `phase` is malformed.
    Script { phase: Phase, source: ScriptError },
    /// The feed phase must run its script at least once.
    ZeroRepeats,
}

impl fmt::Display for ProgramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramError::Script { phase, source } => write!(f, "{phase} script: {source}"),
            ProgramError::ZeroRepeats => f.write_str("feed repeat count must be at least 1"),
        }
    }
}

/// Raw step table used when building a program at run time.
pub type StepTable = (&'static str, &'static [Step]);

/// Scripts bound to each phase plus the feed repeat count.
///
/// Fixed once the sequencer is built; nothing mutates a program afterwards.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct MacroProgram {
    scripts: [Script; 4],
    feed_repeats: NonZeroU8,
}

impl MacroProgram {
    /// The shipped scripts with [`DEFAULT_FEED_REPEATS`].
    pub const STANDARD: MacroProgram = MacroProgram {
        scripts: [
            Phase::Sync.standard_script(),
            Phase::Buy.standard_script(),
            Phase::Feed.standard_script(),
            Phase::AfterFeed.standard_script(),
        ],
        feed_repeats: DEFAULT_FEED_REPEATS_NZ,
    };

    #[must_use]
    pub const fn standard() -> Self {
        Self::STANDARD
    }

    /// Builds a program from raw step tables, indexed by [`Phase::as_index`].
    ///
    /// # Errors
    ///
    /// Returns [`ProgramError::Script`] for the first empty table and
    /// [`ProgramError::ZeroRepeats`] when `feed_repeats` is zero.
    pub fn from_tables(tables: [StepTable; 4], feed_repeats: u8) -> Result<Self, ProgramError> {
        let mut program = Self::STANDARD.with_feed_repeats(feed_repeats)?;
        for phase in Phase::ALL {
            let (name, steps) = tables[phase.as_index()];
            let script =
                Script::new(name, steps).map_err(|source| ProgramError::Script { phase, source })?;
            program = program.with_script(phase, script);
        }
        Ok(program)
    }

    /// Replaces the script bound to `phase`.
    #[must_use]
    pub const fn with_script(mut self, phase: Phase, script: Script) -> Self {
        self.scripts[phase.as_index()] = script;
        self
    }

    /// Overrides how many times the feed script runs per loop.
    ///
    /// # Errors
    ///
    /// Returns [`ProgramError::ZeroRepeats`] when `repeats` is zero.
    pub const fn with_feed_repeats(mut self, repeats: u8) -> Result<Self, ProgramError> {
        match NonZeroU8::new(repeats) {
            Some(value) => {
                self.feed_repeats = value;
                Ok(self)
            }
            None => Err(ProgramError::ZeroRepeats),
        }
    }

    /// Script bound to `phase`.
    #[must_use]
    pub const fn script(&self, phase: Phase) -> Script {
        self.scripts[phase.as_index()]
    }

    #[must_use]
    pub const fn feed_repeats(&self) -> u8 {
        self.feed_repeats.get()
    }

    /// Ticks spent in `phase` from entry until its successor takes over.
    #[must_use]
    pub fn phase_ticks(&self, phase: Phase) -> u32 {
        let pass = self.script(phase).ticks_per_pass();
        if phase.repeats() {
            pass * u32::from(self.feed_repeats())
        } else {
            pass
        }
    }
}

impl Default for MacroProgram {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Snapshot of the automaton counters.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SequencerState {
    pub phase: Phase,
    /// Index of the step the next tick will play.
    pub step_index: usize,
    /// Ticks already spent on the current step.
    pub elapsed_ticks: u32,
    /// Feed passes left before the loop moves on to `AfterFeed`.
    pub repeats_remaining: u8,
}

impl SequencerState {
    /// Power-up state: first step of the sync script.
    #[must_use]
    pub const fn initial(program: &MacroProgram) -> Self {
        Self {
            phase: Phase::Sync,
            step_index: 0,
            elapsed_ticks: 0,
            repeats_remaining: program.feed_repeats(),
        }
    }
}

/// Raised each time a phase's script has been played through once.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CycleEvent {
    /// Phase whose script just finished.
    pub completed: Phase,
    /// Phase the next tick plays.
    pub next: Phase,
    /// Feed passes still owed after this one.
    pub repeats_remaining: u8,
    /// Tick number (1-based) on which the pass finished.
    pub tick: u64,
}

impl CycleEvent {
    /// Returns `true` when this pass moved the automaton to a new phase.
    #[must_use]
    pub const fn advanced(&self) -> bool {
        self.completed.as_index() != self.next.as_index()
    }
}

impl fmt::Display for CycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pulse tick={} {}", self.tick, self.completed)?;
        if self.advanced() {
            write!(f, " -> {}", self.next)
        } else {
            write!(f, " repeats-left={}", self.repeats_remaining)
        }
    }
}

/// Receives cycle-completion pulses from the sequencer.
///
/// Implementations must not block; the call happens inside `tick`.
pub trait CycleObserver {
    fn on_cycle_complete(&mut self, event: CycleEvent);
}

impl<T> CycleObserver for &mut T
where
    T: CycleObserver + ?Sized,
{
    fn on_cycle_complete(&mut self, event: CycleEvent) {
        (**self).on_cycle_complete(event);
    }
}

/// Observer that ignores every pulse.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopObserver;

impl NoopObserver {
    /// Creates a new no-op observer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl CycleObserver for NoopObserver {
    fn on_cycle_complete(&mut self, _: CycleEvent) {}
}

/// The macro automaton.
#[derive(Debug)]
pub struct Sequencer<O = NoopObserver> {
    program: MacroProgram,
    state: SequencerState,
    observer: O,
    ticks: u64,
    pulses: u32,
}

impl Sequencer<NoopObserver> {
    /// Creates a sequencer without a pulse observer.
    #[must_use]
    pub const fn new(program: MacroProgram) -> Self {
        Self::with_observer(program, NoopObserver)
    }
}

impl Default for Sequencer<NoopObserver> {
    fn default() -> Self {
        Self::new(MacroProgram::STANDARD)
    }
}

impl<O> Sequencer<O>
where
    O: CycleObserver,
{
    /// Creates a sequencer that reports cycle completion to `observer`.
    pub const fn with_observer(program: MacroProgram, observer: O) -> Self {
        Self {
            state: SequencerState::initial(&program),
            program,
            observer,
            ticks: 0,
            pulses: 0,
        }
    }

    /// Plays one tick and returns the report for it.
    pub fn tick(&mut self) -> InputReport {
        self.ticks = self.ticks.wrapping_add(1);

        let mut report = InputReport::neutral();
        let script = self.program.script(self.state.phase);

        if let Some(step) = script.step(self.state.step_index) {
            apply_symbol(step.symbol, &mut report);
            self.state.elapsed_ticks += 1;
            // Strictly greater: a step of duration `d` is played `d + 1` times.
            if self.state.elapsed_ticks > u32::from(step.ticks()) {
                self.state.elapsed_ticks = 0;
                self.state.step_index += 1;
            }
        }

        if self.state.step_index >= script.step_count() {
            self.finish_pass();
        }

        report
    }

    fn finish_pass(&mut self) {
        let completed = self.state.phase;
        self.state.step_index = 0;
        self.state.elapsed_ticks = 0;

        let next = if completed.repeats() {
            self.state.repeats_remaining = self.state.repeats_remaining.saturating_sub(1);
            if self.state.repeats_remaining == 0 {
                self.state.repeats_remaining = self.program.feed_repeats();
                completed.successor()
            } else {
                completed
            }
        } else {
            completed.successor()
        };

        self.state.phase = next;
        self.pulses = self.pulses.wrapping_add(1);
        self.observer.on_cycle_complete(CycleEvent {
            completed,
            next,
            repeats_remaining: self.state.repeats_remaining,
            tick: self.ticks,
        });
    }

    /// Copy of the current counters.
    #[must_use]
    pub const fn state(&self) -> SequencerState {
        self.state
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Step the next tick will play.
    #[must_use]
    pub fn current_step(&self) -> Option<&'static Step> {
        self.program
            .script(self.state.phase)
            .step(self.state.step_index)
    }

    #[must_use]
    pub const fn program(&self) -> &MacroProgram {
        &self.program
    }

    /// Ticks played since construction.
    #[must_use]
    pub const fn total_ticks(&self) -> u64 {
        self.ticks
    }

    /// Cycle-completion pulses emitted since construction.
    #[must_use]
    pub const fn pulse_count(&self) -> u32 {
        self.pulses
    }

    pub const fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Consumes the sequencer and returns the observer.
    pub fn into_observer(self) -> O {
        self.observer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::Buttons;
    use crate::scripts::{ControlSymbol, hold};

    const TINY_STEPS: [Step; 2] = [hold(ControlSymbol::A, 1), hold(ControlSymbol::Nothing, 2)];
    const TINY: Script = crate::scripts::checked(Script::new("tiny", &TINY_STEPS));

    fn tiny_program(repeats: u8) -> MacroProgram {
        MacroProgram::standard()
            .with_script(Phase::Sync, TINY)
            .with_script(Phase::Buy, TINY)
            .with_script(Phase::Feed, TINY)
            .with_script(Phase::AfterFeed, TINY)
            .with_feed_repeats(repeats)
            .unwrap()
    }

    #[derive(Default)]
    struct Pulses(heapless::Vec<CycleEvent, 16>);

    impl CycleObserver for Pulses {
        fn on_cycle_complete(&mut self, event: CycleEvent) {
            let _ = self.0.push(event);
        }
    }

    #[test]
    fn initial_state_is_first_sync_step() {
        let sequencer = Sequencer::default();
        assert_eq!(
            sequencer.state(),
            SequencerState {
                phase: Phase::Sync,
                step_index: 0,
                elapsed_ticks: 0,
                repeats_remaining: DEFAULT_FEED_REPEATS,
            }
        );
        assert_eq!(sequencer.total_ticks(), 0);
        assert_eq!(
            sequencer.current_step().map(|step| step.symbol),
            Some(ControlSymbol::Nothing)
        );
    }

    #[test]
    fn each_step_is_held_one_tick_longer_than_its_duration() {
        let mut sequencer = Sequencer::new(tiny_program(1));

        // A(1) is played on ticks 1 and 2.
        assert_eq!(sequencer.tick().buttons, Buttons::A);
        assert_eq!(sequencer.state().elapsed_ticks, 1);
        assert_eq!(sequencer.tick().buttons, Buttons::A);
        assert_eq!(sequencer.state().step_index, 1);
        assert_eq!(sequencer.state().elapsed_ticks, 0);

        // NOTHING(2) is played on ticks 3, 4 and 5, then the phase rolls over.
        for _ in 0..3 {
            assert_eq!(sequencer.phase(), Phase::Sync);
            assert!(sequencer.tick().is_neutral());
        }
        assert_eq!(sequencer.phase(), Phase::Buy);
        assert_eq!(sequencer.state().step_index, 0);
    }

    #[test]
    fn feed_replays_until_repeats_are_spent() {
        let mut sequencer = Sequencer::with_observer(tiny_program(3), Pulses::default());
        let pass = u64::from(TINY.ticks_per_pass());

        // sync + buy
        for _ in 0..pass * 2 {
            sequencer.tick();
        }
        assert_eq!(sequencer.phase(), Phase::Feed);

        for expected_remaining in [2, 1] {
            for _ in 0..pass {
                sequencer.tick();
            }
            assert_eq!(sequencer.phase(), Phase::Feed);
            assert_eq!(sequencer.state().repeats_remaining, expected_remaining);
        }

        for _ in 0..pass {
            sequencer.tick();
        }
        assert_eq!(sequencer.phase(), Phase::AfterFeed);
        assert_eq!(sequencer.state().repeats_remaining, 3);

        let events = &sequencer.observer().0;
        assert_eq!(events.len(), 5);
        assert!(events[0].advanced());
        assert!(!events[2].advanced());
        assert!(!events[3].advanced());
        assert_eq!(events[4].completed, Phase::Feed);
        assert_eq!(events[4].next, Phase::AfterFeed);
        assert_eq!(events[4].tick, pass * 5);
    }

    #[test]
    fn single_repeat_feed_behaves_like_other_phases() {
        let mut sequencer = Sequencer::new(tiny_program(1));
        let pass = u64::from(TINY.ticks_per_pass());
        for _ in 0..pass * 3 {
            sequencer.tick();
        }
        assert_eq!(sequencer.phase(), Phase::AfterFeed);
        assert_eq!(sequencer.state().repeats_remaining, 1);
        for _ in 0..pass {
            sequencer.tick();
        }
        assert_eq!(sequencer.phase(), Phase::Buy);
        assert_eq!(sequencer.pulse_count(), 4);
    }

    #[test]
    fn program_rejects_zero_repeats_and_empty_tables() {
        assert_eq!(
            MacroProgram::standard().with_feed_repeats(0),
            Err(ProgramError::ZeroRepeats)
        );

        const EMPTY: [Step; 0] = [];
        let tables: [StepTable; 4] = [
            ("sync", &TINY_STEPS),
            ("buy", &TINY_STEPS),
            ("feed", &EMPTY),
            ("after", &TINY_STEPS),
        ];
        assert_eq!(
            MacroProgram::from_tables(tables, 10),
            Err(ProgramError::Script {
                phase: Phase::Feed,
                source: ScriptError::Empty,
            })
        );
    }

    #[test]
    fn program_from_tables_binds_scripts_by_phase() {
        let tables: [StepTable; 4] = [
            ("sync", &TINY_STEPS),
            ("buy", &TINY_STEPS),
            ("feed", &TINY_STEPS),
            ("after", &TINY_STEPS),
        ];
        let program = MacroProgram::from_tables(tables, 2).unwrap();
        assert_eq!(program.script(Phase::Feed).name(), "feed");
        assert_eq!(program.feed_repeats(), 2);
        assert_eq!(program.phase_ticks(Phase::Feed), 10);
        assert_eq!(program.phase_ticks(Phase::Buy), 5);
    }

    #[test]
    fn standard_program_phase_lengths() {
        let program = MacroProgram::standard();
        assert_eq!(program.phase_ticks(Phase::Sync), 822);
        assert_eq!(program.phase_ticks(Phase::Buy), 4298);
        assert_eq!(program.phase_ticks(Phase::Feed), 9210);
        assert_eq!(program.phase_ticks(Phase::AfterFeed), 1228);
    }

    #[test]
    fn cycle_event_renders_transition_or_repeat() {
        extern crate std;
        use std::string::ToString;

        let advanced = CycleEvent {
            completed: Phase::AfterFeed,
            next: Phase::Buy,
            repeats_remaining: 10,
            tick: 42,
        };
        assert_eq!(advanced.to_string(), "pulse tick=42 after-feed -> buy");

        let repeat = CycleEvent {
            completed: Phase::Feed,
            next: Phase::Feed,
            repeats_remaining: 7,
            tick: 9,
        };
        assert_eq!(repeat.to_string(), "pulse tick=9 feed repeats-left=7");
    }
}
