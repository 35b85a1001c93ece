//! Macro script data structures shared by firmware and host targets.
//!
//! A script is an immutable list of [`Step`]s, each holding one
//! [`ControlSymbol`] for a number of sequencer ticks. The four shipped
//! scripts live in the submodules and are validated at compile time; scripts
//! built at run time go through the same checks and report a
//! [`ScriptError`] instead.

use core::fmt;
use core::num::NonZeroU16;

pub mod after_feed;
pub mod buy;
pub mod feed;
pub mod sync;

pub use after_feed::{AFTER_FEED_SCRIPT, after_feed_script};
pub use buy::{BUY_ITEM_SCRIPT, buy_item_script};
pub use feed::{FEED_ITEM_SCRIPT, feed_item_script};
pub use sync::{SYNC_CONTROLLER_SCRIPT, sync_controller_script};

/// Ticks a button is held for a single press in the shipped scripts.
pub const PRESS_TICKS: u16 = 5;
/// Ticks spent idle between presses while menus animate.
pub const PAUSE_TICKS: u16 = 300;

/// Abstract input action referenced by a script step.
///
/// Symbols are not button bits: `TRIGGERS` expands to two buttons and
/// `NOTHING` re-asserts the neutral pose. See [`crate::report::mapper`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ControlSymbol {
    Up,
    Down,
    Left,
    Right,
    X,
    Y,
    A,
    B,
    L,
    R,
    Plus,
    Nothing,
    Triggers,
}

impl ControlSymbol {
    /// Every symbol in declaration order.
    pub const ALL: [ControlSymbol; 13] = [
        ControlSymbol::Up,
        ControlSymbol::Down,
        ControlSymbol::Left,
        ControlSymbol::Right,
        ControlSymbol::X,
        ControlSymbol::Y,
        ControlSymbol::A,
        ControlSymbol::B,
        ControlSymbol::L,
        ControlSymbol::R,
        ControlSymbol::Plus,
        ControlSymbol::Nothing,
        ControlSymbol::Triggers,
    ];

    /// Short label used in transcripts and status lines.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            ControlSymbol::Up => "UP",
            ControlSymbol::Down => "DOWN",
            ControlSymbol::Left => "LEFT",
            ControlSymbol::Right => "RIGHT",
            ControlSymbol::X => "X",
            ControlSymbol::Y => "Y",
            ControlSymbol::A => "A",
            ControlSymbol::B => "B",
            ControlSymbol::L => "L",
            ControlSymbol::R => "R",
            ControlSymbol::Plus => "PLUS",
            ControlSymbol::Nothing => "NOTHING",
            ControlSymbol::Triggers => "TRIGGERS",
        }
    }
}

impl fmt::Display for ControlSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Reasons a step or script is refused at construction.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ScriptError {
    /// The script contains no steps.
    Empty,
    /// A step was requested with a duration of zero ticks.
    ZeroDuration,
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::Empty => f.write_str("script has no steps"),
            ScriptError::ZeroDuration => f.write_str("step duration must be at least one tick"),
        }
    }
}

/// One symbol held for a number of ticks.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Step {
    pub symbol: ControlSymbol,
    pub duration: NonZeroU16,
}

impl Step {
    pub const fn new(symbol: ControlSymbol, duration: NonZeroU16) -> Self {
        Self { symbol, duration }
    }

    /// Builds a step from a raw tick count.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::ZeroDuration`] when `ticks` is zero.
    pub const fn try_new(symbol: ControlSymbol, ticks: u16) -> Result<Self, ScriptError> {
        match NonZeroU16::new(ticks) {
            Some(duration) => Ok(Self::new(symbol, duration)),
            None => Err(ScriptError::ZeroDuration),
        }
    }

    /// Configured duration in ticks.
    #[must_use]
    pub const fn ticks(&self) -> u16 {
        self.duration.get()
    }

    /// Ticks the sequencer actually spends on this step.
    ///
    /// The sequencer only leaves a step once the elapsed count is strictly
    /// greater than the duration, so every step is observed one extra tick.
    #[must_use]
    pub const fn held_ticks(&self) -> u32 {
        self.duration.get() as u32 + 1
    }
}

/// Const helper for literal script tables.
///
/// # Panics
///
/// Panics when `ticks` is zero. Used in `const` items, so the panic surfaces
/// as a compile error rather than at run time.
#[must_use]
pub const fn hold(symbol: ControlSymbol, ticks: u16) -> Step {
    match Step::try_new(symbol, ticks) {
        Ok(step) => step,
        Err(_) => panic!("script step must last at least one tick"),
    }
}

/// Immutable, non-empty command script.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Script {
    name: &'static str,
    steps: &'static [Step],
}

impl Script {
    /// Wraps a step table, rejecting empty tables.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Empty`] when `steps` has no entries.
    pub const fn new(name: &'static str, steps: &'static [Step]) -> Result<Self, ScriptError> {
        if steps.is_empty() {
            Err(ScriptError::Empty)
        } else {
            Ok(Self { name, steps })
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the ordered steps that make up the script.
    #[must_use]
    pub const fn steps(&self) -> &'static [Step] {
        self.steps
    }

    /// Returns the number of steps contained in the script.
    #[must_use]
    pub const fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Bounds-checked step lookup.
    #[must_use]
    pub fn step(&self, index: usize) -> Option<&'static Step> {
        self.steps.get(index)
    }

    /// Sum of the configured step durations.
    #[must_use]
    pub fn total_duration(&self) -> u32 {
        self.steps.iter().map(|step| u32::from(step.ticks())).sum()
    }

    /// Ticks needed for one complete pass, including the extra tick per step.
    #[must_use]
    pub fn ticks_per_pass(&self) -> u32 {
        self.steps.iter().map(Step::held_ticks).sum()
    }
}

/// Const unwrapping for the literal tables in this module.
pub(crate) const fn checked(result: Result<Script, ScriptError>) -> Script {
    match result {
        Ok(script) => script,
        Err(ScriptError::Empty) => panic!("script has no steps"),
        Err(ScriptError::ZeroDuration) => panic!("script step must last at least one tick"),
    }
}

/// Named stage of the macro, each bound to one script.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Phase {
    Sync,
    Buy,
    Feed,
    AfterFeed,
}

impl Phase {
    pub const ALL: [Phase; 4] = [Phase::Sync, Phase::Buy, Phase::Feed, Phase::AfterFeed];

    /// Phase entered once the current one completes.
    ///
    /// `Sync` only runs at power-up; the loop afterwards never returns to it.
    #[must_use]
    pub const fn successor(self) -> Phase {
        match self {
            Phase::Sync | Phase::AfterFeed => Phase::Buy,
            Phase::Buy => Phase::Feed,
            Phase::Feed => Phase::AfterFeed,
        }
    }

    /// Returns `true` for the phase that replays its script several times.
    #[must_use]
    pub const fn repeats(self) -> bool {
        matches!(self, Phase::Feed)
    }

    /// Deterministic index for per-phase tables.
    #[must_use]
    pub const fn as_index(self) -> usize {
        match self {
            Phase::Sync => 0,
            Phase::Buy => 1,
            Phase::Feed => 2,
            Phase::AfterFeed => 3,
        }
    }

    /// Attempts to construct a [`Phase`] from a raw index.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Phase::Sync),
            1 => Some(Phase::Buy),
            2 => Some(Phase::Feed),
            3 => Some(Phase::AfterFeed),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Phase::Sync => "sync",
            Phase::Buy => "buy",
            Phase::Feed => "feed",
            Phase::AfterFeed => "after-feed",
        }
    }

    /// Case-insensitive lookup accepting `after-feed` and `after_feed`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        Phase::ALL.into_iter().find(|phase| {
            let name = phase.name();
            name.len() == tag.len()
                && name
                    .bytes()
                    .zip(tag.bytes())
                    .all(|(a, b)| a.eq_ignore_ascii_case(&b) || (a == b'-' && b == b'_'))
        })
    }

    /// Script shipped for this phase.
    #[must_use]
    pub const fn standard_script(self) -> Script {
        match self {
            Phase::Sync => SYNC_CONTROLLER_SCRIPT,
            Phase::Buy => BUY_ITEM_SCRIPT,
            Phase::Feed => FEED_ITEM_SCRIPT,
            Phase::AfterFeed => AFTER_FEED_SCRIPT,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_duration_steps_are_rejected() {
        assert_eq!(
            Step::try_new(ControlSymbol::A, 0),
            Err(ScriptError::ZeroDuration)
        );
        let step = Step::try_new(ControlSymbol::A, 1).unwrap();
        assert_eq!(step.ticks(), 1);
        assert_eq!(step.held_ticks(), 2);
    }

    #[test]
    fn empty_script_is_rejected() {
        const NO_STEPS: [Step; 0] = [];
        assert_eq!(Script::new("empty", &NO_STEPS), Err(ScriptError::Empty));
    }

    #[test]
    fn script_reports_durations_and_bounds() {
        const STEPS: [Step; 2] = [
            hold(ControlSymbol::A, PRESS_TICKS),
            hold(ControlSymbol::Nothing, PAUSE_TICKS),
        ];
        let script = Script::new("press", &STEPS).unwrap();

        assert_eq!(script.name(), "press");
        assert_eq!(script.step_count(), 2);
        assert_eq!(script.total_duration(), 305);
        assert_eq!(script.ticks_per_pass(), 307);
        assert_eq!(script.step(1).map(|step| step.symbol), Some(ControlSymbol::Nothing));
        assert!(script.step(2).is_none());
    }

    #[test]
    fn phases_cycle_without_revisiting_sync() {
        assert_eq!(Phase::Sync.successor(), Phase::Buy);
        assert_eq!(Phase::Buy.successor(), Phase::Feed);
        assert_eq!(Phase::Feed.successor(), Phase::AfterFeed);
        assert_eq!(Phase::AfterFeed.successor(), Phase::Buy);
        assert!(Phase::Feed.repeats());
        assert!(!Phase::Buy.repeats());
    }

    #[test]
    fn phase_tags_and_indices_resolve() {
        for phase in Phase::ALL {
            assert_eq!(Phase::from_index(phase.as_index()), Some(phase));
            assert_eq!(Phase::from_tag(phase.name()), Some(phase));
        }
        assert_eq!(Phase::from_tag("AFTER_FEED"), Some(Phase::AfterFeed));
        assert_eq!(Phase::from_tag("Feed"), Some(Phase::Feed));
        assert_eq!(Phase::from_tag("drink"), None);
        assert_eq!(Phase::from_index(4), None);
    }
}
