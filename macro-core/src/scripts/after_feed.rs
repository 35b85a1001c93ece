//! Backs out of the feeding menus with four B presses.

use super::{ControlSymbol, PAUSE_TICKS, PRESS_TICKS, Script, Step, checked, hold};

const CANCEL: Step = hold(ControlSymbol::B, PRESS_TICKS);
const PAUSE: Step = hold(ControlSymbol::Nothing, PAUSE_TICKS);

/// Ordered steps of the `after_feed` script.
pub const AFTER_FEED_STEPS: [Step; 8] = [
    CANCEL, PAUSE, CANCEL, PAUSE, CANCEL, PAUSE, CANCEL, PAUSE,
];

/// Script bound to [`super::Phase::AfterFeed`].
pub const AFTER_FEED_SCRIPT: Script = checked(Script::new("after_feed", &AFTER_FEED_STEPS));

/// Returns the shared `after_feed` script.
#[must_use]
pub const fn after_feed_script() -> Script {
    AFTER_FEED_SCRIPT
}
