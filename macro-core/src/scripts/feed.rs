//! Feeding script: three confirmations of the selected item.
//!
//! The sequencer replays this script several times per loop; see
//! [`crate::sequencer::DEFAULT_FEED_REPEATS`].

use super::{ControlSymbol, PAUSE_TICKS, PRESS_TICKS, Script, Step, checked, hold};

const CONFIRM: Step = hold(ControlSymbol::A, PRESS_TICKS);
const PAUSE: Step = hold(ControlSymbol::Nothing, PAUSE_TICKS);

/// Ordered steps of the `feed_item` script.
pub const FEED_ITEM_STEPS: [Step; 6] = [CONFIRM, PAUSE, CONFIRM, PAUSE, CONFIRM, PAUSE];

/// Script bound to [`super::Phase::Feed`].
pub const FEED_ITEM_SCRIPT: Script = checked(Script::new("feed_item", &FEED_ITEM_STEPS));

/// Returns the shared `feed_item` script.
#[must_use]
pub const fn feed_item_script() -> Script {
    FEED_ITEM_SCRIPT
}
