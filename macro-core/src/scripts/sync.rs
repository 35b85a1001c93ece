//! Controller pairing script.
//!
//! The Switch only accepts a new controller after it sees the L and R
//! triggers pressed together on the "Change Grip/Order" screen. The script
//! idles while enumeration settles, presses both triggers twice, then
//! confirms with A.

use super::{ControlSymbol, PRESS_TICKS, Script, Step, checked, hold};

/// Idle time before and after the pairing presses.
pub const SYNC_SETTLE_TICKS: u16 = 250;
/// Gap between the two trigger presses and before the confirming A.
pub const SYNC_GAP_TICKS: u16 = 150;

/// Ordered steps of the `sync_controller` script.
pub const SYNC_CONTROLLER_STEPS: [Step; 7] = [
    hold(ControlSymbol::Nothing, SYNC_SETTLE_TICKS),
    hold(ControlSymbol::Triggers, PRESS_TICKS),
    hold(ControlSymbol::Nothing, SYNC_GAP_TICKS),
    hold(ControlSymbol::Triggers, PRESS_TICKS),
    hold(ControlSymbol::Nothing, SYNC_GAP_TICKS),
    hold(ControlSymbol::A, PRESS_TICKS),
    hold(ControlSymbol::Nothing, SYNC_SETTLE_TICKS),
];

/// Script bound to [`super::Phase::Sync`].
pub const SYNC_CONTROLLER_SCRIPT: Script =
    checked(Script::new("sync_controller", &SYNC_CONTROLLER_STEPS));

/// Returns the shared `sync_controller` script.
#[must_use]
pub const fn sync_controller_script() -> Script {
    SYNC_CONTROLLER_SCRIPT
}
