//! Shop purchase script.
//!
//! Walks the vendor dialogue: talk, pick the item, confirm the quantity with
//! one LEFT to wrap to the maximum, back out of the follow-up prompts, open
//! the pouch with PLUS and select the item ready for feeding. Every press is
//! followed by a long pause so menu animations finish.

use super::{ControlSymbol, PAUSE_TICKS, PRESS_TICKS, Script, Step, checked, hold};

const fn press(symbol: ControlSymbol) -> Step {
    hold(symbol, PRESS_TICKS)
}

const PAUSE: Step = hold(ControlSymbol::Nothing, PAUSE_TICKS);

/// Ordered steps of the `buy_item` script.
pub const BUY_ITEM_STEPS: [Step; 28] = [
    press(ControlSymbol::A),
    PAUSE,
    press(ControlSymbol::A),
    PAUSE,
    press(ControlSymbol::A),
    PAUSE,
    press(ControlSymbol::A),
    PAUSE,
    press(ControlSymbol::A),
    PAUSE,
    press(ControlSymbol::Left),
    PAUSE,
    press(ControlSymbol::A),
    PAUSE,
    press(ControlSymbol::B),
    PAUSE,
    press(ControlSymbol::B),
    PAUSE,
    press(ControlSymbol::Plus),
    PAUSE,
    press(ControlSymbol::A),
    PAUSE,
    press(ControlSymbol::A),
    PAUSE,
    press(ControlSymbol::Left),
    PAUSE,
    press(ControlSymbol::A),
    PAUSE,
];

/// Script bound to [`super::Phase::Buy`].
pub const BUY_ITEM_SCRIPT: Script = checked(Script::new("buy_item", &BUY_ITEM_STEPS));

/// Returns the shared `buy_item` script.
#[must_use]
pub const fn buy_item_script() -> Script {
    BUY_ITEM_SCRIPT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buy_item_alternates_presses_and_pauses() {
        let script = buy_item_script();
        assert_eq!(script.name(), "buy_item");
        assert_eq!(script.step_count(), 28);

        for (index, step) in script.steps().iter().enumerate() {
            if index % 2 == 1 {
                assert_eq!(step.symbol, ControlSymbol::Nothing, "step {index}");
                assert_eq!(step.ticks(), PAUSE_TICKS, "step {index}");
            } else {
                assert_ne!(step.symbol, ControlSymbol::Nothing, "step {index}");
                assert_eq!(step.ticks(), PRESS_TICKS, "step {index}");
            }
        }

        let presses: heapless::Vec<ControlSymbol, 14> =
            script.steps().iter().step_by(2).map(|step| step.symbol).collect();
        assert_eq!(
            presses.as_slice(),
            &[
                ControlSymbol::A,
                ControlSymbol::A,
                ControlSymbol::A,
                ControlSymbol::A,
                ControlSymbol::A,
                ControlSymbol::Left,
                ControlSymbol::A,
                ControlSymbol::B,
                ControlSymbol::B,
                ControlSymbol::Plus,
                ControlSymbol::A,
                ControlSymbol::A,
                ControlSymbol::Left,
                ControlSymbol::A,
            ]
        );

        assert_eq!(script.total_duration(), 14 * 5 + 14 * 300);
        assert_eq!(script.ticks_per_pass(), 4298);
    }
}
