//! Translates script symbols into report fields.

use super::{Buttons, Hat, InputReport, Stick};
use crate::scripts::ControlSymbol;

/// Applies `symbol` to a report that starts out neutral.
///
/// Symbols the shipped scripts never use (`UP`, `DOWN`, `RIGHT`, `X`, `Y`
/// and a lone `L` or `R`) leave the report untouched.
pub fn apply_symbol(symbol: ControlSymbol, report: &mut InputReport) {
    match symbol {
        ControlSymbol::Triggers => report.buttons.insert(Buttons::L | Buttons::R),
        ControlSymbol::A => report.buttons.insert(Buttons::A),
        ControlSymbol::B => report.buttons.insert(Buttons::B),
        ControlSymbol::Plus => report.buttons.insert(Buttons::PLUS),
        ControlSymbol::Left => report.hat = Hat::Left,
        ControlSymbol::Nothing => {
            report.left_stick = Stick::CENTERED;
            report.right_stick = Stick::CENTERED;
            report.hat = Hat::Neutral;
        }
        ControlSymbol::Up
        | ControlSymbol::Down
        | ControlSymbol::Right
        | ControlSymbol::X
        | ControlSymbol::Y
        | ControlSymbol::L
        | ControlSymbol::R => {}
    }
}

/// Builds a fresh neutral report carrying `symbol`.
#[must_use]
pub fn report_for(symbol: ControlSymbol) -> InputReport {
    let mut report = InputReport::neutral();
    apply_symbol(symbol, &mut report);
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triggers_press_both_shoulders() {
        let report = report_for(ControlSymbol::Triggers);
        assert_eq!(report.buttons, Buttons::L | Buttons::R);
        assert_eq!(report.hat, Hat::Neutral);
    }

    #[test]
    fn face_buttons_set_a_single_bit() {
        assert_eq!(report_for(ControlSymbol::A).buttons, Buttons::A);
        assert_eq!(report_for(ControlSymbol::B).buttons, Buttons::B);
        assert_eq!(report_for(ControlSymbol::Plus).buttons, Buttons::PLUS);
    }

    #[test]
    fn left_moves_the_hat_only() {
        let report = report_for(ControlSymbol::Left);
        assert_eq!(report.hat, Hat::Left);
        assert!(report.buttons.is_empty());
        assert!(report.left_stick.is_centered());
    }

    #[test]
    fn nothing_restores_the_neutral_pose() {
        let mut report = InputReport {
            hat: Hat::Down,
            left_stick: Stick::new(0, 255),
            right_stick: Stick::new(12, 34),
            ..InputReport::neutral()
        };
        apply_symbol(ControlSymbol::Nothing, &mut report);
        assert!(report.is_neutral());

        assert_eq!(report_for(ControlSymbol::Nothing), InputReport::neutral());
    }

    #[test]
    fn reserved_symbols_are_no_ops() {
        for symbol in [
            ControlSymbol::Up,
            ControlSymbol::Down,
            ControlSymbol::Right,
            ControlSymbol::X,
            ControlSymbol::Y,
            ControlSymbol::L,
            ControlSymbol::R,
        ] {
            assert!(report_for(symbol).is_neutral(), "{symbol}");
        }
    }

    #[test]
    fn mapper_is_total_over_every_symbol() {
        for symbol in ControlSymbol::ALL {
            let report = report_for(symbol);
            assert!(report.left_stick.is_centered());
            assert!(report.right_stick.is_centered());
        }
    }
}
