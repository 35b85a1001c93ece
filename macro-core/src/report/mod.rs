//! Virtual controller report shared by firmware and host targets.
//!
//! The layout mirrors the HORI Pokken Tournament Pro Pad, which the Switch
//! treats as a Pro Controller: a 16-bit button mask, a hat nibble, four
//! unsigned stick axes centred on [`STICK_CENTER`], and one vendor byte. The
//! sequencer builds a fresh [`InputReport`] every tick; nothing here is
//! retained between ticks.

use core::fmt;

pub mod descriptor;
pub mod mapper;

pub use mapper::apply_symbol;

/// Neutral value for every analog axis.
pub const STICK_CENTER: u8 = 128;
/// Smallest axis value (full left / full up).
pub const STICK_MIN: u8 = 0;
/// Largest axis value (full right / full down).
pub const STICK_MAX: u8 = 255;

/// Size of the IN report sent to the host.
pub const INPUT_REPORT_LEN: usize = 8;
/// Size of the OUT report the host may send; its content is ignored.
pub const OUTPUT_REPORT_LEN: usize = 8;

/// Button bitmask using the Switch bit assignments.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Buttons(u16);

impl Buttons {
    pub const NONE: Buttons = Buttons(0);
    pub const Y: Buttons = Buttons(0x0001);
    pub const B: Buttons = Buttons(0x0002);
    pub const A: Buttons = Buttons(0x0004);
    pub const X: Buttons = Buttons(0x0008);
    pub const L: Buttons = Buttons(0x0010);
    pub const R: Buttons = Buttons(0x0020);
    pub const ZL: Buttons = Buttons(0x0040);
    pub const ZR: Buttons = Buttons(0x0080);
    pub const MINUS: Buttons = Buttons(0x0100);
    pub const PLUS: Buttons = Buttons(0x0200);
    pub const LCLICK: Buttons = Buttons(0x0400);
    pub const RCLICK: Buttons = Buttons(0x0800);
    pub const HOME: Buttons = Buttons(0x1000);
    pub const CAPTURE: Buttons = Buttons(0x2000);

    #[must_use]
    pub const fn from_bits(bits: u16) -> Self {
        Buttons(bits)
    }

    #[must_use]
    pub const fn bits(self) -> u16 {
        self.0
    }

    #[must_use]
    pub const fn union(self, other: Buttons) -> Buttons {
        Buttons(self.0 | other.0)
    }

    /// Returns `true` when every bit of `other` is set.
    #[must_use]
    pub const fn contains(self, other: Buttons) -> bool {
        self.0 & other.0 == other.0
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn insert(&mut self, other: Buttons) {
        self.0 |= other.0;
    }
}

impl core::ops::BitOr for Buttons {
    type Output = Buttons;

    fn bitor(self, rhs: Buttons) -> Buttons {
        self.union(rhs)
    }
}

impl fmt::Display for Buttons {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(Buttons, &str); 14] = [
            (Buttons::Y, "Y"),
            (Buttons::B, "B"),
            (Buttons::A, "A"),
            (Buttons::X, "X"),
            (Buttons::L, "L"),
            (Buttons::R, "R"),
            (Buttons::ZL, "ZL"),
            (Buttons::ZR, "ZR"),
            (Buttons::MINUS, "MINUS"),
            (Buttons::PLUS, "PLUS"),
            (Buttons::LCLICK, "LCLICK"),
            (Buttons::RCLICK, "RCLICK"),
            (Buttons::HOME, "HOME"),
            (Buttons::CAPTURE, "CAPTURE"),
        ];

        if self.is_empty() {
            return f.write_str("-");
        }

        let mut first = true;
        for (bit, name) in NAMES {
            if self.contains(bit) {
                if !first {
                    f.write_str("+")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Directional pad position.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Hat {
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
    Left,
    UpLeft,
    #[default]
    Neutral,
}

impl Hat {
    const NEUTRAL_CODE: u8 = 0x08;

    /// Encodes the position as the report's hat value.
    #[must_use]
    pub const fn to_raw(self) -> u8 {
        match self {
            Hat::Up => 0x00,
            Hat::UpRight => 0x01,
            Hat::Right => 0x02,
            Hat::DownRight => 0x03,
            Hat::Down => 0x04,
            Hat::DownLeft => 0x05,
            Hat::Left => 0x06,
            Hat::UpLeft => 0x07,
            Hat::Neutral => Self::NEUTRAL_CODE,
        }
    }

    /// Decodes a raw hat value; anything outside `0..=7` reads as neutral.
    #[must_use]
    pub const fn from_raw(code: u8) -> Self {
        match code {
            0x00 => Hat::Up,
            0x01 => Hat::UpRight,
            0x02 => Hat::Right,
            0x03 => Hat::DownRight,
            0x04 => Hat::Down,
            0x05 => Hat::DownLeft,
            0x06 => Hat::Left,
            0x07 => Hat::UpLeft,
            _ => Hat::Neutral,
        }
    }
}

impl fmt::Display for Hat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Hat::Up => "up",
            Hat::UpRight => "up-right",
            Hat::Right => "right",
            Hat::DownRight => "down-right",
            Hat::Down => "down",
            Hat::DownLeft => "down-left",
            Hat::Left => "left",
            Hat::UpLeft => "up-left",
            Hat::Neutral => "neutral",
        };
        f.write_str(label)
    }
}

/// Two-axis analog stick.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Stick {
    pub x: u8,
    pub y: u8,
}

impl Stick {
    pub const CENTERED: Stick = Stick::new(STICK_CENTER, STICK_CENTER);

    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn is_centered(self) -> bool {
        self.x == STICK_CENTER && self.y == STICK_CENTER
    }
}

impl Default for Stick {
    fn default() -> Self {
        Self::CENTERED
    }
}

/// One emulated controller frame.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct InputReport {
    pub buttons: Buttons,
    pub hat: Hat,
    pub left_stick: Stick,
    pub right_stick: Stick,
    pub vendor: u8,
}

impl InputReport {
    /// All sticks centred, hat neutral, no buttons.
    #[must_use]
    pub const fn neutral() -> Self {
        Self {
            buttons: Buttons::NONE,
            hat: Hat::Neutral,
            left_stick: Stick::CENTERED,
            right_stick: Stick::CENTERED,
            vendor: 0,
        }
    }

    /// Returns `true` when the report carries no input at all.
    #[must_use]
    pub const fn is_neutral(&self) -> bool {
        self.buttons.is_empty()
            && matches!(self.hat, Hat::Neutral)
            && self.left_stick.is_centered()
            && self.right_stick.is_centered()
    }

    /// Serializes the report into the 8-byte HID IN layout.
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; INPUT_REPORT_LEN] {
        let [lo, hi] = self.buttons.bits().to_le_bytes();
        [
            lo,
            hi,
            self.hat.to_raw(),
            self.left_stick.x,
            self.left_stick.y,
            self.right_stick.x,
            self.right_stick.y,
            self.vendor,
        ]
    }

    /// Parses an 8-byte HID IN report.
    #[must_use]
    pub const fn from_bytes(bytes: &[u8; INPUT_REPORT_LEN]) -> Self {
        Self {
            buttons: Buttons::from_bits(u16::from_le_bytes([bytes[0], bytes[1]])),
            hat: Hat::from_raw(bytes[2]),
            left_stick: Stick::new(bytes[3], bytes[4]),
            right_stick: Stick::new(bytes[5], bytes[6]),
            vendor: bytes[7],
        }
    }
}

impl fmt::Display for InputReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "buttons={} hat={} ls={},{} rs={},{}",
            self.buttons,
            self.hat,
            self.left_stick.x,
            self.left_stick.y,
            self.right_stick.x,
            self.right_stick.y
        )
    }
}
