//! Console tooling shared by the emulator and any future operator port.
//!
//! The command grammar lives in [`grammar`]; [`status`] renders the
//! sequencer counters into stable text lines.

pub mod grammar;
pub mod status;
