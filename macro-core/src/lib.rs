#![no_std]

#[cfg(feature = "alloc")]
extern crate alloc;

// Shared logic for the feed macro controller.
//
// Everything that decides what the emulated controller does lives here: the
// script tables, the symbol mapper, the tick-driven sequencer and the report
// wire format. The crate avoids the Rust standard library so the firmware and
// the host emulator compile the exact same automaton.

pub mod repl;
pub mod report;
pub mod scripts;
pub mod sequencer;
pub mod transport;
