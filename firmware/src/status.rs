#![cfg_attr(not(target_os = "none"), allow(dead_code))]

//! Shared status storage for the firmware target.
//!
//! The USB task publishes the macro position and transport counters after
//! every report; the heartbeat task reads them back without touching the
//! pump itself.

use macro_core::repl::status::StatusSnapshot;
use macro_core::scripts::Phase;
use portable_atomic::{AtomicBool, AtomicU8, AtomicU32, AtomicU64, Ordering};

static USB_CONFIGURED: AtomicBool = AtomicBool::new(false);
/// [`Phase::as_index`] of the active phase.
static PHASE: AtomicU8 = AtomicU8::new(0);
static STEP_INDEX: AtomicU32 = AtomicU32::new(0);
static REPEATS_REMAINING: AtomicU8 = AtomicU8::new(0);
static TOTAL_TICKS: AtomicU64 = AtomicU64::new(0);
static PULSES: AtomicU32 = AtomicU32::new(0);
static REPORTS_SENT: AtomicU64 = AtomicU64::new(0);
static INBOUND_DISCARDED: AtomicU32 = AtomicU32::new(0);

/// Values read back by [`snapshot`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FirmwareStatus {
    pub usb_configured: bool,
    pub phase: Phase,
    pub step_index: u32,
    pub repeats_remaining: u8,
    pub total_ticks: u64,
    pub pulses: u32,
    pub reports_sent: u64,
    pub inbound_discarded: u32,
}

/// Updates the cached USB configuration flag.
pub fn set_usb_configured(configured: bool) {
    USB_CONFIGURED.store(configured, Ordering::Relaxed);
}

/// Stores the counters captured from the pump.
pub fn publish(snapshot: &StatusSnapshot) {
    PHASE.store(phase_code(snapshot.phase), Ordering::Relaxed);
    STEP_INDEX.store(
        u32::try_from(snapshot.step_index).unwrap_or(u32::MAX),
        Ordering::Relaxed,
    );
    REPEATS_REMAINING.store(snapshot.repeats_remaining, Ordering::Relaxed);
    TOTAL_TICKS.store(snapshot.total_ticks, Ordering::Relaxed);
    PULSES.store(snapshot.pulses, Ordering::Relaxed);

    if let Some(stats) = snapshot.transport {
        REPORTS_SENT.store(stats.reports_sent, Ordering::Relaxed);
        INBOUND_DISCARDED.store(stats.inbound_discarded, Ordering::Relaxed);
    }
}

/// Reads every published value.
#[must_use]
pub fn snapshot() -> FirmwareStatus {
    FirmwareStatus {
        usb_configured: USB_CONFIGURED.load(Ordering::Relaxed),
        phase: Phase::from_index(usize::from(PHASE.load(Ordering::Relaxed))).unwrap_or(Phase::Sync),
        step_index: STEP_INDEX.load(Ordering::Relaxed),
        repeats_remaining: REPEATS_REMAINING.load(Ordering::Relaxed),
        total_ticks: TOTAL_TICKS.load(Ordering::Relaxed),
        pulses: PULSES.load(Ordering::Relaxed),
        reports_sent: REPORTS_SENT.load(Ordering::Relaxed),
        inbound_discarded: INBOUND_DISCARDED.load(Ordering::Relaxed),
    }
}

fn phase_code(phase: Phase) -> u8 {
    u8::try_from(phase.as_index()).unwrap_or(0)
}
