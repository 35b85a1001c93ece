//! Bounded history of cycle-completion pulses.
//!
//! [`CycleLog`] is a [`CycleObserver`] that keeps the most recent pulses in a
//! fixed-size ring so hosts and tests can inspect what the automaton did
//! without allocating.

use heapless::HistoryBuf;

use super::{CycleEvent, CycleObserver};
use crate::scripts::Phase;

/// Default number of pulses retained.
pub const CYCLE_LOG_CAPACITY: usize = 32;

/// Ring buffer of the latest [`CycleEvent`]s.
pub struct CycleLog<const CAPACITY: usize = CYCLE_LOG_CAPACITY> {
    ring: HistoryBuf<CycleEvent, CAPACITY>,
    recorded: u32,
    transitions: u32,
}

impl<const CAPACITY: usize> CycleLog<CAPACITY> {
    /// Creates an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ring: HistoryBuf::new(),
            recorded: 0,
            transitions: 0,
        }
    }

    /// Retained pulses in chronological order.
    pub fn oldest_first(&self) -> impl Iterator<Item = &CycleEvent> + '_ {
        self.ring.oldest_ordered()
    }

    /// Returns the most recent pulse, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&CycleEvent> {
        self.ring.recent()
    }

    /// Number of pulses currently retained.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ring.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Pulses seen since creation, including those evicted from the ring.
    #[must_use]
    pub const fn recorded(&self) -> u32 {
        self.recorded
    }

    /// Pulses that moved the automaton to another phase.
    #[must_use]
    pub const fn transitions(&self) -> u32 {
        self.transitions
    }

    /// Retained pulses whose finished script belonged to `phase`.
    #[must_use]
    pub fn count_completed(&self, phase: Phase) -> usize {
        self.oldest_first()
            .filter(|event| event.completed == phase)
            .count()
    }
}

impl<const CAPACITY: usize> Default for CycleLog<CAPACITY> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const CAPACITY: usize> CycleObserver for CycleLog<CAPACITY> {
    fn on_cycle_complete(&mut self, event: CycleEvent) {
        self.recorded = self.recorded.wrapping_add(1);
        if event.advanced() {
            self.transitions = self.transitions.wrapping_add(1);
        }
        self.ring.write(event);
    }
}
