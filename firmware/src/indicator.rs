#![cfg_attr(not(target_os = "none"), allow(dead_code))]

//! LED and buzzer outputs driven by cycle pulses.
//!
//! Both lines are inverted each time the macro moves on to another phase.
//! Intermediate feed passes leave them alone, so one blink (and one click)
//! marks one phase change.

use macro_core::sequencer::{CycleEvent, CycleObserver};

/// Output line the indicator can invert.
pub trait IndicatorPin {
    fn toggle(&mut self);

    fn is_set_high(&self) -> bool;
}

#[cfg(target_os = "none")]
impl IndicatorPin for embassy_stm32::gpio::Output<'_> {
    fn toggle(&mut self) {
        embassy_stm32::gpio::Output::toggle(self);
    }

    fn is_set_high(&self) -> bool {
        embassy_stm32::gpio::Output::is_set_high(self)
    }
}

/// [`CycleObserver`] that flips the LED and buzzer lines on phase changes.
pub struct PhaseIndicator<P> {
    led: P,
    buzzer: P,
    toggles: u32,
}

impl<P> PhaseIndicator<P>
where
    P: IndicatorPin,
{
    #[must_use]
    pub const fn new(led: P, buzzer: P) -> Self {
        Self {
            led,
            buzzer,
            toggles: 0,
        }
    }

    /// Number of times the outputs were inverted.
    #[must_use]
    pub const fn toggles(&self) -> u32 {
        self.toggles
    }

    #[must_use]
    pub fn led_high(&self) -> bool {
        self.led.is_set_high()
    }

    #[must_use]
    pub fn buzzer_high(&self) -> bool {
        self.buzzer.is_set_high()
    }
}

impl<P> CycleObserver for PhaseIndicator<P>
where
    P: IndicatorPin,
{
    fn on_cycle_complete(&mut self, event: CycleEvent) {
        if !event.advanced() {
            #[cfg(target_os = "none")]
            defmt::trace!(
                "macro: {} pass done at tick {}, {} left",
                event.completed.name(),
                event.tick,
                event.repeats_remaining
            );
            return;
        }

        self.led.toggle();
        self.buzzer.toggle();
        self.toggles = self.toggles.wrapping_add(1);

        #[cfg(target_os = "none")]
        defmt::debug!(
            "macro: {} -> {} at tick {}",
            event.completed.name(),
            event.next.name(),
            event.tick
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macro_core::scripts::Phase;
    use macro_core::sequencer::{MacroProgram, Sequencer};

    #[derive(Default)]
    struct FakePin {
        high: bool,
    }

    impl IndicatorPin for FakePin {
        fn toggle(&mut self) {
            self.high = !self.high;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    fn indicator() -> PhaseIndicator<FakePin> {
        PhaseIndicator::new(FakePin::default(), FakePin::default())
    }

    #[test]
    fn repeat_passes_leave_outputs_alone() {
        let mut indicator = indicator();
        indicator.on_cycle_complete(CycleEvent {
            completed: Phase::Feed,
            next: Phase::Feed,
            repeats_remaining: 4,
            tick: 100,
        });
        assert_eq!(indicator.toggles(), 0);
        assert!(!indicator.led_high());

        indicator.on_cycle_complete(CycleEvent {
            completed: Phase::Feed,
            next: Phase::AfterFeed,
            repeats_remaining: 10,
            tick: 200,
        });
        assert_eq!(indicator.toggles(), 1);
        assert!(indicator.led_high());
        assert!(indicator.buzzer_high());
    }

    #[test]
    fn one_loop_toggles_once_per_phase_change() {
        let program = MacroProgram::standard();
        let mut sequencer = Sequencer::with_observer(program, indicator());
        let ticks: u32 = Phase::ALL.iter().map(|phase| program.phase_ticks(*phase)).sum();

        for _ in 0..ticks {
            sequencer.tick();
        }

        // sync -> buy, buy -> feed, feed -> after-feed, after-feed -> buy
        assert_eq!(sequencer.observer().toggles(), 4);
        assert!(!sequencer.observer().led_high());
        assert_eq!(sequencer.pulse_count(), 13);
    }
}
