//! Single-input toggling capture channel

use portable_atomic::{AtomicU32, AtomicU8, Ordering};

use super::{pulse_width, DiscardReason, EchoOutcome, EchoReading};
use crate::config::SonarConfig;

/// Which half of a pulse the channel expects next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EchoPhase {
    WaitingForRising,
    WaitingForFalling,
}

impl EchoPhase {
    const fn to_u8(self) -> u8 {
        match self {
            EchoPhase::WaitingForRising => 0,
            EchoPhase::WaitingForFalling => 1,
        }
    }

    const fn from_u8(raw: u8) -> Self {
        match raw {
            1 => EchoPhase::WaitingForFalling,
            _ => EchoPhase::WaitingForRising,
        }
    }
}

/// Echo timer for a capture input that cannot tell edges apart
///
/// Captures alternate between the two halves of a pulse. Only one pulse
/// is tracked at a time; after a falling capture the channel always goes
/// back to waiting for a fresh rising edge. The phase alone cannot detect a
/// lost edge, so [`on_period_start`](Self::on_period_start) must be called
/// at every trigger period to put it back in step.
#[derive(Debug)]
pub struct ToggleEcho {
    phase: AtomicU8,
    rising_tick: AtomicU32,
    reading: EchoReading,
}

impl Default for ToggleEcho {
    fn default() -> Self {
        Self::new()
    }
}

impl ToggleEcho {
    pub const fn new() -> Self {
        Self {
            phase: AtomicU8::new(EchoPhase::WaitingForRising.to_u8()),
            rising_tick: AtomicU32::new(0),
            reading: EchoReading::new(),
        }
    }

    /// Handle one capture interrupt
    pub fn on_capture(&self, tick: u32, config: &SonarConfig) -> EchoOutcome {
        match self.phase() {
            EchoPhase::WaitingForRising => {
                self.rising_tick.store(tick, Ordering::Relaxed);
                self.set_phase(EchoPhase::WaitingForFalling);
                EchoOutcome::PulseStarted
            }
            EchoPhase::WaitingForFalling => {
                self.set_phase(EchoPhase::WaitingForRising);

                let rising = self.rising_tick.load(Ordering::Relaxed);
                match pulse_width(rising, tick) {
                    Ok(ticks) => {
                        let cm = config.ticks_to_cm(ticks);
                        self.reading.publish(cm, config.near_threshold_cm);
                        EchoOutcome::Measured(cm)
                    }
                    Err(reason) => {
                        self.reading.discard(reason);
                        EchoOutcome::Discarded(reason)
                    }
                }
            }
        }
    }

    /// Current phase
    pub fn phase(&self) -> EchoPhase {
        EchoPhase::from_u8(self.phase.load(Ordering::Relaxed))
    }

    /// Start of a trigger period: the echo line is low, so the next
    /// capture is a rising edge
    ///
    /// A pulse still waiting for its falling edge is dropped and counted.
    pub fn on_period_start(&self) -> Option<DiscardReason> {
        let pending = self.phase.swap(EchoPhase::WaitingForRising.to_u8(), Ordering::Relaxed);
        if EchoPhase::from_u8(pending) == EchoPhase::WaitingForFalling {
            self.reading.discard(DiscardReason::NoFallingEdge);
            Some(DiscardReason::NoFallingEdge)
        } else {
            None
        }
    }

    pub fn reading(&self) -> &EchoReading {
        &self.reading
    }

    fn set_phase(&self, phase: EchoPhase) {
        self.phase.store(phase.to_u8(), Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: SonarConfig = SonarConfig::DEFAULT;

    #[test]
    fn test_alternates_between_phases() {
        let echo = ToggleEcho::new();
        assert_eq!(echo.phase(), EchoPhase::WaitingForRising);

        assert_eq!(echo.on_capture(500, &CONFIG), EchoOutcome::PulseStarted);
        assert_eq!(echo.phase(), EchoPhase::WaitingForFalling);

        assert_eq!(echo.on_capture(2500, &CONFIG), EchoOutcome::Measured(34));
        assert_eq!(echo.phase(), EchoPhase::WaitingForRising);
        assert!(!echo.reading().is_near());
    }

    #[test]
    fn test_rising_at_tick_zero_is_a_real_edge() {
        // A zero capture must not be mistaken for "no rising edge yet"
        let echo = ToggleEcho::new();
        echo.on_capture(0, &CONFIG);
        assert_eq!(echo.phase(), EchoPhase::WaitingForFalling);
        assert_eq!(echo.on_capture(1000, &CONFIG), EchoOutcome::Measured(17));
    }

    #[test]
    fn test_each_pulse_tracked_independently() {
        let echo = ToggleEcho::new();
        echo.on_capture(0, &CONFIG);
        echo.on_capture(1000, &CONFIG);
        echo.on_capture(60_000, &CONFIG);
        assert_eq!(echo.on_capture(63_000, &CONFIG), EchoOutcome::Measured(51));
        assert_eq!(echo.reading().measured(), 2);
    }

    #[test]
    fn test_wrap_discarded_and_phase_restored() {
        let echo = ToggleEcho::new();
        echo.on_capture(100, &CONFIG);
        echo.on_capture(1100, &CONFIG);

        echo.on_capture(u32::MAX - 10, &CONFIG);
        assert_eq!(
            echo.on_capture(20, &CONFIG),
            EchoOutcome::Discarded(DiscardReason::CounterWrapped)
        );
        assert_eq!(echo.phase(), EchoPhase::WaitingForRising);
        assert_eq!(echo.reading().distance_cm(), 17);
        assert!(echo.reading().is_near());
    }

    #[test]
    fn test_period_start_drops_pending_rising() {
        let echo = ToggleEcho::new();
        echo.on_capture(100, &CONFIG);
        assert_eq!(echo.on_period_start(), Some(DiscardReason::NoFallingEdge));
        assert_eq!(echo.phase(), EchoPhase::WaitingForRising);
        assert_eq!(echo.on_capture(60_000, &CONFIG), EchoOutcome::PulseStarted);
        assert_eq!(echo.on_capture(61_000, &CONFIG), EchoOutcome::Measured(17));
        assert_eq!(echo.reading().discarded(), 1);
    }

    #[test]
    fn test_period_start_is_quiet_when_in_step() {
        let echo = ToggleEcho::new();
        assert_eq!(echo.on_period_start(), None);
        echo.on_capture(100, &CONFIG);
        echo.on_capture(1100, &CONFIG);
        assert_eq!(echo.on_period_start(), None);
        assert_eq!(echo.reading().discarded(), 0);
    }

    #[test]
    fn test_missed_rising_edge_recovers_next_period() {
        const PERIOD: u32 = 60_000;
        let echo = ToggleEcho::new();

        // 17 cm obstacle
        echo.on_period_start();
        echo.on_capture(500, &CONFIG);
        assert_eq!(echo.on_capture(1500, &CONFIG), EchoOutcome::Measured(17));

        // Rising edge lost: the lone falling capture is taken as a rising one
        echo.on_period_start();
        assert_eq!(echo.on_capture(PERIOD + 1500, &CONFIG), EchoOutcome::PulseStarted);

        for n in 2..8 {
            let start = n * PERIOD;
            echo.on_period_start();
            assert_eq!(echo.on_capture(start + 500, &CONFIG), EchoOutcome::PulseStarted);
            assert_eq!(echo.on_capture(start + 1500, &CONFIG), EchoOutcome::Measured(17));
        }
        assert_eq!(echo.reading().distance_cm(), 17);
        assert!(echo.reading().is_near());
        assert_eq!(echo.reading().discarded(), 1);
        assert_eq!(echo.reading().measured(), 7);
    }
}
