//! Polarity-switching capture channel

use portable_atomic::{AtomicBool, AtomicU32, Ordering};

use super::{pulse_width, CaptureEdge, DiscardReason, EchoOutcome, EchoReading};
use crate::config::SonarConfig;

/// Echo timer for a capture channel with selectable edge polarity
#[derive(Debug)]
pub struct EdgeEcho {
    rising_tick: AtomicU32,
    /// A rising edge has been latched and not yet consumed
    armed: AtomicBool,
    reading: EchoReading,
}

impl Default for EdgeEcho {
    fn default() -> Self {
        Self::new()
    }
}

impl EdgeEcho {
    pub const fn new() -> Self {
        Self {
            rising_tick: AtomicU32::new(0),
            armed: AtomicBool::new(false),
            reading: EchoReading::new(),
        }
    }

    /// Handle one capture interrupt
    ///
    /// The caller programs the channel polarity from
    /// [`EchoOutcome::next_edge`] afterwards.
    pub fn on_capture(&self, edge: CaptureEdge, tick: u32, config: &SonarConfig) -> EchoOutcome {
        match edge {
            CaptureEdge::Rising => {
                self.rising_tick.store(tick, Ordering::Relaxed);
                self.armed.store(true, Ordering::Relaxed);
                EchoOutcome::PulseStarted
            }
            CaptureEdge::Falling => {
                if !self.armed.swap(false, Ordering::Relaxed) {
                    self.reading.discard(DiscardReason::NoRisingEdge);
                    return EchoOutcome::Discarded(DiscardReason::NoRisingEdge);
                }

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

    /// Start of a trigger period: forget a rising edge whose falling edge
    /// never arrived
    ///
    /// The caller re-arms the channel for a rising edge afterwards.
    pub fn on_period_start(&self) -> Option<DiscardReason> {
        if self.armed.swap(false, Ordering::Relaxed) {
            self.reading.discard(DiscardReason::NoFallingEdge);
            Some(DiscardReason::NoFallingEdge)
        } else {
            None
        }
    }

    pub fn reading(&self) -> &EchoReading {
        &self.reading
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: SonarConfig = SonarConfig::DEFAULT;

    #[test]
    fn test_rising_then_falling_measures() {
        let echo = EdgeEcho::new();
        assert_eq!(
            echo.on_capture(CaptureEdge::Rising, 100, &CONFIG),
            EchoOutcome::PulseStarted
        );
        assert_eq!(
            echo.on_capture(CaptureEdge::Falling, 1100, &CONFIG),
            EchoOutcome::Measured(17)
        );
        assert_eq!(echo.reading().distance_cm(), 17);
        assert!(echo.reading().is_near());
    }

    #[test]
    fn test_falling_without_rising_is_discarded() {
        let echo = EdgeEcho::new();
        assert_eq!(
            echo.on_capture(CaptureEdge::Falling, 5000, &CONFIG),
            EchoOutcome::Discarded(DiscardReason::NoRisingEdge)
        );
        assert_eq!(echo.reading().distance_cm(), 0);
        assert_eq!(echo.reading().discarded(), 1);
    }

    #[test]
    fn test_second_falling_edge_is_not_reused() {
        let echo = EdgeEcho::new();
        echo.on_capture(CaptureEdge::Rising, 0, &CONFIG);
        echo.on_capture(CaptureEdge::Falling, 3000, &CONFIG);
        assert_eq!(
            echo.on_capture(CaptureEdge::Falling, 9000, &CONFIG),
            EchoOutcome::Discarded(DiscardReason::NoRisingEdge)
        );
        // 3000 µs -> 51.45 cm
        assert_eq!(echo.reading().distance_cm(), 51);
    }

    #[test]
    fn test_wrapped_counter_keeps_previous_reading() {
        let echo = EdgeEcho::new();
        echo.on_capture(CaptureEdge::Rising, 1000, &CONFIG);
        echo.on_capture(CaptureEdge::Falling, 4000, &CONFIG);
        assert!(!echo.reading().is_near());

        echo.on_capture(CaptureEdge::Rising, 0xFFFF_FF00, &CONFIG);
        assert_eq!(
            echo.on_capture(CaptureEdge::Falling, 0x100, &CONFIG),
            EchoOutcome::Discarded(DiscardReason::CounterWrapped)
        );
        assert_eq!(echo.reading().distance_cm(), 51);
        assert!(!echo.reading().is_near());
        assert_eq!(echo.reading().measured(), 1);
    }

    #[test]
    fn test_period_start_drops_unfinished_pulse() {
        let echo = EdgeEcho::new();
        echo.on_capture(CaptureEdge::Rising, 0, &CONFIG);
        echo.on_capture(CaptureEdge::Falling, 1000, &CONFIG);

        // Falling edge of the next echo is lost
        echo.on_capture(CaptureEdge::Rising, 60_000, &CONFIG);
        assert_eq!(echo.on_period_start(), Some(DiscardReason::NoFallingEdge));
        assert_eq!(echo.on_period_start(), None);

        // The following falling edge must not pair with the stale rising one
        assert_eq!(
            echo.on_capture(CaptureEdge::Falling, 121_000, &CONFIG),
            EchoOutcome::Discarded(DiscardReason::NoRisingEdge)
        );
        echo.on_capture(CaptureEdge::Rising, 180_000, &CONFIG);
        assert_eq!(
            echo.on_capture(CaptureEdge::Falling, 181_000, &CONFIG),
            EchoOutcome::Measured(17)
        );
        assert!(echo.reading().is_near());
        assert_eq!(echo.reading().discarded(), 2);
    }
}
