//! Ultrasonic echo timing
//!
//! Each rangefinder is triggered by a periodic PWM pulse and answers with an
//! echo pulse whose width is the sound round-trip time. A timer input
//! capture latches the counter on the echo edges; the handlers here turn
//! those captures into distances.
//!
//! Two capture schemes are in use:
//!
//! - [`EdgeEcho`]: the channel has a programmable polarity, so the handler
//!   knows which edge it is looking at and flips the polarity after each.
//! - [`ToggleEcho`]: the channel shares one capture input without polarity
//!   tracking. The first capture of a pulse is taken as rising, the next as
//!   falling.
//!
//! A reading is only published when a full rising/falling pair lands. If an
//! echo never returns (nothing in range) the previous distance stays in
//! place; readings go stale rather than being reset.
//!
//! The echo line is always low when a trigger period starts. The board glue
//! reports every period start through [`EchoTimer::on_period_start`], which
//! drops a half-captured pulse so the next capture is taken as a rising
//! edge. A missed edge therefore costs at most the one period it fell in.

mod edge;
mod reading;
mod timer;
mod toggle;

pub use edge::EdgeEcho;
pub use reading::EchoReading;
pub use timer::{CaptureEvent, EchoTimer, SonarSnapshot};
pub use toggle::{EchoPhase, ToggleEcho};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of rangefinders on the robot
pub const SONAR_COUNT: usize = 3;

/// Rangefinder identity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SonarId {
    Sonar1,
    Sonar2,
    Sonar3,
}

impl SonarId {
    pub const ALL: [SonarId; SONAR_COUNT] = [SonarId::Sonar1, SonarId::Sonar2, SonarId::Sonar3];

    /// Zero-based index
    pub const fn index(self) -> usize {
        match self {
            SonarId::Sonar1 => 0,
            SonarId::Sonar2 => 1,
            SonarId::Sonar3 => 2,
        }
    }
}

/// Edge latched by a polarity-aware capture channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CaptureEdge {
    Rising,
    Falling,
}

/// Why a completed pulse was thrown away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DiscardReason {
    /// Falling edge arrived without a rising edge in front of it
    NoRisingEdge,
    /// Falling capture is numerically below the rising one: the timer
    /// wrapped between the two edges
    CounterWrapped,
    /// Trigger period restarted while the falling edge was still pending
    NoFallingEdge,
}

/// Result of handling one capture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EchoOutcome {
    /// Rising edge stored, waiting for the falling edge
    PulseStarted,
    /// Pulse completed and published, distance in cm
    Measured(u32),
    /// Pulse completed but rejected; the previous reading is kept
    Discarded(DiscardReason),
}

impl EchoOutcome {
    /// Edge the capture channel should be armed for next
    pub const fn next_edge(self) -> CaptureEdge {
        match self {
            EchoOutcome::PulseStarted => CaptureEdge::Falling,
            _ => CaptureEdge::Rising,
        }
    }
}

/// Width of a captured pulse in ticks
fn pulse_width(rising: u32, falling: u32) -> Result<u32, DiscardReason> {
    falling
        .checked_sub(rising)
        .ok_or(DiscardReason::CounterWrapped)
}
