//! Configuration type definitions

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Speed of sound expressed as cm per 10 000 µs (0.0343 cm/µs)
const SOUND_CM_PER_10K_US: u64 = 343;

/// Longest trigger period, in ticks, that the 16-bit sonar timer can count
pub const MAX_TRIGGER_PERIOD_TICKS: u32 = 1 << 16;

/// Ultrasonic rangefinder settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SonarConfig {
    /// Capture timer tick period in nanoseconds
    pub tick_ns: u32,
    /// An object closer than this is "near"
    pub near_threshold_cm: u32,
    /// Period of the trigger PWM in microseconds
    pub trigger_period_us: u32,
    /// High time of each trigger pulse in microseconds
    pub trigger_pulse_us: u32,
}

impl SonarConfig {
    pub const DEFAULT: Self = Self {
        tick_ns: 1000,
        near_threshold_cm: 30,
        trigger_period_us: 60_000,
        trigger_pulse_us: 10,
    };

    /// Timer ticks in a duration given in microseconds
    pub const fn us_to_ticks(&self, us: u32) -> u32 {
        let ticks = us as u64 * 1000 / self.tick_ns as u64;
        if ticks > u32::MAX as u64 {
            u32::MAX
        } else {
            ticks as u32
        }
    }

    /// Trigger period in timer ticks
    pub const fn period_ticks(&self) -> u32 {
        self.us_to_ticks(self.trigger_period_us)
    }

    /// Convert an echo round-trip time in timer ticks to a one-way distance
    ///
    /// `round(ticks * tick_ns / 1000 * 0.0343 / 2)`, in integer math.
    pub const fn ticks_to_cm(&self, ticks: u32) -> u32 {
        // ticks * tick_ns [ns] * 343 / 10_000 [cm/µs] / 1000 [ns/µs] / 2
        const DIVISOR: u64 = 20_000_000;
        let scaled = ticks as u64 * self.tick_ns as u64 * SOUND_CM_PER_10K_US;
        let cm = (scaled + DIVISOR / 2) / DIVISOR;
        if cm > u32::MAX as u64 {
            u32::MAX
        } else {
            cm as u32
        }
    }
}

impl Default for SonarConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Quadrature encoder settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EncoderConfig {
    /// Encoder lines per wheel revolution (before x4 decoding)
    pub counts_per_rev: u32,
}

impl EncoderConfig {
    pub const DEFAULT: Self = Self {
        counts_per_rev: 1024,
    };
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Stop-marker debounce thresholds
///
/// A streak must *exceed* its threshold before it takes effect, so the
/// default of 2 fires on the third consecutive reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LineConfig {
    /// All-dark readings needed (exclusive) to enter the stopped state
    pub stop_threshold: u8,
    /// Other readings needed (exclusive) to leave it
    pub resume_threshold: u8,
}

impl LineConfig {
    pub const DEFAULT: Self = Self {
        stop_threshold: 2,
        resume_threshold: 2,
    };
}

impl Default for LineConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Differential drive speed mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DriveConfig {
    /// Cruise duty as a percentage of full PWM
    pub max_duty_percent: u8,
    /// Turning wheel speed as a percentage of cruise
    pub turn_ratio_percent: u8,
    /// Reverse speed as a percentage of cruise
    pub backward_ratio_percent: u8,
    /// Motor PWM frequency
    pub pwm_frequency_hz: u32,
}

impl DriveConfig {
    pub const DEFAULT: Self = Self {
        max_duty_percent: 60,
        turn_ratio_percent: 60,
        backward_ratio_percent: 40,
        pwm_frequency_hz: 20_000,
    };

    /// Cruise duty in percent of full scale
    pub const fn cruise_percent(&self) -> u8 {
        self.max_duty_percent
    }

    /// Turning duty in percent of full scale
    pub const fn turn_percent(&self) -> u8 {
        scale_percent(self.max_duty_percent, self.turn_ratio_percent)
    }

    /// Reverse duty in percent of full scale
    pub const fn backward_percent(&self) -> u8 {
        scale_percent(self.max_duty_percent, self.backward_ratio_percent)
    }
}

impl Default for DriveConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

const fn scale_percent(base: u8, ratio: u8) -> u8 {
    ((base as u16 * ratio as u16) / 100) as u8
}

/// Foreground loop timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControlConfig {
    /// Line follower period
    pub tick_ms: u32,
    /// Interval between status log lines
    pub status_interval_ms: u32,
}

impl ControlConfig {
    pub const DEFAULT: Self = Self {
        tick_ms: 10,
        status_interval_ms: 500,
    };
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
