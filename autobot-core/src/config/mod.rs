//! Configuration types
//!
//! Tuning values for the sensor and decision layers. The firmware build
//! script loads these from `robot.toml` and bakes them in as a constant, so
//! a bad value fails the build instead of the robot.

pub mod types;

pub use types::*;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Sonar timer tick period is zero
    ZeroTickPeriod,
    /// Proximity threshold is zero, nothing would ever be near
    ZeroNearThreshold,
    /// Trigger pulse does not fit inside the trigger period
    TriggerPulseTooLong,
    /// Trigger period in ticks overflows the 16-bit sonar timer
    TriggerPeriodTooLong,
    /// Encoder counts per revolution is zero
    ZeroCountsPerRev,
    /// A duty or ratio percentage is above 100
    PercentOutOfRange,
    /// PWM frequency is zero
    ZeroPwmFrequency,
    /// Control tick is zero
    ZeroControlTick,
}

/// Complete robot configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RobotConfig {
    pub sonar: SonarConfig,
    pub encoder: EncoderConfig,
    pub line: LineConfig,
    pub drive: DriveConfig,
    pub control: ControlConfig,
}

impl RobotConfig {
    /// Factory defaults matching the reference chassis
    pub const DEFAULT: Self = Self {
        sonar: SonarConfig::DEFAULT,
        encoder: EncoderConfig::DEFAULT,
        line: LineConfig::DEFAULT,
        drive: DriveConfig::DEFAULT,
        control: ControlConfig::DEFAULT,
    };

    /// Check every section, returning the first problem found
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sonar = &self.sonar;
        if sonar.tick_ns == 0 {
            return Err(ConfigError::ZeroTickPeriod);
        }
        if sonar.near_threshold_cm == 0 {
            return Err(ConfigError::ZeroNearThreshold);
        }
        if sonar.trigger_pulse_us == 0 || sonar.trigger_pulse_us >= sonar.trigger_period_us {
            return Err(ConfigError::TriggerPulseTooLong);
        }
        if sonar.period_ticks() > MAX_TRIGGER_PERIOD_TICKS {
            return Err(ConfigError::TriggerPeriodTooLong);
        }

        if self.encoder.counts_per_rev == 0 {
            return Err(ConfigError::ZeroCountsPerRev);
        }

        let drive = &self.drive;
        if drive.max_duty_percent > 100
            || drive.turn_ratio_percent > 100
            || drive.backward_ratio_percent > 100
        {
            return Err(ConfigError::PercentOutOfRange);
        }
        if drive.pwm_frequency_hz == 0 {
            return Err(ConfigError::ZeroPwmFrequency);
        }

        if self.control.tick_ms == 0 {
            return Err(ConfigError::ZeroControlTick);
        }

        Ok(())
    }
}
