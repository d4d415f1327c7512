//! Line pattern decision engine

use autobot_protocol::Notification;

use super::IrPattern;
use crate::config::LineConfig;
use crate::traits::MotorAction;

/// Steering action for a pattern, without any debounce state
///
/// Patterns outside the table fail safe to [`MotorAction::Stop`].
pub const fn action_for(pattern: IrPattern) -> MotorAction {
    match pattern.bits() {
        0b0000 => MotorAction::Forward,
        0b0100 => MotorAction::Left,
        0b0010 => MotorAction::Right,
        0b0001 | 0b0011 => MotorAction::SharpRight,
        0b1000 | 0b1100 => MotorAction::SharpLeft,
        _ => MotorAction::Stop,
    }
}

/// Output of one decision cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Decision {
    pub action: MotorAction,
    /// Set on the cycle the robot enters or leaves a stop episode
    pub notification: Option<Notification>,
}

/// Steering table plus the stop-marker debounce
///
/// `stop_streak` counts all-dark readings and `resume_streak` counts every
/// other reading. Once `stop_streak` exceeds its threshold the engine is
/// triggered and reports [`Notification::Stopped`]; once `resume_streak`
/// exceeds its threshold the stop streak is cleared and, if the engine was
/// triggered, it reports [`Notification::Resumed`]. Entering the triggered
/// state clears `resume_streak`, so each episode needs a fresh run of
/// non-dark readings to end it.
///
/// Foreground only; not shared with interrupts.
#[derive(Debug, Clone)]
pub struct DecisionEngine {
    config: LineConfig,
    stop_streak: u8,
    resume_streak: u8,
    triggered: bool,
}

impl Default for DecisionEngine {
    fn default() -> Self {
        Self::new(LineConfig::DEFAULT)
    }
}

impl DecisionEngine {
    pub const fn new(config: LineConfig) -> Self {
        Self {
            config,
            stop_streak: 0,
            resume_streak: 0,
            triggered: false,
        }
    }

    /// Run one decision cycle
    pub fn decide(&mut self, pattern: IrPattern) -> Decision {
        let action = action_for(pattern);
        let mut notification = None;

        if pattern.is_all_dark() {
            self.stop_streak = self.stop_streak.saturating_add(1);
            if self.stop_streak > self.config.stop_threshold && !self.triggered {
                self.triggered = true;
                self.resume_streak = 0;
                notification = Some(Notification::Stopped);
            }
        } else {
            self.resume_streak = self.resume_streak.saturating_add(1);
            if self.resume_streak > self.config.resume_threshold {
                self.stop_streak = 0;
                if self.triggered {
                    self.triggered = false;
                    notification = Some(Notification::Resumed);
                }
            }
        }

        Decision {
            action,
            notification,
        }
    }

    /// Forget any stop episode in progress
    pub fn reset(&mut self) {
        self.stop_streak = 0;
        self.resume_streak = 0;
        self.triggered = false;
    }

    /// Robot is parked on a stop marker
    pub fn is_triggered(&self) -> bool {
        self.triggered
    }

    pub fn stop_streak(&self) -> u8 {
        self.stop_streak
    }

    pub fn resume_streak(&self) -> u8 {
        self.resume_streak
    }

    pub fn config(&self) -> &LineConfig {
        &self.config
    }
}
