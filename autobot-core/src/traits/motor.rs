//! Drive motor traits

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Motion command selected by the line decision engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MotorAction {
    /// Both wheels at cruise speed
    Forward,
    /// Gentle left, inner wheel slowed
    Left,
    /// Gentle right, inner wheel slowed
    Right,
    /// Pivot left in place
    SharpLeft,
    /// Pivot right in place
    SharpRight,
    /// Both wheels stopped
    Stop,
}

/// Fire-and-forget differential drive
///
/// Commands take effect immediately and never block. Implementations that
/// can fail (PWM out of range, pin errors) must swallow the error: the
/// caller re-issues a command every control tick, so a dropped one is
/// corrected on the next cycle.
pub trait DriveMotors {
    fn forward(&mut self);
    fn backward(&mut self);
    fn left(&mut self);
    fn right(&mut self);
    fn sharp_left(&mut self);
    fn sharp_right(&mut self);
    fn stop(&mut self);

    /// Execute a decision engine action
    fn apply(&mut self, action: MotorAction) {
        match action {
            MotorAction::Forward => self.forward(),
            MotorAction::Left => self.left(),
            MotorAction::Right => self.right(),
            MotorAction::SharpLeft => self.sharp_left(),
            MotorAction::SharpRight => self.sharp_right(),
            MotorAction::Stop => self.stop(),
        }
    }
}
