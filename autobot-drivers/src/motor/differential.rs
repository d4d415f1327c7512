//! Differential drive
//!
//! | command     | left wheel        | right wheel       |
//! |-------------|-------------------|-------------------|
//! | forward     | cruise            | cruise            |
//! | left        | turn              | cruise            |
//! | right       | cruise            | turn              |
//! | sharp left  | turn, reversed    | turn              |
//! | sharp right | turn              | turn, reversed    |
//! | backward    | backward, reversed| backward, reversed|
//! | stop        | off               | off               |

use autobot_core::config::DriveConfig;
use autobot_core::traits::DriveMotors;

use super::hbridge::{WheelOutput, WheelSpeed};

/// Two-wheel drive with fixed speed levels from [`DriveConfig`]
pub struct DifferentialDrive<L, R> {
    left: L,
    right: R,
    cruise: u8,
    turn: u8,
    backward: u8,
}

impl<L: WheelOutput, R: WheelOutput> DifferentialDrive<L, R> {
    pub fn new(left: L, right: R, config: &DriveConfig) -> Self {
        let mut drive = Self {
            left,
            right,
            cruise: config.cruise_percent(),
            turn: config.turn_percent(),
            backward: config.backward_percent(),
        };
        drive.stop();
        drive
    }

    fn set(&mut self, left: WheelSpeed, right: WheelSpeed) {
        self.left.set_speed(left);
        self.right.set_speed(right);
    }

    pub fn left_wheel(&self) -> &L {
        &self.left
    }

    pub fn right_wheel(&self) -> &R {
        &self.right
    }
}

impl<L: WheelOutput, R: WheelOutput> DriveMotors for DifferentialDrive<L, R> {
    fn forward(&mut self) {
        self.set(WheelSpeed::Forward(self.cruise), WheelSpeed::Forward(self.cruise));
    }

    fn backward(&mut self) {
        self.set(
            WheelSpeed::Reverse(self.backward),
            WheelSpeed::Reverse(self.backward),
        );
    }

    fn left(&mut self) {
        self.set(WheelSpeed::Forward(self.turn), WheelSpeed::Forward(self.cruise));
    }

    fn right(&mut self) {
        self.set(WheelSpeed::Forward(self.cruise), WheelSpeed::Forward(self.turn));
    }

    fn sharp_left(&mut self) {
        self.set(WheelSpeed::Reverse(self.turn), WheelSpeed::Forward(self.turn));
    }

    fn sharp_right(&mut self) {
        self.set(WheelSpeed::Forward(self.turn), WheelSpeed::Reverse(self.turn));
    }

    fn stop(&mut self) {
        self.set(WheelSpeed::Stopped, WheelSpeed::Stopped);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::motor::hbridge::mock::{MockPin, MockPwm};
    use crate::motor::HBridge;
    use autobot_core::traits::MotorAction;

    #[derive(Default)]
    struct RecordingWheel {
        speed: Option<WheelSpeed>,
    }

    impl WheelOutput for RecordingWheel {
        fn set_speed(&mut self, speed: WheelSpeed) {
            self.speed = Some(speed);
        }
    }

    fn drive() -> DifferentialDrive<RecordingWheel, RecordingWheel> {
        DifferentialDrive::new(
            RecordingWheel::default(),
            RecordingWheel::default(),
            &DriveConfig::DEFAULT,
        )
    }

    fn speeds(drive: &DifferentialDrive<RecordingWheel, RecordingWheel>) -> (WheelSpeed, WheelSpeed) {
        (
            drive.left_wheel().speed.unwrap(),
            drive.right_wheel().speed.unwrap(),
        )
    }

    #[test]
    fn test_starts_stopped() {
        let drive = drive();
        assert_eq!(speeds(&drive), (WheelSpeed::Stopped, WheelSpeed::Stopped));
    }

    #[test]
    fn test_action_mapping() {
        use WheelSpeed::{Forward, Reverse, Stopped};

        let cases = [
            (MotorAction::Forward, (Forward(60), Forward(60))),
            (MotorAction::Left, (Forward(36), Forward(60))),
            (MotorAction::Right, (Forward(60), Forward(36))),
            (MotorAction::SharpLeft, (Reverse(36), Forward(36))),
            (MotorAction::SharpRight, (Forward(36), Reverse(36))),
            (MotorAction::Stop, (Stopped, Stopped)),
        ];

        let mut drive = drive();
        for (action, expected) in cases {
            drive.apply(action);
            assert_eq!(speeds(&drive), expected, "{:?}", action);
        }
    }

    #[test]
    fn test_backward() {
        let mut drive = drive();
        drive.backward();
        assert_eq!(
            speeds(&drive),
            (WheelSpeed::Reverse(24), WheelSpeed::Reverse(24))
        );
    }

    #[test]
    fn test_on_hbridges() {
        let left = HBridge::new(MockPwm::default(), MockPin::default(), MockPin::default());
        let right = HBridge::new(MockPwm::default(), MockPin::default(), MockPin::default());
        let mut drive = DifferentialDrive::new(left, right, &DriveConfig::DEFAULT);

        drive.left();
        assert_eq!(drive.left_wheel().speed(), WheelSpeed::Forward(36));
        assert_eq!(drive.right_wheel().speed(), WheelSpeed::Forward(60));
    }
}
