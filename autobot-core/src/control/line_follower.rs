//! One-decision-per-sample line follower

use crate::config::LineConfig;
use crate::line::{Decision, DecisionEngine, IrPattern};
use crate::traits::{DriveMotors, LineSensor, LineSensorError, MotorAction, Notifier};

/// Ties the decision engine to its motors and notification sink
///
/// [`tick`](Self::tick) is meant to be called at a fixed cadence by a
/// single task. Each call samples once, decides once and actuates once.
pub struct LineFollower<M, N> {
    engine: DecisionEngine,
    motors: M,
    notifier: N,
    last_action: Option<MotorAction>,
}

impl<M: DriveMotors, N: Notifier> LineFollower<M, N> {
    pub fn new(config: LineConfig, motors: M, notifier: N) -> Self {
        Self {
            engine: DecisionEngine::new(config),
            motors,
            notifier,
            last_action: None,
        }
    }

    /// Sample the array and act on it
    ///
    /// A failed read stops the motors and leaves the debounce counters
    /// untouched; the error is handed back for logging.
    pub fn tick<S: LineSensor>(&mut self, sensor: &mut S) -> Result<Decision, LineSensorError> {
        match sensor.read_pattern() {
            Ok(pattern) => Ok(self.step(pattern)),
            Err(e) => {
                self.motors.stop();
                self.last_action = Some(MotorAction::Stop);
                Err(e)
            }
        }
    }

    /// Act on an already sampled pattern
    pub fn step(&mut self, pattern: IrPattern) -> Decision {
        let decision = self.engine.decide(pattern);
        self.motors.apply(decision.action);
        if let Some(notification) = decision.notification {
            self.notifier.notify(notification);
        }
        self.last_action = Some(decision.action);
        decision
    }

    /// Action issued on the previous tick
    pub fn last_action(&self) -> Option<MotorAction> {
        self.last_action
    }

    pub fn engine(&self) -> &DecisionEngine {
        &self.engine
    }

    #[cfg(test)]
    fn motors(&self) -> &M {
        &self.motors
    }

    #[cfg(test)]
    fn notifier(&self) -> &N {
        &self.notifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autobot_protocol::Notification;
    use heapless::Vec;

    #[derive(Default)]
    struct RecordingMotors {
        calls: Vec<&'static str, 32>,
    }

    impl RecordingMotors {
        fn record(&mut self, name: &'static str) {
            self.calls.push(name).unwrap();
        }
    }

    impl DriveMotors for RecordingMotors {
        fn forward(&mut self) {
            self.record("forward");
        }
        fn backward(&mut self) {
            self.record("backward");
        }
        fn left(&mut self) {
            self.record("left");
        }
        fn right(&mut self) {
            self.record("right");
        }
        fn sharp_left(&mut self) {
            self.record("sharp_left");
        }
        fn sharp_right(&mut self) {
            self.record("sharp_right");
        }
        fn stop(&mut self) {
            self.record("stop");
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Vec<&'static [u8], 8>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&mut self, notification: Notification) {
            self.sent.push(notification.as_bytes()).unwrap();
        }
    }

    struct ScriptedSensor {
        readings: Vec<Result<IrPattern, LineSensorError>, 16>,
        next: usize,
    }

    impl ScriptedSensor {
        fn new(readings: &[Result<IrPattern, LineSensorError>]) -> Self {
            Self {
                readings: Vec::from_slice(readings).unwrap(),
                next: 0,
            }
        }
    }

    impl LineSensor for ScriptedSensor {
        fn read_pattern(&mut self) -> Result<IrPattern, LineSensorError> {
            let reading = self.readings[self.next];
            self.next += 1;
            reading
        }
    }

    fn follower() -> LineFollower<RecordingMotors, RecordingNotifier> {
        LineFollower::new(
            LineConfig::DEFAULT,
            RecordingMotors::default(),
            RecordingNotifier::default(),
        )
    }

    #[test]
    fn test_step_drives_motors() {
        let mut follower = follower();
        follower.step(IrPattern::new(0b0000));
        follower.step(IrPattern::new(0b0100));
        follower.step(IrPattern::new(0b0011));
        follower.step(IrPattern::new(0b1100));
        assert_eq!(
            follower.motors().calls.as_slice(),
            &["forward", "left", "sharp_right", "sharp_left"]
        );
        assert_eq!(follower.last_action(), Some(MotorAction::SharpLeft));
        assert!(follower.notifier().sent.is_empty());
    }

    #[test]
    fn test_stop_marker_sends_exact_tokens() {
        let mut follower = follower();
        for _ in 0..3 {
            follower.step(IrPattern::ALL_DARK);
        }
        assert_eq!(follower.notifier().sent.as_slice(), &[b"YES\n" as &[u8]]);

        for _ in 0..3 {
            follower.step(IrPattern::ALL_LIGHT);
        }
        assert_eq!(
            follower.notifier().sent.as_slice(),
            &[b"YES\n" as &[u8], b"STOP\n" as &[u8]]
        );
    }

    #[test]
    fn test_read_error_stops_without_counting() {
        let mut follower = follower();
        let mut sensor = ScriptedSensor::new(&[
            Ok(IrPattern::ALL_DARK),
            Ok(IrPattern::ALL_DARK),
            Err(LineSensorError::PinRead(2)),
            Ok(IrPattern::ALL_DARK),
        ]);

        follower.tick(&mut sensor).unwrap();
        follower.tick(&mut sensor).unwrap();
        assert_eq!(follower.tick(&mut sensor), Err(LineSensorError::PinRead(2)));
        assert_eq!(follower.engine().stop_streak(), 2);
        assert_eq!(follower.engine().resume_streak(), 0);
        assert_eq!(follower.last_action(), Some(MotorAction::Stop));

        let decision = follower.tick(&mut sensor).unwrap();
        assert_eq!(decision.notification, Some(Notification::Stopped));
        assert_eq!(follower.motors().calls.as_slice(), &["stop"; 4]);
    }
}
