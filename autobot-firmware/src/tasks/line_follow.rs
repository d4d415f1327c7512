//! Line follower task
//!
//! Samples the IR array at the control rate and drives the motors. One
//! decision per sample; the task never blocks between sampling and
//! actuating.

use autobot_core::control::LineFollower;
use autobot_core::traits::MotorAction;
use autobot_drivers::line::IrArray;
use autobot_drivers::motor::{DifferentialDrive, HBridge};
use autobot_protocol::Notification;
use defmt::*;
use embassy_stm32::gpio::{Input, Output};
use embassy_stm32::peripherals::TIM1;
use embassy_stm32::timer::simple_pwm::SimplePwmChannel;
use embassy_time::{Duration, Ticker};

use crate::notifier::QueueNotifier;

pub type WheelBridge = HBridge<SimplePwmChannel<'static, TIM1>, Output<'static>, Output<'static>>;
pub type Drive = DifferentialDrive<WheelBridge, WheelBridge>;
pub type Follower = LineFollower<Drive, QueueNotifier>;
pub type IrSensors = IrArray<Input<'static>>;

#[embassy_executor::task]
pub async fn line_follow_task(mut follower: Follower, mut sensors: IrSensors, tick_ms: u32) {
    info!("Line follower task started ({} ms)", tick_ms);

    let mut ticker = Ticker::every(Duration::from_millis(tick_ms as u64));
    let mut previous: Option<MotorAction> = None;

    loop {
        ticker.next().await;

        match follower.tick(&mut sensors) {
            Ok(decision) => {
                trace!("IR decision: {:?}", decision);
                match decision.notification {
                    Some(Notification::Stopped) => info!("Stop marker reached"),
                    Some(Notification::Resumed) => info!("Left stop marker, resuming"),
                    None => {}
                }
            }
            Err(e) => warn!("IR read failed, stopping: {:?}", e),
        }

        let action = follower.last_action();
        if action != previous {
            let engine = follower.engine();
            debug!(
                "Motor action: {:?} (stop streak {}, triggered {})",
                action,
                engine.stop_streak(),
                engine.is_triggered()
            );
            previous = action;
        }
    }
}
