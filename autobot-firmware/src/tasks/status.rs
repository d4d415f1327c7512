//! Periodic sensor status log

use autobot_core::encoder::Wheel;
use autobot_core::sonar::SonarId;
use defmt::*;
use embassy_time::{Duration, Ticker};

use crate::state::{ECHO, ENCODERS};
use crate::telemetry::POSE;

#[embassy_executor::task]
pub async fn status_task(interval_ms: u32) {
    info!("Status task started");

    let mut ticker = Ticker::every(Duration::from_millis(interval_ms as u64));

    loop {
        ticker.next().await;

        let sonar = ECHO.snapshot();
        if sonar.any_near() {
            debug!("Obstacle within {} cm", ECHO.config().near_threshold_cm);
        }
        info!(
            "Sonar cm={} near={} discarded=[{}, {}, {}]",
            sonar.distance_cm,
            sonar.near,
            ECHO.discarded(SonarId::Sonar1),
            ECHO.discarded(SonarId::Sonar2),
            ECHO.discarded(SonarId::Sonar3),
        );

        let (left, right) = ENCODERS.positions();
        info!(
            "Wheels left={} ({} deg) right={} ({} deg)",
            left,
            ENCODERS.degrees(Wheel::Left),
            right,
            ENCODERS.degrees(Wheel::Right),
        );

        if let Some(pose) = POSE.take_fresh() {
            let (accepted, rejected) = POSE.counts();
            info!("Pose {:?} (ok={} bad={})", pose, accepted, rejected);
        }
    }
}
