//! Interrupt-shared sensor state
//!
//! Written by the timer interrupt handlers in [`crate::hw`], read by tasks.

use autobot_core::encoder::EncoderPair;
use autobot_core::sonar::EchoTimer;

use crate::config::ROBOT_CONFIG;
use crate::hw::encoder::TimerCounter;

/// Echo timing for all three rangefinders
pub static ECHO: EchoTimer = EchoTimer::new(ROBOT_CONFIG.sonar);

/// Left (TIM4) and right (TIM5) wheel positions
pub static ENCODERS: EncoderPair<TimerCounter, TimerCounter> = EncoderPair::new(
    TimerCounter::Tim4,
    TimerCounter::Tim5,
    ROBOT_CONFIG.encoder,
);
