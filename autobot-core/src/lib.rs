//! Board-agnostic core logic for the AutoBot firmware
//!
//! This crate contains the sensor and decision logic that does not depend
//! on a specific microcontroller:
//!
//! - Ultrasonic echo timing from input-capture events
//! - Overflow-extended quadrature encoder positions
//! - IR line pattern decisions with stop-marker debounce
//! - Hardware abstraction traits (motors, counters, IR array, notifier)
//! - Configuration type definitions
//!
//! Interrupt-written state (echo readings, encoder offsets) is designed to
//! live in `static`s and be shared by reference; the decision engine is
//! owned by a single foreground task.

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod control;
pub mod encoder;
pub mod line;
pub mod sonar;
pub mod traits;
