//! Hardware driver implementations
//!
//! This crate provides `embedded-hal` 1.0 implementations of the traits
//! defined in autobot-core:
//!
//! - IR line sensor array over digital inputs
//! - H-bridge wheel outputs and the differential drive built on them

#![no_std]
#![deny(unsafe_code)]

pub mod line;
pub mod motor;
