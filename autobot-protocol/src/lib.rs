//! Companion Link Protocol
//!
//! This crate defines the line-based UART protocol between the AutoBot main
//! controller and its companion camera board (ESP32-CAM). The protocol is
//! plain ASCII, one message per `\n`-terminated line.
//!
//! # Protocol Overview
//!
//! Controller to companion, one-shot tokens:
//! ```text
//! YES\n    robot has stopped on an all-dark marker
//! STOP\n   robot has left the marker and resumed driving
//! ```
//!
//! Companion to controller, pose telemetry:
//! ```text
//! tag_id,yaw,pitch,roll,x,y,z\n
//! ```
//!
//! The tokens are an external contract with the companion firmware and are
//! preserved byte-for-byte.

#![no_std]
#![deny(unsafe_code)]

pub mod line;
pub mod notification;
pub mod telemetry;

pub use line::{LineAssembler, LineError, MAX_LINE_LEN};
pub use notification::Notification;
pub use telemetry::{TelemetryError, TelemetryFrame, TELEMETRY_FIELDS};
