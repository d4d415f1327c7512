//! Hardware abstraction traits
//!
//! These traits define the interface between the sensor/decision logic
//! and the board-specific peripherals.

pub mod counter;
pub mod line_sensor;
pub mod motor;
pub mod notifier;

pub use counter::{CountDirection, QuadratureCounter};
pub use line_sensor::{LineSensor, LineSensorError};
pub use motor::{DriveMotors, MotorAction};
pub use notifier::Notifier;
