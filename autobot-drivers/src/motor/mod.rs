//! Drive motor implementations
//!
//! - [`HBridge`]: one wheel on a PWM enable input plus two direction inputs
//! - [`DifferentialDrive`]: maps drive commands onto a left/right wheel pair

pub mod differential;
pub mod hbridge;

pub use differential::DifferentialDrive;
pub use hbridge::{HBridge, WheelOutput, WheelSpeed};
