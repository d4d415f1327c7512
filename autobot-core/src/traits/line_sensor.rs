//! IR line sensor array trait

use crate::line::IrPattern;

/// Errors that can occur while sampling the IR array
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineSensorError {
    /// Reading the input at this position (0 = leftmost) failed
    PinRead(u8),
}

/// Source of 4-bit line patterns
pub trait LineSensor {
    /// Sample all sensors once and pack them left to right
    fn read_pattern(&mut self) -> Result<IrPattern, LineSensorError>;
}
