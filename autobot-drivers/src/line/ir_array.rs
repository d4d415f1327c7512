//! Four-channel IR reflectance array
//!
//! Each sensor module drives a digital output that changes level over the
//! dark track. Depending on the module the track reads high or low, so the
//! active level is configurable.

use autobot_core::line::{IrPattern, IR_COUNT};
use autobot_core::traits::{LineSensor, LineSensorError};
use embedded_hal::digital::InputPin;

/// IR array sampled through GPIO inputs, leftmost sensor first
pub struct IrArray<P> {
    pins: [P; IR_COUNT],
    /// Track reads as a high level
    dark_is_high: bool,
}

impl<P: InputPin> IrArray<P> {
    /// Create an array whose sensors pull high over the track
    pub fn new(pins: [P; IR_COUNT]) -> Self {
        Self {
            pins,
            dark_is_high: true,
        }
    }

    /// Create an array whose sensors pull low over the track
    pub fn new_active_low(pins: [P; IR_COUNT]) -> Self {
        Self {
            pins,
            dark_is_high: false,
        }
    }

    /// Raw per-sensor track detection, left to right
    pub fn read_states(&mut self) -> Result<[bool; IR_COUNT], LineSensorError> {
        let mut states = [false; IR_COUNT];
        for (index, (pin, state)) in self.pins.iter_mut().zip(states.iter_mut()).enumerate() {
            let high = pin
                .is_high()
                .map_err(|_| LineSensorError::PinRead(index as u8))?;
            *state = high == self.dark_is_high;
        }
        Ok(states)
    }
}

impl<P: InputPin> LineSensor for IrArray<P> {
    fn read_pattern(&mut self) -> Result<IrPattern, LineSensorError> {
        self.read_states().map(IrPattern::from_states)
    }
}
