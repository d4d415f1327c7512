//! Packed IR sensor sample

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of IR sensors in the array
pub const IR_COUNT: usize = 4;

const MASK: u8 = (1 << IR_COUNT) - 1;

/// One sample of the IR array, 4 bits, leftmost sensor in the MSB
///
/// A set bit means that sensor sees the dark track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IrPattern(u8);

impl IrPattern {
    /// Every sensor over the track: the stop marker
    pub const ALL_DARK: Self = Self(MASK);
    /// No sensor sees the track
    pub const ALL_LIGHT: Self = Self(0);

    /// Build from raw bits; anything above bit 3 is dropped
    pub const fn new(bits: u8) -> Self {
        Self(bits & MASK)
    }

    /// Pack per-sensor readings ordered left to right
    pub fn from_states(states: [bool; IR_COUNT]) -> Self {
        let bits = states
            .iter()
            .fold(0u8, |acc, &dark| (acc << 1) | u8::from(dark));
        Self(bits)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_all_dark(self) -> bool {
        self.0 == MASK
    }

    /// Whether the sensor at `index` (0 = leftmost) sees the track
    pub fn is_dark(self, index: usize) -> bool {
        index < IR_COUNT && self.0 & (1 << (IR_COUNT - 1 - index)) != 0
    }
}

impl From<u8> for IrPattern {
    fn from(bits: u8) -> Self {
        Self::new(bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_states_msb_is_left() {
        assert_eq!(IrPattern::from_states([true, false, false, false]).bits(), 0b1000);
        assert_eq!(IrPattern::from_states([false, false, false, true]).bits(), 0b0001);
        assert_eq!(IrPattern::from_states([true, true, false, false]).bits(), 0b1100);
        assert_eq!(IrPattern::from_states([true; 4]), IrPattern::ALL_DARK);
    }

    #[test]
    fn test_new_masks_high_bits() {
        assert_eq!(IrPattern::new(0xF3).bits(), 0b0011);
        assert!(IrPattern::from(0x1F).is_all_dark());
    }

    #[test]
    fn test_is_dark() {
        let pattern = IrPattern::new(0b0100);
        assert!(!pattern.is_dark(0));
        assert!(pattern.is_dark(1));
        assert!(!pattern.is_dark(2));
        assert!(!pattern.is_dark(4));
    }
}
