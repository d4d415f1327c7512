//! Left/right encoder pair

use super::{counts_to_degrees, EncoderTracker};
use crate::config::EncoderConfig;
use crate::traits::QuadratureCounter;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Which wheel an encoder belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Wheel {
    Left,
    Right,
}

/// Both drive wheel encoders
///
/// The two counters may be different peripheral types, so they are held
/// side by side rather than in an array and dispatched on [`Wheel`].
pub struct EncoderPair<L, R> {
    left: EncoderTracker<L>,
    right: EncoderTracker<R>,
    counts_per_rev: u32,
}

impl<L: QuadratureCounter, R: QuadratureCounter> EncoderPair<L, R> {
    pub const fn new(left: L, right: R, config: EncoderConfig) -> Self {
        Self {
            left: EncoderTracker::new(left),
            right: EncoderTracker::new(right),
            counts_per_rev: config.counts_per_rev,
        }
    }

    /// Zero both wheels and start their counters
    pub fn init(&self) {
        self.left.init();
        self.right.init();
    }

    /// Update interrupt entry point
    pub fn on_overflow(&self, wheel: Wheel) {
        match wheel {
            Wheel::Left => self.left.on_overflow(),
            Wheel::Right => self.right.on_overflow(),
        }
    }

    /// Extended position of one wheel in counts
    pub fn get_position(&self, wheel: Wheel) -> i32 {
        match wheel {
            Wheel::Left => self.left.position(),
            Wheel::Right => self.right.position(),
        }
    }

    /// Both positions from one critical section
    pub fn positions(&self) -> (i32, i32) {
        let ((left_offset, left_count), (right_offset, right_count)) =
            critical_section::with(|cs| (self.left.snapshot(cs), self.right.snapshot(cs)));
        (
            left_offset.wrapping_add(left_count as i32),
            right_offset.wrapping_add(right_count as i32),
        )
    }

    /// Zero both wheels without letting an overflow land halfway through
    pub fn reset_positions(&self) {
        critical_section::with(|cs| {
            self.left.reset_in(cs);
            self.right.reset_in(cs);
        });
    }

    /// Wheel rotation in degrees
    pub fn degrees(&self, wheel: Wheel) -> f32 {
        counts_to_degrees(self.get_position(wheel), self.counts_per_rev)
    }

    pub fn left(&self) -> &EncoderTracker<L> {
        &self.left
    }

    pub fn right(&self) -> &EncoderTracker<R> {
        &self.right
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::mock::MockCounter;

    fn pair() -> EncoderPair<MockCounter, MockCounter> {
        let pair = EncoderPair::new(
            MockCounter::new(0xFFFF),
            MockCounter::new(0xFFFF),
            EncoderConfig::DEFAULT,
        );
        pair.init();
        pair
    }

    #[test]
    fn test_wheels_tracked_separately() {
        let pair = pair();
        pair.left().counter().wrap_up();
        pair.on_overflow(Wheel::Left);
        pair.left().counter().count.set(5);
        pair.right().counter().count.set(7);

        assert_eq!(pair.get_position(Wheel::Left), 65_541);
        assert_eq!(pair.get_position(Wheel::Right), 7);
        assert_eq!(pair.positions(), (65_541, 7));
    }

    #[test]
    fn test_reset_positions_then_read_is_zero() {
        let pair = pair();
        pair.on_overflow(Wheel::Left);
        pair.right().counter().wrap_down();
        pair.on_overflow(Wheel::Right);
        pair.left().counter().count.set(300);

        pair.reset_positions();
        assert_eq!(pair.get_position(Wheel::Left), 0);
        assert_eq!(pair.get_position(Wheel::Right), 0);
    }

    #[test]
    fn test_degrees() {
        let pair = pair();
        pair.left().counter().count.set(2048);
        assert_eq!(pair.degrees(Wheel::Left), 180.0);
        assert_eq!(pair.degrees(Wheel::Right), 0.0);
    }
}
