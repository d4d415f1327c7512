//! Overflow-extended position for one counter

use core::cell::Cell;

use critical_section::{CriticalSection, Mutex};

use crate::traits::{CountDirection, QuadratureCounter};

/// Period assumed before `init` reads the real autoreload
const DEFAULT_MODULUS: u32 = 1 << 16;

/// Extends a wrapping hardware counter to a 32-bit signed position
///
/// The overflow offset is touched by the update interrupt and by thread
/// code, so it sits behind a critical-section mutex. `position` takes the
/// lock only for the offset/counter snapshot.
pub struct EncoderTracker<C> {
    counter: C,
    offset: Mutex<Cell<i32>>,
    modulus: Mutex<Cell<u32>>,
}

impl<C: QuadratureCounter> EncoderTracker<C> {
    pub const fn new(counter: C) -> Self {
        Self {
            counter,
            offset: Mutex::new(Cell::new(0)),
            modulus: Mutex::new(Cell::new(DEFAULT_MODULUS)),
        }
    }

    /// Latch the counter period, zero everything and start counting
    pub fn init(&self) {
        critical_section::with(|cs| {
            let modulus = self.counter.autoreload().wrapping_add(1);
            self.modulus.borrow(cs).set(modulus);
            self.reset_in(cs);
        });
        self.counter.start();
    }

    /// Fold one counter wrap into the offset
    ///
    /// Call from the update interrupt, once per wrap.
    pub fn on_overflow(&self) {
        critical_section::with(|cs| {
            let step = self.modulus.borrow(cs).get() as i32;
            let offset = self.offset.borrow(cs);
            match self.counter.direction() {
                CountDirection::Up => offset.set(offset.get().wrapping_add(step)),
                CountDirection::Down => offset.set(offset.get().wrapping_sub(step)),
            }
        });
    }

    /// Extended position in counts
    pub fn position(&self) -> i32 {
        let (offset, count) = critical_section::with(|cs| self.snapshot(cs));
        offset.wrapping_add(count as i32)
    }

    /// Zero the offset and the hardware count
    pub fn reset(&self) {
        critical_section::with(|cs| self.reset_in(cs));
    }

    /// Accumulated overflow offset, without the live count
    pub fn offset(&self) -> i32 {
        critical_section::with(|cs| self.offset.borrow(cs).get())
    }

    pub fn counter(&self) -> &C {
        &self.counter
    }

    pub(crate) fn snapshot(&self, cs: CriticalSection<'_>) -> (i32, u16) {
        (self.offset.borrow(cs).get(), self.counter.count())
    }

    pub(crate) fn reset_in(&self, cs: CriticalSection<'_>) {
        self.offset.borrow(cs).set(0);
        self.counter.set_count(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::mock::MockCounter;
    use proptest::prelude::*;

    #[test]
    fn test_init_zeroes_and_starts() {
        let tracker = EncoderTracker::new(MockCounter::new(999));
        tracker.counter().count.set(123);
        tracker.init();
        assert!(tracker.counter().started.get());
        assert_eq!(tracker.position(), 0);
    }

    #[test]
    fn test_position_adds_live_count() {
        let tracker = EncoderTracker::new(MockCounter::new(999));
        tracker.init();
        tracker.counter().count.set(250);
        assert_eq!(tracker.position(), 250);
    }

    #[test]
    fn test_up_and_down_wraps() {
        let tracker = EncoderTracker::new(MockCounter::new(999));
        tracker.init();

        tracker.counter().wrap_up();
        tracker.on_overflow();
        tracker.counter().count.set(10);
        assert_eq!(tracker.position(), 1010);

        tracker.counter().wrap_down();
        tracker.on_overflow();
        assert_eq!(tracker.offset(), 0);
        assert_eq!(tracker.position(), 999);

        tracker.counter().wrap_down();
        tracker.on_overflow();
        tracker.counter().count.set(900);
        assert_eq!(tracker.position(), -100);
    }

    #[test]
    fn test_full_16_bit_period() {
        let tracker = EncoderTracker::new(MockCounter::new(0xFFFF));
        tracker.init();
        tracker.counter().wrap_down();
        tracker.on_overflow();
        assert_eq!(tracker.position(), -1);
    }

    #[test]
    fn test_reset_clears_offset_and_count() {
        let tracker = EncoderTracker::new(MockCounter::new(999));
        tracker.init();
        tracker.on_overflow();
        tracker.counter().count.set(42);
        tracker.reset();
        assert_eq!(tracker.position(), 0);
        assert_eq!(tracker.counter().count(), 0);
    }

    proptest! {
        #[test]
        fn prop_position_is_net_wraps_plus_count(
            autoreload in 1u32..=0xFFFF,
            wraps in proptest::collection::vec(any::<bool>(), 0..64),
            final_count in any::<u16>(),
        ) {
            let tracker = EncoderTracker::new(MockCounter::new(autoreload));
            tracker.init();

            let mut net: i64 = 0;
            for up in wraps {
                if up {
                    tracker.counter().wrap_up();
                    net += 1;
                } else {
                    tracker.counter().wrap_down();
                    net -= 1;
                }
                tracker.on_overflow();
                // Interleaved reads must not disturb the offset
                let _ = tracker.position();
            }

            let count = (final_count as u32 % (autoreload + 1)) as u16;
            tracker.counter().count.set(count);

            let expected = net * (autoreload as i64 + 1) + count as i64;
            prop_assert_eq!(tracker.position() as i64, expected);
        }
    }
}
