//! Published per-channel distance

use portable_atomic::{AtomicBool, AtomicU32, Ordering};

use super::DiscardReason;

/// Latest reading of one rangefinder
///
/// Written only by that channel's capture handler; every field is a single
/// word so readers get a consistent value without locking.
#[derive(Debug)]
pub struct EchoReading {
    distance_cm: AtomicU32,
    near: AtomicBool,
    measured: AtomicU32,
    discarded: AtomicU32,
}

impl Default for EchoReading {
    fn default() -> Self {
        Self::new()
    }
}

impl EchoReading {
    pub const fn new() -> Self {
        Self {
            distance_cm: AtomicU32::new(0),
            near: AtomicBool::new(false),
            measured: AtomicU32::new(0),
            discarded: AtomicU32::new(0),
        }
    }

    /// Last published distance in cm (0 until the first echo)
    pub fn distance_cm(&self) -> u32 {
        self.distance_cm.load(Ordering::Acquire)
    }

    /// Whether the last published distance was under the threshold
    pub fn is_near(&self) -> bool {
        self.near.load(Ordering::Acquire)
    }

    /// Number of pulses published
    pub fn measured(&self) -> u32 {
        self.measured.load(Ordering::Relaxed)
    }

    /// Number of pulses rejected
    pub fn discarded(&self) -> u32 {
        self.discarded.load(Ordering::Relaxed)
    }

    pub(crate) fn publish(&self, distance_cm: u32, near_threshold_cm: u32) {
        self.distance_cm.store(distance_cm, Ordering::Release);
        self.near
            .store(distance_cm < near_threshold_cm, Ordering::Release);
        self.measured.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn discard(&self, _reason: DiscardReason) {
        self.discarded.fetch_add(1, Ordering::Relaxed);
    }
}
