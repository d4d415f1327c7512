//! Latest pose from the companion

use core::cell::Cell;

use autobot_protocol::TelemetryFrame;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use portable_atomic::{AtomicBool, AtomicU32, Ordering};

/// Most recent valid telemetry frame plus a "new data" flag
pub struct PoseStore {
    frame: Mutex<CriticalSectionRawMutex, Cell<Option<TelemetryFrame>>>,
    fresh: AtomicBool,
    accepted: AtomicU32,
    rejected: AtomicU32,
}

impl PoseStore {
    pub const fn new() -> Self {
        Self {
            frame: Mutex::new(Cell::new(None)),
            fresh: AtomicBool::new(false),
            accepted: AtomicU32::new(0),
            rejected: AtomicU32::new(0),
        }
    }

    /// Replace the stored frame and mark it fresh
    pub fn publish(&self, frame: TelemetryFrame) {
        self.frame.lock(|f| f.set(Some(frame)));
        self.fresh.store(true, Ordering::Release);
        self.accepted.fetch_add(1, Ordering::Relaxed);
    }

    /// Count a line that failed to frame or parse
    pub fn reject(&self) {
        self.rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Latest frame, without touching the fresh flag
    pub fn latest(&self) -> Option<TelemetryFrame> {
        self.frame.lock(|f| f.get())
    }

    /// Latest frame if it arrived since the previous call
    pub fn take_fresh(&self) -> Option<TelemetryFrame> {
        if self.fresh.swap(false, Ordering::AcqRel) {
            self.latest()
        } else {
            None
        }
    }

    /// (accepted, rejected) line counts
    pub fn counts(&self) -> (u32, u32) {
        (
            self.accepted.load(Ordering::Relaxed),
            self.rejected.load(Ordering::Relaxed),
        )
    }
}

pub static POSE: PoseStore = PoseStore::new();
