//! Quadrature encoder position tracking
//!
//! The wheel encoders feed 16-bit hardware counters that wrap every
//! `autoreload + 1` counts. Each wrap raises an update interrupt;
//! [`EncoderTracker::on_overflow`] folds the wrap into a signed 32-bit
//! offset so the combined position survives any number of wraps.
//!
//! The offset is only correct if every wrap is seen exactly once. A missed
//! or doubled overflow interrupt shifts the position by a full counter
//! period for good; there is no reference to detect this against. Callers
//! that need long-term accuracy should re-zero with
//! [`EncoderPair::reset_positions`] at known reference points.

mod pair;
mod tracker;

pub use pair::{EncoderPair, Wheel};
pub use tracker::EncoderTracker;

/// Edges counted per encoder line with full x4 quadrature decoding
pub const QUADRATURE_EDGES: u32 = 4;

/// Wheel rotation in degrees for a position in counts
pub fn counts_to_degrees(position: i32, counts_per_rev: u32) -> f32 {
    let counts_per_turn = (counts_per_rev * QUADRATURE_EDGES) as f32;
    position as f32 / counts_per_turn * 360.0
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_to_degrees() {
        assert_eq!(counts_to_degrees(0, 1024), 0.0);
        assert_eq!(counts_to_degrees(4096, 1024), 360.0);
        assert_eq!(counts_to_degrees(-1024, 1024), -90.0);
        assert_eq!(counts_to_degrees(2048 * 3, 1024), 540.0);
    }
}
