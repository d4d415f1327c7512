//! Foreground control loop

mod line_follower;

pub use line_follower::LineFollower;
