//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels and the
//! interrupt-shared state in [`crate::state`].

pub mod line_follow;
pub mod notify_tx;
pub mod status;
pub mod telemetry_rx;

pub use line_follow::line_follow_task;
pub use notify_tx::notify_tx_task;
pub use status::status_task;
pub use telemetry_rx::telemetry_rx_task;
