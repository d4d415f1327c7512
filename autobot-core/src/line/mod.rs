//! IR line following
//!
//! Four reflective IR sensors sit across the front of the chassis. Each
//! sample is packed into an [`IrPattern`] and fed to the
//! [`DecisionEngine`], which picks a steering action and watches for the
//! all-dark stop marker.

mod decision;
mod pattern;

pub use decision::{action_for, Decision, DecisionEngine};
pub use pattern::{IrPattern, IR_COUNT};
