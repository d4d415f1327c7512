//! Line sensor drivers

pub mod ir_array;

pub use ir_array::IrArray;
