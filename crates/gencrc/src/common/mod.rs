//! Kernels shared by the engine, the digest and the detection helpers.
//!
//! - `portable`: register geometry, the bitwise kernel and the table kernel
//! - `tables`: cache table construction
//! - `reference`: bit-vector oracle, no tables and no integer register

pub mod portable;
pub mod reference;
pub mod tables;

#[cfg(test)]
mod proptests;
