//! Core compute primitives (Vector, Matrix).
//!
//! Row-major dense storage; the foundation for every feature matrix and
//! classifier in the crate.

mod matrix;
mod vector;

pub use matrix::Matrix;
pub use vector::Vector;
