//! Scalar statement features and feature fusion.
//!
//! Alongside TF-IDF term weights, each statement contributes two scalar
//! signals: its raw character length and its sentence count. Longer,
//! more fragmented statements distribute differently across categories,
//! so the fused design matrix carries both blocks side by side.

pub mod fuse;
pub mod stats;

pub use fuse::hstack;
pub use stats::{TextStats, TextStatsExtractor, TextStatsSummary};
