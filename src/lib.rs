//! Sentir: mental-health statement classification in pure Rust.
//!
//! Sentir turns a labeled CSV of statements into a ranked comparison of
//! classical classifiers. The preparation pipeline (cleaning, stemming,
//! TF-IDF vectorization, scalar feature fusion, class rebalancing) is
//! built in and fully seeded, so a run is reproducible end to end.
//!
//! # Quick Start
//!
//! ```
//! use sentir::prelude::*;
//!
//! // Presence features for six statements (calm = 0, worried = 1)
//! let x = Matrix::from_vec(6, 2, vec![
//!     1.0, 0.0,
//!     1.0, 0.0,
//!     1.0, 1.0,
//!     0.0, 1.0,
//!     0.0, 1.0,
//!     0.0, 1.0,
//! ]).unwrap();
//! let y = vec![0, 0, 0, 1, 1, 1];
//!
//! // Train a Bernoulli naive Bayes classifier
//! let mut model = BernoulliNb::new();
//! model.fit(&x, &y).unwrap();
//!
//! // Make predictions
//! let predictions = model.predict(&x).unwrap();
//! assert!(accuracy(&predictions, &y) > 0.8);
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Core Vector and Matrix types
//! - [`data`]: Corpus loading from the labeled statement CSV
//! - [`text`]: Normalization, tokenization, stemming, and TF-IDF vectorization
//! - [`features`]: Scalar text statistics and feature matrix fusion
//! - [`preprocessing`]: Label encoding and class rebalancing
//! - [`model_selection`]: Seeded train/test splitting
//! - [`classification`]: Bernoulli naive Bayes and logistic regression
//! - [`tree`]: Decision tree and gradient boosting classifiers
//! - [`metrics`]: Accuracy, per-class reports, confusion matrices
//! - [`evaluate`]: Candidate model suites and ranked results
//! - [`pipeline`]: End-to-end corpus-to-leaderboard runs
//! - [`error`]: Crate-wide error type
//! - [`traits`]: The `Classifier` contract shared by every model

pub mod classification;
pub mod data;
pub mod error;
pub mod evaluate;
pub mod features;
pub mod metrics;
pub mod model_selection;
pub mod pipeline;
pub mod prelude;
pub mod preprocessing;
pub mod primitives;
pub mod text;
pub mod traits;
pub mod tree;

pub use error::{Result, SentirError};
pub use primitives::{Matrix, Vector};
pub use traits::Classifier;
