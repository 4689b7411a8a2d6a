//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use sentir::prelude::*;
//! ```

pub use crate::primitives::{Matrix, Vector};
pub use crate::traits::Classifier;
pub use crate::error::{Result, SentirError};
pub use crate::data::Corpus;
pub use crate::classification::{BernoulliNb, LogisticRegression};
pub use crate::tree::{DecisionTreeClassifier, GradientBoostingClassifier};
pub use crate::metrics::{accuracy, classification_report, f1_score, Average};
pub use crate::evaluate::{EvaluationSuite, ModelConfig};
pub use crate::pipeline::{Pipeline, PipelineConfig};
