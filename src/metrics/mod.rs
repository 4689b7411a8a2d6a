//! Evaluation metrics for classification models.
//!
//! Includes accuracy, precision, recall, F1-score (with macro, micro,
//! and weighted averaging), confusion matrices, and a formatted
//! per-class classification report.

pub mod classification;

pub use classification::{
    accuracy, classification_report, confusion_matrix, confusion_matrix_sized, f1_per_class,
    f1_score, precision, recall, Average, ClassMetrics, ClassificationReport,
};
