//! Classification metrics for evaluating classifier performance.
//!
//! Provides accuracy, precision, recall, F1-score, confusion matrix,
//! and per-class report computation for multi-class classification.

use crate::primitives::Matrix;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Averaging strategy for multi-class metrics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Average {
    /// Calculate metrics for each label, return unweighted mean.
    Macro,
    /// Calculate metrics globally by counting total TP, FP, FN.
    Micro,
    /// Weighted mean by support (number of true instances per label).
    Weighted,
}

/// Compute classification accuracy.
///
/// accuracy = `correct_predictions` / `total_predictions`
///
/// # Arguments
///
/// * `y_pred` - Predicted class labels
/// * `y_true` - True class labels
///
/// # Returns
///
/// Accuracy score between 0.0 and 1.0
///
/// # Panics
///
/// Panics if vectors have different lengths or are empty.
///
/// # Examples
///
/// ```
/// use sentir::metrics::accuracy;
///
/// let y_true = vec![0, 1, 2, 0, 1, 2];
/// let y_pred = vec![0, 2, 1, 0, 0, 1];
/// let acc = accuracy(&y_pred, &y_true);
/// assert!((acc - 0.333333).abs() < 0.001);
/// ```
#[must_use]
pub fn accuracy(y_pred: &[usize], y_true: &[usize]) -> f32 {
    assert_eq!(y_pred.len(), y_true.len(), "Vectors must have same length");
    assert!(!y_true.is_empty(), "Vectors cannot be empty");

    let correct = y_pred
        .iter()
        .zip(y_true.iter())
        .filter(|(p, t)| p == t)
        .count();

    correct as f32 / y_true.len() as f32
}

/// Compute precision score.
///
/// precision = TP / (TP + FP)
///
/// # Arguments
///
/// * `y_pred` - Predicted class labels
/// * `y_true` - True class labels
/// * `average` - Averaging strategy for multi-class
///
/// # Returns
///
/// Precision score between 0.0 and 1.0
///
/// # Panics
///
/// Panics if vectors have different lengths or are empty.
///
/// # Examples
///
/// ```
/// use sentir::metrics::{precision, Average};
///
/// let y_true = vec![0, 1, 2, 0, 1, 2];
/// let y_pred = vec![0, 2, 1, 0, 0, 1];
/// let prec = precision(&y_pred, &y_true, Average::Macro);
/// assert!(prec >= 0.0 && prec <= 1.0);
/// ```
#[must_use]
pub fn precision(y_pred: &[usize], y_true: &[usize], average: Average) -> f32 {
    assert_eq!(y_pred.len(), y_true.len(), "Vectors must have same length");
    assert!(!y_true.is_empty(), "Vectors cannot be empty");

    let n_classes = n_classes_of(y_pred, y_true);
    if n_classes == 0 {
        return 0.0;
    }

    let (tp, fp, _, support) = compute_tp_fp_fn(y_pred, y_true, n_classes);

    match average {
        Average::Micro => {
            let total_tp: usize = tp.iter().sum();
            let total_fp: usize = fp.iter().sum();
            class_precision(total_tp, total_fp)
        }
        Average::Macro => {
            let sum: f32 = (0..n_classes).map(|i| class_precision(tp[i], fp[i])).sum();
            sum / n_classes as f32
        }
        Average::Weighted => {
            let total_support: usize = support.iter().sum();
            if total_support == 0 {
                return 0.0;
            }
            (0..n_classes)
                .map(|i| {
                    class_precision(tp[i], fp[i]) * support[i] as f32 / total_support as f32
                })
                .sum()
        }
    }
}

/// Compute recall score.
///
/// recall = TP / (TP + FN)
///
/// # Arguments
///
/// * `y_pred` - Predicted class labels
/// * `y_true` - True class labels
/// * `average` - Averaging strategy for multi-class
///
/// # Returns
///
/// Recall score between 0.0 and 1.0
///
/// # Panics
///
/// Panics if vectors have different lengths or are empty.
///
/// # Examples
///
/// ```
/// use sentir::metrics::{recall, Average};
///
/// let y_true = vec![0, 1, 2, 0, 1, 2];
/// let y_pred = vec![0, 2, 1, 0, 0, 1];
/// let rec = recall(&y_pred, &y_true, Average::Macro);
/// assert!(rec >= 0.0 && rec <= 1.0);
/// ```
#[must_use]
pub fn recall(y_pred: &[usize], y_true: &[usize], average: Average) -> f32 {
    assert_eq!(y_pred.len(), y_true.len(), "Vectors must have same length");
    assert!(!y_true.is_empty(), "Vectors cannot be empty");

    let n_classes = n_classes_of(y_pred, y_true);
    if n_classes == 0 {
        return 0.0;
    }

    let (tp, _, fn_counts, support) = compute_tp_fp_fn(y_pred, y_true, n_classes);

    match average {
        Average::Micro => {
            let total_tp: usize = tp.iter().sum();
            let total_fn: usize = fn_counts.iter().sum();
            class_recall(total_tp, total_fn)
        }
        Average::Macro => {
            let sum: f32 = (0..n_classes)
                .map(|i| class_recall(tp[i], fn_counts[i]))
                .sum();
            sum / n_classes as f32
        }
        Average::Weighted => {
            let total_support: usize = support.iter().sum();
            if total_support == 0 {
                return 0.0;
            }
            (0..n_classes)
                .map(|i| {
                    class_recall(tp[i], fn_counts[i]) * support[i] as f32 / total_support as f32
                })
                .sum()
        }
    }
}

/// Compute F1 score (harmonic mean of precision and recall).
///
/// F1 = 2 * (precision * recall) / (precision + recall)
///
/// # Arguments
///
/// * `y_pred` - Predicted class labels
/// * `y_true` - True class labels
/// * `average` - Averaging strategy for multi-class
///
/// # Returns
///
/// F1 score between 0.0 and 1.0
///
/// # Panics
///
/// Panics if vectors have different lengths or are empty.
///
/// # Examples
///
/// ```
/// use sentir::metrics::{f1_score, Average};
///
/// let y_true = vec![0, 1, 2, 0, 1, 2];
/// let y_pred = vec![0, 2, 1, 0, 0, 1];
/// let f1 = f1_score(&y_pred, &y_true, Average::Macro);
/// assert!(f1 >= 0.0 && f1 <= 1.0);
/// ```
#[must_use]
pub fn f1_score(y_pred: &[usize], y_true: &[usize], average: Average) -> f32 {
    assert_eq!(y_pred.len(), y_true.len(), "Vectors must have same length");
    assert!(!y_true.is_empty(), "Vectors cannot be empty");

    let n_classes = n_classes_of(y_pred, y_true);
    if n_classes == 0 {
        return 0.0;
    }

    let (tp, fp, fn_counts, support) = compute_tp_fp_fn(y_pred, y_true, n_classes);

    match average {
        Average::Micro => {
            let total_tp: usize = tp.iter().sum();
            let total_fp: usize = fp.iter().sum();
            let total_fn: usize = fn_counts.iter().sum();
            class_f1(total_tp, total_fp, total_fn)
        }
        Average::Macro => {
            let f1_sum: f32 = (0..n_classes)
                .map(|i| class_f1(tp[i], fp[i], fn_counts[i]))
                .sum();
            f1_sum / n_classes as f32
        }
        Average::Weighted => {
            let total_support: usize = support.iter().sum();
            if total_support == 0 {
                return 0.0;
            }
            (0..n_classes)
                .map(|i| {
                    class_f1(tp[i], fp[i], fn_counts[i]) * support[i] as f32
                        / total_support as f32
                })
                .sum()
        }
    }
}

/// Compute per-class F1 scores.
///
/// Returns a vector of F1 scores, one per class (ordered by class index).
/// For binary classification, index 1 is the positive-class F1.
///
/// # Panics
///
/// Panics if vectors have different lengths or are empty.
///
/// # Examples
///
/// ```
/// use sentir::metrics::f1_per_class;
///
/// let y_true = vec![1, 0, 1, 0];
/// let y_pred = vec![1, 1, 0, 0];
/// let per_class = f1_per_class(&y_pred, &y_true);
/// assert_eq!(per_class.len(), 2);
/// assert!((per_class[0] - 0.5).abs() < 1e-5);
/// assert!((per_class[1] - 0.5).abs() < 1e-5);
/// ```
#[must_use]
pub fn f1_per_class(y_pred: &[usize], y_true: &[usize]) -> Vec<f32> {
    assert_eq!(y_pred.len(), y_true.len(), "Vectors must have same length");
    assert!(!y_true.is_empty(), "Vectors cannot be empty");

    let n_classes = n_classes_of(y_pred, y_true);
    let (tp, fp, fn_counts, _) = compute_tp_fp_fn(y_pred, y_true, n_classes);
    (0..n_classes)
        .map(|i| class_f1(tp[i], fp[i], fn_counts[i]))
        .collect()
}

/// Compute confusion matrix.
///
/// Returns a matrix where element `[i,j]` is the count of samples
/// with true label i and predicted label j (rows are actual classes,
/// columns are predicted classes).
///
/// # Arguments
///
/// * `y_pred` - Predicted class labels
/// * `y_true` - True class labels
///
/// # Returns
///
/// Confusion matrix as `Matrix<usize>`
///
/// # Panics
///
/// Panics if vectors have different lengths or are empty.
///
/// # Examples
///
/// ```
/// use sentir::metrics::confusion_matrix;
///
/// let y_true = vec![0, 0, 1, 1, 2, 2];
/// let y_pred = vec![0, 1, 1, 1, 2, 0];
/// let cm = confusion_matrix(&y_pred, &y_true);
/// assert_eq!(cm.n_rows(), 3);
/// assert_eq!(cm.n_cols(), 3);
/// assert_eq!(cm.get(1, 1), 2);
/// ```
#[must_use]
pub fn confusion_matrix(y_pred: &[usize], y_true: &[usize]) -> Matrix<usize> {
    confusion_matrix_sized(y_pred, y_true, n_classes_of(y_pred, y_true))
}

/// Compute confusion matrix over a fixed label space.
///
/// Use when the label space is larger than what these two vectors
/// happen to contain, so rows stay aligned with external class names.
/// Classes absent from both vectors produce all-zero rows and columns.
///
/// # Panics
///
/// Panics if vectors have different lengths or are empty, or if any
/// label is `>= n_classes`.
#[must_use]
pub fn confusion_matrix_sized(
    y_pred: &[usize],
    y_true: &[usize],
    n_classes: usize,
) -> Matrix<usize> {
    assert_eq!(y_pred.len(), y_true.len(), "Vectors must have same length");
    assert!(!y_true.is_empty(), "Vectors cannot be empty");
    assert!(
        n_classes_of(y_pred, y_true) <= n_classes,
        "labels must fit inside the declared class count"
    );

    let mut data = vec![0usize; n_classes * n_classes];

    for (&true_label, &pred_label) in y_true.iter().zip(y_pred.iter()) {
        data[true_label * n_classes + pred_label] += 1;
    }

    Matrix::from_vec(n_classes, n_classes, data)
        .expect("Confusion matrix dimensions match data length")
}

/// Per-class precision, recall, F1, and support.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassMetrics {
    /// Human-readable class name
    pub label: String,
    /// TP / (TP + FP) for this class
    pub precision: f32,
    /// TP / (TP + FN) for this class
    pub recall: f32,
    /// Harmonic mean of precision and recall
    pub f1: f32,
    /// Number of true instances of this class
    pub support: usize,
}

/// Per-class metrics plus macro and weighted averages, in the layout
/// of the familiar text classification report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationReport {
    /// Overall accuracy
    pub accuracy: f32,
    /// One entry per class, ordered by class index
    pub classes: Vec<ClassMetrics>,
    /// Unweighted mean of per-class precision
    pub macro_precision: f32,
    /// Unweighted mean of per-class recall
    pub macro_recall: f32,
    /// Unweighted mean of per-class F1
    pub macro_f1: f32,
    /// Support-weighted mean of per-class precision
    pub weighted_precision: f32,
    /// Support-weighted mean of per-class recall
    pub weighted_recall: f32,
    /// Support-weighted mean of per-class F1
    pub weighted_f1: f32,
    /// Total number of samples
    pub total_support: usize,
}

impl fmt::Display for ClassificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name_width = self
            .classes
            .iter()
            .map(|class| class.label.len())
            .max()
            .unwrap_or(0)
            .max("weighted avg".len());

        writeln!(
            f,
            "{:>name_width$}  {:>9}  {:>9}  {:>9}  {:>9}",
            "", "precision", "recall", "f1-score", "support"
        )?;
        writeln!(f)?;

        for class in &self.classes {
            writeln!(
                f,
                "{:>name_width$}  {:>9.4}  {:>9.4}  {:>9.4}  {:>9}",
                class.label, class.precision, class.recall, class.f1, class.support
            )?;
        }

        writeln!(f)?;
        writeln!(
            f,
            "{:>name_width$}  {:>9}  {:>9}  {:>9.4}  {:>9}",
            "accuracy", "", "", self.accuracy, self.total_support
        )?;
        writeln!(
            f,
            "{:>name_width$}  {:>9.4}  {:>9.4}  {:>9.4}  {:>9}",
            "macro avg", self.macro_precision, self.macro_recall, self.macro_f1, self.total_support
        )?;
        write!(
            f,
            "{:>name_width$}  {:>9.4}  {:>9.4}  {:>9.4}  {:>9}",
            "weighted avg",
            self.weighted_precision,
            self.weighted_recall,
            self.weighted_f1,
            self.total_support
        )
    }
}

/// Build a full classification report with named classes.
///
/// `class_names[i]` names class index i. Classes absent from both
/// label vectors still appear in the report when `class_names` covers
/// them, with zero support.
///
/// # Panics
///
/// Panics if the label vectors have different lengths or are empty,
/// or if `class_names` does not cover every label index present.
///
/// # Examples
///
/// ```
/// use sentir::metrics::classification_report;
///
/// let y_true = vec![0, 0, 0, 1];
/// let y_pred = vec![0, 0, 1, 1];
/// let names = vec!["calm".to_string(), "storm".to_string()];
/// let report = classification_report(&y_pred, &y_true, &names);
///
/// assert!((report.accuracy - 0.75).abs() < 1e-6);
/// assert_eq!(report.classes[0].label, "calm");
/// assert_eq!(report.classes[0].support, 3);
/// ```
#[must_use]
pub fn classification_report(
    y_pred: &[usize],
    y_true: &[usize],
    class_names: &[String],
) -> ClassificationReport {
    assert_eq!(y_pred.len(), y_true.len(), "Vectors must have same length");
    assert!(!y_true.is_empty(), "Vectors cannot be empty");

    let observed = n_classes_of(y_pred, y_true);
    assert!(
        class_names.len() >= observed,
        "class names must cover every label index"
    );
    let n_classes = class_names.len();

    let (tp, fp, fn_counts, support) = compute_tp_fp_fn(y_pred, y_true, n_classes);

    let classes: Vec<ClassMetrics> = (0..n_classes)
        .map(|i| ClassMetrics {
            label: class_names[i].clone(),
            precision: class_precision(tp[i], fp[i]),
            recall: class_recall(tp[i], fn_counts[i]),
            f1: class_f1(tp[i], fp[i], fn_counts[i]),
            support: support[i],
        })
        .collect();

    let total_support: usize = support.iter().sum();
    let n = n_classes as f32;

    let mut macro_precision = 0.0;
    let mut macro_recall = 0.0;
    let mut macro_f1 = 0.0;
    let mut weighted_precision = 0.0;
    let mut weighted_recall = 0.0;
    let mut weighted_f1 = 0.0;

    for class in &classes {
        macro_precision += class.precision / n;
        macro_recall += class.recall / n;
        macro_f1 += class.f1 / n;

        if total_support > 0 {
            let weight = class.support as f32 / total_support as f32;
            weighted_precision += class.precision * weight;
            weighted_recall += class.recall * weight;
            weighted_f1 += class.f1 * weight;
        }
    }

    ClassificationReport {
        accuracy: accuracy(y_pred, y_true),
        classes,
        macro_precision,
        macro_recall,
        macro_f1,
        weighted_precision,
        weighted_recall,
        weighted_f1,
        total_support,
    }
}

/// Number of distinct class indices spanned by both label vectors.
fn n_classes_of(y_pred: &[usize], y_true: &[usize]) -> usize {
    y_true
        .iter()
        .chain(y_pred.iter())
        .max()
        .map_or(0, |&m| m + 1)
}

/// Compute precision for a class given true positives and false positives.
fn class_precision(tp: usize, fp: usize) -> f32 {
    if tp + fp == 0 {
        0.0
    } else {
        tp as f32 / (tp + fp) as f32
    }
}

/// Compute recall for a class given true positives and false negatives.
fn class_recall(tp: usize, fn_count: usize) -> f32 {
    if tp + fn_count == 0 {
        0.0
    } else {
        tp as f32 / (tp + fn_count) as f32
    }
}

/// Compute F1 score from precision and recall.
fn f1_from_prec_rec(precision: f32, recall: f32) -> f32 {
    if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    }
}

/// Compute F1 score for a single class.
fn class_f1(tp: usize, fp: usize, fn_count: usize) -> f32 {
    let prec = class_precision(tp, fp);
    let rec = class_recall(tp, fn_count);
    f1_from_prec_rec(prec, rec)
}

/// Helper function to compute TP, FP, FN for each class.
fn compute_tp_fp_fn(
    y_pred: &[usize],
    y_true: &[usize],
    n_classes: usize,
) -> (Vec<usize>, Vec<usize>, Vec<usize>, Vec<usize>) {
    let mut tp = vec![0usize; n_classes];
    let mut fp = vec![0usize; n_classes];
    let mut fn_counts = vec![0usize; n_classes];
    let mut support = vec![0usize; n_classes];

    for (&true_label, &pred_label) in y_true.iter().zip(y_pred.iter()) {
        support[true_label] += 1;

        if true_label == pred_label {
            tp[true_label] += 1;
        } else {
            fp[pred_label] += 1;
            fn_counts[true_label] += 1;
        }
    }

    (tp, fp, fn_counts, support)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_perfect() {
        let y = vec![0, 1, 2, 0, 1, 2];
        assert!((accuracy(&y, &y) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_accuracy_partial() {
        let y_true = vec![0, 1, 2, 0, 1, 2];
        let y_pred = vec![0, 2, 1, 0, 0, 1];
        assert!((accuracy(&y_pred, &y_true) - 1.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    #[should_panic(expected = "same length")]
    fn test_accuracy_length_mismatch_panics() {
        accuracy(&[0, 1], &[0]);
    }

    #[test]
    #[should_panic(expected = "cannot be empty")]
    fn test_accuracy_empty_panics() {
        accuracy(&[], &[]);
    }

    #[test]
    fn test_precision_averages() {
        // Class 0: TP=2, FP=0. Class 1: TP=1, FP=1.
        let y_true = vec![0, 0, 0, 1];
        let y_pred = vec![0, 0, 1, 1];

        assert!((precision(&y_pred, &y_true, Average::Macro) - 0.75).abs() < 1e-6);
        assert!((precision(&y_pred, &y_true, Average::Micro) - 0.75).abs() < 1e-6);
        assert!((precision(&y_pred, &y_true, Average::Weighted) - 0.875).abs() < 1e-6);
    }

    #[test]
    fn test_recall_averages() {
        // Class 0: TP=2, FN=1. Class 1: TP=1, FN=0.
        let y_true = vec![0, 0, 0, 1];
        let y_pred = vec![0, 0, 1, 1];

        assert!((recall(&y_pred, &y_true, Average::Macro) - 5.0 / 6.0).abs() < 1e-6);
        assert!((recall(&y_pred, &y_true, Average::Micro) - 0.75).abs() < 1e-6);
        assert!((recall(&y_pred, &y_true, Average::Weighted) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_f1_averages() {
        // Class 0: P=1.0, R=2/3, F1=0.8. Class 1: P=0.5, R=1.0, F1=2/3.
        let y_true = vec![0, 0, 0, 1];
        let y_pred = vec![0, 0, 1, 1];

        let macro_f1 = f1_score(&y_pred, &y_true, Average::Macro);
        assert!((macro_f1 - (0.8 + 2.0 / 3.0) / 2.0).abs() < 1e-6);

        let weighted_f1 = f1_score(&y_pred, &y_true, Average::Weighted);
        assert!((weighted_f1 - (0.8 * 0.75 + (2.0 / 3.0) * 0.25)).abs() < 1e-6);

        let micro_f1 = f1_score(&y_pred, &y_true, Average::Micro);
        assert!((micro_f1 - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_f1_perfect_predictions() {
        let y = vec![0, 1, 2, 0, 1, 2];
        assert!((f1_score(&y, &y, Average::Macro) - 1.0).abs() < 1e-6);
        assert!((f1_score(&y, &y, Average::Micro) - 1.0).abs() < 1e-6);
        assert!((f1_score(&y, &y, Average::Weighted) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_f1_per_class_symmetric_case() {
        let y_true = vec![1, 0, 1, 0];
        let y_pred = vec![1, 1, 0, 0];

        let per_class = f1_per_class(&y_pred, &y_true);
        assert_eq!(per_class.len(), 2);
        assert!((per_class[0] - 0.5).abs() < 1e-5);
        assert!((per_class[1] - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_confusion_matrix_rows_are_actual() {
        let y_true = vec![0, 0, 1, 1, 2, 2];
        let y_pred = vec![0, 1, 1, 1, 2, 0];

        let cm = confusion_matrix(&y_pred, &y_true);
        assert_eq!(cm.shape(), (3, 3));
        assert_eq!(cm.get(0, 0), 1);
        assert_eq!(cm.get(0, 1), 1);
        assert_eq!(cm.get(1, 1), 2);
        assert_eq!(cm.get(2, 0), 1);
        assert_eq!(cm.get(2, 2), 1);
        assert_eq!(cm.get(1, 0), 0);
    }

    #[test]
    fn test_confusion_matrix_diagonal_counts_correct() {
        let y = vec![0, 1, 1, 2];
        let cm = confusion_matrix(&y, &y);

        let diagonal: usize = (0..3).map(|i| cm.get(i, i)).sum();
        assert_eq!(diagonal, 4);
    }

    #[test]
    fn test_confusion_matrix_sized_pads_absent_classes() {
        let y_true = vec![0, 1];
        let y_pred = vec![0, 1];

        let cm = confusion_matrix_sized(&y_pred, &y_true, 4);
        assert_eq!(cm.shape(), (4, 4));
        assert_eq!(cm.get(0, 0), 1);
        assert_eq!(cm.get(1, 1), 1);
        assert_eq!(cm.get(3, 3), 0);
    }

    #[test]
    #[should_panic(expected = "declared class count")]
    fn test_confusion_matrix_sized_rejects_out_of_range_labels() {
        confusion_matrix_sized(&[0, 5], &[0, 1], 3);
    }

    #[test]
    fn test_classification_report_values() {
        let y_true = vec![0, 0, 0, 1];
        let y_pred = vec![0, 0, 1, 1];
        let names = vec!["calm".to_string(), "storm".to_string()];

        let report = classification_report(&y_pred, &y_true, &names);

        assert!((report.accuracy - 0.75).abs() < 1e-6);
        assert_eq!(report.total_support, 4);

        assert_eq!(report.classes[0].label, "calm");
        assert!((report.classes[0].precision - 1.0).abs() < 1e-6);
        assert!((report.classes[0].recall - 2.0 / 3.0).abs() < 1e-6);
        assert!((report.classes[0].f1 - 0.8).abs() < 1e-6);
        assert_eq!(report.classes[0].support, 3);

        assert_eq!(report.classes[1].label, "storm");
        assert!((report.classes[1].precision - 0.5).abs() < 1e-6);
        assert!((report.classes[1].recall - 1.0).abs() < 1e-6);
        assert_eq!(report.classes[1].support, 1);

        assert!((report.macro_f1 - (0.8 + 2.0 / 3.0) / 2.0).abs() < 1e-6);
        assert!((report.weighted_f1 - (0.8 * 0.75 + (2.0 / 3.0) * 0.25)).abs() < 1e-6);
    }

    #[test]
    fn test_classification_report_includes_absent_class() {
        // Third name never appears in the labels; it gets zero support.
        let y_true = vec![0, 1];
        let y_pred = vec![0, 1];
        let names = vec!["a".to_string(), "b".to_string(), "c".to_string()];

        let report = classification_report(&y_pred, &y_true, &names);
        assert_eq!(report.classes.len(), 3);
        assert_eq!(report.classes[2].support, 0);
        assert!((report.classes[2].f1 - 0.0).abs() < 1e-6);
    }

    #[test]
    #[should_panic(expected = "cover every label index")]
    fn test_classification_report_missing_names_panics() {
        let y_true = vec![0, 1, 2];
        let y_pred = vec![0, 1, 2];
        let names = vec!["a".to_string(), "b".to_string()];

        classification_report(&y_pred, &y_true, &names);
    }

    #[test]
    fn test_classification_report_display() {
        let y_true = vec![0, 0, 1, 1];
        let y_pred = vec![0, 0, 1, 0];
        let names = vec!["quiet".to_string(), "loud".to_string()];

        let rendered = classification_report(&y_pred, &y_true, &names).to_string();

        assert!(rendered.contains("precision"));
        assert!(rendered.contains("f1-score"));
        assert!(rendered.contains("quiet"));
        assert!(rendered.contains("loud"));
        assert!(rendered.contains("macro avg"));
        assert!(rendered.contains("weighted avg"));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn label_pairs(
            n_classes: usize,
            max_len: usize,
        ) -> impl Strategy<Value = (Vec<usize>, Vec<usize>)> {
            (1..=max_len).prop_flat_map(move |len| {
                (
                    prop::collection::vec(0..n_classes, len),
                    prop::collection::vec(0..n_classes, len),
                )
            })
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(64))]

            #[test]
            fn metrics_are_bounded((y_true, y_pred) in label_pairs(4, 40)) {
                let acc = accuracy(&y_pred, &y_true);
                prop_assert!((0.0..=1.0).contains(&acc));

                for average in [Average::Macro, Average::Micro, Average::Weighted] {
                    let prec = precision(&y_pred, &y_true, average);
                    let rec = recall(&y_pred, &y_true, average);
                    let f1 = f1_score(&y_pred, &y_true, average);
                    prop_assert!((0.0..=1.0).contains(&prec));
                    prop_assert!((0.0..=1.0).contains(&rec));
                    prop_assert!((0.0..=1.0).contains(&f1));
                }
            }

            #[test]
            fn micro_precision_equals_accuracy((y_true, y_pred) in label_pairs(4, 40)) {
                // Single-label problems misclassify each sample exactly
                // once, so total FP = total FN and micro metrics
                // collapse to accuracy.
                let acc = accuracy(&y_pred, &y_true);
                let micro_prec = precision(&y_pred, &y_true, Average::Micro);
                let micro_rec = recall(&y_pred, &y_true, Average::Micro);

                prop_assert!((micro_prec - acc).abs() < 1e-6);
                prop_assert!((micro_rec - acc).abs() < 1e-6);
            }

            #[test]
            fn confusion_matrix_total_equals_samples((y_true, y_pred) in label_pairs(4, 40)) {
                let cm = confusion_matrix(&y_pred, &y_true);
                let total: usize = (0..cm.n_rows())
                    .flat_map(|i| (0..cm.n_cols()).map(move |j| (i, j)))
                    .map(|(i, j)| cm.get(i, j))
                    .sum();
                prop_assert_eq!(total, y_true.len());
            }
        }
    }
}
