//! Core traits for classifiers.
//!
//! Every model the evaluation harness compares implements [`Classifier`]:
//! fit on a feature matrix with integer labels, predict integer labels.

use crate::error::{Result, SentirError};
use crate::primitives::Matrix;

/// Uniform fit/predict contract for supervised classifiers.
///
/// All models see the same feature matrices; the harness treats them
/// interchangeably through this trait.
///
/// # Examples
///
/// ```
/// use sentir::prelude::*;
///
/// let x = Matrix::from_vec(4, 1, vec![0.0, 0.0, 1.0, 1.0]).unwrap();
/// let y = vec![0, 0, 1, 1];
///
/// let mut model = BernoulliNb::new();
/// model.fit(&x, &y).unwrap();
/// let predictions = model.predict(&x).unwrap();
/// assert_eq!(predictions.len(), 4);
/// ```
pub trait Classifier {
    /// Fits the model to training data.
    ///
    /// # Errors
    ///
    /// Returns an error if fitting fails (row misalignment, empty input,
    /// invalid hyperparameters).
    fn fit(&mut self, x: &Matrix<f32>, y: &[usize]) -> Result<()>;

    /// Predicts class labels for input data.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not fitted or the feature width
    /// differs from the training data.
    fn predict(&self, x: &Matrix<f32>) -> Result<Vec<usize>>;

    /// Computes accuracy against true labels.
    ///
    /// # Errors
    ///
    /// Returns an error if prediction fails or row counts diverge.
    fn score(&self, x: &Matrix<f32>, y: &[usize]) -> Result<f32> {
        let predictions = self.predict(x)?;
        if predictions.len() != y.len() {
            return Err(SentirError::row_mismatch(
                "predictions vs labels",
                predictions.len(),
                y.len(),
            ));
        }
        if y.is_empty() {
            return Err(SentirError::empty_input("score on zero samples"));
        }
        let correct = predictions.iter().zip(y.iter()).filter(|(p, t)| p == t).count();
        Ok(correct as f32 / y.len() as f32)
    }
}
