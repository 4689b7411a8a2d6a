//! Linear and probabilistic classifiers.
//!
//! This module implements two of the classifier families the evaluation
//! harness compares:
//! - Bernoulli Naive Bayes over binarized features
//! - Logistic Regression with L1 regularization and one-vs-rest multiclass
//!
//! Both expose inherent `fit`/`predict` methods and implement the
//! [`Classifier`] trait so the harness can drive them interchangeably.
//!
//! # Example
//!
//! ```
//! use sentir::classification::BernoulliNb;
//! use sentir::primitives::Matrix;
//!
//! let x = Matrix::from_vec(4, 2, vec![
//!     1.0, 0.0,
//!     1.0, 0.0,
//!     0.0, 1.0,
//!     0.0, 1.0,
//! ]).expect("Matrix dimensions match data length");
//! let y = vec![0, 0, 1, 1];
//!
//! let mut model = BernoulliNb::new();
//! model.fit(&x, &y).expect("Training data is valid");
//! let predictions = model.predict(&x).expect("Model is fitted");
//!
//! assert_eq!(predictions, vec![0, 0, 1, 1]);
//! ```

use crate::error::{Result, SentirError};
use crate::primitives::{Matrix, Vector};
use crate::traits::Classifier;
use serde::{Deserialize, Serialize};

/// Bernoulli Naive Bayes classifier.
///
/// Binarizes every feature at a threshold before modeling, so only the
/// presence or absence of a term carries signal, not its weight. This
/// suits wide TF-IDF matrices where most entries are zero and the
/// nonzero magnitudes matter less than which terms occur at all.
///
/// # Example
///
/// ```
/// use sentir::classification::BernoulliNb;
/// use sentir::primitives::Matrix;
///
/// let x = Matrix::from_vec(4, 2, vec![
///     0.9, 0.0,
///     0.7, 0.0,
///     0.0, 0.8,
///     0.0, 0.6,
/// ]).expect("4x2 matrix with 8 values");
/// let y = vec![0, 0, 1, 1];
///
/// let mut model = BernoulliNb::new().with_alpha(0.1);
/// model.fit(&x, &y).expect("Valid training data");
/// let predictions = model.predict(&x).expect("Model is fitted");
/// assert_eq!(predictions, vec![0, 0, 1, 1]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BernoulliNb {
    /// Laplace smoothing strength.
    alpha: f32,
    /// Features strictly above this value count as present.
    binarize: f32,
    /// Log prior per class: ln P(y=c)
    class_log_priors: Option<Vec<f32>>,
    /// Log presence probability per class: `log_prob[class][feature]`
    feature_log_prob: Option<Vec<Vec<f32>>>,
    /// Log absence probability per class.
    feature_log_neg_prob: Option<Vec<Vec<f32>>>,
    /// Class labels seen during fit, sorted ascending.
    classes: Option<Vec<usize>>,
}

impl BernoulliNb {
    /// Creates a new Bernoulli Naive Bayes classifier with default
    /// parameters (`alpha` = 1.0, `binarize` = 0.0).
    ///
    /// # Example
    ///
    /// ```
    /// use sentir::classification::BernoulliNb;
    ///
    /// let model = BernoulliNb::new();
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            alpha: 1.0,
            binarize: 0.0,
            class_log_priors: None,
            feature_log_prob: None,
            feature_log_neg_prob: None,
            classes: None,
        }
    }

    /// Sets the Laplace smoothing strength.
    ///
    /// Smoothing keeps log probabilities finite for features never seen
    /// in a class. Must be positive; validated at fit time.
    #[must_use]
    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the binarization threshold.
    ///
    /// A feature value counts as present when strictly greater than the
    /// threshold.
    #[must_use]
    pub fn with_binarize(mut self, binarize: f32) -> Self {
        self.binarize = binarize;
        self
    }

    /// Trains the classifier.
    ///
    /// Computes class log priors and smoothed per-class presence
    /// probabilities for each feature.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Sample count mismatch between `x` and `y`
    /// - Empty data
    /// - Less than 2 classes
    /// - `alpha` is not positive
    pub fn fit(&mut self, x: &Matrix<f32>, y: &[usize]) -> Result<()> {
        let (n_samples, n_features) = x.shape();

        if n_samples != y.len() {
            return Err(SentirError::row_mismatch(
                "features vs labels",
                n_samples,
                y.len(),
            ));
        }
        if n_samples == 0 {
            return Err(SentirError::empty_input("fit on zero samples"));
        }
        if self.alpha <= 0.0 {
            return Err(SentirError::InvalidHyperparameter {
                param: "alpha".to_string(),
                value: self.alpha.to_string(),
                constraint: "alpha > 0".to_string(),
            });
        }

        let mut classes: Vec<usize> = y.to_vec();
        classes.sort_unstable();
        classes.dedup();

        if classes.len() < 2 {
            return Err("training labels contain fewer than 2 classes".into());
        }

        let n_classes = classes.len();
        let mut class_log_priors = vec![0.0; n_classes];
        let mut feature_log_prob = vec![vec![0.0; n_features]; n_classes];
        let mut feature_log_neg_prob = vec![vec![0.0; n_features]; n_classes];

        for (class_idx, &class_label) in classes.iter().enumerate() {
            let class_samples: Vec<usize> = y
                .iter()
                .enumerate()
                .filter_map(|(i, &label)| if label == class_label { Some(i) } else { None })
                .collect();

            let n_class = class_samples.len() as f32;
            class_log_priors[class_idx] = (n_class / n_samples as f32).ln();

            for feature_idx in 0..n_features {
                let on_count = class_samples
                    .iter()
                    .filter(|&&sample_idx| x.get(sample_idx, feature_idx) > self.binarize)
                    .count() as f32;

                // Smoothed over the two Bernoulli outcomes, so p stays
                // strictly inside (0, 1) and both logs are finite.
                let p = (on_count + self.alpha) / (n_class + 2.0 * self.alpha);
                feature_log_prob[class_idx][feature_idx] = p.ln();
                feature_log_neg_prob[class_idx][feature_idx] = (1.0 - p).ln();
            }
        }

        self.class_log_priors = Some(class_log_priors);
        self.feature_log_prob = Some(feature_log_prob);
        self.feature_log_neg_prob = Some(feature_log_neg_prob);
        self.classes = Some(classes);

        Ok(())
    }

    /// Predicts class labels for samples.
    ///
    /// Returns the class with the highest joint log likelihood for each
    /// sample.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not fitted or the feature width
    /// differs from the training data.
    pub fn predict(&self, x: &Matrix<f32>) -> Result<Vec<usize>> {
        let scores = self.joint_log_likelihood(x)?;
        let classes = self
            .classes
            .as_ref()
            .ok_or_else(|| SentirError::not_fitted("BernoulliNb"))?;

        let predictions: Vec<usize> = scores
            .iter()
            .map(|log_probs| {
                let max_idx = log_probs
                    .iter()
                    .enumerate()
                    .max_by(|(_, a), (_, b)| {
                        a.partial_cmp(b)
                            .expect("Log probabilities are valid f32 (not NaN)")
                    })
                    .map(|(idx, _)| idx)
                    .expect("Log probability vector is non-empty (n_classes >= 2)");
                classes[max_idx]
            })
            .collect();

        Ok(predictions)
    }

    /// Returns probability estimates for each class.
    ///
    /// Joint log likelihoods are normalized per sample with the
    /// log-sum-exp trick.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not fitted or the feature width
    /// differs from the training data.
    pub fn predict_proba(&self, x: &Matrix<f32>) -> Result<Vec<Vec<f32>>> {
        let scores = self.joint_log_likelihood(x)?;

        let probabilities = scores
            .into_iter()
            .map(|log_probs| {
                let max_log_prob = log_probs.iter().copied().fold(f32::NEG_INFINITY, f32::max);
                let exp_probs: Vec<f32> = log_probs
                    .iter()
                    .map(|&log_p| (log_p - max_log_prob).exp())
                    .collect();
                let sum: f32 = exp_probs.iter().sum();
                exp_probs.iter().map(|p| p / sum).collect()
            })
            .collect();

        Ok(probabilities)
    }

    /// Computes the unnormalized per-class log posterior for each sample.
    fn joint_log_likelihood(&self, x: &Matrix<f32>) -> Result<Vec<Vec<f32>>> {
        let class_log_priors = self
            .class_log_priors
            .as_ref()
            .ok_or_else(|| SentirError::not_fitted("BernoulliNb"))?;
        let feature_log_prob = self
            .feature_log_prob
            .as_ref()
            .ok_or_else(|| SentirError::not_fitted("BernoulliNb"))?;
        let feature_log_neg_prob = self
            .feature_log_neg_prob
            .as_ref()
            .ok_or_else(|| SentirError::not_fitted("BernoulliNb"))?;

        let (n_samples, n_features) = x.shape();
        let n_classes = class_log_priors.len();

        if n_features != feature_log_prob[0].len() {
            return Err(SentirError::DimensionMismatch {
                expected: format!("{} features", feature_log_prob[0].len()),
                actual: format!("{n_features} features"),
            });
        }

        let mut scores = Vec::with_capacity(n_samples);

        for sample_idx in 0..n_samples {
            let mut log_probs = vec![0.0; n_classes];

            for class_idx in 0..n_classes {
                let mut log_prob = class_log_priors[class_idx];

                for feature_idx in 0..n_features {
                    log_prob += if x.get(sample_idx, feature_idx) > self.binarize {
                        feature_log_prob[class_idx][feature_idx]
                    } else {
                        feature_log_neg_prob[class_idx][feature_idx]
                    };
                }

                log_probs[class_idx] = log_prob;
            }

            scores.push(log_probs);
        }

        Ok(scores)
    }
}

impl Default for BernoulliNb {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for BernoulliNb {
    fn fit(&mut self, x: &Matrix<f32>, y: &[usize]) -> Result<()> {
        BernoulliNb::fit(self, x, y)
    }

    fn predict(&self, x: &Matrix<f32>) -> Result<Vec<usize>> {
        BernoulliNb::predict(self, x)
    }
}

/// Logistic Regression classifier with L1 regularization.
///
/// Trains one binary sigmoid model per class (one-vs-rest) by proximal
/// gradient descent: a gradient step on the averaged log loss followed
/// by soft-thresholding of the weights. The L1 penalty drives most of a
/// wide TF-IDF weight vector to exactly zero; the intercept is never
/// penalized. `C` is inverse regularization strength, so larger `C`
/// means a weaker penalty.
///
/// # Example
///
/// ```
/// use sentir::classification::LogisticRegression;
/// use sentir::primitives::Matrix;
///
/// let x = Matrix::from_vec(4, 1, vec![0.0, 0.1, 0.9, 1.0])
///     .expect("4x1 matrix with 4 values");
/// let y = vec![0, 0, 1, 1];
///
/// let mut model = LogisticRegression::new()
///     .with_c(10.0)
///     .with_learning_rate(0.5)
///     .with_max_iter(2000);
/// model.fit(&x, &y).expect("Training data is valid");
///
/// let predictions = model.predict(&x).expect("Model is fitted");
/// assert_eq!(predictions, vec![0, 0, 1, 1]);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    /// Per-class weight vectors, one binary model per class.
    coefficients: Option<Vec<Vector<f32>>>,
    /// Per-class intercepts.
    intercepts: Option<Vec<f32>>,
    /// Class labels seen during fit, sorted ascending.
    classes: Option<Vec<usize>>,
    /// Inverse regularization strength.
    c: f32,
    /// Step size for proximal gradient descent.
    learning_rate: f32,
    /// Maximum iterations per binary model.
    max_iter: usize,
    /// Convergence tolerance on parameter change.
    tol: f32,
}

impl LogisticRegression {
    /// Creates a new logistic regression classifier with default
    /// parameters (`C` = 1.0, `learning_rate` = 0.1, `max_iter` = 1000).
    ///
    /// # Example
    ///
    /// ```
    /// use sentir::classification::LogisticRegression;
    ///
    /// let model = LogisticRegression::new();
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            coefficients: None,
            intercepts: None,
            classes: None,
            c: 1.0,
            learning_rate: 0.1,
            max_iter: 1000,
            tol: 1e-4,
        }
    }

    /// Sets the inverse regularization strength.
    ///
    /// Larger `C` means less regularization. Must be positive; validated
    /// at fit time.
    #[must_use]
    pub fn with_c(mut self, c: f32) -> Self {
        self.c = c;
        self
    }

    /// Sets the step size for proximal gradient descent.
    #[must_use]
    pub fn with_learning_rate(mut self, learning_rate: f32) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Sets the maximum number of iterations per binary model.
    #[must_use]
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Sets the convergence tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tol: f32) -> Self {
        self.tol = tol;
        self
    }

    /// Sigmoid activation function: σ(z) = 1 / (1 + e^(-z))
    fn sigmoid(z: f32) -> f32 {
        1.0 / (1.0 + (-z).exp())
    }

    /// Fits one binary model per class against the rest.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Sample count mismatch between `x` and `y`
    /// - Empty data
    /// - Less than 2 classes
    /// - `C` is not positive
    pub fn fit(&mut self, x: &Matrix<f32>, y: &[usize]) -> Result<()> {
        let (n_samples, _n_features) = x.shape();

        if n_samples != y.len() {
            return Err(SentirError::row_mismatch(
                "features vs labels",
                n_samples,
                y.len(),
            ));
        }
        if n_samples == 0 {
            return Err(SentirError::empty_input("fit on zero samples"));
        }
        if self.c <= 0.0 {
            return Err(SentirError::InvalidHyperparameter {
                param: "C".to_string(),
                value: self.c.to_string(),
                constraint: "C > 0".to_string(),
            });
        }

        let mut classes: Vec<usize> = y.to_vec();
        classes.sort_unstable();
        classes.dedup();

        if classes.len() < 2 {
            return Err("training labels contain fewer than 2 classes".into());
        }

        let mut coefficients = Vec::with_capacity(classes.len());
        let mut intercepts = Vec::with_capacity(classes.len());

        for &class_label in &classes {
            let targets: Vec<f32> = y
                .iter()
                .map(|&label| if label == class_label { 1.0 } else { 0.0 })
                .collect();

            let (weights, intercept) = self.fit_binary(x, &targets);
            coefficients.push(weights);
            intercepts.push(intercept);
        }

        self.coefficients = Some(coefficients);
        self.intercepts = Some(intercepts);
        self.classes = Some(classes);

        Ok(())
    }

    /// Trains one binary sigmoid model by proximal gradient descent.
    fn fit_binary(&self, x: &Matrix<f32>, targets: &[f32]) -> (Vector<f32>, f32) {
        let (n_samples, n_features) = x.shape();
        let n = n_samples as f32;

        // L1 strength under the averaged loss; C is inverse strength.
        let lambda = 1.0 / (self.c * n);
        let threshold = self.learning_rate * lambda;

        let mut weights = vec![0.0_f32; n_features];
        let mut intercept = 0.0_f32;

        for _ in 0..self.max_iter {
            let mut weight_grad = vec![0.0_f32; n_features];
            let mut intercept_grad = 0.0_f32;

            for (i, &target) in targets.iter().enumerate() {
                let mut z = intercept;
                for (j, &w_j) in weights.iter().enumerate() {
                    z += w_j * x.get(i, j);
                }

                let error = Self::sigmoid(z) - target;
                intercept_grad += error;
                for (j, grad) in weight_grad.iter_mut().enumerate() {
                    *grad += error * x.get(i, j);
                }
            }

            intercept_grad /= n;
            for grad in &mut weight_grad {
                *grad /= n;
            }

            intercept -= self.learning_rate * intercept_grad;
            let mut max_change = (self.learning_rate * intercept_grad).abs();

            for (j, weight) in weights.iter_mut().enumerate() {
                let updated =
                    soft_threshold(*weight - self.learning_rate * weight_grad[j], threshold);
                max_change = max_change.max((updated - *weight).abs());
                *weight = updated;
            }

            if max_change < self.tol {
                break;
            }
        }

        (Vector::from_vec(weights), intercept)
    }

    /// Computes per-class decision values w_c·x + b_c.
    ///
    /// Returns an `n_samples` × `n_classes` matrix; higher means more
    /// confidence in that class.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not fitted or the feature width
    /// differs from the training data.
    pub fn decision_function(&self, x: &Matrix<f32>) -> Result<Matrix<f32>> {
        let coefficients = self
            .coefficients
            .as_ref()
            .ok_or_else(|| SentirError::not_fitted("LogisticRegression"))?;
        let intercepts = self
            .intercepts
            .as_ref()
            .ok_or_else(|| SentirError::not_fitted("LogisticRegression"))?;

        let (n_samples, n_features) = x.shape();
        let n_classes = coefficients.len();

        if n_features != coefficients[0].len() {
            return Err(SentirError::DimensionMismatch {
                expected: format!("{} features", coefficients[0].len()),
                actual: format!("{n_features} features"),
            });
        }

        let mut data = Vec::with_capacity(n_samples * n_classes);

        for i in 0..n_samples {
            for (weights, &bias) in coefficients.iter().zip(intercepts.iter()) {
                let mut z = bias;
                for j in 0..n_features {
                    z += weights[j] * x.get(i, j);
                }
                data.push(z);
            }
        }

        Matrix::from_vec(n_samples, n_classes, data).map_err(SentirError::from)
    }

    /// Predicts class labels for samples.
    ///
    /// Returns the class whose binary model scores highest for each
    /// sample.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not fitted or the feature width
    /// differs from the training data.
    pub fn predict(&self, x: &Matrix<f32>) -> Result<Vec<usize>> {
        let decisions = self.decision_function(x)?;
        let classes = self
            .classes
            .as_ref()
            .ok_or_else(|| SentirError::not_fitted("LogisticRegression"))?;

        let mut predictions = Vec::with_capacity(decisions.n_rows());

        for i in 0..decisions.n_rows() {
            let max_idx = (0..decisions.n_cols())
                .max_by(|&a, &b| {
                    decisions
                        .get(i, a)
                        .partial_cmp(&decisions.get(i, b))
                        .expect("Decision values are valid f32 (not NaN)")
                })
                .expect("Decision matrix has at least one column (n_classes >= 2)");
            predictions.push(classes[max_idx]);
        }

        Ok(predictions)
    }

    /// Returns probability estimates for each class.
    ///
    /// Per-class sigmoid outputs normalized to sum to one across
    /// classes, the usual one-vs-rest calibration.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not fitted or the feature width
    /// differs from the training data.
    pub fn predict_proba(&self, x: &Matrix<f32>) -> Result<Vec<Vec<f32>>> {
        let decisions = self.decision_function(x)?;

        let mut probabilities = Vec::with_capacity(decisions.n_rows());

        for i in 0..decisions.n_rows() {
            let mut row: Vec<f32> = (0..decisions.n_cols())
                .map(|c| Self::sigmoid(decisions.get(i, c)))
                .collect();
            let total: f32 = row.iter().sum();
            if total > 0.0 {
                for p in &mut row {
                    *p /= total;
                }
            }
            probabilities.push(row);
        }

        Ok(probabilities)
    }

    /// Get the per-class weight vectors.
    ///
    /// # Panics
    ///
    /// Panics if the model is not fitted.
    #[must_use]
    pub fn coefficients(&self) -> &[Vector<f32>] {
        self.coefficients.as_ref().expect("Model not fitted")
    }

    /// Get the per-class intercepts.
    ///
    /// # Panics
    ///
    /// Panics if the model is not fitted.
    #[must_use]
    pub fn intercepts(&self) -> &[f32] {
        self.intercepts.as_ref().expect("Model not fitted")
    }
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for LogisticRegression {
    fn fit(&mut self, x: &Matrix<f32>, y: &[usize]) -> Result<()> {
        LogisticRegression::fit(self, x, y)
    }

    fn predict(&self, x: &Matrix<f32>) -> Result<Vec<usize>> {
        LogisticRegression::predict(self, x)
    }
}

/// Scalar soft-thresholding operator: sign(v) · max(|v| - λ, 0).
fn soft_threshold(value: f32, lambda: f32) -> f32 {
    if value > lambda {
        value - lambda
    } else if value < -lambda {
        value + lambda
    } else {
        0.0
    }
}
