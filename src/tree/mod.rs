//! Decision tree algorithms and ensemble methods.
//!
//! This module implements:
//! - CART decision tree classification using Gini impurity
//! - Gradient boosting with one-vs-rest multiclass support
//!
//! # Example
//!
//! ```
//! use sentir::tree::DecisionTreeClassifier;
//! use sentir::primitives::Matrix;
//!
//! let x = Matrix::from_vec(4, 2, vec![
//!     0.0, 0.0,  // class 0
//!     0.0, 1.0,  // class 0
//!     1.0, 0.0,  // class 1
//!     1.0, 1.0,  // class 1
//! ]).expect("Matrix creation should succeed");
//! let y = vec![0, 0, 1, 1];
//!
//! let mut tree = DecisionTreeClassifier::new().with_max_depth(3);
//! tree.fit(&x, &y).expect("fit should succeed");
//!
//! let predictions = tree.predict(&x).expect("Model is fitted");
//! assert_eq!(predictions, y);
//! ```

use crate::error::{Result, SentirError};
use crate::primitives::Matrix;
use crate::traits::Classifier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Internal node in a decision tree.
///
/// Contains a split condition (feature and threshold) and pointers to
/// left and right subtrees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Index of the feature to split on
    pub feature_idx: usize,
    /// Threshold value for the split
    pub threshold: f32,
    /// Left subtree (samples where feature <= threshold)
    pub left: Box<TreeNode>,
    /// Right subtree (samples where feature > threshold)
    pub right: Box<TreeNode>,
}

/// Leaf node in a decision tree.
///
/// Contains the predicted class label and number of training samples
/// that reached this leaf.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leaf {
    /// Predicted class label for this leaf
    pub class_label: usize,
    /// Number of training samples in this leaf
    pub n_samples: usize,
}

/// A node in a decision tree (either internal node or leaf).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TreeNode {
    /// Internal decision node with split condition
    Node(Node),
    /// Leaf node with class prediction
    Leaf(Leaf),
}

impl TreeNode {
    /// Returns the depth of the tree rooted at this node.
    ///
    /// Leaf nodes have depth 0, internal nodes have depth 1 + max(left, right).
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf(_) => 0,
            TreeNode::Node(node) => 1 + node.left.depth().max(node.right.depth()),
        }
    }
}

/// Decision tree classifier using the CART algorithm.
///
/// Uses Gini impurity for the splitting criterion and builds trees
/// recursively. Candidate thresholds are midpoints between consecutive
/// unique feature values; a node only splits when some threshold
/// strictly reduces weighted impurity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTreeClassifier {
    tree: Option<TreeNode>,
    max_depth: Option<usize>,
    min_samples_split: usize,
    /// Number of features the model was trained on (for validation)
    #[serde(default)]
    n_features: Option<usize>,
}

impl DecisionTreeClassifier {
    /// Creates a new decision tree classifier with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: None,
            max_depth: None,
            min_samples_split: 2,
            n_features: None,
        }
    }

    /// Sets the maximum depth of the tree.
    ///
    /// # Arguments
    ///
    /// * `depth` - Maximum depth (root has depth 0)
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Sets the minimum number of samples required to split a node.
    ///
    /// # Arguments
    ///
    /// * `min_samples` - Minimum samples to split (must be >= 2)
    #[must_use]
    pub fn with_min_samples_split(mut self, min_samples: usize) -> Self {
        self.min_samples_split = min_samples.max(2);
        self
    }

    /// Fits the decision tree to training data.
    ///
    /// # Arguments
    ///
    /// * `x` - Training features (`n_samples` × `n_features`)
    /// * `y` - Training labels (`n_samples` class indices)
    ///
    /// # Errors
    ///
    /// Returns an error on sample count mismatch or empty data.
    pub fn fit(&mut self, x: &Matrix<f32>, y: &[usize]) -> Result<()> {
        let (n_rows, n_cols) = x.shape();

        if n_rows != y.len() {
            return Err(SentirError::row_mismatch("features vs labels", n_rows, y.len()));
        }
        if n_rows == 0 {
            return Err(SentirError::empty_input("fit on zero samples"));
        }

        self.n_features = Some(n_cols);
        self.tree = Some(build_tree(x, y, 0, self.max_depth, self.min_samples_split));
        Ok(())
    }

    /// Predicts class labels for samples.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not fitted or the feature width
    /// differs from the training data.
    pub fn predict(&self, x: &Matrix<f32>) -> Result<Vec<usize>> {
        let tree = self
            .tree
            .as_ref()
            .ok_or_else(|| SentirError::not_fitted("DecisionTreeClassifier"))?;

        let (n_samples, n_features) = x.shape();
        if let Some(expected) = self.n_features {
            if n_features != expected {
                return Err(SentirError::DimensionMismatch {
                    expected: format!("{expected} features"),
                    actual: format!("{n_features} features"),
                });
            }
        }

        let mut predictions = Vec::with_capacity(n_samples);
        let mut sample = Vec::with_capacity(n_features);

        for row in 0..n_samples {
            sample.clear();
            for col in 0..n_features {
                sample.push(x.get(row, col));
            }
            predictions.push(predict_one(tree, &sample));
        }

        Ok(predictions)
    }

    /// Returns the fitted tree's depth, or `None` before fitting.
    #[must_use]
    pub fn depth(&self) -> Option<usize> {
        self.tree.as_ref().map(TreeNode::depth)
    }
}

impl Default for DecisionTreeClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for DecisionTreeClassifier {
    fn fit(&mut self, x: &Matrix<f32>, y: &[usize]) -> Result<()> {
        DecisionTreeClassifier::fit(self, x, y)
    }

    fn predict(&self, x: &Matrix<f32>) -> Result<Vec<usize>> {
        DecisionTreeClassifier::predict(self, x)
    }
}

/// Walks a sample down the tree until it reaches a leaf.
fn predict_one(tree: &TreeNode, sample: &[f32]) -> usize {
    let mut node = tree;
    loop {
        match node {
            TreeNode::Leaf(leaf) => return leaf.class_label,
            TreeNode::Node(internal) => {
                if sample[internal.feature_idx] <= internal.threshold {
                    node = &internal.left;
                } else {
                    node = &internal.right;
                }
            }
        }
    }
}

/// Gini impurity of a label set: 1 - Σ p_i².
fn gini_impurity(labels: &[usize]) -> f32 {
    if labels.is_empty() {
        return 0.0;
    }

    let mut counts = std::collections::HashMap::new();
    for &label in labels {
        *counts.entry(label).or_insert(0usize) += 1;
    }

    let n = labels.len() as f32;
    let mut gini = 1.0;
    for count in counts.values() {
        let p = *count as f32 / n;
        gini -= p * p;
    }

    gini
}

/// Size-weighted Gini impurity of a two-way partition.
fn weighted_gini(left_labels: &[usize], right_labels: &[usize]) -> f32 {
    let n_left = left_labels.len() as f32;
    let n_right = right_labels.len() as f32;
    let n_total = n_left + n_right;

    if n_total == 0.0 {
        return 0.0;
    }

    (n_left / n_total) * gini_impurity(left_labels)
        + (n_right / n_total) * gini_impurity(right_labels)
}

/// Finds the most frequent label.
///
/// Ties resolve to the largest label so results stay deterministic
/// across runs.
fn majority_class(labels: &[usize]) -> usize {
    let mut counts = BTreeMap::new();
    for &label in labels {
        *counts.entry(label).or_insert(0usize) += 1;
    }
    *counts
        .iter()
        .max_by_key(|(_, &count)| count)
        .map(|(label, _)| label)
        .expect("at least one label should exist")
}

/// Finds the best threshold for one feature.
///
/// Tries every midpoint between consecutive unique values and returns
/// `Some((threshold, gain))` for the largest strictly positive
/// impurity reduction.
fn best_split_for_feature(values: &[f32], labels: &[usize]) -> Option<(f32, f32)> {
    if values.len() < 2 {
        return None;
    }

    let mut sorted: Vec<f32> = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).expect("feature values are valid f32"));
    sorted.dedup();
    if sorted.len() < 2 {
        return None;
    }

    let current_impurity = gini_impurity(labels);
    let mut best_gain = 0.0;
    let mut best_threshold = 0.0;

    for window in sorted.windows(2) {
        let threshold = (window[0] + window[1]) / 2.0;

        let mut left_labels = Vec::new();
        let mut right_labels = Vec::new();
        for (idx, &value) in values.iter().enumerate() {
            if value <= threshold {
                left_labels.push(labels[idx]);
            } else {
                right_labels.push(labels[idx]);
            }
        }
        if left_labels.is_empty() || right_labels.is_empty() {
            continue;
        }

        let gain = current_impurity - weighted_gini(&left_labels, &right_labels);
        if gain > best_gain {
            best_gain = gain;
            best_threshold = threshold;
        }
    }

    (best_gain > 0.0).then_some((best_threshold, best_gain))
}

/// Finds the best split across all features.
fn best_split(x: &Matrix<f32>, y: &[usize]) -> Option<(usize, f32, f32)> {
    let (n_samples, n_features) = x.shape();
    if n_samples < 2 {
        return None;
    }

    let mut best: Option<(usize, f32, f32)> = None;

    for feature_idx in 0..n_features {
        let values: Vec<f32> = (0..n_samples).map(|row| x.get(row, feature_idx)).collect();

        if let Some((threshold, gain)) = best_split_for_feature(&values, y) {
            let improves = best.map_or(true, |(_, _, best_gain)| gain > best_gain);
            if improves {
                best = Some((feature_idx, threshold, gain));
            }
        }
    }

    best
}

/// Builds a decision tree recursively.
fn build_tree(
    x: &Matrix<f32>,
    y: &[usize],
    depth: usize,
    max_depth: Option<usize>,
    min_samples_split: usize,
) -> TreeNode {
    let n_samples = y.len();

    if y.iter().all(|&label| label == y[0]) {
        return TreeNode::Leaf(Leaf {
            class_label: y[0],
            n_samples,
        });
    }

    let depth_reached = max_depth.is_some_and(|max_d| depth >= max_d);
    if depth_reached || n_samples < min_samples_split {
        return TreeNode::Leaf(Leaf {
            class_label: majority_class(y),
            n_samples,
        });
    }

    let Some((feature_idx, threshold, _gain)) = best_split(x, y) else {
        return TreeNode::Leaf(Leaf {
            class_label: majority_class(y),
            n_samples,
        });
    };

    let mut left_rows = Vec::new();
    let mut right_rows = Vec::new();
    for row in 0..n_samples {
        if x.get(row, feature_idx) <= threshold {
            left_rows.push(row);
        } else {
            right_rows.push(row);
        }
    }
    if left_rows.is_empty() || right_rows.is_empty() {
        return TreeNode::Leaf(Leaf {
            class_label: majority_class(y),
            n_samples,
        });
    }

    let left_x = x.take_rows(&left_rows);
    let left_y: Vec<usize> = left_rows.iter().map(|&row| y[row]).collect();
    let right_x = x.take_rows(&right_rows);
    let right_y: Vec<usize> = right_rows.iter().map(|&row| y[row]).collect();

    TreeNode::Node(Node {
        feature_idx,
        threshold,
        left: Box::new(build_tree(
            &left_x,
            &left_y,
            depth + 1,
            max_depth,
            min_samples_split,
        )),
        right: Box::new(build_tree(
            &right_x,
            &right_y,
            depth + 1,
            max_depth,
            min_samples_split,
        )),
    })
}

/// Gradient boosting classifier with one-vs-rest multiclass support.
///
/// Boosts shallow decision trees in log-odds space, one ensemble per
/// class. Each iteration fits a tree to the sign of the log-loss
/// pseudo-residuals and nudges the raw predictions by `learning_rate`
/// in the direction that tree votes.
///
/// # Example
///
/// ```
/// use sentir::tree::GradientBoostingClassifier;
/// use sentir::primitives::Matrix;
///
/// let x = Matrix::from_vec(6, 1, vec![0.0, 1.0, 2.0, 10.0, 11.0, 12.0])
///     .expect("6x1 matrix with 6 values");
/// let y = vec![0, 0, 0, 1, 1, 1];
///
/// let mut model = GradientBoostingClassifier::new()
///     .with_n_estimators(5)
///     .with_learning_rate(0.5)
///     .with_max_depth(2);
/// model.fit(&x, &y).expect("Training data is valid");
///
/// let predictions = model.predict(&x).expect("Model is fitted");
/// assert_eq!(predictions, y);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradientBoostingClassifier {
    /// Number of boosting iterations (trees) per class
    n_estimators: usize,
    /// Learning rate (shrinkage parameter)
    learning_rate: f32,
    /// Maximum depth of each tree
    max_depth: usize,
    /// One boosted ensemble per class, aligned with `classes`
    boosters: Vec<ClassBooster>,
    /// Class labels seen during fit, sorted ascending
    classes: Vec<usize>,
}

/// Boosted ensemble for a single one-vs-rest binary problem.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ClassBooster {
    /// Initial prediction (log-odds of the positive rate)
    init_prediction: f32,
    /// Trees fitted to residual signs, in boosting order
    estimators: Vec<DecisionTreeClassifier>,
}

impl GradientBoostingClassifier {
    /// Creates a new gradient boosting classifier with default
    /// parameters.
    ///
    /// # Default Parameters
    ///
    /// - `n_estimators`: 100
    /// - `learning_rate`: 0.1
    /// - `max_depth`: 3
    #[must_use]
    pub fn new() -> Self {
        Self {
            n_estimators: 100,
            learning_rate: 0.1,
            max_depth: 3,
            boosters: Vec::new(),
            classes: Vec::new(),
        }
    }

    /// Sets the number of boosting iterations (trees) per class.
    #[must_use]
    pub fn with_n_estimators(mut self, n_estimators: usize) -> Self {
        self.n_estimators = n_estimators;
        self
    }

    /// Sets the learning rate (shrinkage parameter).
    ///
    /// Lower values require more trees but often generalize better.
    #[must_use]
    pub fn with_learning_rate(mut self, learning_rate: f32) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    /// Sets the maximum depth of each tree.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Returns the configured number of boosting iterations per class.
    #[must_use]
    pub fn n_estimators(&self) -> usize {
        self.n_estimators
    }

    /// Returns the learning rate.
    #[must_use]
    pub fn learning_rate(&self) -> f32 {
        self.learning_rate
    }

    /// Returns the max depth of each tree.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Sigmoid function: σ(x) = 1 / (1 + e^(-x))
    fn sigmoid(x: f32) -> f32 {
        1.0 / (1.0 + (-x).exp())
    }

    /// Trains one boosted ensemble per class.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Sample count mismatch between `x` and `y`
    /// - Empty data
    /// - Less than 2 classes
    /// - `learning_rate` is not positive or `n_estimators` is zero
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
        if self.learning_rate <= 0.0 {
            return Err(SentirError::InvalidHyperparameter {
                param: "learning_rate".to_string(),
                value: self.learning_rate.to_string(),
                constraint: "learning_rate > 0".to_string(),
            });
        }
        if self.n_estimators == 0 {
            return Err(SentirError::InvalidHyperparameter {
                param: "n_estimators".to_string(),
                value: "0".to_string(),
                constraint: "n_estimators >= 1".to_string(),
            });
        }

        let mut classes: Vec<usize> = y.to_vec();
        classes.sort_unstable();
        classes.dedup();

        if classes.len() < 2 {
            return Err("training labels contain fewer than 2 classes".into());
        }

        let mut boosters = Vec::with_capacity(classes.len());
        for &class_label in &classes {
            let targets: Vec<f32> = y
                .iter()
                .map(|&label| if label == class_label { 1.0 } else { 0.0 })
                .collect();
            boosters.push(self.fit_booster(x, &targets)?);
        }

        self.boosters = boosters;
        self.classes = classes;

        Ok(())
    }

    /// Boosts one binary ensemble against 0/1 targets.
    fn fit_booster(&self, x: &Matrix<f32>, targets: &[f32]) -> Result<ClassBooster> {
        let n_samples = targets.len();

        // Initial prediction is the log-odds of the positive rate,
        // clamped for degenerate target vectors.
        let positive_count = targets.iter().filter(|&&t| t == 1.0).count();
        let p = positive_count as f32 / n_samples as f32;
        let init_prediction = if p > 0.0 && p < 1.0 {
            (p / (1.0 - p)).ln()
        } else if p >= 1.0 {
            5.0
        } else {
            -5.0
        };

        let mut raw_predictions = vec![init_prediction; n_samples];
        let mut estimators = Vec::with_capacity(self.n_estimators);

        for _ in 0..self.n_estimators {
            // Log-loss pseudo-residual is target - sigmoid(raw); the
            // tree learns its sign.
            let residual_labels: Vec<usize> = targets
                .iter()
                .zip(raw_predictions.iter())
                .map(|(&target, &raw)| usize::from(target - Self::sigmoid(raw) >= 0.0))
                .collect();

            let mut tree = DecisionTreeClassifier::new().with_max_depth(self.max_depth);
            tree.fit(x, &residual_labels)?;

            let directions = tree_directions(&tree, x)?;
            for (raw, &direction) in raw_predictions.iter_mut().zip(directions.iter()) {
                *raw += self.learning_rate * direction;
            }

            estimators.push(tree);
        }

        Ok(ClassBooster {
            init_prediction,
            estimators,
        })
    }

    /// Accumulates a booster's raw log-odds scores for each sample.
    fn booster_scores(&self, booster: &ClassBooster, x: &Matrix<f32>) -> Result<Vec<f32>> {
        let mut raw_predictions = vec![booster.init_prediction; x.n_rows()];

        for tree in &booster.estimators {
            let directions = tree_directions(tree, x)?;
            for (raw, &direction) in raw_predictions.iter_mut().zip(directions.iter()) {
                *raw += self.learning_rate * direction;
            }
        }

        Ok(raw_predictions)
    }

    /// Predicts class labels for samples.
    ///
    /// Sigmoid is monotonic, so the raw log-odds argmax matches the
    /// probability argmax.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not fitted or the feature width
    /// differs from the training data.
    pub fn predict(&self, x: &Matrix<f32>) -> Result<Vec<usize>> {
        if self.boosters.is_empty() {
            return Err(SentirError::not_fitted("GradientBoostingClassifier"));
        }

        let mut per_class_scores = Vec::with_capacity(self.boosters.len());
        for booster in &self.boosters {
            per_class_scores.push(self.booster_scores(booster, x)?);
        }

        let n_samples = x.n_rows();
        let mut predictions = Vec::with_capacity(n_samples);

        for i in 0..n_samples {
            let max_idx = (0..per_class_scores.len())
                .max_by(|&a, &b| {
                    per_class_scores[a][i]
                        .partial_cmp(&per_class_scores[b][i])
                        .expect("Boosting scores are valid f32 (not NaN)")
                })
                .expect("At least one booster exists (n_classes >= 2)");
            predictions.push(self.classes[max_idx]);
        }

        Ok(predictions)
    }

    /// Returns probability estimates for each class.
    ///
    /// Per-class sigmoid outputs normalized to sum to one across
    /// classes.
    ///
    /// # Errors
    ///
    /// Returns an error if the model is not fitted or the feature width
    /// differs from the training data.
    pub fn predict_proba(&self, x: &Matrix<f32>) -> Result<Vec<Vec<f32>>> {
        if self.boosters.is_empty() {
            return Err(SentirError::not_fitted("GradientBoostingClassifier"));
        }

        let mut per_class_scores = Vec::with_capacity(self.boosters.len());
        for booster in &self.boosters {
            per_class_scores.push(self.booster_scores(booster, x)?);
        }

        let n_samples = x.n_rows();
        let mut probabilities = Vec::with_capacity(n_samples);

        for i in 0..n_samples {
            let mut row: Vec<f32> = per_class_scores
                .iter()
                .map(|scores| Self::sigmoid(scores[i]))
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
}

impl Default for GradientBoostingClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Classifier for GradientBoostingClassifier {
    fn fit(&mut self, x: &Matrix<f32>, y: &[usize]) -> Result<()> {
        GradientBoostingClassifier::fit(self, x, y)
    }

    fn predict(&self, x: &Matrix<f32>) -> Result<Vec<usize>> {
        GradientBoostingClassifier::predict(self, x)
    }
}

/// Maps a tree's class votes to boosting directions: 0 -> -1, 1 -> +1.
fn tree_directions(tree: &DecisionTreeClassifier, x: &Matrix<f32>) -> Result<Vec<f32>> {
    Ok(tree
        .predict(x)?
        .iter()
        .map(|&pred| if pred == 0 { -1.0 } else { 1.0 })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gini_impurity_pure() {
        assert!(gini_impurity(&[0, 0, 0]).abs() < 1e-6);
        assert!(gini_impurity(&[]).abs() < 1e-6);
    }

    #[test]
    fn test_gini_impurity_mixed() {
        assert!((gini_impurity(&[0, 1]) - 0.5).abs() < 1e-6);
        assert!((gini_impurity(&[0, 0, 1, 1]) - 0.5).abs() < 1e-6);
        assert!((gini_impurity(&[0, 1, 2, 3]) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_weighted_gini_prefers_pure_partitions() {
        let pure = weighted_gini(&[0, 0], &[1, 1]);
        let mixed = weighted_gini(&[0, 1], &[0, 1]);
        assert!(pure < mixed);
        assert!(pure.abs() < 1e-6);
    }

    #[test]
    fn test_majority_class() {
        assert_eq!(majority_class(&[0, 0, 1]), 0);
        assert_eq!(majority_class(&[2, 1, 1]), 1);
    }

    #[test]
    fn test_majority_class_tie_is_deterministic() {
        // Ties resolve to the largest label.
        assert_eq!(majority_class(&[3, 5]), 5);
        assert_eq!(majority_class(&[5, 3]), 5);
    }

    #[test]
    fn test_best_split_for_feature_separable() {
        let values = vec![0.0, 1.0, 10.0, 11.0];
        let labels = vec![0, 0, 1, 1];

        let (threshold, gain) =
            best_split_for_feature(&values, &labels).expect("split should exist");
        assert!((threshold - 5.5).abs() < 1e-6);
        assert!((gain - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_best_split_for_feature_constant() {
        let values = vec![1.0, 1.0, 1.0];
        let labels = vec![0, 1, 1];

        assert!(best_split_for_feature(&values, &labels).is_none());
    }

    #[test]
    fn test_decision_tree_fit_predict_separable() {
        let x = Matrix::from_vec(
            4,
            2,
            vec![
                0.0, 0.0, // class 0
                0.0, 1.0, // class 0
                1.0, 0.0, // class 1
                1.0, 1.0, // class 1
            ],
        )
        .expect("4x2 matrix with 8 values");
        let y = vec![0, 0, 1, 1];

        let mut tree = DecisionTreeClassifier::new();
        tree.fit(&x, &y).expect("Training should succeed");

        let predictions = tree.predict(&x).expect("Model is fitted");
        assert_eq!(predictions, y);
    }

    #[test]
    fn test_decision_tree_multiclass() {
        let x = Matrix::from_vec(6, 1, vec![0.0, 0.0, 1.0, 1.0, 2.0, 2.0]).expect("6x1 matrix");
        let y = vec![0, 0, 1, 1, 2, 2];

        let mut tree = DecisionTreeClassifier::new();
        tree.fit(&x, &y).expect("Training should succeed");

        let predictions = tree.predict(&x).expect("Model is fitted");
        assert_eq!(predictions, y);
    }

    #[test]
    fn test_decision_tree_max_depth_zero_is_majority_vote() {
        let x = Matrix::from_vec(3, 1, vec![0.0, 1.0, 2.0]).expect("3x1 matrix");
        let y = vec![0, 0, 1];

        let mut tree = DecisionTreeClassifier::new().with_max_depth(0);
        tree.fit(&x, &y).expect("Training should succeed");

        assert_eq!(tree.depth(), Some(0));
        let predictions = tree.predict(&x).expect("Model is fitted");
        assert_eq!(predictions, vec![0, 0, 0]);
    }

    #[test]
    fn test_decision_tree_max_depth_caps_tree() {
        let x = Matrix::from_vec(
            8,
            1,
            vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0],
        )
        .expect("8x1 matrix");
        let y = vec![0, 1, 0, 1, 0, 1, 0, 1];

        let mut tree = DecisionTreeClassifier::new().with_max_depth(2);
        tree.fit(&x, &y).expect("Training should succeed");

        assert!(tree.depth().expect("Model is fitted") <= 2);
    }

    #[test]
    fn test_decision_tree_min_samples_split_stops_early() {
        // Best root split is at 1.5, leaving the impure pair [2, 3] on
        // the right. min_samples_split = 3 forces that pair into a
        // majority leaf; the default lets it split again.
        let x = Matrix::from_vec(4, 1, vec![0.0, 1.0, 2.0, 3.0]).expect("4x1 matrix");
        let y = vec![0, 0, 1, 0];

        let mut stopped = DecisionTreeClassifier::new().with_min_samples_split(3);
        stopped.fit(&x, &y).expect("Training should succeed");
        assert_eq!(stopped.depth(), Some(1));

        let mut full = DecisionTreeClassifier::new();
        full.fit(&x, &y).expect("Training should succeed");
        assert_eq!(full.depth(), Some(2));
        assert_eq!(full.predict(&x).expect("Model is fitted"), y);
    }

    #[test]
    fn test_decision_tree_min_samples_split_clamps_to_two() {
        let tree = DecisionTreeClassifier::new().with_min_samples_split(0);
        assert_eq!(tree.min_samples_split, 2);
    }

    #[test]
    fn test_decision_tree_single_class_fits_as_leaf() {
        let x = Matrix::from_vec(2, 1, vec![0.0, 1.0]).expect("2x1 matrix");
        let y = vec![1, 1];

        let mut tree = DecisionTreeClassifier::new();
        tree.fit(&x, &y).expect("Training should succeed");

        assert_eq!(tree.depth(), Some(0));
        assert_eq!(tree.predict(&x).expect("Model is fitted"), vec![1, 1]);
    }

    #[test]
    fn test_decision_tree_constant_features() {
        let x = Matrix::from_vec(3, 1, vec![1.0, 1.0, 1.0]).expect("3x1 matrix");
        let y = vec![0, 1, 1];

        let mut tree = DecisionTreeClassifier::new();
        tree.fit(&x, &y).expect("Training should succeed");

        let predictions = tree.predict(&x).expect("Model is fitted");
        assert_eq!(predictions, vec![1, 1, 1]);
    }

    #[test]
    fn test_decision_tree_mismatched_samples() {
        let x = Matrix::from_vec(2, 1, vec![0.0, 1.0]).expect("2x1 matrix");
        let y = vec![0];

        let mut tree = DecisionTreeClassifier::new();
        let result = tree.fit(&x, &y);

        assert!(matches!(result, Err(SentirError::RowCountMismatch { .. })));
    }

    #[test]
    fn test_decision_tree_zero_samples() {
        let x = Matrix::from_vec(0, 1, vec![]).expect("0x1 matrix");
        let y = vec![];

        let mut tree = DecisionTreeClassifier::new();
        assert!(tree.fit(&x, &y).is_err());
    }

    #[test]
    fn test_decision_tree_predict_before_fit() {
        let x = Matrix::from_vec(1, 1, vec![0.0]).expect("1x1 matrix");
        let tree = DecisionTreeClassifier::new();

        assert!(tree.predict(&x).is_err());
    }

    #[test]
    fn test_decision_tree_feature_width_mismatch() {
        let x = Matrix::from_vec(4, 2, vec![0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0])
            .expect("4x2 matrix");
        let y = vec![0, 0, 1, 1];

        let mut tree = DecisionTreeClassifier::new();
        tree.fit(&x, &y).expect("Training should succeed");

        let narrow = Matrix::from_vec(1, 1, vec![0.0]).expect("1x1 matrix");
        let result = tree.predict(&narrow);

        assert!(matches!(result, Err(SentirError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_gradient_boosting_new() {
        let model = GradientBoostingClassifier::new();
        assert_eq!(model.n_estimators(), 100);
        assert_eq!(model.learning_rate(), 0.1);
        assert_eq!(model.max_depth(), 3);
        assert!(model.boosters.is_empty());
    }

    #[test]
    fn test_gradient_boosting_builder() {
        let model = GradientBoostingClassifier::new()
            .with_n_estimators(500)
            .with_learning_rate(0.2)
            .with_max_depth(7);

        assert_eq!(model.n_estimators(), 500);
        assert_eq!(model.learning_rate(), 0.2);
        assert_eq!(model.max_depth(), 7);
    }

    #[test]
    fn test_gradient_boosting_binary() {
        let x = Matrix::from_vec(6, 1, vec![0.0, 1.0, 2.0, 10.0, 11.0, 12.0])
            .expect("6x1 matrix");
        let y = vec![0, 0, 0, 1, 1, 1];

        let mut model = GradientBoostingClassifier::new()
            .with_n_estimators(5)
            .with_learning_rate(0.5)
            .with_max_depth(2);
        model.fit(&x, &y).expect("Training should succeed");

        let predictions = model.predict(&x).expect("Model is fitted");
        assert_eq!(predictions, y);
    }

    #[test]
    fn test_gradient_boosting_three_classes() {
        let x = Matrix::from_vec(6, 1, vec![0.0, 1.0, 10.0, 11.0, 20.0, 21.0])
            .expect("6x1 matrix");
        let y = vec![0, 0, 1, 1, 2, 2];

        let mut model = GradientBoostingClassifier::new()
            .with_n_estimators(10)
            .with_learning_rate(0.5)
            .with_max_depth(3);
        model.fit(&x, &y).expect("Training should succeed");

        let predictions = model.predict(&x).expect("Model is fitted");
        assert_eq!(predictions, y);
    }

    #[test]
    fn test_gradient_boosting_nonconsecutive_labels() {
        let x = Matrix::from_vec(4, 1, vec![0.0, 1.0, 10.0, 11.0]).expect("4x1 matrix");
        let y = vec![4, 4, 9, 9];

        let mut model = GradientBoostingClassifier::new()
            .with_n_estimators(5)
            .with_learning_rate(0.5);
        model.fit(&x, &y).expect("Training should succeed");

        let predictions = model.predict(&x).expect("Model is fitted");
        assert_eq!(predictions, vec![4, 4, 9, 9]);
    }

    #[test]
    fn test_gradient_boosting_predict_proba_sums_to_one() {
        let x = Matrix::from_vec(6, 1, vec![0.0, 1.0, 10.0, 11.0, 20.0, 21.0])
            .expect("6x1 matrix");
        let y = vec![0, 0, 1, 1, 2, 2];

        let mut model = GradientBoostingClassifier::new()
            .with_n_estimators(5)
            .with_learning_rate(0.5);
        model.fit(&x, &y).expect("Training should succeed");

        let probabilities = model.predict_proba(&x).expect("Model is fitted");
        for row in &probabilities {
            let sum: f32 = row.iter().sum();
            assert!((sum - 1.0).abs() < 1e-5);
            assert_eq!(row.len(), 3);
        }
    }

    #[test]
    fn test_gradient_boosting_mismatched_samples() {
        let x = Matrix::from_vec(2, 1, vec![0.0, 1.0]).expect("2x1 matrix");
        let y = vec![0];

        let mut model = GradientBoostingClassifier::new();
        let result = model.fit(&x, &y);

        assert!(matches!(result, Err(SentirError::RowCountMismatch { .. })));
    }

    #[test]
    fn test_gradient_boosting_single_class() {
        let x = Matrix::from_vec(2, 1, vec![0.0, 1.0]).expect("2x1 matrix");
        let y = vec![0, 0];

        let mut model = GradientBoostingClassifier::new();
        assert!(model.fit(&x, &y).is_err());
    }

    #[test]
    fn test_gradient_boosting_invalid_learning_rate() {
        let x = Matrix::from_vec(2, 1, vec![0.0, 1.0]).expect("2x1 matrix");
        let y = vec![0, 1];

        let mut model = GradientBoostingClassifier::new().with_learning_rate(0.0);
        let result = model.fit(&x, &y);

        assert!(matches!(
            result,
            Err(SentirError::InvalidHyperparameter { .. })
        ));
    }

    #[test]
    fn test_gradient_boosting_zero_estimators() {
        let x = Matrix::from_vec(2, 1, vec![0.0, 1.0]).expect("2x1 matrix");
        let y = vec![0, 1];

        let mut model = GradientBoostingClassifier::new().with_n_estimators(0);
        let result = model.fit(&x, &y);

        assert!(matches!(
            result,
            Err(SentirError::InvalidHyperparameter { .. })
        ));
    }

    #[test]
    fn test_gradient_boosting_predict_before_fit() {
        let x = Matrix::from_vec(1, 1, vec![0.0]).expect("1x1 matrix");
        let model = GradientBoostingClassifier::new();

        assert!(model.predict(&x).is_err());
    }

    #[test]
    fn test_gradient_boosting_deterministic() {
        let x = Matrix::from_vec(6, 1, vec![0.0, 1.0, 10.0, 11.0, 20.0, 21.0])
            .expect("6x1 matrix");
        let y = vec![0, 0, 1, 1, 2, 2];

        let mut first = GradientBoostingClassifier::new().with_n_estimators(5);
        first.fit(&x, &y).expect("Training should succeed");
        let mut second = GradientBoostingClassifier::new().with_n_estimators(5);
        second.fit(&x, &y).expect("Training should succeed");

        assert_eq!(
            first.predict(&x).expect("Model is fitted"),
            second.predict(&x).expect("Model is fitted")
        );
    }
}
