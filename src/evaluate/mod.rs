//! Multi-model evaluation over a shared train/test split.
//!
//! Every candidate trains on the same feature matrix and is scored on
//! the same held-out rows, so accuracy differences come from the models
//! rather than the data. Results rank models by test accuracy and carry
//! the full per-class breakdown for each one.
//!
//! # Example
//!
//! ```
//! use sentir::evaluate::{EvaluationSuite, ModelConfig};
//! use sentir::primitives::Matrix;
//!
//! let x = Matrix::from_vec(8, 2, vec![
//!     1.0, 0.0,  1.0, 0.0,  1.0, 0.0,  1.0, 0.0,
//!     0.0, 1.0,  0.0, 1.0,  0.0, 1.0,  0.0, 1.0,
//! ]).expect("8x2 matrix");
//! let y = vec![0, 0, 0, 0, 1, 1, 1, 1];
//! let names = vec!["calm".to_string(), "storm".to_string()];
//!
//! let mut suite = EvaluationSuite::new();
//! suite.add_model(ModelConfig::BernoulliNb { alpha: 0.1, binarize: 0.0 });
//!
//! let evaluation = suite.run(&x, &y, &x, &y, &names).expect("run should succeed");
//! assert_eq!(evaluation.reports.len(), 1);
//! assert!((evaluation.reports[0].accuracy() - 1.0).abs() < 1e-6);
//! ```

use crate::classification::{BernoulliNb, LogisticRegression};
use crate::error::{Result, SentirError};
use crate::metrics::{classification_report, confusion_matrix_sized, ClassificationReport};
use crate::primitives::Matrix;
use crate::traits::Classifier;
use crate::tree::{DecisionTreeClassifier, GradientBoostingClassifier};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;
use tracing::{debug, info};

/// Algorithm and hyperparameters for one candidate model.
///
/// Hyperparameters are fixed at configuration time; [`ModelConfig::build`]
/// constructs a fresh unfitted model from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ModelConfig {
    /// Bernoulli naive Bayes over binarized features.
    BernoulliNb {
        /// Laplace smoothing strength
        alpha: f32,
        /// Presence threshold (strictly greater counts as on)
        binarize: f32,
    },
    /// CART decision tree with Gini impurity.
    DecisionTree {
        /// Maximum tree depth
        max_depth: usize,
        /// Minimum samples required to split a node
        min_samples_split: usize,
    },
    /// L1-regularized one-vs-rest logistic regression.
    LogisticRegression {
        /// Inverse regularization strength
        c: f32,
        /// Maximum optimizer iterations per class
        max_iter: usize,
    },
    /// One-vs-rest gradient boosting over shallow trees.
    GradientBoosting {
        /// Shrinkage applied to each tree's vote
        learning_rate: f32,
        /// Maximum depth of each tree
        max_depth: usize,
        /// Boosting iterations per class
        n_estimators: usize,
    },
}

impl ModelConfig {
    /// Short machine-readable name for reports and logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ModelConfig::BernoulliNb { .. } => "bernoulli_nb",
            ModelConfig::DecisionTree { .. } => "decision_tree",
            ModelConfig::LogisticRegression { .. } => "logistic_regression",
            ModelConfig::GradientBoosting { .. } => "gradient_boosting",
        }
    }

    /// Constructs a fresh unfitted model from this configuration.
    #[must_use]
    pub fn build(&self) -> Box<dyn Classifier> {
        match *self {
            ModelConfig::BernoulliNb { alpha, binarize } => {
                Box::new(BernoulliNb::new().with_alpha(alpha).with_binarize(binarize))
            }
            ModelConfig::DecisionTree {
                max_depth,
                min_samples_split,
            } => Box::new(
                DecisionTreeClassifier::new()
                    .with_max_depth(max_depth)
                    .with_min_samples_split(min_samples_split),
            ),
            ModelConfig::LogisticRegression { c, max_iter } => {
                Box::new(LogisticRegression::new().with_c(c).with_max_iter(max_iter))
            }
            ModelConfig::GradientBoosting {
                learning_rate,
                max_depth,
                n_estimators,
            } => Box::new(
                GradientBoostingClassifier::new()
                    .with_learning_rate(learning_rate)
                    .with_max_depth(max_depth)
                    .with_n_estimators(n_estimators),
            ),
        }
    }
}

/// Scores and per-class breakdown for one fitted candidate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelReport {
    /// Candidate name from [`ModelConfig::name`]
    pub name: String,
    /// Accuracy plus per-class precision, recall, F1, and support
    pub report: ClassificationReport,
    /// Confusion counts, rows actual and columns predicted
    pub confusion: Matrix<usize>,
    /// Wall-clock fit time in seconds
    pub train_seconds: f64,
    /// Wall-clock predict time in seconds
    pub predict_seconds: f64,
}

impl ModelReport {
    /// Test accuracy of this candidate.
    #[must_use]
    pub fn accuracy(&self) -> f32 {
        self.report.accuracy
    }
}

impl fmt::Display for ModelReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}  (accuracy {:.4})", self.name, self.accuracy())?;
        writeln!(f)?;
        writeln!(f, "{}", self.report)?;
        writeln!(f)?;
        writeln!(f, "confusion matrix (rows actual, columns predicted)")?;
        let labels: Vec<&str> = self
            .report
            .classes
            .iter()
            .map(|class| class.label.as_str())
            .collect();
        write_confusion(f, &self.confusion, &labels)
    }
}

/// Renders a confusion matrix with named rows and columns.
fn write_confusion(
    f: &mut fmt::Formatter<'_>,
    confusion: &Matrix<usize>,
    labels: &[&str],
) -> fmt::Result {
    let label_width = labels
        .iter()
        .map(|label| label.len())
        .max()
        .unwrap_or(0)
        .max("actual".len());
    let cell_width = labels.iter().map(|label| label.len()).max().unwrap_or(0).max(6);

    write!(f, "{:>label_width$}", "actual")?;
    for label in labels {
        write!(f, "  {label:>cell_width$}")?;
    }
    writeln!(f)?;

    for (i, label) in labels.iter().enumerate() {
        write!(f, "{label:>label_width$}")?;
        for j in 0..labels.len() {
            let count = confusion.get(i, j);
            write!(f, "  {count:>cell_width$}")?;
        }
        if i + 1 < labels.len() {
            writeln!(f)?;
        }
    }
    Ok(())
}

/// Ordered collection of candidate models evaluated together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationSuite {
    models: Vec<ModelConfig>,
    parallel: bool,
}

impl EvaluationSuite {
    /// Creates an empty suite. Evaluation is sequential unless
    /// [`EvaluationSuite::with_parallel`] opts in.
    #[must_use]
    pub fn new() -> Self {
        Self {
            models: Vec::new(),
            parallel: false,
        }
    }

    /// The standard four-candidate suite.
    ///
    /// Covers one representative of each family: naive Bayes, a single
    /// decision tree, linear one-vs-rest, and a boosted ensemble.
    #[must_use]
    pub fn standard() -> Self {
        let mut suite = Self::new();
        suite.add_model(ModelConfig::BernoulliNb {
            alpha: 0.1,
            binarize: 0.0,
        });
        suite.add_model(ModelConfig::DecisionTree {
            max_depth: 9,
            min_samples_split: 5,
        });
        suite.add_model(ModelConfig::LogisticRegression {
            c: 10.0,
            max_iter: 1000,
        });
        suite.add_model(ModelConfig::GradientBoosting {
            learning_rate: 0.2,
            max_depth: 7,
            n_estimators: 500,
        });
        suite
    }

    /// Adds a candidate to the suite.
    pub fn add_model(&mut self, config: ModelConfig) {
        self.models.push(config);
    }

    /// Enables or disables parallel training across candidates.
    ///
    /// Has no effect when the `parallel` feature is disabled.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Candidate configurations in evaluation order.
    #[must_use]
    pub fn models(&self) -> &[ModelConfig] {
        &self.models
    }

    /// Trains every candidate on the train split and scores it on the
    /// test split.
    ///
    /// `class_names[i]` names encoded label i and sizes the per-class
    /// breakdown and confusion matrices.
    ///
    /// # Errors
    ///
    /// Returns an error when the suite is empty, when either split has
    /// misaligned feature and label rows, when train and test disagree
    /// on feature width, or when any candidate fails to fit.
    pub fn run(
        &self,
        x_train: &Matrix<f32>,
        y_train: &[usize],
        x_test: &Matrix<f32>,
        y_test: &[usize],
        class_names: &[String],
    ) -> Result<Evaluation> {
        if self.models.is_empty() {
            return Err(SentirError::empty_input("evaluation suite has no models"));
        }
        if x_train.n_rows() != y_train.len() {
            return Err(SentirError::row_mismatch(
                "train features vs labels",
                x_train.n_rows(),
                y_train.len(),
            ));
        }
        if x_test.n_rows() != y_test.len() {
            return Err(SentirError::row_mismatch(
                "test features vs labels",
                x_test.n_rows(),
                y_test.len(),
            ));
        }
        if x_train.n_cols() != x_test.n_cols() {
            return Err(SentirError::DimensionMismatch {
                expected: format!("{} train columns", x_train.n_cols()),
                actual: format!("{} test columns", x_test.n_cols()),
            });
        }

        info!(
            models = self.models.len(),
            train_rows = x_train.n_rows(),
            test_rows = x_test.n_rows(),
            features = x_train.n_cols(),
            "evaluating candidate models"
        );

        #[cfg(feature = "parallel")]
        let reports: Result<Vec<ModelReport>> = if self.parallel {
            self.models
                .par_iter()
                .map(|config| evaluate_model(config, x_train, y_train, x_test, y_test, class_names))
                .collect()
        } else {
            self.models
                .iter()
                .map(|config| evaluate_model(config, x_train, y_train, x_test, y_test, class_names))
                .collect()
        };

        #[cfg(not(feature = "parallel"))]
        let reports: Result<Vec<ModelReport>> = self
            .models
            .iter()
            .map(|config| evaluate_model(config, x_train, y_train, x_test, y_test, class_names))
            .collect();

        Ok(Evaluation { reports: reports? })
    }
}

impl Default for EvaluationSuite {
    fn default() -> Self {
        Self::new()
    }
}

/// Fits one candidate and scores it on the test split.
fn evaluate_model(
    config: &ModelConfig,
    x_train: &Matrix<f32>,
    y_train: &[usize],
    x_test: &Matrix<f32>,
    y_test: &[usize],
    class_names: &[String],
) -> Result<ModelReport> {
    let mut model = config.build();

    let started = Instant::now();
    model.fit(x_train, y_train)?;
    let train_seconds = started.elapsed().as_secs_f64();

    let started = Instant::now();
    let predictions = model.predict(x_test)?;
    let predict_seconds = started.elapsed().as_secs_f64();

    let report = classification_report(&predictions, y_test, class_names);
    let confusion = confusion_matrix_sized(&predictions, y_test, class_names.len());

    debug!(
        model = config.name(),
        accuracy = report.accuracy,
        train_seconds,
        "candidate evaluated"
    );

    Ok(ModelReport {
        name: config.name().to_string(),
        report,
        confusion,
        train_seconds,
        predict_seconds,
    })
}

/// Results for every candidate, in suite order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Evaluation {
    /// One report per candidate, in the order the suite listed them
    pub reports: Vec<ModelReport>,
}

impl Evaluation {
    /// Reports sorted by test accuracy, best first.
    ///
    /// Ties keep suite order, so rankings are stable across runs.
    #[must_use]
    pub fn ranked(&self) -> Vec<&ModelReport> {
        let mut ordered: Vec<&ModelReport> = self.reports.iter().collect();
        ordered.sort_by(|a, b| {
            b.accuracy()
                .partial_cmp(&a.accuracy())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ordered
    }

    /// The candidate with the highest test accuracy.
    #[must_use]
    pub fn best(&self) -> Option<&ModelReport> {
        self.ranked().into_iter().next()
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name_width = self
            .reports
            .iter()
            .map(|report| report.name.len())
            .max()
            .unwrap_or(0)
            .max("model".len());

        writeln!(f, "rank  {:<name_width$}  accuracy", "model")?;
        let ranked = self.ranked();
        for (position, report) in ranked.iter().enumerate() {
            write!(
                f,
                "{:>4}  {:<name_width$}  {:>8.4}",
                position + 1,
                report.name,
                report.accuracy()
            )?;
            if position + 1 < ranked.len() {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
