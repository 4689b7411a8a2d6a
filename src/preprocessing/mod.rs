//! Label encoding and training-set rebalancing.
//!
//! The corpus labels are category names; classifiers work on integer
//! codes. [`LabelEncoder`] is the bijection between the two.
//! [`RandomOverSampler`] counters class imbalance by duplicating
//! minority-class rows until every class matches the majority count.
//!
//! # Example
//!
//! ```
//! use sentir::preprocessing::LabelEncoder;
//!
//! let mut encoder = LabelEncoder::new();
//! let codes = encoder.fit_transform(&["Normal", "Anxiety", "Normal"]).unwrap();
//! assert_eq!(codes, vec![1, 0, 1]);
//! assert_eq!(encoder.inverse_transform(&codes).unwrap()[1], "Anxiety");
//! ```

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SentirError};
use crate::primitives::Matrix;

/// Bijective mapping between label strings and integer class codes.
///
/// Codes are assigned alphabetically over the distinct labels seen at
/// fit time, so the mapping is independent of input order. Fit it on
/// the full dataset before splitting, otherwise a rare class that only
/// lands in the test split would be unseen.
///
/// # Examples
///
/// ```
/// use sentir::preprocessing::LabelEncoder;
///
/// let mut encoder = LabelEncoder::new();
/// encoder
///     .fit(&[
///         "Normal", "Depression", "Suicidal", "Anxiety", "Stress", "Bi-Polar",
///         "Personality disorder",
///     ])
///     .unwrap();
/// assert_eq!(encoder.n_classes(), 7);
/// assert_eq!(encoder.transform(&["Anxiety"]).unwrap(), vec![0]);
/// assert_eq!(encoder.inverse_transform(&[6]).unwrap(), vec!["Suicidal"]);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LabelEncoder {
    /// Distinct labels in sorted order; a label's index is its code.
    classes: Vec<String>,
}

impl LabelEncoder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            classes: Vec::new(),
        }
    }

    /// Learn the label set. Refitting replaces the previous mapping.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty label slice.
    pub fn fit<S: AsRef<str>>(&mut self, labels: &[S]) -> Result<()> {
        if labels.is_empty() {
            return Err(SentirError::empty_input("labels to fit"));
        }
        let unique: BTreeSet<&str> = labels.iter().map(AsRef::as_ref).collect();
        self.classes = unique.into_iter().map(String::from).collect();
        Ok(())
    }

    /// Encode labels to class codes.
    ///
    /// # Errors
    ///
    /// Returns [`SentirError::UnseenLabel`] for any label absent at fit
    /// time, and [`SentirError::NotFitted`] before [`LabelEncoder::fit`].
    pub fn transform<S: AsRef<str>>(&self, labels: &[S]) -> Result<Vec<usize>> {
        if self.classes.is_empty() {
            return Err(SentirError::not_fitted("LabelEncoder"));
        }
        labels
            .iter()
            .map(|label| {
                let label = label.as_ref();
                self.classes
                    .binary_search_by(|class| class.as_str().cmp(label))
                    .map_err(|_| SentirError::UnseenLabel {
                        label: label.to_string(),
                    })
            })
            .collect()
    }

    /// Fit on `labels`, then encode the same labels.
    pub fn fit_transform<S: AsRef<str>>(&mut self, labels: &[S]) -> Result<Vec<usize>> {
        self.fit(labels)?;
        self.transform(labels)
    }

    /// Decode class codes back to label strings.
    ///
    /// # Errors
    ///
    /// Returns [`SentirError::UnseenLabel`] for a code outside the
    /// fitted range.
    pub fn inverse_transform(&self, codes: &[usize]) -> Result<Vec<String>> {
        if self.classes.is_empty() {
            return Err(SentirError::not_fitted("LabelEncoder"));
        }
        codes
            .iter()
            .map(|&code| {
                self.classes
                    .get(code)
                    .cloned()
                    .ok_or_else(|| SentirError::UnseenLabel {
                        label: code.to_string(),
                    })
            })
            .collect()
    }

    /// Distinct labels in code order. Empty before fit.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Number of distinct classes.
    #[must_use]
    pub fn n_classes(&self) -> usize {
        self.classes.len()
    }
}

/// How the training split is rebalanced before fitting classifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SamplingStrategy {
    /// Leave the training split as-is.
    None,
    /// Duplicate minority-class rows at random, with replacement, until
    /// every class reaches the majority class count.
    #[default]
    RandomOversample,
}

/// Random oversampler for imbalanced training splits.
///
/// Duplicated rows are drawn uniformly with replacement from the rows
/// of their own class. Original rows are always kept, in their original
/// order, ahead of the appended duplicates. Apply this to the training
/// split only; evaluation on oversampled data would overstate every
/// metric.
///
/// # Examples
///
/// ```
/// use sentir::preprocessing::RandomOverSampler;
/// use sentir::primitives::Matrix;
///
/// let x = Matrix::from_vec(3, 1, vec![1.0, 2.0, 3.0]).unwrap();
/// let y = vec![0, 0, 1];
///
/// let sampler = RandomOverSampler::new().with_random_state(7);
/// let (x_bal, y_bal) = sampler.fit_resample(&x, &y).unwrap();
/// assert_eq!(y_bal.iter().filter(|&&c| c == 0).count(), 2);
/// assert_eq!(y_bal.iter().filter(|&&c| c == 1).count(), 2);
/// assert_eq!(x_bal.n_rows(), 4);
/// ```
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RandomOverSampler {
    random_state: Option<u64>,
}

impl RandomOverSampler {
    #[must_use]
    pub fn new() -> Self {
        Self { random_state: None }
    }

    /// Seed the duplicate draws for reproducible balancing.
    #[must_use]
    pub fn with_random_state(mut self, seed: u64) -> Self {
        self.random_state = Some(seed);
        self
    }

    /// Compute resampled row indices for the given class codes.
    ///
    /// The result starts with `0..y.len()` in order, followed by the
    /// duplicated row indices, so original rows survive untouched.
    ///
    /// # Errors
    ///
    /// Returns an error for an empty label slice.
    pub fn sample_indices(&self, y: &[usize]) -> Result<Vec<usize>> {
        if y.is_empty() {
            return Err(SentirError::empty_input("labels to resample"));
        }
        // BTreeMap keeps class iteration in code order so a fixed seed
        // always produces the same draws.
        let mut rows_by_class: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (row, &class) in y.iter().enumerate() {
            rows_by_class.entry(class).or_default().push(row);
        }
        let majority = rows_by_class
            .values()
            .map(Vec::len)
            .max()
            .unwrap_or(0);

        let mut indices: Vec<usize> = (0..y.len()).collect();
        match self.random_state {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                push_duplicates(&mut indices, &rows_by_class, majority, &mut rng);
            }
            None => {
                let mut rng = rand::thread_rng();
                push_duplicates(&mut indices, &rows_by_class, majority, &mut rng);
            }
        }
        Ok(indices)
    }

    /// Resample features and labels together.
    ///
    /// # Errors
    ///
    /// Returns [`SentirError::RowCountMismatch`] when `x` and `y`
    /// disagree on row count.
    pub fn fit_resample(&self, x: &Matrix<f32>, y: &[usize]) -> Result<(Matrix<f32>, Vec<usize>)> {
        if x.n_rows() != y.len() {
            return Err(SentirError::row_mismatch(
                "features vs labels",
                x.n_rows(),
                y.len(),
            ));
        }
        let indices = self.sample_indices(y)?;
        let y_resampled = indices.iter().map(|&i| y[i]).collect();
        Ok((x.take_rows(&indices), y_resampled))
    }
}

fn push_duplicates<R: Rng>(
    indices: &mut Vec<usize>,
    rows_by_class: &BTreeMap<usize, Vec<usize>>,
    majority: usize,
    rng: &mut R,
) {
    for rows in rows_by_class.values() {
        for _ in rows.len()..majority {
            indices.push(rows[rng.gen_range(0..rows.len())]);
        }
    }
}
