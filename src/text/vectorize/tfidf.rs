use tracing::debug;

use crate::error::{Result, SentirError};
use crate::primitives::Matrix;
use crate::text::tokenize::Tokenizer;

use super::CountVectorizer;

/// TF-IDF weighted n-gram features with L2-normalized rows.
///
/// Wraps a [`CountVectorizer`] and reweights its counts by smoothed
/// inverse document frequency:
///
/// ```text
/// idf(t) = ln((1 + n_documents) / (1 + df(t))) + 1
/// ```
///
/// Each output row is then scaled to unit Euclidean norm, so documents
/// of different lengths become comparable. Rows with no in-vocabulary
/// terms stay all-zero.
///
/// # Examples
///
/// ```
/// use sentir::text::vectorize::TfidfVectorizer;
///
/// let train = vec!["feel so tired", "tired of everything", "feel fine"];
/// let mut vectorizer = TfidfVectorizer::new().with_ngram_range(1, 2).with_max_features(50);
///
/// let x_train = vectorizer.fit_transform(&train).unwrap();
/// let x_test = vectorizer.transform(&["so tired"]).unwrap();
/// assert_eq!(x_train.n_cols(), x_test.n_cols());
/// ```
#[allow(missing_debug_implementations)]
pub struct TfidfVectorizer {
    count: CountVectorizer,
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    /// Create a unigram TF-IDF vectorizer with an unbounded vocabulary.
    #[must_use]
    pub fn new() -> Self {
        Self {
            count: CountVectorizer::new(),
            idf: Vec::new(),
        }
    }

    /// Set the inclusive n-gram range.
    #[must_use]
    pub fn with_ngram_range(mut self, min_n: usize, max_n: usize) -> Self {
        self.count = self.count.with_ngram_range(min_n, max_n);
        self
    }

    /// Cap the vocabulary at the terms with the highest document frequency.
    #[must_use]
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.count = self.count.with_max_features(max_features);
        self
    }

    /// Replace the tokenizer.
    #[must_use]
    pub fn with_tokenizer(mut self, tokenizer: Box<dyn Tokenizer>) -> Self {
        self.count = self.count.with_tokenizer(tokenizer);
        self
    }

    /// Learn vocabulary, document frequencies, and IDF weights.
    ///
    /// # Errors
    ///
    /// Propagates [`SentirError::EmptyVocabulary`] when the corpus has
    /// no usable terms.
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<()> {
        self.count.fit(documents)?;
        let n = self.count.n_documents() as f32;
        self.idf = self
            .count
            .document_frequencies()
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f32)).ln() + 1.0)
            .collect();
        debug!(
            n_documents = self.count.n_documents(),
            vocabulary_size = self.count.vocabulary_size(),
            "fitted tf-idf vectorizer"
        );
        Ok(())
    }

    /// Weight `documents` against the fitted vocabulary.
    ///
    /// # Errors
    ///
    /// Returns [`SentirError::NotFitted`] before [`TfidfVectorizer::fit`].
    pub fn transform<S: AsRef<str>>(&self, documents: &[S]) -> Result<Matrix<f32>> {
        if self.idf.is_empty() {
            return Err(SentirError::not_fitted("TfidfVectorizer"));
        }
        let mut x = self.count.transform(documents)?;
        let (rows, cols) = x.shape();
        for i in 0..rows {
            let mut norm_sq = 0.0f32;
            for j in 0..cols {
                let w = x.get(i, j) * self.idf[j];
                x.set(i, j, w);
                norm_sq += w * w;
            }
            if norm_sq > 0.0 {
                let norm = norm_sq.sqrt();
                for j in 0..cols {
                    x.set(i, j, x.get(i, j) / norm);
                }
            }
        }
        Ok(x)
    }

    /// Fit on `documents`, then transform the same documents.
    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<Matrix<f32>> {
        self.fit(documents)?;
        self.transform(documents)
    }

    /// Number of terms in the fitted vocabulary.
    #[must_use]
    pub fn vocabulary_size(&self) -> usize {
        self.count.vocabulary_size()
    }

    /// Terms ordered by column index.
    #[must_use]
    pub fn feature_names(&self) -> Vec<&str> {
        self.count.feature_names()
    }

    /// Fitted IDF weights, one per vocabulary column. Empty before fit.
    #[must_use]
    pub fn idf(&self) -> &[f32] {
        &self.idf
    }
}

impl Default for TfidfVectorizer {
    fn default() -> Self {
        Self::new()
    }
}
