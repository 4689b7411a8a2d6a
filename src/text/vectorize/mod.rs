//! Term counting and TF-IDF weighting.
//!
//! [`CountVectorizer`] learns a vocabulary of word n-grams from a
//! training corpus and maps documents to raw count rows.
//! [`TfidfVectorizer`] layers inverse-document-frequency weighting and
//! L2 row normalization on top. Both follow strict fit/transform
//! isolation: vocabulary and document frequencies come from the fit
//! corpus alone, and transform never updates them.

mod tfidf;

pub use tfidf::TfidfVectorizer;

use std::collections::{HashMap, HashSet};

use crate::error::{Result, SentirError};
use crate::primitives::Matrix;
use crate::text::tokenize::{Tokenizer, WhitespaceTokenizer};

/// Learns an n-gram vocabulary and produces term-count matrices.
///
/// The vocabulary is capped at `max_features` terms, keeping the terms
/// that appear in the most documents. Ties are broken alphabetically so
/// two fits over the same corpus always produce the same columns.
/// Terms unseen at fit time are silently ignored at transform time.
///
/// # Examples
///
/// ```
/// use sentir::text::vectorize::CountVectorizer;
///
/// let docs = vec!["feel so low", "feel fine"];
/// let mut vectorizer = CountVectorizer::new().with_ngram_range(1, 2);
/// let counts = vectorizer.fit_transform(&docs).unwrap();
/// assert_eq!(counts.n_rows(), 2);
/// // Unigrams and bigrams from both documents.
/// assert_eq!(counts.n_cols(), vectorizer.vocabulary_size());
/// ```
#[allow(missing_debug_implementations)]
pub struct CountVectorizer {
    tokenizer: Box<dyn Tokenizer>,
    ngram_range: (usize, usize),
    max_features: Option<usize>,
    vocabulary: HashMap<String, usize>,
    document_frequencies: Vec<usize>,
    n_documents: usize,
}

impl CountVectorizer {
    /// Create a unigram vectorizer with an unbounded vocabulary,
    /// tokenizing on whitespace.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tokenizer: Box::new(WhitespaceTokenizer::new()),
            ngram_range: (1, 1),
            max_features: None,
            vocabulary: HashMap::new(),
            document_frequencies: Vec::new(),
            n_documents: 0,
        }
    }

    /// Set the inclusive n-gram range. `(1, 2)` extracts unigrams and
    /// bigrams. Validated at fit time.
    #[must_use]
    pub fn with_ngram_range(mut self, min_n: usize, max_n: usize) -> Self {
        self.ngram_range = (min_n, max_n);
        self
    }

    /// Cap the vocabulary at the `max_features` terms with the highest
    /// document frequency.
    #[must_use]
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = Some(max_features);
        self
    }

    /// Replace the tokenizer.
    #[must_use]
    pub fn with_tokenizer(mut self, tokenizer: Box<dyn Tokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Learn the vocabulary from `documents`.
    ///
    /// Fitting again replaces the previous vocabulary entirely.
    ///
    /// # Errors
    ///
    /// Returns [`SentirError::EmptyVocabulary`] when no term survives
    /// tokenization, and [`SentirError::InvalidHyperparameter`] for a
    /// zero or inverted n-gram range.
    pub fn fit<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<()> {
        if documents.is_empty() {
            return Err(SentirError::empty_input("documents to fit"));
        }
        self.validate_ngram_range()?;

        let mut doc_freq: HashMap<String, usize> = HashMap::new();
        for doc in documents {
            let tokens = self.tokenizer.tokenize(doc.as_ref())?;
            let unique: HashSet<String> = self.ngrams(&tokens).into_iter().collect();
            for term in unique {
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }
        if doc_freq.is_empty() {
            return Err(SentirError::EmptyVocabulary);
        }

        // Highest document frequency first; alphabetical within a tie so
        // the cap cuts deterministically.
        let mut ranked: Vec<(String, usize)> = doc_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        if let Some(max_features) = self.max_features {
            ranked.truncate(max_features);
        }

        self.document_frequencies = ranked.iter().map(|(_, df)| *df).collect();
        self.vocabulary = ranked
            .into_iter()
            .enumerate()
            .map(|(idx, (term, _))| (term, idx))
            .collect();
        self.n_documents = documents.len();
        Ok(())
    }

    /// Map `documents` onto the fitted vocabulary as a count matrix of
    /// shape `n_documents` x `vocabulary_size`.
    ///
    /// # Errors
    ///
    /// Returns [`SentirError::NotFitted`] before [`CountVectorizer::fit`].
    pub fn transform<S: AsRef<str>>(&self, documents: &[S]) -> Result<Matrix<f32>> {
        if self.vocabulary.is_empty() {
            return Err(SentirError::not_fitted("CountVectorizer"));
        }
        let vocab_size = self.vocabulary.len();
        let mut data = vec![0.0; documents.len() * vocab_size];
        for (row, doc) in documents.iter().enumerate() {
            let tokens = self.tokenizer.tokenize(doc.as_ref())?;
            for term in self.ngrams(&tokens) {
                if let Some(&col) = self.vocabulary.get(&term) {
                    data[row * vocab_size + col] += 1.0;
                }
            }
        }
        Matrix::from_vec(documents.len(), vocab_size, data).map_err(SentirError::from)
    }

    /// Fit on `documents`, then transform the same documents.
    pub fn fit_transform<S: AsRef<str>>(&mut self, documents: &[S]) -> Result<Matrix<f32>> {
        self.fit(documents)?;
        self.transform(documents)
    }

    /// Learned term-to-column mapping. Empty before fit.
    #[must_use]
    pub fn vocabulary(&self) -> &HashMap<String, usize> {
        &self.vocabulary
    }

    /// Number of terms in the fitted vocabulary.
    #[must_use]
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Terms ordered by column index.
    #[must_use]
    pub fn feature_names(&self) -> Vec<&str> {
        let mut names: Vec<(&str, usize)> = self
            .vocabulary
            .iter()
            .map(|(term, &idx)| (term.as_str(), idx))
            .collect();
        names.sort_by_key(|&(_, idx)| idx);
        names.into_iter().map(|(term, _)| term).collect()
    }

    /// Per-column document frequencies from the fit corpus.
    #[must_use]
    pub fn document_frequencies(&self) -> &[usize] {
        &self.document_frequencies
    }

    /// Number of documents the vocabulary was fitted on.
    #[must_use]
    pub fn n_documents(&self) -> usize {
        self.n_documents
    }

    fn validate_ngram_range(&self) -> Result<()> {
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || max_n < min_n {
            return Err(SentirError::InvalidHyperparameter {
                param: "ngram_range".to_string(),
                value: format!("({min_n}, {max_n})"),
                constraint: "1 <= min_n <= max_n".to_string(),
            });
        }
        Ok(())
    }

    /// All n-grams of the configured sizes, joined with single spaces.
    fn ngrams(&self, tokens: &[String]) -> Vec<String> {
        let mut terms = Vec::new();
        for n in self.ngram_range.0..=self.ngram_range.1 {
            for window in tokens.windows(n) {
                terms.push(window.join(" "));
            }
        }
        terms
    }
}

impl Default for CountVectorizer {
    fn default() -> Self {
        Self::new()
    }
}
