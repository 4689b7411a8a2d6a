//! End-to-end run: corpus in, ranked model reports out.
//!
//! The pipeline wires the stages together in a fixed order: encode
//! labels over the full corpus, split row indices, prepare statement
//! text, fit the TF-IDF vectorizer on the training rows only, fuse in
//! the scalar features, rebalance the training split, and hand both
//! splits to the evaluation suite. Splitting happens before any
//! fitting, so nothing learned from held-out rows can leak into the
//! vocabulary or the document frequencies.
//!
//! # Example
//!
//! ```
//! use sentir::data::Corpus;
//! use sentir::evaluate::{EvaluationSuite, ModelConfig};
//! use sentir::pipeline::{Pipeline, PipelineConfig};
//!
//! let csv = "\
//! ,statement,status
//! 0,calm peaceful morning by the lake,Calm
//! 1,feeling calm and peaceful today,Calm
//! 2,so calm just peaceful breathing,Calm
//! 3,a calm peaceful walk outside,Calm
//! 4,worry keeps me awake with panic,Worry
//! 5,constant worry and panic again,Worry
//! 6,the panic and worry will not stop,Worry
//! 7,exhausted and tired beyond words,Tired
//! 8,always tired and exhausted lately,Tired
//! 9,too tired to move exhausted again,Tired
//! ";
//! let corpus = Corpus::from_reader(csv.as_bytes()).unwrap();
//!
//! let mut suite = EvaluationSuite::new();
//! suite.add_model(ModelConfig::BernoulliNb { alpha: 0.1, binarize: 0.0 });
//!
//! let report = Pipeline::new(PipelineConfig::default())
//!     .with_suite(suite)
//!     .run(&corpus)
//!     .unwrap();
//! assert_eq!(report.evaluation.reports.len(), 1);
//! assert_eq!(report.n_test, 2);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::data::Corpus;
use crate::error::{Result, SentirError};
use crate::evaluate::{Evaluation, EvaluationSuite};
use crate::features::{hstack, TextStatsExtractor, TextStatsSummary};
use crate::model_selection::train_test_split_indices;
use crate::preprocessing::{LabelEncoder, RandomOverSampler, SamplingStrategy};
use crate::text::{
    PorterStemmer, Stemmer, TextNormalizer, TfidfVectorizer, Tokenizer, WhitespaceTokenizer,
};

/// Knobs for one pipeline run.
///
/// One seed drives both the split shuffle and the oversampler draws,
/// so a config value pins the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Seed for the split shuffle and the balancing draws.
    pub random_state: u64,
    /// Fraction of rows held out for testing, in `(0, 1)`.
    pub test_size: f32,
    /// Vocabulary cap for the TF-IDF vectorizer.
    pub max_features: usize,
    /// Inclusive n-gram range for the vectorizer.
    pub ngram_range: (usize, usize),
    /// How the training split is rebalanced before fitting.
    pub sampling: SamplingStrategy,
    /// Evaluate candidate models across a thread pool.
    ///
    /// Applied to the suite at run time; has no effect when the
    /// `parallel` feature is disabled.
    pub parallel: bool,
}

impl PipelineConfig {
    /// Change the seed.
    #[must_use]
    pub fn with_random_state(mut self, random_state: u64) -> Self {
        self.random_state = random_state;
        self
    }

    /// Change the held-out fraction.
    #[must_use]
    pub fn with_test_size(mut self, test_size: f32) -> Self {
        self.test_size = test_size;
        self
    }

    /// Change the vocabulary cap.
    #[must_use]
    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.max_features = max_features;
        self
    }

    /// Change the n-gram range.
    #[must_use]
    pub fn with_ngram_range(mut self, min_n: usize, max_n: usize) -> Self {
        self.ngram_range = (min_n, max_n);
        self
    }

    /// Change the balancing strategy.
    #[must_use]
    pub fn with_sampling(mut self, sampling: SamplingStrategy) -> Self {
        self.sampling = sampling;
        self
    }

    /// Toggle parallel model evaluation.
    #[must_use]
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            random_state: 101,
            test_size: 0.2,
            max_features: 50_000,
            ngram_range: (1, 2),
            sampling: SamplingStrategy::RandomOversample,
            parallel: false,
        }
    }
}

/// Runs the full preparation and evaluation sequence over a corpus.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    suite: EvaluationSuite,
}

impl Pipeline {
    /// Creates a pipeline with the standard four-model suite.
    #[must_use]
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            suite: EvaluationSuite::standard(),
        }
    }

    /// Replaces the evaluation suite.
    #[must_use]
    pub fn with_suite(mut self, suite: EvaluationSuite) -> Self {
        self.suite = suite;
        self
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Loads a CSV file and runs the pipeline over it.
    ///
    /// # Errors
    ///
    /// Propagates load errors from [`Corpus::from_csv_path`] plus
    /// everything [`Pipeline::run`] can return.
    pub fn run_csv<P: AsRef<Path>>(&self, path: P) -> Result<RunReport> {
        let corpus = Corpus::from_csv_path(path)?;
        self.run(&corpus)
    }

    /// Runs the pipeline over an already-loaded corpus.
    ///
    /// # Errors
    ///
    /// Returns an error when the corpus is empty, when the configured
    /// `test_size` cannot produce two non-empty splits, when the
    /// training rows yield no vocabulary, or when any candidate model
    /// fails to fit.
    pub fn run(&self, corpus: &Corpus) -> Result<RunReport> {
        if corpus.is_empty() {
            return Err(SentirError::empty_input("corpus has no usable rows"));
        }

        let statements = corpus.statements();
        let labels = corpus.labels();

        // The encoder sees every label before the split, so a rare
        // class landing only in the test rows still has a code.
        let mut encoder = LabelEncoder::new();
        let codes = encoder.fit_transform(&labels)?;

        let (train_idx, test_idx) = train_test_split_indices(
            codes.len(),
            self.config.test_size,
            Some(self.config.random_state),
        )?;

        let prepared = prepare_statements(&statements)?;
        debug!(documents = prepared.len(), "prepared statements");
        let train_docs = select(&prepared, &train_idx);
        let test_docs = select(&prepared, &test_idx);

        let (min_n, max_n) = self.config.ngram_range;
        let mut vectorizer = TfidfVectorizer::new()
            .with_ngram_range(min_n, max_n)
            .with_max_features(self.config.max_features);
        vectorizer.fit(&train_docs)?;
        let terms_train = vectorizer.transform(&train_docs)?;
        let terms_test = vectorizer.transform(&test_docs)?;

        // Scalar features come from the raw statements, before any
        // normalization touched them.
        let stats = TextStatsExtractor::new().extract_all(&statements);
        let stats_summary = TextStatsSummary::from_stats(&stats)
            .ok_or_else(|| SentirError::empty_input("corpus has no usable rows"))?;
        let stats_matrix = TextStatsExtractor::to_matrix(&stats);
        let stats_train = stats_matrix.take_rows(&train_idx);
        let stats_test = stats_matrix.take_rows(&test_idx);

        let x_train = hstack(&[&terms_train, &stats_train])?;
        let x_test = hstack(&[&terms_test, &stats_test])?;
        let y_train: Vec<usize> = train_idx.iter().map(|&i| codes[i]).collect();
        let y_test: Vec<usize> = test_idx.iter().map(|&i| codes[i]).collect();

        info!(
            train_rows = x_train.n_rows(),
            test_rows = x_test.n_rows(),
            features = x_train.n_cols(),
            "feature matrices built"
        );

        let n_train = y_train.len();
        let (x_train, y_train) = match self.config.sampling {
            SamplingStrategy::None => (x_train, y_train),
            SamplingStrategy::RandomOversample => {
                let sampler =
                    RandomOverSampler::new().with_random_state(self.config.random_state);
                let (x_balanced, y_balanced) = sampler.fit_resample(&x_train, &y_train)?;
                info!(
                    before = n_train,
                    after = y_balanced.len(),
                    "balanced training split"
                );
                (x_balanced, y_balanced)
            }
        };

        let n_features = x_train.n_cols();
        let n_train_balanced = y_train.len();
        let suite = self.suite.clone().with_parallel(self.config.parallel);
        let evaluation = suite.run(&x_train, &y_train, &x_test, &y_test, encoder.classes())?;

        Ok(RunReport {
            config: self.config,
            n_rows: corpus.len(),
            n_skipped: corpus.n_skipped(),
            class_counts: corpus.class_counts(),
            classes: encoder.classes().to_vec(),
            stats_summary,
            n_train,
            n_train_balanced,
            n_test: y_test.len(),
            n_features,
            evaluation,
        })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

/// Everything one run produced: data bookkeeping plus the evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Configuration the run used
    pub config: PipelineConfig,
    /// Rows kept from the corpus
    pub n_rows: usize,
    /// Rows dropped for missing fields
    pub n_skipped: usize,
    /// Kept rows per category name
    pub class_counts: BTreeMap<String, usize>,
    /// Category names in code order
    pub classes: Vec<String>,
    /// Scalar feature ranges across the corpus
    pub stats_summary: TextStatsSummary,
    /// Training rows before balancing
    pub n_train: usize,
    /// Training rows after balancing
    pub n_train_balanced: usize,
    /// Held-out test rows
    pub n_test: usize,
    /// Fused feature width (terms plus scalars)
    pub n_features: usize,
    /// Per-model results
    pub evaluation: Evaluation,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "rows kept: {}  skipped: {}", self.n_rows, self.n_skipped)?;
        let counts: Vec<String> = self
            .class_counts
            .iter()
            .map(|(name, count)| format!("{name} ({count})"))
            .collect();
        writeln!(f, "classes: {}", counts.join(", "))?;
        writeln!(f, "{}", self.stats_summary)?;
        if self.n_train_balanced == self.n_train {
            writeln!(
                f,
                "train rows: {}  test rows: {}  features: {}",
                self.n_train, self.n_test, self.n_features
            )?;
        } else {
            writeln!(
                f,
                "train rows: {} (balanced to {})  test rows: {}  features: {}",
                self.n_train, self.n_train_balanced, self.n_test, self.n_features
            )?;
        }
        writeln!(f)?;
        write!(f, "{}", self.evaluation)?;
        for report in self.evaluation.ranked() {
            writeln!(f)?;
            writeln!(f)?;
            write!(f, "{report}")?;
        }
        Ok(())
    }
}

/// Normalize, tokenize, stem, and rejoin each statement.
fn prepare_statements(statements: &[&str]) -> Result<Vec<String>> {
    let normalizer = TextNormalizer::new();
    let tokenizer = WhitespaceTokenizer::new();
    let stemmer = PorterStemmer::new();

    statements
        .iter()
        .map(|raw| {
            let cleaned = normalizer.normalize(raw);
            let tokens = tokenizer.tokenize(&cleaned)?;
            let stems = stemmer.stem_tokens(&tokens)?;
            Ok(stems.join(" "))
        })
        .collect()
}

/// Rows of `items` at `indices`, in index order.
fn select<'a>(items: &'a [String], indices: &[usize]) -> Vec<&'a str> {
    indices.iter().map(|&i| items[i].as_str()).collect()
}
