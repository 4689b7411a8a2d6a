//! Per-statement scalar features.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::primitives::Matrix;
use crate::text::SentenceSplitter;

/// Scalar features measured on one raw statement.
///
/// Both values are computed on the statement as it arrived, before any
/// normalization, so punctuation and casing still count toward length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStats {
    /// Unicode character count of the raw statement.
    pub num_characters: usize,
    /// Sentence count of the raw statement. Zero for empty text.
    pub num_sentences: usize,
}

impl TextStats {
    /// The stats as a fixed-order feature row: characters, sentences.
    #[must_use]
    pub fn to_row(self) -> [f32; 2] {
        [self.num_characters as f32, self.num_sentences as f32]
    }

    /// Number of scalar features per statement.
    pub const WIDTH: usize = 2;
}

/// Computes [`TextStats`] for raw statements.
///
/// # Examples
///
/// ```
/// use sentir::features::TextStatsExtractor;
///
/// let extractor = TextStatsExtractor::new();
/// let stats = extractor.extract("I can't sleep. I'm exhausted.");
/// assert_eq!(stats.num_characters, 29);
/// assert_eq!(stats.num_sentences, 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TextStatsExtractor {
    splitter: SentenceSplitter,
}

impl TextStatsExtractor {
    /// Create an extractor with the default sentence splitter.
    #[must_use]
    pub fn new() -> Self {
        Self {
            splitter: SentenceSplitter::new(),
        }
    }

    /// Use a custom sentence splitter.
    #[must_use]
    pub fn with_splitter(mut self, splitter: SentenceSplitter) -> Self {
        self.splitter = splitter;
        self
    }

    /// Measure one raw statement.
    #[must_use]
    pub fn extract(&self, raw: &str) -> TextStats {
        TextStats {
            num_characters: raw.chars().count(),
            num_sentences: self.splitter.count(raw),
        }
    }

    /// Measure a batch of raw statements, preserving order.
    #[must_use]
    pub fn extract_all<S: AsRef<str>>(&self, raws: &[S]) -> Vec<TextStats> {
        raws.iter().map(|r| self.extract(r.as_ref())).collect()
    }

    /// Stack stats into an `n x 2` matrix, row `i` belonging to
    /// statement `i`.
    #[must_use]
    pub fn to_matrix(stats: &[TextStats]) -> Matrix<f32> {
        let mut data = Vec::with_capacity(stats.len() * TextStats::WIDTH);
        for s in stats {
            data.extend_from_slice(&s.to_row());
        }
        Matrix::from_vec(stats.len(), TextStats::WIDTH, data)
            .expect("stats rows have fixed width")
    }
}

/// Distribution summary of the scalar features across a corpus.
///
/// The quick look a run takes at the feature ranges before modeling:
/// minimum, mean, and maximum of each scalar column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStatsSummary {
    /// Fewest characters in any statement.
    pub characters_min: usize,
    /// Mean character count.
    pub characters_mean: f64,
    /// Most characters in any statement.
    pub characters_max: usize,
    /// Fewest sentences in any statement.
    pub sentences_min: usize,
    /// Mean sentence count.
    pub sentences_mean: f64,
    /// Most sentences in any statement.
    pub sentences_max: usize,
}

impl TextStatsSummary {
    /// Summarize a batch of per-statement stats.
    ///
    /// Returns `None` for an empty batch: there is no distribution to
    /// describe.
    #[must_use]
    pub fn from_stats(stats: &[TextStats]) -> Option<Self> {
        let first = stats.first()?;
        let mut summary = Self {
            characters_min: first.num_characters,
            characters_mean: 0.0,
            characters_max: first.num_characters,
            sentences_min: first.num_sentences,
            sentences_mean: 0.0,
            sentences_max: first.num_sentences,
        };
        for s in stats {
            summary.characters_min = summary.characters_min.min(s.num_characters);
            summary.characters_max = summary.characters_max.max(s.num_characters);
            summary.characters_mean += s.num_characters as f64;
            summary.sentences_min = summary.sentences_min.min(s.num_sentences);
            summary.sentences_max = summary.sentences_max.max(s.num_sentences);
            summary.sentences_mean += s.num_sentences as f64;
        }
        let n = stats.len() as f64;
        summary.characters_mean /= n;
        summary.sentences_mean /= n;
        Some(summary)
    }
}

impl fmt::Display for TextStatsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "characters min/mean/max: {} / {:.1} / {}  sentences min/mean/max: {} / {:.1} / {}",
            self.characters_min,
            self.characters_mean,
            self.characters_max,
            self.sentences_min,
            self.sentences_mean,
            self.sentences_max
        )
    }
}
