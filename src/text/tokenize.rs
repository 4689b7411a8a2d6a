//! Tokenization of normalized statements.

use crate::error::Result;

/// Splits text into tokens.
pub trait Tokenizer {
    /// Tokenize the given text.
    fn tokenize(&self, text: &str) -> Result<Vec<String>>;
}

/// Splits on Unicode whitespace, collapsing runs of it.
///
/// Normalized statements only contain word characters and whitespace,
/// so this is the only tokenizer the pipeline needs. Empty input yields
/// an empty token list rather than an error.
///
/// # Examples
///
/// ```
/// use sentir::text::tokenize::{Tokenizer, WhitespaceTokenizer};
///
/// let tokens = WhitespaceTokenizer::new().tokenize("i cant  sleep").unwrap();
/// assert_eq!(tokens, vec!["i", "cant", "sleep"]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        Ok(text.split_whitespace().map(String::from).collect())
    }
}
