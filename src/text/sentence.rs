//! Sentence boundary detection for the scalar statement features.
//!
//! Statements in this corpus are informal and often unpunctuated, so
//! the splitter is deliberately forgiving: a run of `.`, `!`, or `?`
//! followed by whitespace (or the end of the text) closes a sentence,
//! a known abbreviation does not, and any trailing text without a
//! terminator still counts as a sentence.

use crate::error::Result;
use crate::text::tokenize::Tokenizer;

/// Abbreviations whose trailing period does not end a sentence.
const DEFAULT_ABBREVIATIONS: &[&str] = &[
    "mr.", "mrs.", "ms.", "dr.", "prof.", "sr.", "jr.", "st.", "vs.", "etc.", "e.g.", "i.e.",
];

/// Splits text into sentences on terminal punctuation runs.
///
/// # Examples
///
/// ```
/// use sentir::text::SentenceSplitter;
///
/// let splitter = SentenceSplitter::new();
/// assert_eq!(splitter.count("I give up. No point anymore."), 2);
/// assert_eq!(splitter.count("Dr. Smith helped me."), 1);
/// assert_eq!(splitter.count(""), 0);
/// ```
#[derive(Debug, Clone)]
pub struct SentenceSplitter {
    abbreviations: Vec<&'static str>,
}

impl SentenceSplitter {
    /// Create a splitter with the default abbreviation list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            abbreviations: DEFAULT_ABBREVIATIONS.to_vec(),
        }
    }

    /// Replace the abbreviation list. Entries must be lowercase and
    /// include their trailing period.
    #[must_use]
    pub fn with_abbreviations(mut self, abbreviations: &[&'static str]) -> Self {
        self.abbreviations = abbreviations.to_vec();
        self
    }

    /// Split `text` into trimmed sentences.
    ///
    /// Empty or whitespace-only input yields no sentences. Trailing
    /// text without a terminator is returned as a final sentence.
    #[must_use]
    pub fn split(&self, text: &str) -> Vec<String> {
        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut i = 0;
        while i < chars.len() {
            if !is_terminator(chars[i].1) {
                i += 1;
                continue;
            }
            // Swallow the whole punctuation run ("!!!", "...").
            let mut j = i;
            while j + 1 < chars.len() && is_terminator(chars[j + 1].1) {
                j += 1;
            }
            let end = chars[j].0 + chars[j].1.len_utf8();
            let at_end = j + 1 == chars.len();
            let before_space = !at_end && chars[j + 1].1.is_whitespace();
            let single_period = i == j && chars[i].1 == '.';
            if (at_end || before_space)
                && !(single_period && self.ends_with_abbreviation(&text[start..end]))
            {
                let sentence = text[start..end].trim();
                if !sentence.is_empty() {
                    sentences.push(sentence.to_string());
                }
                start = end;
            }
            i = j + 1;
        }
        let tail = text[start..].trim();
        if !tail.is_empty() {
            sentences.push(tail.to_string());
        }
        sentences
    }

    /// Number of sentences in `text`. Zero for empty input.
    #[must_use]
    pub fn count(&self, text: &str) -> usize {
        self.split(text).len()
    }

    fn ends_with_abbreviation(&self, segment: &str) -> bool {
        segment
            .split_whitespace()
            .last()
            .is_some_and(|word| self.abbreviations.contains(&word.to_lowercase().as_str()))
    }
}

impl Default for SentenceSplitter {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for SentenceSplitter {
    fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        Ok(self.split(text))
    }
}

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}
