//! Statement normalization ahead of tokenization.
//!
//! Social-media text carries URLs, markdown links, @handles, and
//! punctuation that carry no signal for category prediction. The
//! normalizer strips all of them in a fixed order so the tokenizer only
//! ever sees lowercase words separated by whitespace.

use regex::Regex;

/// Cleans raw statements into lowercase word-and-whitespace text.
///
/// The stages run in a fixed order: lowercase, URL removal, markdown
/// link removal, @handle removal, punctuation removal, trim. Order
/// matters: handles must go before punctuation or the bare `@` would be
/// stripped first and the username would survive as an ordinary token.
///
/// # Examples
///
/// ```
/// use sentir::text::TextNormalizer;
///
/// let normalizer = TextNormalizer::new();
/// assert_eq!(
///     normalizer.normalize("@someone I can't cope https://example.com"),
///     "i cant cope"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    url: Regex,
    markdown_link: Regex,
    handle: Regex,
    non_word: Regex,
}

impl TextNormalizer {
    /// Create a normalizer with the default removal patterns.
    ///
    /// # Panics
    ///
    /// Panics if the built-in patterns fail to compile, which cannot
    /// happen for these literals.
    #[must_use]
    pub fn new() -> Self {
        Self {
            url: Regex::new(r"https?://\S+").expect("URL pattern is a valid regex"),
            markdown_link: Regex::new(r"\[.*?\]\(.*?\)")
                .expect("markdown link pattern is a valid regex"),
            handle: Regex::new(r"@\w+").expect("handle pattern is a valid regex"),
            non_word: Regex::new(r"[^\w\s]").expect("punctuation pattern is a valid regex"),
        }
    }

    /// Normalize one raw statement.
    ///
    /// The result contains only word characters and whitespace, with no
    /// leading or trailing whitespace. Normalizing an already-normalized
    /// string returns it unchanged.
    #[must_use]
    pub fn normalize(&self, raw: &str) -> String {
        let lowered = raw.to_lowercase();
        let no_urls = self.url.replace_all(&lowered, "");
        let no_links = self.markdown_link.replace_all(&no_urls, "");
        let no_handles = self.handle.replace_all(&no_links, "");
        let words_only = self.non_word.replace_all(&no_handles, "");
        words_only.trim().to_string()
    }

    /// Normalize a batch of statements, preserving order.
    #[must_use]
    pub fn normalize_all<S: AsRef<str>>(&self, raws: &[S]) -> Vec<String> {
        raws.iter().map(|r| self.normalize(r.as_ref())).collect()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_everything() {
        let n = TextNormalizer::new();
        assert_eq!(n.normalize("I Feel FINE"), "i feel fine");
    }

    #[test]
    fn test_removes_urls() {
        let n = TextNormalizer::new();
        assert_eq!(n.normalize("read this http://a.io/p?q=1 later"), "read this  later");
        assert_eq!(n.normalize("HTTPS://EXAMPLE.COM/path"), "");
    }

    #[test]
    fn test_removes_markdown_links() {
        let n = TextNormalizer::new();
        assert_eq!(n.normalize("see [my post](somewhere) ok"), "see  ok");
    }

    #[test]
    fn test_removes_handles() {
        let n = TextNormalizer::new();
        assert_eq!(n.normalize("thanks @dr_smith for listening"), "thanks  for listening");
    }

    #[test]
    fn test_strips_punctuation_keeps_underscore() {
        let n = TextNormalizer::new();
        assert_eq!(n.normalize("can't stop... why?!"), "cant stop why");
        assert_eq!(n.normalize("snake_case stays"), "snake_case stays");
    }

    #[test]
    fn test_output_is_word_characters_and_whitespace_only() {
        let n = TextNormalizer::new();
        let cleaned = n.normalize("It's 2 a.m. & I can't stop: crying... 50% done?!");
        assert!(!cleaned.is_empty());
        assert!(cleaned
            .chars()
            .all(|c| c.is_alphanumeric() || c.is_whitespace() || c == '_'));
    }

    #[test]
    fn test_trims_edges() {
        let n = TextNormalizer::new();
        assert_eq!(n.normalize("  hello  "), "hello");
    }

    #[test]
    fn test_empty_and_symbol_only_input() {
        let n = TextNormalizer::new();
        assert_eq!(n.normalize(""), "");
        assert_eq!(n.normalize("!!! ... ???"), "");
    }

    #[test]
    fn test_interior_whitespace_survives() {
        // Collapsing runs is the tokenizer's job, not the normalizer's.
        let n = TextNormalizer::new();
        assert_eq!(n.normalize("a!  b"), "a  b");
    }

    #[test]
    fn test_idempotent_on_normalized_text() {
        let n = TextNormalizer::new();
        let once = n.normalize("I'm SO tired of this... @world http://x.io");
        assert_eq!(n.normalize(&once), once);
    }

    #[test]
    fn test_normalize_all_preserves_order() {
        let n = TextNormalizer::new();
        let out = n.normalize_all(&["First!", "Second?"]);
        assert_eq!(out, vec!["first", "second"]);
    }
}
