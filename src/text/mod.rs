//! Text preparation for statement classification.
//!
//! Raw statements pass through a fixed sequence before they reach a
//! classifier: normalization ([`TextNormalizer`]), whitespace
//! tokenization ([`WhitespaceTokenizer`]), suffix stripping
//! ([`PorterStemmer`]), and TF-IDF weighting ([`TfidfVectorizer`]).
//! Every stage is deterministic, so two runs over the same corpus
//! produce identical matrices.
//!
//! # Examples
//!
//! ```
//! use sentir::text::{PorterStemmer, Stemmer, TextNormalizer, Tokenizer, WhitespaceTokenizer};
//!
//! let normalizer = TextNormalizer::new();
//! let cleaned = normalizer.normalize("I can't sleep anymore @friend https://example.com");
//!
//! let tokens = WhitespaceTokenizer::new().tokenize(&cleaned).unwrap();
//! let stems = PorterStemmer::new().stem_tokens(&tokens).unwrap();
//! assert_eq!(stems.join(" "), "i cant sleep anymor");
//! ```

pub mod normalize;
pub mod sentence;
pub mod stem;
pub mod tokenize;
pub mod vectorize;

pub use normalize::TextNormalizer;
pub use sentence::SentenceSplitter;
pub use stem::{PorterStemmer, Stemmer};
pub use tokenize::{Tokenizer, WhitespaceTokenizer};
pub use vectorize::{CountVectorizer, TfidfVectorizer};
