//! Prepare command: show what the feature pipeline sees.
//!
//! # Usage
//!
//! ```bash
//! sentir prepare "I couldn't sleep at ALL last night :("
//! ```

use sentir::features::TextStatsExtractor;
use sentir::text::{PorterStemmer, Stemmer, TextNormalizer, Tokenizer, WhitespaceTokenizer};
use serde_json::json;

use crate::error::Result;
use crate::output;

pub(crate) fn run(text: &str, json: bool) -> Result<()> {
    let cleaned = TextNormalizer::new().normalize(text);
    let tokens = WhitespaceTokenizer::new().tokenize(&cleaned)?;
    let stems = PorterStemmer::new().stem_tokens(&tokens)?;
    let prepared = stems.join(" ");
    let stats = TextStatsExtractor::new().extract(text);

    if json {
        let value = json!({
            "normalized": cleaned,
            "prepared": prepared,
            "num_characters": stats.num_characters,
            "num_sentences": stats.num_sentences,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    output::section("Prepared Statement");
    println!();
    output::kv("normalized", &cleaned);
    output::kv("prepared", &prepared);
    output::kv("characters", stats.num_characters);
    output::kv("sentences", stats.num_sentences);

    Ok(())
}
