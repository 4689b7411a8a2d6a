//! Summary command: inspect the corpus before training.
//!
//! # Usage
//!
//! ```bash
//! sentir summary data.csv
//! sentir summary data.csv --json
//! ```

use std::path::Path;

use sentir::data::Corpus;
use sentir::features::{TextStatsExtractor, TextStatsSummary};
use serde_json::json;

use crate::error::{CliError, Result};
use crate::output;

pub(crate) fn run(file: &Path, json: bool) -> Result<()> {
    if !file.exists() {
        return Err(CliError::FileNotFound(file.to_path_buf()));
    }

    let corpus = Corpus::from_csv_path(file)?;
    let counts = corpus.class_counts();
    let stats = TextStatsExtractor::new().extract_all(&corpus.statements());
    let summary = TextStatsSummary::from_stats(&stats);

    if json {
        let value = json!({
            "rows": corpus.len(),
            "skipped": corpus.n_skipped(),
            "missing_statement": corpus.n_missing_statement(),
            "missing_status": corpus.n_missing_status(),
            "classes": counts,
            "stats": summary,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    output::section("Corpus Summary");
    println!();
    output::kv("rows kept", corpus.len());
    output::kv("rows skipped", corpus.n_skipped());
    output::kv("missing statement", corpus.n_missing_statement());
    output::kv("missing status", corpus.n_missing_status());

    output::section("Classes");
    println!();
    let width = counts.keys().map(String::len).max().unwrap_or(0);
    for (name, count) in &counts {
        println!("  {name:<width$}  {count}");
    }

    if let Some(summary) = summary {
        output::section("Statement Stats");
        println!();
        output::kv("characters (min/mean/max)", format_range(
            summary.characters_min,
            summary.characters_mean,
            summary.characters_max,
        ));
        output::kv("sentences  (min/mean/max)", format_range(
            summary.sentences_min,
            summary.sentences_mean,
            summary.sentences_max,
        ));
    }

    Ok(())
}

fn format_range(min: usize, mean: f64, max: usize) -> String {
    format!("{min} / {mean:.1} / {max}")
}
