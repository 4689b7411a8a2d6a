//! Evaluate command: run the full pipeline and print the comparison.
//!
//! # Usage
//!
//! ```bash
//! sentir evaluate data.csv                   # Ranked four-model comparison
//! sentir evaluate data.csv --seed 7          # Different split
//! sentir evaluate data.csv --no-balance      # Skip oversampling
//! sentir evaluate data.csv -o report.json    # Keep the full report
//! ```

use std::fs;
use std::path::Path;

use sentir::pipeline::{Pipeline, PipelineConfig};
use sentir::preprocessing::SamplingStrategy;

use crate::error::{CliError, Result};
use crate::output;

/// Flag bundle for one evaluation run.
pub(crate) struct Options {
    pub seed: u64,
    pub test_size: f32,
    pub max_features: usize,
    pub no_balance: bool,
    pub parallel: bool,
}

pub(crate) fn run(
    file: &Path,
    options: Options,
    output_path: Option<&Path>,
    json: bool,
) -> Result<()> {
    if !file.exists() {
        return Err(CliError::FileNotFound(file.to_path_buf()));
    }

    let config = PipelineConfig {
        random_state: options.seed,
        test_size: options.test_size,
        max_features: options.max_features,
        sampling: if options.no_balance {
            SamplingStrategy::None
        } else {
            SamplingStrategy::RandomOversample
        },
        parallel: options.parallel,
        ..PipelineConfig::default()
    };

    let report = Pipeline::new(config).run_csv(file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        output::section("Model Comparison");
        println!();
        println!("{report}");
    }

    if let Some(path) = output_path {
        fs::write(path, serde_json::to_string_pretty(&report)?)?;
        if !json {
            output::kv("report written", path.display());
        }
    }

    Ok(())
}
