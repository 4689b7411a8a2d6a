//! sentir - statement classification CLI
//!
//! Usage:
//!   sentir evaluate data.csv              # Train and rank the candidate models
//!   sentir evaluate data.csv --seed 7     # Different split and balancing draws
//!   sentir evaluate data.csv --json       # Machine-readable report
//!   sentir summary data.csv               # Corpus overview without training
//!   sentir prepare "I can't sleep"        # Show the prepared form of a statement

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod commands;
mod error;
mod output;

use commands::{evaluate, prepare, summary};

/// sentir - mental-health statement classification
///
/// Load a labeled CSV of statements, prepare features, and compare
/// classical classifiers on a held-out split.
#[derive(Parser)]
#[command(name = "sentir")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Train every candidate model and print the ranked comparison
    Evaluate {
        /// Path to the labeled CSV file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Seed for the split shuffle and balancing draws
        #[arg(long, default_value = "101")]
        seed: u64,

        /// Fraction of rows held out for testing
        #[arg(long, default_value = "0.2")]
        test_size: f32,

        /// Vocabulary cap for the TF-IDF vectorizer
        #[arg(long, default_value = "50000")]
        max_features: usize,

        /// Keep the training split as loaded, without oversampling
        #[arg(long)]
        no_balance: bool,

        /// Train candidate models in parallel
        #[arg(long)]
        parallel: bool,

        /// Write the full report as JSON to a file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show corpus statistics without training anything
    Summary {
        /// Path to the labeled CSV file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Print the prepared form of a statement
    Prepare {
        /// Raw statement text
        #[arg(value_name = "TEXT")]
        text: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Evaluate {
            file,
            seed,
            test_size,
            max_features,
            no_balance,
            parallel,
            output,
        } => evaluate::run(
            &file,
            evaluate::Options {
                seed,
                test_size,
                max_features,
                no_balance,
                parallel,
            },
            output.as_deref(),
            cli.json,
        ),

        Commands::Summary { file } => summary::run(&file, cli.json),

        Commands::Prepare { text } => prepare::run(&text, cli.json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            e.exit_code()
        }
    }
}

/// Route library log events to stderr so stdout stays parseable.
fn init_logging(verbose: bool, quiet: bool) {
    let default = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
