//! Error types for sentir-cli.

use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Result type alias for CLI operations
pub(crate) type Result<T> = std::result::Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug)]
pub(crate) enum CliError {
    /// File not found
    #[error("file not found: {0}")]
    FileNotFound(PathBuf),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Report serialization failed
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Library error
    #[error("{0}")]
    Sentir(String),
}

impl CliError {
    /// Exit code for this error
    pub(crate) fn exit_code(&self) -> ExitCode {
        match self {
            Self::FileNotFound(_) => ExitCode::from(3),
            Self::Serialize(_) => ExitCode::from(4),
            Self::Io(_) => ExitCode::from(7),
            Self::Sentir(_) => ExitCode::from(1),
        }
    }
}

impl From<sentir::SentirError> for CliError {
    fn from(e: sentir::SentirError) -> Self {
        Self::Sentir(e.to_string())
    }
}
