//! Error types for sentir operations.
//!
//! One crate-wide enum covers data-integrity problems, pipeline invariant
//! violations, and wrapped I/O or serialization failures.

use std::fmt;

/// Main error type for sentir operations.
///
/// # Examples
///
/// ```
/// use sentir::error::SentirError;
///
/// let err = SentirError::UnseenLabel {
///     label: "Euphoria".to_string(),
/// };
/// assert!(err.to_string().contains("Euphoria"));
/// ```
#[derive(Debug)]
pub enum SentirError {
    /// Matrix/vector dimensions don't match for the operation.
    DimensionMismatch {
        /// Expected dimensions description
        expected: String,
        /// Actual dimensions found
        actual: String,
    },

    /// Row counts between a feature source and its labels (or between
    /// two fused sources) diverged. Indicates a pipeline bug, not bad data.
    RowCountMismatch {
        /// What is being aligned (e.g. "features vs labels")
        context: String,
        /// Row count on the left side
        left: usize,
        /// Row count on the right side
        right: usize,
    },

    /// A required input column is absent from the dataset.
    MissingColumn {
        /// Column name
        column: String,
    },

    /// Label was not present when the codec was fitted.
    UnseenLabel {
        /// The offending label or code
        label: String,
    },

    /// Training corpus reduced to zero terms after cleaning; nothing to
    /// vectorize.
    EmptyVocabulary,

    /// Invalid hyperparameter value provided.
    InvalidHyperparameter {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// A transform/predict call arrived before fit.
    NotFitted {
        /// Component that was not fitted
        what: String,
    },

    /// I/O error (file not found, permission denied, etc.).
    Io(std::io::Error),

    /// CSV parsing error.
    Csv(csv::Error),

    /// Serialization/deserialization error.
    Serialization(String),

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for SentirError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SentirError::DimensionMismatch { expected, actual } => {
                write!(f, "dimension mismatch: expected {expected}, got {actual}")
            }
            SentirError::RowCountMismatch {
                context,
                left,
                right,
            } => {
                write!(f, "row count mismatch ({context}): {left} vs {right}")
            }
            SentirError::MissingColumn { column } => {
                write!(f, "required column '{column}' not found in input")
            }
            SentirError::UnseenLabel { label } => {
                write!(f, "label '{label}' was not present at fit time")
            }
            SentirError::EmptyVocabulary => {
                write!(
                    f,
                    "vocabulary is empty: no terms survived cleaning in the training corpus"
                )
            }
            SentirError::InvalidHyperparameter {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "invalid hyperparameter: {param} = {value}, expected {constraint}"
                )
            }
            SentirError::NotFitted { what } => {
                write!(f, "{what} is not fitted; call fit() first")
            }
            SentirError::Io(e) => write!(f, "I/O error: {e}"),
            SentirError::Csv(e) => write!(f, "CSV error: {e}"),
            SentirError::Serialization(msg) => write!(f, "serialization error: {msg}"),
            SentirError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for SentirError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SentirError::Io(e) => Some(e),
            SentirError::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SentirError {
    fn from(err: std::io::Error) -> Self {
        SentirError::Io(err)
    }
}

impl From<csv::Error> for SentirError {
    fn from(err: csv::Error) -> Self {
        SentirError::Csv(err)
    }
}

impl From<serde_json::Error> for SentirError {
    fn from(err: serde_json::Error) -> Self {
        SentirError::Serialization(err.to_string())
    }
}

impl From<&str> for SentirError {
    fn from(msg: &str) -> Self {
        SentirError::Other(msg.to_string())
    }
}

impl From<String> for SentirError {
    fn from(msg: String) -> Self {
        SentirError::Other(msg)
    }
}

impl SentirError {
    /// Create a row alignment error with descriptive context.
    #[must_use]
    pub fn row_mismatch(context: &str, left: usize, right: usize) -> Self {
        Self::RowCountMismatch {
            context: context.to_string(),
            left,
            right,
        }
    }

    /// Create a not-fitted error for the named component.
    #[must_use]
    pub fn not_fitted(what: &str) -> Self {
        Self::NotFitted {
            what: what.to_string(),
        }
    }

    /// Create an empty input error.
    #[must_use]
    pub fn empty_input(context: &str) -> Self {
        Self::Other(format!("empty input: {context}"))
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, SentirError>;
