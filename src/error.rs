use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// AnalysisError – every failure the engine can report
// ---------------------------------------------------------------------------

/// Errors produced while loading a dataset, computing statistics or fitting
/// polynomials.
///
/// Loader variants are fatal for the file being processed, statistics
/// variants for that dataset's report, and regression variants only for the
/// degree that raised them. [`AnalysisError::CorrelationOutOfRange`] is a
/// warning: it is logged and listed in the report, never propagated with `?`.
#[derive(Error, Debug)]
pub enum AnalysisError {
    // Loader errors
    #[error("input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file type: {} (expected .csv, .tsv or .txt)", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("malformed table at line {line}: {reason}")]
    MalformedSchema { line: u64, reason: String },

    #[error("line {line}, column '{column}': '{value}' is not a finite number")]
    NonNumericValue {
        line: u64,
        column: String,
        value: String,
    },

    #[error("x has {x_len} values but y has {y_len}")]
    MismatchedLengths { x_len: usize, y_len: usize },

    // Statistics errors
    #[error("operation requires at least one value, got an empty sequence")]
    EmptyDataset,

    #[error("insufficient data: need at least {needed} points, found {found}")]
    InsufficientPoints { needed: usize, found: usize },

    // Regression errors
    #[error("degree {degree} fit is singular: {reason}")]
    SingularFit { degree: u8, reason: String },

    #[error("unsupported polynomial degree {0} (expected 1, 2 or 3)")]
    InvalidDegree(u8),

    // Warnings
    #[error("correlation {0} is outside [-1, 1]")]
    CorrelationOutOfRange(f64),
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;
