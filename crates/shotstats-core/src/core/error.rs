//! shotstats Error Definitions
//!
//! Defines error types used throughout the project.

use thiserror::Error;

/// Core engine error types
#[derive(Error, Debug)]
pub enum CoreError {
    // =========================================================================
    // Timecode Errors
    // =========================================================================
    #[error("Invalid timecode: {0}")]
    InvalidTimecode(String),

    #[error("Invalid frame rate: {0} (must be positive)")]
    InvalidFrameRate(u32),

    // =========================================================================
    // Loader Errors
    // =========================================================================
    #[error("Missing column: {0}")]
    MissingColumn(String),

    #[error("Malformed row at line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },

    #[error("Line {line}: {source}")]
    Row {
        line: usize,
        #[source]
        source: Box<CoreError>,
    },

    #[error("File not found: {0}")]
    FileNotFound(String),

    // =========================================================================
    // Analysis Errors
    // =========================================================================
    #[error("Insufficient data for {context}: need at least {required} value(s), got {actual}")]
    InsufficientData {
        context: String,
        required: usize,
        actual: usize,
    },

    // =========================================================================
    // General Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Core engine result type
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Shorthand for an [`CoreError::InsufficientData`] error
    pub fn insufficient(context: impl Into<String>, required: usize, actual: usize) -> Self {
        Self::InsufficientData {
            context: context.into(),
            required,
            actual,
        }
    }

    /// Attaches a 1-based source line number to an error raised while reading a row
    pub fn at_line(self, line: usize) -> Self {
        match self {
            err @ (Self::MalformedRow { .. } | Self::Row { .. }) => err,
            other => Self::Row {
                line,
                source: Box::new(other),
            },
        }
    }
}
