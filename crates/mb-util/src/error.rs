//! Error types for the utility crate.

use std::io;

use thiserror::Error;

/// Raised when a trace line is neither a structured entry nor a string in the
/// `path:line:in 'label'` shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed trace entry {input:?}: expected `path:line:in 'label'`")]
pub struct TraceFormatError {
    /// The text that failed to parse.
    pub input: String,
}

impl TraceFormatError {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

/// Errors that can occur while formatting or writing output.
#[derive(Debug, Error)]
pub enum UtilError {
    /// A trace line could not be parsed.
    #[error(transparent)]
    TraceFormat(#[from] TraceFormatError),

    /// An exclude pattern was not a valid regular expression.
    #[error("invalid exclude pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// Writing to an output sink failed.
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

/// Result type for utility operations.
pub type Result<T> = std::result::Result<T, UtilError>;
