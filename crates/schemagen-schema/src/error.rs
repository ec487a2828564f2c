//! Error types for schema readers

use thiserror::Error;

/// Result type alias for schema parsing
pub type ParseResult<T> = Result<T, ParseError>;

/// A schema source that does not conform to the expected grammar
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{line}:{column}: {message}")]
pub struct ParseError {
    /// 1-based line of the offending token
    pub line: usize,
    /// 1-based column of the offending token
    pub column: usize,
    /// What went wrong
    pub message: String,
}

impl ParseError {
    pub fn new(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            column,
            message: message.into(),
        }
    }
}
