//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date: {0}. Use YYYY-MM-DD.")]
    InvalidDate(String),

    /// Invalid override specification.
    #[error("Invalid override: {0}. Use YYYY-MM=YYYY-MM-DD.")]
    InvalidOverride(String),

    /// Invalid month range.
    #[error("Invalid month: {0}. Must be between 1 and 12.")]
    InvalidMonth(u32),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
