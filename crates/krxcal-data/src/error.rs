//! Error types for data loading.

use thiserror::Error;

/// A specialized Result type for data-loading operations.
pub type DataResult<T> = Result<T, DataError>;

/// Errors from loading holiday or trading-day data.
#[derive(Debug, Error)]
pub enum DataError {
    /// Underlying calendar/date error from the core library.
    #[error(transparent)]
    Core(#[from] krxcal_core::KrxcalError),

    /// File could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV file could not be parsed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON document could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Input parsed but failed a structural check.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use krxcal_core::KrxcalError;

    #[test]
    fn test_core_error_passes_through() {
        let core = KrxcalError::invalid_date("bad");
        let err: DataError = core.clone().into();
        assert_eq!(err.to_string(), core.to_string());
    }
}
