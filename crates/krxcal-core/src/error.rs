//! Error types for the krxcal library.
//!
//! This module defines the error types used throughout krxcal,
//! providing structured error handling with context.

use thiserror::Error;

use crate::types::Date;

/// A specialized Result type for krxcal operations.
pub type KrxcalResult<T> = Result<T, KrxcalError>;

/// The main error type for krxcal operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KrxcalError {
    /// Error in date parsing or invalid date components.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Requested range ends before it starts.
    #[error("Invalid range: end {end} is before start {start}")]
    InvalidRange {
        /// Start of the requested range.
        start: Date,
        /// End of the requested range.
        end: Date,
    },

    /// No valid expiration candidate found within the backward-shift bound.
    #[error(
        "Unresolved expiration for {year}-{month:02}: no trading day within {max_backshift} days before the nominal date"
    )]
    UnresolvedExpiration {
        /// Year of the unresolvable month.
        year: i32,
        /// Month of the unresolvable month (1-12).
        month: u32,
        /// Backward-shift bound that was exhausted.
        max_backshift: u32,
    },

    /// A trading day falls after the last known expiration date.
    #[error("No upcoming expiration for trading day {date} (last known expiry: {last_expiry:?})")]
    NoUpcomingExpiration {
        /// Trading day with no expiration at or after it.
        date: Date,
        /// Last expiration in the supplied series, if any.
        last_expiry: Option<Date>,
    },

    /// Calendar construction or data error.
    #[error("Calendar error: {reason}")]
    CalendarError {
        /// Description of the error.
        reason: String,
    },
}

impl KrxcalError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid range error.
    #[must_use]
    pub fn invalid_range(start: Date, end: Date) -> Self {
        Self::InvalidRange { start, end }
    }

    /// Creates a calendar error.
    #[must_use]
    pub fn calendar_error(reason: impl Into<String>) -> Self {
        Self::CalendarError {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = KrxcalError::invalid_date("2024-02-30 is not a valid date");
        assert!(err.to_string().contains("Invalid date"));
    }

    #[test]
    fn test_unresolved_expiration_display() {
        let err = KrxcalError::UnresolvedExpiration {
            year: 2025,
            month: 10,
            max_backshift: 3,
        };
        assert!(err.to_string().contains("2025-10"));
        assert!(err.to_string().contains('3'));
    }

    #[test]
    fn test_invalid_range_display() {
        let start = Date::from_ymd(2025, 6, 1).unwrap();
        let end = Date::from_ymd(2025, 5, 1).unwrap();
        let err = KrxcalError::invalid_range(start, end);
        assert!(err.to_string().contains("2025-05-01"));
        assert!(err.to_string().contains("2025-06-01"));
    }
}
