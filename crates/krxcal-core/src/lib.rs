//! # krxcal Core
//!
//! Core types and calendar logic for the krxcal trading-calendar library.
//!
//! This crate derives the KRX trading-day calendar and monthly
//! options-expiration schedule from holiday lists and weekday rules:
//!
//! - **Types**: the [`types::Date`] calendar date
//! - **Calendars**: the [`calendars::Calendar`] trait, holiday storage, and
//!   the loaded [`calendars::KrxCalendar`]
//! - **Expiry**: second-Thursday resolution with bounded backward shift and
//!   an explicit override table for documented exchange exceptions
//! - **Countdown**: trading-day sequences and days-to-expiration mappings
//!
//! ## Design Philosophy
//!
//! - **Immutable inputs**: holiday data is loaded once and held read-only
//!   for a resolution run
//! - **Explicit failure**: an unresolvable month or uncovered trading day is
//!   an error, never a silent skip
//! - **Batch, synchronous**: bounded deterministic computation over an
//!   in-memory date range
//!
//! ## Example
//!
//! ```rust
//! use krxcal_core::prelude::*;
//!
//! let cal = KrxCalendar::from_dates(vec![Date::from_ymd(2023, 10, 9).unwrap()]);
//! let expiry = resolve_expiration(2023, 10, &cal, DEFAULT_MAX_BACKSHIFT).unwrap();
//! assert_eq!(expiry, Date::from_ymd(2023, 10, 12).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::manual_div_ceil)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::manual_range_contains)]

pub mod calendars;
pub mod countdown;
pub mod error;
pub mod expiry;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{Calendar, HolidaySet, HolidaySetBuilder, KrxCalendar, WeekendCalendar};
    pub use crate::countdown::{build_trading_days, days_until_expiration, ExpiryCountdown};
    pub use crate::error::{KrxcalError, KrxcalResult};
    pub use crate::expiry::{
        resolve_expiration, resolve_expiration_series, second_thursday, OverrideTable,
        DEFAULT_MAX_BACKSHIFT,
    };
    pub use crate::types::Date;
}

// Re-export commonly used types at crate root
pub use error::{KrxcalError, KrxcalResult};
pub use types::Date;
