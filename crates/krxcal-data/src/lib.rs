//! # krxcal Data
//!
//! File and feed loaders for the krxcal trading-calendar library.
//!
//! All loading is synchronous batch work done before resolution; the core
//! resolver only ever sees already-materialized, immutable inputs.
//!
//! - [`holidays::CsvHolidaySource`]: holiday CSV file (`YYYY-MM-DD` column)
//! - [`feed::TradingDayFeed`]: already-fetched KRX JSON feed of observed
//!   trading days (`YYYY/MM/DD` records)
//! - [`reconcile`]: derived-vs-observed comparison and holiday backfill

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod feed;
pub mod holidays;
pub mod reconcile;

pub use error::{DataError, DataResult};
pub use feed::TradingDayFeed;
pub use holidays::CsvHolidaySource;
pub use reconcile::{backfill_calendar, reconcile, Reconciliation};
