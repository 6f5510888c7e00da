//! Domain types for trading-calendar calculations.
//!
//! - [`Date`]: Plain calendar date, no time-of-day component

mod date;

pub use date::Date;
