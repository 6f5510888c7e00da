//! Monthly options-expiration resolution.
//!
//! KRX index options expire on the second Thursday of each month. When that
//! Thursday is a market holiday the expiration moves backward to the nearest
//! earlier trading day, within a bounded number of days. Documented exchange
//! exceptions (e.g. a multi-day holiday cluster forcing an off-pattern date)
//! are supplied as an explicit override table rather than special-cased in
//! the resolution walk.

use chrono::Weekday;
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use crate::calendars::{nth_weekday_of_month, Calendar};
use crate::error::{KrxcalError, KrxcalResult};
use crate::types::Date;

/// Default bound on the backward shift when the nominal date is a holiday.
pub const DEFAULT_MAX_BACKSHIFT: u32 = 3;

/// Returns the second Thursday of the given month.
///
/// Every month has exactly one Thursday with day-of-month 8-14.
///
/// # Errors
///
/// Returns `KrxcalError::InvalidDate` if the (year, month) pair is invalid.
pub fn second_thursday(year: i32, month: u32) -> KrxcalResult<Date> {
    nth_weekday_of_month(year, month, Weekday::Thu, 2)
        .ok_or_else(|| KrxcalError::invalid_date(format!("{year}-{month:02} is not a valid month")))
}

/// Resolves the expiration date for a single month.
///
/// Starts at the second Thursday and walks backward one calendar day at a
/// time, at most `max_backshift` days, until it finds a trading day. The
/// nominal Thursday itself counts as the first candidate.
///
/// # Errors
///
/// Returns `KrxcalError::UnresolvedExpiration` when every candidate within
/// the bound is a non-trading day. This is surfaced, never silently skipped:
/// the caller must extend the bound or supply an override for the month.
pub fn resolve_expiration<C: Calendar + ?Sized>(
    year: i32,
    month: u32,
    calendar: &C,
    max_backshift: u32,
) -> KrxcalResult<Date> {
    let nominal = second_thursday(year, month)?;

    for back in 0..=max_backshift {
        let candidate = nominal.add_days(-i64::from(back));
        if calendar.is_trading_day(candidate) {
            return Ok(candidate);
        }
    }

    Err(KrxcalError::UnresolvedExpiration {
        year,
        month,
        max_backshift,
    })
}

/// Manual expiration overrides for documented exchange exceptions.
///
/// Maps a nominal (year, month) to a replacement date. Overrides take
/// precedence over normal resolution, so they also rescue months where the
/// bounded backward shift would fail (the motivating case: a national-holiday
/// cluster spanning the whole shift window).
#[derive(Debug, Clone, Default)]
pub struct OverrideTable {
    entries: BTreeMap<(i32, u32), Date>,
}

impl OverrideTable {
    /// Creates an empty override table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an override for a (year, month). Replaces any existing entry.
    pub fn insert(&mut self, year: i32, month: u32, date: Date) {
        self.entries.insert((year, month), date);
    }

    /// Returns the override for a (year, month), if any.
    pub fn get(&self, year: i32, month: u32) -> Option<Date> {
        self.entries.get(&(year, month)).copied()
    }

    /// Number of overrides in the table.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no overrides.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<((i32, u32), Date)> for OverrideTable {
    fn from_iter<I: IntoIterator<Item = ((i32, u32), Date)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Resolves the expiration series for every (year, month) pair in range.
///
/// Applies [`resolve_expiration`] per month, substitutes any override, sorts
/// ascending, and verifies the strictly-increasing / one-per-month invariant.
/// Override dates must be trading days.
///
/// # Errors
///
/// - `KrxcalError::UnresolvedExpiration` from a non-overridden month.
/// - `KrxcalError::CalendarError` if an override is not a trading day, or if
///   the final series has a duplicate or out-of-order month.
pub fn resolve_expiration_series<C: Calendar + ?Sized>(
    years: RangeInclusive<i32>,
    months: RangeInclusive<u32>,
    calendar: &C,
    overrides: &OverrideTable,
    max_backshift: u32,
) -> KrxcalResult<Vec<Date>> {
    let mut expirations = Vec::new();

    for year in years {
        for month in months.clone() {
            let date = match overrides.get(year, month) {
                Some(replacement) => {
                    if !calendar.is_trading_day(replacement) {
                        return Err(KrxcalError::calendar_error(format!(
                            "override for {year}-{month:02} is not a trading day: {replacement}"
                        )));
                    }
                    log::debug!("expiry override applied for {year}-{month:02}: {replacement}");
                    replacement
                }
                None => resolve_expiration(year, month, calendar, max_backshift)?,
            };
            expirations.push(date);
        }
    }

    expirations.sort_unstable();

    for pair in expirations.windows(2) {
        if pair[1] <= pair[0] {
            return Err(KrxcalError::calendar_error(format!(
                "expiration series is not strictly increasing: {} then {}",
                pair[0], pair[1]
            )));
        }
        if pair[0].year() == pair[1].year() && pair[0].month() == pair[1].month() {
            return Err(KrxcalError::calendar_error(format!(
                "duplicate expiration month: {} and {}",
                pair[0], pair[1]
            )));
        }
    }

    Ok(expirations)
}
