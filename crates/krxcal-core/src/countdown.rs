//! Trading-day sequences and days-to-expiration countdowns.
//!
//! The countdown is measured in trading-day index distance, not elapsed
//! calendar days, so weekends and holidays never count. A date-to-rank index
//! is built once per computation, giving constant-time lookups instead of a
//! linear scan per day.

use std::collections::HashMap;

use crate::calendars::Calendar;
use crate::error::{KrxcalError, KrxcalResult};
use crate::types::Date;

/// Builds the ordered sequence of trading days in `[start, end]`.
///
/// A day is included iff the calendar considers it a trading day.
///
/// # Errors
///
/// Returns `KrxcalError::InvalidRange` if `end < start`.
pub fn build_trading_days<C: Calendar + ?Sized>(
    start: Date,
    end: Date,
    calendar: &C,
) -> KrxcalResult<Vec<Date>> {
    if end < start {
        return Err(KrxcalError::invalid_range(start, end));
    }

    let mut days = Vec::new();
    let mut current = start;
    while current <= end {
        if calendar.is_trading_day(current) {
            days.push(current);
        }
        current = current.add_days(1);
    }
    Ok(days)
}

/// Per-trading-day countdown to the next expiration date.
///
/// Holds one entry per trading day, in sequence order, where the value is
/// the number of trading days until the next expiration at or after that
/// day. The countdown reaches 0 exactly on an expiration date and restarts
/// toward the next expiry on the following trading day.
#[derive(Debug, Clone)]
pub struct ExpiryCountdown {
    entries: Vec<(Date, u32)>,
    index: HashMap<Date, usize>,
}

impl ExpiryCountdown {
    /// Computes countdowns for every trading day against an expiration series.
    ///
    /// `trading_days` must be the ordered sequence from
    /// [`build_trading_days`]; `expirations` the sorted series from expiry
    /// resolution. Every expiration must itself be a trading day in the
    /// sequence, and the series must cover the full trading-day range.
    ///
    /// # Errors
    ///
    /// - `KrxcalError::CalendarError` if an expiration is missing from the
    ///   trading-day sequence (inconsistent inputs).
    /// - `KrxcalError::NoUpcomingExpiration` if a trading day falls after the
    ///   last expiration; the expiration table must be extended.
    pub fn compute(trading_days: &[Date], expirations: &[Date]) -> KrxcalResult<Self> {
        // Rank index: date -> position in the trading-day sequence.
        let rank: HashMap<Date, usize> = trading_days
            .iter()
            .enumerate()
            .map(|(i, d)| (*d, i))
            .collect();

        let mut expiry_ranks = Vec::with_capacity(expirations.len());
        for expiry in expirations {
            // Expirations outside the trading-day window are legal (the series
            // may extend past `end`); expirations inside the window must be on
            // the grid.
            match rank.get(expiry) {
                Some(&r) => expiry_ranks.push(r),
                None => {
                    let in_window = trading_days
                        .first()
                        .zip(trading_days.last())
                        .is_some_and(|(first, last)| expiry >= first && expiry <= last);
                    if in_window {
                        return Err(KrxcalError::calendar_error(format!(
                            "expiration {expiry} is not in the trading-day sequence"
                        )));
                    }
                }
            }
        }
        expiry_ranks.sort_unstable();

        let last_expiry = expirations.iter().max().copied();
        let mut entries = Vec::with_capacity(trading_days.len());
        let mut next = 0usize; // index into expiry_ranks

        for (i, day) in trading_days.iter().enumerate() {
            while next < expiry_ranks.len() && expiry_ranks[next] < i {
                next += 1;
            }
            match expiry_ranks.get(next) {
                Some(&expiry_rank) => {
                    entries.push((*day, (expiry_rank - i) as u32));
                }
                None => {
                    // Past the last on-grid expiry. An off-grid expiry beyond
                    // the window still covers the remaining days.
                    if last_expiry.is_some_and(|last| last > *day) {
                        return Err(KrxcalError::calendar_error(format!(
                            "expiration beyond {day} is not in the trading-day sequence"
                        )));
                    }
                    return Err(KrxcalError::NoUpcomingExpiration {
                        date: *day,
                        last_expiry,
                    });
                }
            }
        }

        let index = entries.iter().enumerate().map(|(i, (d, _))| (*d, i)).collect();
        Ok(Self { entries, index })
    }

    /// Countdown for a specific trading day, if it is in the sequence.
    pub fn get(&self, date: Date) -> Option<u32> {
        self.index.get(&date).map(|&i| self.entries[i].1)
    }

    /// All (trading day, countdown) entries in sequence order.
    pub fn entries(&self) -> &[(Date, u32)] {
        &self.entries
    }

    /// Iterator over (trading day, countdown) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Date, u32)> + '_ {
        self.entries.iter().copied()
    }

    /// Number of trading days covered.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the countdown covers no trading days.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Convenience wrapper returning the countdown as ordered (date, value) pairs.
///
/// See [`ExpiryCountdown::compute`] for the contract.
pub fn days_until_expiration(
    trading_days: &[Date],
    expirations: &[Date],
) -> KrxcalResult<Vec<(Date, u32)>> {
    Ok(ExpiryCountdown::compute(trading_days, expirations)?
        .entries()
        .to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::{KrxCalendar, WeekendCalendar};

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_build_trading_days_skips_weekends_and_holidays() {
        let cal = KrxCalendar::from_dates(vec![d(2023, 10, 9)]);
        let days = build_trading_days(d(2023, 10, 6), d(2023, 10, 12), &cal).unwrap();

        // Fri 6, (Sat, Sun, Mon holiday), Tue 10, Wed 11, Thu 12
        assert_eq!(
            days,
            vec![d(2023, 10, 6), d(2023, 10, 10), d(2023, 10, 11), d(2023, 10, 12)]
        );
        for day in &days {
            assert!(day.is_weekday());
            assert!(!cal.is_listed_holiday(*day));
        }
    }

    #[test]
    fn test_build_trading_days_invalid_range() {
        let err =
            build_trading_days(d(2025, 6, 10), d(2025, 6, 1), &WeekendCalendar).unwrap_err();
        assert!(matches!(err, KrxcalError::InvalidRange { .. }));
    }

    #[test]
    fn test_build_trading_days_single_day() {
        let days = build_trading_days(d(2025, 6, 9), d(2025, 6, 9), &WeekendCalendar).unwrap();
        assert_eq!(days, vec![d(2025, 6, 9)]);

        // A weekend-only range yields an empty sequence
        let days = build_trading_days(d(2025, 6, 7), d(2025, 6, 8), &WeekendCalendar).unwrap();
        assert!(days.is_empty());
    }

    #[test]
    fn test_countdown_resets_after_expiry() {
        // Mon, Tue, Wed(exp), Thu, Fri, Mon(exp)
        let days = vec![
            d(2025, 6, 2),
            d(2025, 6, 3),
            d(2025, 6, 4),
            d(2025, 6, 5),
            d(2025, 6, 6),
            d(2025, 6, 9),
        ];
        let expirations = vec![d(2025, 6, 4), d(2025, 6, 9)];

        let countdown = days_until_expiration(&days, &expirations).unwrap();
        let values: Vec<u32> = countdown.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, vec![2, 1, 0, 2, 1, 0]);
    }

    #[test]
    fn test_countdown_zero_exactly_on_expiries() {
        let cal = WeekendCalendar;
        let days = build_trading_days(d(2025, 6, 2), d(2025, 7, 11), &cal).unwrap();
        let expirations = vec![d(2025, 6, 12), d(2025, 7, 10)];

        let countdown = ExpiryCountdown::compute(&days, &expirations).unwrap();
        for (day, value) in countdown.iter() {
            assert_eq!(value == 0, expirations.contains(&day), "at {day}");
        }
        // Strictly decreasing between resets
        for pair in countdown.entries().windows(2) {
            let (_, prev) = pair[0];
            let (_, next) = pair[1];
            assert!(next == prev - 1 || prev == 0, "{prev} then {next}");
        }
    }

    #[test]
    fn test_countdown_lookup() {
        let days = vec![d(2025, 6, 2), d(2025, 6, 3), d(2025, 6, 4)];
        let expirations = vec![d(2025, 6, 4)];

        let countdown = ExpiryCountdown::compute(&days, &expirations).unwrap();
        assert_eq!(countdown.get(d(2025, 6, 2)), Some(2));
        assert_eq!(countdown.get(d(2025, 6, 4)), Some(0));
        assert_eq!(countdown.get(d(2025, 6, 7)), None); // Saturday, not in sequence
        assert_eq!(countdown.len(), 3);
    }

    #[test]
    fn test_countdown_fails_past_last_expiry() {
        let days = vec![d(2025, 6, 2), d(2025, 6, 3), d(2025, 6, 4)];
        let expirations = vec![d(2025, 6, 3)];

        let err = ExpiryCountdown::compute(&days, &expirations).unwrap_err();
        assert_eq!(
            err,
            KrxcalError::NoUpcomingExpiration {
                date: d(2025, 6, 4),
                last_expiry: Some(d(2025, 6, 3)),
            }
        );
    }

    #[test]
    fn test_countdown_fails_on_empty_expirations() {
        let days = vec![d(2025, 6, 2)];
        let err = ExpiryCountdown::compute(&days, &[]).unwrap_err();
        assert!(matches!(
            err,
            KrxcalError::NoUpcomingExpiration {
                last_expiry: None,
                ..
            }
        ));
    }

    #[test]
    fn test_countdown_rejects_off_grid_expiry() {
        // Expiration on a day missing from the sequence (data inconsistency)
        let days = vec![d(2025, 6, 2), d(2025, 6, 4)];
        let expirations = vec![d(2025, 6, 3)];

        let err = ExpiryCountdown::compute(&days, &expirations).unwrap_err();
        assert!(matches!(err, KrxcalError::CalendarError { .. }));
    }

    #[test]
    fn test_countdown_allows_expiry_past_window() {
        // The series may extend beyond the requested range; remaining days
        // count toward the first in-window expiry.
        let days = vec![d(2025, 6, 2), d(2025, 6, 3), d(2025, 6, 4)];
        let expirations = vec![d(2025, 6, 4), d(2025, 7, 10)];

        let countdown = ExpiryCountdown::compute(&days, &expirations).unwrap();
        assert_eq!(countdown.get(d(2025, 6, 4)), Some(0));
    }

    #[test]
    fn test_countdown_off_window_expiry_cannot_cover_tail() {
        // A day after the last on-grid expiry cannot borrow an off-grid
        // expiry; that means the trading-day range and expiry series are
        // inconsistent.
        let days = vec![d(2025, 6, 2), d(2025, 6, 3), d(2025, 6, 4)];
        let expirations = vec![d(2025, 6, 3), d(2025, 7, 10)];

        let err = ExpiryCountdown::compute(&days, &expirations).unwrap_err();
        assert!(matches!(err, KrxcalError::CalendarError { .. }));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // Countdown over an arbitrary weekday window: zero exactly on
            // expiries, decreasing by one between them.
            #[test]
            fn countdown_invariants(span in 5i64..=60, expiry_step in 3usize..=10) {
                let start = d(2025, 1, 6);
                let days =
                    build_trading_days(start, start.add_days(span), &WeekendCalendar).unwrap();
                prop_assume!(!days.is_empty());

                // Expiries every `expiry_step` trading days, always covering the tail.
                let mut expirations: Vec<Date> =
                    days.iter().step_by(expiry_step).skip(1).copied().collect();
                if expirations.last() != days.last() {
                    expirations.push(*days.last().unwrap());
                }

                let countdown = ExpiryCountdown::compute(&days, &expirations).unwrap();
                for (day, value) in countdown.iter() {
                    prop_assert_eq!(value == 0, expirations.contains(&day));
                }
                for pair in countdown.entries().windows(2) {
                    let (_, prev) = pair[0];
                    let (_, next) = pair[1];
                    prop_assert!(prev == 0 || next == prev - 1);
                }
            }
        }
    }
}
