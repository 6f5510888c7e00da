//! Trading-day calendars.
//!
//! This module provides:
//! - The [`Calendar`] trait for deciding which days the exchange is open
//! - Holiday storage ([`HolidaySet`]) with O(1) membership checks
//! - The KRX calendar built from loaded holiday lists

mod bitmap;
mod krx;

pub use bitmap::{nth_weekday_of_month, HolidaySet, HolidaySetBuilder, MAX_YEAR, MIN_YEAR};
pub use krx::{CalendarData, KrxCalendar};

use crate::types::Date;

/// Trait for trading-day calendars.
///
/// Calendars determine which days are trading days vs non-trading days
/// (weekends and holidays) for a market.
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &'static str;

    /// Returns true if the date is a trading day.
    fn is_trading_day(&self, date: Date) -> bool;

    /// Returns true if the date is a non-trading day.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_trading_day(date)
    }

    /// Returns the next trading day on or after the given date.
    fn next_trading_day(&self, date: Date) -> Date {
        let mut result = date;
        while !self.is_trading_day(result) {
            result = result.add_days(1);
        }
        result
    }

    /// Returns the previous trading day on or before the given date.
    fn previous_trading_day(&self, date: Date) -> Date {
        let mut result = date;
        while !self.is_trading_day(result) {
            result = result.add_days(-1);
        }
        result
    }

    /// Advances a date by a number of trading days.
    fn add_trading_days(&self, date: Date, days: i32) -> Date {
        let mut result = date;
        let mut remaining = days.abs();
        let direction: i64 = if days >= 0 { 1 } else { -1 };

        while remaining > 0 {
            result = result.add_days(direction);
            if self.is_trading_day(result) {
                remaining -= 1;
            }
        }

        result
    }

    /// Counts trading days between two dates (exclusive of start, inclusive of end).
    fn trading_days_between(&self, start: Date, end: Date) -> i32 {
        let mut count = 0;
        let mut current = start.add_days(1);

        while current <= end {
            if self.is_trading_day(current) {
                count += 1;
            }
            current = current.add_days(1);
        }

        count
    }
}

/// A simple weekend-only calendar (no holidays).
///
/// Useful for testing or when holiday data is not available.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &'static str {
        "Weekend Only"
    }

    fn is_trading_day(&self, date: Date) -> bool {
        date.is_weekday()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekend_calendar() {
        let cal = WeekendCalendar;

        // Monday
        let monday = Date::from_ymd(2025, 1, 6).unwrap();
        assert!(cal.is_trading_day(monday));

        // Saturday
        let saturday = Date::from_ymd(2025, 1, 4).unwrap();
        assert!(!cal.is_trading_day(saturday));
        assert!(cal.is_holiday(saturday));

        // Sunday
        let sunday = Date::from_ymd(2025, 1, 5).unwrap();
        assert!(!cal.is_trading_day(sunday));
    }

    #[test]
    fn test_previous_next_trading_day() {
        let cal = WeekendCalendar;

        // Saturday rolls back to Friday, forward to Monday
        let saturday = Date::from_ymd(2025, 1, 4).unwrap();
        assert_eq!(
            cal.previous_trading_day(saturday),
            Date::from_ymd(2025, 1, 3).unwrap()
        );
        assert_eq!(
            cal.next_trading_day(saturday),
            Date::from_ymd(2025, 1, 6).unwrap()
        );

        // A trading day maps to itself
        let monday = Date::from_ymd(2025, 1, 6).unwrap();
        assert_eq!(cal.previous_trading_day(monday), monday);
        assert_eq!(cal.next_trading_day(monday), monday);
    }

    #[test]
    fn test_add_trading_days() {
        let cal = WeekendCalendar;

        // Friday + 1 trading day = Monday
        let friday = Date::from_ymd(2025, 1, 3).unwrap();
        let result = cal.add_trading_days(friday, 1);
        assert_eq!(result, Date::from_ymd(2025, 1, 6).unwrap());

        // Monday - 1 trading day = Friday
        let monday = Date::from_ymd(2025, 1, 6).unwrap();
        assert_eq!(cal.add_trading_days(monday, -1), friday);
    }

    #[test]
    fn test_trading_days_between() {
        let cal = WeekendCalendar;

        // Monday to Friday = 4 trading days (Tue, Wed, Thu, Fri)
        let monday = Date::from_ymd(2025, 1, 6).unwrap();
        let friday = Date::from_ymd(2025, 1, 10).unwrap();

        assert_eq!(cal.trading_days_between(monday, friday), 4);
    }
}
