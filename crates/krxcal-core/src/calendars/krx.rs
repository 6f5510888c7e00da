//! KRX trading calendar built from loaded holiday lists.
//!
//! Unlike rule-generated calendars, the KRX holiday schedule is published by
//! the exchange (lunar holidays, substitute holidays, ad-hoc closures), so
//! this calendar is loaded at runtime from an external list and then treated
//! as read-only for the duration of a resolution run.
//!
//! # Example
//!
//! ```
//! use krxcal_core::calendars::{Calendar, KrxCalendar};
//! use krxcal_core::types::Date;
//!
//! let holidays = vec![
//!     Date::from_ymd(2023, 10, 9).unwrap(), // Hangul Day substitute
//! ];
//! let cal = KrxCalendar::from_dates(holidays);
//!
//! assert!(!cal.is_trading_day(Date::from_ymd(2023, 10, 9).unwrap()));
//! assert!(cal.is_trading_day(Date::from_ymd(2023, 10, 12).unwrap()));
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::bitmap::{HolidaySet, MAX_YEAR, MIN_YEAR};
use super::Calendar;
use crate::error::{KrxcalError, KrxcalResult};
use crate::types::Date;

/// KRX trading calendar: Saturday/Sunday weekend plus a loaded holiday set.
#[derive(Clone, Default)]
pub struct KrxCalendar {
    holidays: HolidaySet,
}

impl std::fmt::Debug for KrxCalendar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KrxCalendar")
            .field("holiday_count", &self.holidays.len())
            .finish()
    }
}

impl KrxCalendar {
    /// Create a calendar with no holidays (weekends only).
    pub fn new() -> Self {
        Self {
            holidays: HolidaySet::new(),
        }
    }

    /// Create a calendar from a list of holiday dates.
    pub fn from_dates(holidays: impl IntoIterator<Item = Date>) -> Self {
        Self {
            holidays: HolidaySet::from_dates(holidays),
        }
    }

    /// Create a calendar from an existing holiday set.
    pub fn from_holiday_set(holidays: HolidaySet) -> Self {
        Self { holidays }
    }

    /// Create a calendar by loading holidays from a per-year function.
    ///
    /// This allows holidays to be loaded from any source (database, feed
    /// snapshot, etc.) by providing a function that returns the holidays
    /// for each year in the range.
    pub fn from_loader<F>(start_year: i32, end_year: i32, loader: F) -> Self
    where
        F: Fn(i32) -> Vec<Date>,
    {
        let mut holidays = HolidaySet::new();
        let start = start_year.max(MIN_YEAR);
        let end = end_year.min(MAX_YEAR);

        for year in start..=end {
            for date in loader(year) {
                holidays.insert(date);
            }
        }
        Self { holidays }
    }

    /// Load a calendar from JSON data.
    ///
    /// # JSON Format
    ///
    /// ```json
    /// {
    ///   "name": "KRX",
    ///   "holidays": ["2023-10-09", "2023-12-25"]
    /// }
    /// ```
    pub fn from_json(json: &str) -> KrxcalResult<Self> {
        let data: CalendarData =
            serde_json::from_str(json).map_err(|e| KrxcalError::CalendarError {
                reason: format!("Failed to parse JSON: {e}"),
            })?;
        Self::from_calendar_data(&data)
    }

    /// Load a calendar from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> KrxcalResult<Self> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| KrxcalError::CalendarError {
                reason: format!("Failed to read file: {e}"),
            })?;
        Self::from_json(&content)
    }

    /// Build a calendar from parsed calendar data.
    pub fn from_calendar_data(data: &CalendarData) -> KrxcalResult<Self> {
        let mut cal = Self::new();
        for date_str in &data.holidays {
            cal.holidays.insert(Date::parse(date_str)?);
        }
        Ok(cal)
    }

    /// Add a holiday date.
    pub fn add_holiday(&mut self, date: Date) {
        self.holidays.insert(date);
    }

    /// Add multiple holidays.
    pub fn add_holidays(&mut self, dates: impl IntoIterator<Item = Date>) {
        for date in dates {
            self.holidays.insert(date);
        }
    }

    /// Remove a holiday date.
    pub fn remove_holiday(&mut self, date: Date) {
        self.holidays.remove(date);
    }

    /// Count total holidays in this calendar.
    pub fn holiday_count(&self) -> usize {
        self.holidays.len()
    }

    /// Check if a date is in the loaded holiday list (weekends excluded).
    pub fn is_listed_holiday(&self, date: Date) -> bool {
        self.holidays.contains(date)
    }

    /// Borrow the underlying holiday set.
    pub fn holiday_set(&self) -> &HolidaySet {
        &self.holidays
    }

    /// Export calendar data to a serializable struct.
    pub fn to_calendar_data(&self, name: impl Into<String>) -> CalendarData {
        CalendarData {
            name: name.into(),
            holidays: self
                .holidays
                .dates()
                .into_iter()
                .map(|d| d.to_string())
                .collect(),
        }
    }

    /// Export to JSON string.
    pub fn to_json(&self, name: impl Into<String>) -> KrxcalResult<String> {
        let data = self.to_calendar_data(name);
        serde_json::to_string_pretty(&data).map_err(|e| KrxcalError::CalendarError {
            reason: format!("Failed to serialize calendar: {e}"),
        })
    }
}

impl Calendar for KrxCalendar {
    fn name(&self) -> &'static str {
        "KRX"
    }

    fn is_trading_day(&self, date: Date) -> bool {
        date.is_weekday() && !self.holidays.contains(date)
    }
}

/// Calendar data structure for JSON serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarData {
    /// Name of the calendar.
    pub name: String,

    /// List of holiday dates in YYYY-MM-DD format.
    #[serde(default)]
    pub holidays: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_calendar_is_weekend_only() {
        let cal = KrxCalendar::new();

        assert!(cal.is_trading_day(Date::from_ymd(2025, 1, 6).unwrap())); // Monday
        assert!(!cal.is_trading_day(Date::from_ymd(2025, 1, 4).unwrap())); // Saturday
        assert_eq!(cal.holiday_count(), 0);
    }

    #[test]
    fn test_from_dates() {
        let cal = KrxCalendar::from_dates(vec![
            Date::from_ymd(2025, 1, 1).unwrap(),
            Date::from_ymd(2025, 3, 1).unwrap(),
        ]);

        assert!(!cal.is_trading_day(Date::from_ymd(2025, 1, 1).unwrap()));
        assert!(cal.is_trading_day(Date::from_ymd(2025, 1, 2).unwrap()));
        assert_eq!(cal.holiday_count(), 2);
    }

    #[test]
    fn test_listed_holiday_vs_weekend() {
        let cal = KrxCalendar::from_dates(vec![Date::from_ymd(2023, 10, 9).unwrap()]);

        // Listed holiday
        assert!(cal.is_listed_holiday(Date::from_ymd(2023, 10, 9).unwrap()));
        // Weekend is non-trading but not a listed holiday
        let sunday = Date::from_ymd(2023, 10, 8).unwrap();
        assert!(cal.is_holiday(sunday));
        assert!(!cal.is_listed_holiday(sunday));
    }

    #[test]
    fn test_from_loader() {
        let cal = KrxCalendar::from_loader(2024, 2025, |year| {
            vec![Date::from_ymd(year, 1, 1).unwrap()]
        });

        assert!(!cal.is_trading_day(Date::from_ymd(2024, 1, 1).unwrap()));
        assert!(!cal.is_trading_day(Date::from_ymd(2025, 1, 1).unwrap()));
        assert_eq!(cal.holiday_count(), 2);
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "name": "KRX",
            "holidays": ["2023-10-09", "2023-12-25"]
        }"#;

        let cal = KrxCalendar::from_json(json).unwrap();
        assert!(!cal.is_trading_day(Date::from_ymd(2023, 10, 9).unwrap()));
        assert!(!cal.is_trading_day(Date::from_ymd(2023, 12, 25).unwrap()));
        assert_eq!(cal.holiday_count(), 2);
    }

    #[test]
    fn test_from_json_bad_date() {
        let json = r#"{ "name": "KRX", "holidays": ["2023/10/09"] }"#;
        let err = KrxCalendar::from_json(json).unwrap_err();
        assert!(matches!(err, KrxcalError::InvalidDate { .. }));
    }

    #[test]
    fn test_json_round_trip() {
        let cal = KrxCalendar::from_dates(vec![Date::from_ymd(2025, 10, 9).unwrap()]);
        let json = cal.to_json("KRX").unwrap();
        assert!(json.contains("2025-10-09"));

        let restored = KrxCalendar::from_json(&json).unwrap();
        assert!(!restored.is_trading_day(Date::from_ymd(2025, 10, 9).unwrap()));
    }

    #[test]
    fn test_add_remove_holiday() {
        let mut cal = KrxCalendar::new();
        let date = Date::from_ymd(2025, 1, 27).unwrap(); // Seollal substitute

        cal.add_holiday(date);
        assert!(!cal.is_trading_day(date));

        cal.remove_holiday(date);
        assert!(cal.is_trading_day(date));
    }
}
