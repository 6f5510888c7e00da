//! Bitmap-based holiday set for O(1) lookups.
//!
//! Korean exchange holidays are largely lunar-calendar driven (Seollal,
//! Chuseok, Buddha's Birthday) plus ad-hoc substitute holidays, so they
//! arrive as explicit date lists rather than generated rules. This module
//! stores such a list in a bitmap for constant-time membership checks.

use chrono::{Datelike, NaiveDate};
use std::collections::HashSet;

use crate::types::Date;

/// Minimum year supported by the holiday set.
pub const MIN_YEAR: i32 = 1970;
/// Maximum year supported by the holiday set.
pub const MAX_YEAR: i32 = 2100;

/// Total number of years in the supported range.
const YEAR_COUNT: usize = (MAX_YEAR - MIN_YEAR + 1) as usize;

/// Maximum days per year (leap year).
const MAX_DAYS_PER_YEAR: usize = 366;

/// Total bits needed for the entire date range.
const TOTAL_BITS: usize = YEAR_COUNT * MAX_DAYS_PER_YEAR;

/// Number of u64 words needed to store all bits.
const WORD_COUNT: usize = (TOTAL_BITS + 63) / 64;

/// An immutable-after-build set of non-trading holiday dates.
///
/// Uses a bitmap to store holidays for O(1) lookup performance.
/// Supports years from 1970 to 2100; dates outside that range are
/// never holidays.
///
/// # Performance
///
/// - `contains()`: O(1), typically < 10ns
/// - Memory usage: ~12KB per set
#[derive(Clone)]
pub struct HolidaySet {
    /// Bitmap storage for holidays.
    /// Each bit represents a day, 1 = holiday, 0 = not holiday.
    bits: Box<[u64; WORD_COUNT]>,
}

impl std::fmt::Debug for HolidaySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HolidaySet")
            .field("holiday_count", &self.len())
            .finish()
    }
}

impl Default for HolidaySet {
    fn default() -> Self {
        Self::new()
    }
}

impl HolidaySet {
    /// Create a new empty holiday set.
    pub fn new() -> Self {
        Self {
            bits: Box::new([0u64; WORD_COUNT]),
        }
    }

    /// Create a holiday set from an iterator of dates.
    pub fn from_dates(dates: impl IntoIterator<Item = Date>) -> Self {
        let mut set = Self::new();
        for date in dates {
            set.insert(date);
        }
        set
    }

    /// Add a holiday to the set.
    ///
    /// Dates outside the supported year range are silently ignored.
    pub fn insert(&mut self, date: Date) {
        if let Some((word_idx, bit_idx)) = Self::date_to_indices(date.as_naive_date()) {
            self.bits[word_idx] |= 1u64 << bit_idx;
        }
    }

    /// Remove a holiday from the set.
    pub fn remove(&mut self, date: Date) {
        if let Some((word_idx, bit_idx)) = Self::date_to_indices(date.as_naive_date()) {
            self.bits[word_idx] &= !(1u64 << bit_idx);
        }
    }

    /// Check if a date is in the holiday set.
    #[inline]
    pub fn contains(&self, date: Date) -> bool {
        if let Some((word_idx, bit_idx)) = Self::date_to_indices(date.as_naive_date()) {
            (self.bits[word_idx] & (1u64 << bit_idx)) != 0
        } else {
            false
        }
    }

    /// Count total holidays in the set.
    pub fn len(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Check if the set contains no holidays.
    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|w| *w == 0)
    }

    /// Collect all holidays in ascending order.
    ///
    /// Scans the full supported year range, so this is for export and
    /// diagnostics rather than hot paths.
    pub fn dates(&self) -> Vec<Date> {
        let mut out = Vec::with_capacity(self.len());
        for year in MIN_YEAR..=MAX_YEAR {
            for ordinal in 1..=366 {
                if let Some(naive) = NaiveDate::from_yo_opt(year, ordinal) {
                    let date = Date::from(naive);
                    if self.contains(date) {
                        out.push(date);
                    }
                }
            }
        }
        out
    }

    /// Convert a date to bitmap indices.
    ///
    /// Returns (word_index, bit_index) or None if date is out of range.
    #[inline]
    fn date_to_indices(date: NaiveDate) -> Option<(usize, usize)> {
        let year = date.year();
        if year < MIN_YEAR || year > MAX_YEAR {
            return None;
        }

        let year_offset = (year - MIN_YEAR) as usize;
        let day_of_year = date.ordinal0() as usize; // 0-based day of year

        let bit_position = year_offset * MAX_DAYS_PER_YEAR + day_of_year;
        let word_idx = bit_position / 64;
        let bit_idx = bit_position % 64;

        Some((word_idx, bit_idx))
    }
}

impl FromIterator<Date> for HolidaySet {
    fn from_iter<I: IntoIterator<Item = Date>>(iter: I) -> Self {
        Self::from_dates(iter)
    }
}

/// Builder for holiday sets combining explicit dates with annual rules.
pub struct HolidaySetBuilder {
    holidays: HashSet<NaiveDate>,
    start_year: i32,
    end_year: i32,
}

impl Default for HolidaySetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HolidaySetBuilder {
    /// Create a new builder covering the full supported year range.
    pub fn new() -> Self {
        Self {
            holidays: HashSet::new(),
            start_year: MIN_YEAR,
            end_year: MAX_YEAR,
        }
    }

    /// Set the year range for generating annual holidays.
    pub fn year_range(mut self, start: i32, end: i32) -> Self {
        self.start_year = start.max(MIN_YEAR);
        self.end_year = end.min(MAX_YEAR);
        self
    }

    /// Add a specific holiday date.
    pub fn add_date(mut self, date: Date) -> Self {
        self.holidays.insert(date.as_naive_date());
        self
    }

    /// Add holidays from an iterator.
    pub fn add_dates(mut self, dates: impl IntoIterator<Item = Date>) -> Self {
        self.holidays
            .extend(dates.into_iter().map(|d| d.as_naive_date()));
        self
    }

    /// Add a fixed holiday (same month and day every year in range).
    pub fn add_fixed_holiday(mut self, month: u32, day: u32) -> Self {
        for year in self.start_year..=self.end_year {
            if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                self.holidays.insert(date);
            }
        }
        self
    }

    /// Add holidays from a per-year generator function.
    ///
    /// The function is called for each year in the range and should return
    /// the holiday dates for that year. This is how externally computed
    /// lunar-calendar holidays plug in.
    pub fn add_custom_holidays<F>(mut self, generator: F) -> Self
    where
        F: Fn(i32) -> Vec<Date>,
    {
        for year in self.start_year..=self.end_year {
            self.holidays
                .extend(generator(year).into_iter().map(|d| d.as_naive_date()));
        }
        self
    }

    /// Build the holiday set.
    pub fn build(self) -> HolidaySet {
        HolidaySet::from_dates(self.holidays.into_iter().map(Date::from))
    }
}

/// Calculate the nth occurrence of a weekday in a month.
///
/// Returns `None` if the month has no nth occurrence (n too large) or the
/// (year, month) pair is invalid.
pub fn nth_weekday_of_month(
    year: i32,
    month: u32,
    weekday: chrono::Weekday,
    n: u32,
) -> Option<Date> {
    let first_of_month = NaiveDate::from_ymd_opt(year, month, 1)?;
    let first_weekday = first_of_month.weekday();

    // Days until the first occurrence of the target weekday
    let days_until = (weekday.num_days_from_monday() as i32
        - first_weekday.num_days_from_monday() as i32)
        .rem_euclid(7) as u32;

    let day = 1 + days_until + (n - 1) * 7;

    NaiveDate::from_ymd_opt(year, month, day).map(Date::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    #[test]
    fn test_empty_set() {
        let set = HolidaySet::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert!(!set.contains(Date::from_ymd(2025, 1, 1).unwrap()));
    }

    #[test]
    fn test_insert_contains_remove() {
        let mut set = HolidaySet::new();
        let new_years = Date::from_ymd(2025, 1, 1).unwrap();

        set.insert(new_years);
        assert!(set.contains(new_years));
        assert_eq!(set.len(), 1);

        set.remove(new_years);
        assert!(!set.contains(new_years));
        assert!(set.is_empty());
    }

    #[test]
    fn test_out_of_range_dates_ignored() {
        let mut set = HolidaySet::new();
        let ancient = Date::from_ymd(1900, 1, 1).unwrap();

        set.insert(ancient);
        assert!(!set.contains(ancient));
        assert!(set.is_empty());
    }

    #[test]
    fn test_from_dates_and_iteration() {
        let dates = vec![
            Date::from_ymd(2025, 12, 25).unwrap(),
            Date::from_ymd(2025, 1, 1).unwrap(),
        ];
        let set = HolidaySet::from_dates(dates);

        assert_eq!(set.len(), 2);
        // dates() returns ascending order regardless of insertion order
        assert_eq!(
            set.dates(),
            vec![
                Date::from_ymd(2025, 1, 1).unwrap(),
                Date::from_ymd(2025, 12, 25).unwrap(),
            ]
        );
    }

    #[test]
    fn test_builder_fixed_holidays() {
        let set = HolidaySetBuilder::new()
            .year_range(2024, 2025)
            .add_fixed_holiday(1, 1) // New Year's Day
            .add_fixed_holiday(10, 3) // National Foundation Day
            .build();

        assert!(set.contains(Date::from_ymd(2024, 1, 1).unwrap()));
        assert!(set.contains(Date::from_ymd(2025, 1, 1).unwrap()));
        assert!(set.contains(Date::from_ymd(2025, 10, 3).unwrap()));
        assert!(!set.contains(Date::from_ymd(2023, 1, 1).unwrap()));
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn test_builder_custom_generator() {
        let set = HolidaySetBuilder::new()
            .year_range(2025, 2025)
            .add_custom_holidays(|year| vec![Date::from_ymd(year, 5, 5).unwrap()])
            .build();

        assert!(set.contains(Date::from_ymd(2025, 5, 5).unwrap()));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_nth_weekday_of_month() {
        // Second Thursday of October 2023 is the 12th
        let d = nth_weekday_of_month(2023, 10, Weekday::Thu, 2).unwrap();
        assert_eq!(d, Date::from_ymd(2023, 10, 12).unwrap());

        // Second Thursday of October 2025 is the 9th
        let d = nth_weekday_of_month(2025, 10, Weekday::Thu, 2).unwrap();
        assert_eq!(d, Date::from_ymd(2025, 10, 9).unwrap());

        // Fifth Monday of February 2025 does not exist
        assert!(nth_weekday_of_month(2025, 2, Weekday::Mon, 5).is_none());
    }

    #[test]
    fn test_second_thursday_always_in_8_to_14() {
        for year in 2020..=2030 {
            for month in 1..=12 {
                let d = nth_weekday_of_month(year, month, Weekday::Thu, 2).unwrap();
                assert!((8..=14).contains(&d.day()), "{d} outside day 8-14");
            }
        }
    }
}
