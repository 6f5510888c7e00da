//! CSV holiday file source.
//!
//! The holiday source is a tabular file with one date-string column named
//! `date`, format `YYYY-MM-DD`, as published in exchange holiday exports:
//!
//! ```csv
//! date
//! 2023-10-02
//! 2023-10-03
//! 2023-10-09
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use krxcal_core::calendars::KrxCalendar;
use krxcal_core::types::Date;

use crate::error::DataResult;

/// CSV record for a holiday row.
#[derive(Debug, Deserialize)]
struct HolidayRecord {
    date: String,
}

/// CSV-based holiday source.
pub struct CsvHolidaySource {
    file_path: PathBuf,
}

impl CsvHolidaySource {
    /// Create a new CSV holiday source for the given path.
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    /// Load all holiday dates from the file, sorted and deduplicated.
    ///
    /// A malformed date string fails the whole load with the offending
    /// value in the error; rows are never silently dropped.
    pub fn load(&self) -> DataResult<Vec<Date>> {
        let mut reader = csv::Reader::from_path(&self.file_path)?;

        let mut dates = Vec::new();
        for result in reader.deserialize() {
            let record: HolidayRecord = result?;
            dates.push(Date::parse(record.date.trim())?);
        }

        dates.sort_unstable();
        dates.dedup();
        log::debug!(
            "loaded {} holidays from {}",
            dates.len(),
            self.file_path.display()
        );
        Ok(dates)
    }

    /// Load the file into a ready-to-use KRX calendar.
    pub fn load_calendar(&self) -> DataResult<KrxCalendar> {
        Ok(KrxCalendar::from_dates(self.load()?))
    }
}
