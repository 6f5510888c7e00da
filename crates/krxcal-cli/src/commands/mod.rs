//! CLI command implementations.

pub mod countdown;
pub mod expiries;
pub mod trading_days;

// Re-export argument structs for convenience
pub use countdown::CountdownArgs;
pub use expiries::ExpiriesArgs;
pub use trading_days::TradingDaysArgs;

use std::path::Path;

use anyhow::{Context, Result};

use krxcal_core::calendars::KrxCalendar;
use krxcal_core::expiry::OverrideTable;
use krxcal_core::types::Date;
use krxcal_data::CsvHolidaySource;

use crate::error::{CliError, CliResult};

/// Parses a date string in YYYY-MM-DD format.
pub fn parse_date(s: &str) -> CliResult<Date> {
    Date::parse(s).map_err(|_| CliError::InvalidDate(s.to_string()))
}

/// Parses override specifications of the form `YYYY-MM=YYYY-MM-DD`.
pub fn parse_overrides(specs: &[String]) -> CliResult<OverrideTable> {
    let mut table = OverrideTable::new();

    for spec in specs {
        let (month_part, date_part) = spec
            .split_once('=')
            .ok_or_else(|| CliError::InvalidOverride(spec.clone()))?;
        let (year_str, month_str) = month_part
            .split_once('-')
            .ok_or_else(|| CliError::InvalidOverride(spec.clone()))?;

        let year: i32 = year_str
            .parse()
            .map_err(|_| CliError::InvalidOverride(spec.clone()))?;
        let month: u32 = month_str
            .parse()
            .map_err(|_| CliError::InvalidOverride(spec.clone()))?;
        if !(1..=12).contains(&month) {
            return Err(CliError::InvalidMonth(month));
        }

        table.insert(year, month, parse_date(date_part)?);
    }

    Ok(table)
}

/// Loads the holiday calendar; an absent path means weekends-only.
pub fn load_calendar(holidays: Option<&Path>) -> Result<KrxCalendar> {
    match holidays {
        Some(path) => CsvHolidaySource::new(path)
            .load_calendar()
            .with_context(|| format!("failed to load holidays from {}", path.display())),
        None => Ok(KrxCalendar::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert!(parse_date("2025-10-02").is_ok());
        assert!(parse_date("2025/10/02").is_err());
    }

    #[test]
    fn test_parse_overrides() {
        let table =
            parse_overrides(&["2025-10=2025-10-02".to_string()]).unwrap();
        assert_eq!(
            table.get(2025, 10),
            Some(Date::from_ymd(2025, 10, 2).unwrap())
        );

        assert!(parse_overrides(&["2025-13=2025-10-02".to_string()]).is_err());
        assert!(parse_overrides(&["2025-10".to_string()]).is_err());
        assert!(parse_overrides(&["oops=2025-10-02".to_string()]).is_err());
    }
}
