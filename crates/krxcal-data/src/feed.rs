//! Historical trading-day feed.
//!
//! The ground truth for which historical days were actually open comes from
//! an already-fetched KRX market-data JSON document. Each record carries a
//! trade date in `YYYY/MM/DD` format:
//!
//! ```json
//! {
//!   "OutBlock_1": [
//!     { "trd_dd": "2023/10/12" },
//!     { "trd_dd": "2023/10/11" }
//!   ]
//! }
//! ```
//!
//! Fetching the document is out of scope; this module only consumes it.

use std::path::Path;

use serde::Deserialize;

use krxcal_core::types::Date;

use crate::error::DataResult;

/// Date format used by the KRX feed.
const FEED_DATE_FORMAT: &str = "%Y/%m/%d";

/// One record of the feed. Unknown fields (prices, volumes) are ignored.
#[derive(Debug, Deserialize)]
struct FeedRecord {
    trd_dd: String,
}

/// The feed document wrapper.
#[derive(Debug, Deserialize)]
struct FeedDocument {
    #[serde(rename = "OutBlock_1", alias = "output")]
    records: Vec<FeedRecord>,
}

/// Observed historical trading days, ordered ascending and deduplicated.
#[derive(Debug, Clone)]
pub struct TradingDayFeed {
    days: Vec<Date>,
}

impl TradingDayFeed {
    /// Parse a feed from an already-fetched JSON document.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON or on any date that does not parse as
    /// `YYYY/MM/DD`; records are never silently dropped.
    pub fn from_json(json: &str) -> DataResult<Self> {
        let document: FeedDocument = serde_json::from_str(json)?;

        let mut days = Vec::with_capacity(document.records.len());
        for record in &document.records {
            days.push(Date::parse_with_format(
                record.trd_dd.trim(),
                FEED_DATE_FORMAT,
            )?);
        }

        days.sort_unstable();
        days.dedup();
        log::debug!("parsed {} observed trading days from feed", days.len());
        Ok(Self { days })
    }

    /// Parse a feed from a JSON file on disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> DataResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    /// Build a feed directly from dates (mainly for tests and fixtures).
    pub fn from_dates(dates: impl IntoIterator<Item = Date>) -> Self {
        let mut days: Vec<Date> = dates.into_iter().collect();
        days.sort_unstable();
        days.dedup();
        Self { days }
    }

    /// The observed trading days, ascending.
    pub fn days(&self) -> &[Date] {
        &self.days
    }

    /// Whether a date was observed as a trading day.
    pub fn contains(&self, date: Date) -> bool {
        self.days.binary_search(&date).is_ok()
    }

    /// First and last observed day, if the feed is non-empty.
    pub fn range(&self) -> Option<(Date, Date)> {
        self.days.first().copied().zip(self.days.last().copied())
    }

    /// Number of observed trading days.
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Whether the feed holds no days.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_from_json() {
        let json = r#"{
            "OutBlock_1": [
                { "trd_dd": "2023/10/12", "acc_trdval": "1234" },
                { "trd_dd": "2023/10/11" },
                { "trd_dd": "2023/10/12" }
            ]
        }"#;

        let feed = TradingDayFeed::from_json(json).unwrap();
        assert_eq!(feed.days(), &[d(2023, 10, 11), d(2023, 10, 12)]);
        assert!(feed.contains(d(2023, 10, 12)));
        assert!(!feed.contains(d(2023, 10, 9)));
        assert_eq!(feed.range(), Some((d(2023, 10, 11), d(2023, 10, 12))));
    }

    #[test]
    fn test_from_json_output_alias() {
        let json = r#"{ "output": [ { "trd_dd": "2024/01/02" } ] }"#;
        let feed = TradingDayFeed::from_json(json).unwrap();
        assert_eq!(feed.len(), 1);
    }

    #[test]
    fn test_from_json_bad_date_format() {
        // ISO dates are the holiday-file format, not the feed format
        let json = r#"{ "OutBlock_1": [ { "trd_dd": "2023-10-12" } ] }"#;
        assert!(TradingDayFeed::from_json(json).is_err());
    }

    #[test]
    fn test_from_json_malformed_document() {
        assert!(TradingDayFeed::from_json("not json").is_err());
        assert!(TradingDayFeed::from_json(r#"{ "something_else": [] }"#).is_err());
    }

    #[test]
    fn test_empty_feed() {
        let json = r#"{ "OutBlock_1": [] }"#;
        let feed = TradingDayFeed::from_json(json).unwrap();
        assert!(feed.is_empty());
        assert_eq!(feed.range(), None);
    }
}
