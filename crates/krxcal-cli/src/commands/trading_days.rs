//! Trading-days command implementation.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use krxcal_core::countdown::build_trading_days;

use crate::cli::OutputFormat;
use crate::commands::{load_calendar, parse_date};
use crate::output::{print_header, print_output};

/// Arguments for the trading-days command.
#[derive(Args, Debug)]
pub struct TradingDaysArgs {
    /// Start of the range (YYYY-MM-DD)
    #[arg(short, long)]
    pub start: String,

    /// End of the range (YYYY-MM-DD)
    #[arg(short, long)]
    pub end: String,

    /// Holiday CSV file (one `date` column, YYYY-MM-DD). Weekends-only if omitted.
    #[arg(long)]
    pub holidays: Option<PathBuf>,
}

/// One output row per trading day.
#[derive(Debug, Serialize, Tabled)]
struct TradingDayRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Weekday")]
    weekday: String,
}

/// Executes the trading-days command.
pub fn execute(args: TradingDaysArgs, format: OutputFormat, quiet: bool) -> Result<()> {
    let start = parse_date(&args.start)?;
    let end = parse_date(&args.end)?;
    let calendar = load_calendar(args.holidays.as_deref())?;

    let days = build_trading_days(start, end, &calendar)?;
    let rows: Vec<TradingDayRow> = days
        .iter()
        .map(|d| TradingDayRow {
            date: d.to_string(),
            weekday: d.weekday().to_string(),
        })
        .collect();

    if format == OutputFormat::Table && !quiet {
        print_header(&format!("Trading days {start} to {end} ({} days)", rows.len()));
    }
    print_output(&rows, format)
}
