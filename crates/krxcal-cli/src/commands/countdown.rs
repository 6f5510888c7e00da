//! Countdown command implementation.
//!
//! Prints the days-to-expiration countdown for every trading day in range.
//! The expiration series is resolved through the year after the range end so
//! the tail of the range always has an upcoming expiry to count toward.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use krxcal_core::countdown::{build_trading_days, ExpiryCountdown};
use krxcal_core::expiry::{resolve_expiration_series, DEFAULT_MAX_BACKSHIFT};

use crate::cli::OutputFormat;
use crate::commands::{load_calendar, parse_date, parse_overrides};
use crate::output::{print_header, print_output};

/// Arguments for the countdown command.
#[derive(Args, Debug)]
pub struct CountdownArgs {
    /// Start of the range (YYYY-MM-DD)
    #[arg(short, long)]
    pub start: String,

    /// End of the range (YYYY-MM-DD)
    #[arg(short, long)]
    pub end: String,

    /// Holiday CSV file (one `date` column, YYYY-MM-DD). Weekends-only if omitted.
    #[arg(long)]
    pub holidays: Option<PathBuf>,

    /// Manual override, repeatable: YYYY-MM=YYYY-MM-DD
    #[arg(long = "override", value_name = "SPEC")]
    pub overrides: Vec<String>,

    /// Maximum backward shift in days when the nominal date is a holiday
    #[arg(long, default_value_t = DEFAULT_MAX_BACKSHIFT)]
    pub max_backshift: u32,
}

/// One output row per trading day.
#[derive(Debug, Serialize, Tabled)]
struct CountdownRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Days to expiry")]
    days_to_expiry: u32,
    #[tabled(rename = "Expiry")]
    is_expiry: bool,
}

/// Executes the countdown command.
pub fn execute(args: CountdownArgs, format: OutputFormat, quiet: bool) -> Result<()> {
    let start = parse_date(&args.start)?;
    let end = parse_date(&args.end)?;
    let calendar = load_calendar(args.holidays.as_deref())?;
    let overrides = parse_overrides(&args.overrides)?;

    let expirations = resolve_expiration_series(
        start.year()..=end.year() + 1,
        1..=12,
        &calendar,
        &overrides,
        args.max_backshift,
    )?;

    // Extend the trading-day grid to the first expiry at or after the range
    // end, so every requested day has an on-grid upcoming expiry.
    let Some(cutoff) = expirations.iter().find(|e| **e >= end).copied() else {
        bail!("no expiration at or after {end}; extend the resolved range");
    };
    let days = build_trading_days(start, cutoff, &calendar)?;
    let countdown = ExpiryCountdown::compute(&days, &expirations)?;

    let rows: Vec<CountdownRow> = countdown
        .iter()
        .take_while(|(date, _)| *date <= end)
        .map(|(date, value)| CountdownRow {
            date: date.to_string(),
            days_to_expiry: value,
            is_expiry: value == 0,
        })
        .collect();

    if format == OutputFormat::Table && !quiet {
        print_header(&format!("Days to expiration {start} to {end}"));
    }
    print_output(&rows, format)
}
