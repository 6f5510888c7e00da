//! Expiries command implementation.
//!
//! Resolves the monthly options-expiration schedule for a year range.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tabled::Tabled;

use krxcal_core::expiry::{
    resolve_expiration, resolve_expiration_series, second_thursday, DEFAULT_MAX_BACKSHIFT,
};

use crate::cli::OutputFormat;
use crate::commands::{load_calendar, parse_overrides};
use crate::output::{print_header, print_output};

/// Arguments for the expiries command.
#[derive(Args, Debug)]
pub struct ExpiriesArgs {
    /// First year to resolve
    #[arg(long)]
    pub from_year: i32,

    /// Last year to resolve (defaults to from-year)
    #[arg(long)]
    pub to_year: Option<i32>,

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

/// One output row per resolved month.
#[derive(Debug, Serialize, Tabled)]
struct ExpiryRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Nominal")]
    nominal: String,
    #[tabled(rename = "Expiry")]
    expiry: String,
    #[tabled(rename = "Shift (days)")]
    shift_days: i64,
    #[tabled(rename = "Overridden")]
    overridden: bool,
}

/// Executes the expiries command.
pub fn execute(args: ExpiriesArgs, format: OutputFormat, quiet: bool) -> Result<()> {
    let to_year = args.to_year.unwrap_or(args.from_year);
    let calendar = load_calendar(args.holidays.as_deref())?;
    let overrides = parse_overrides(&args.overrides)?;

    // Run the series resolution first so the strictly-increasing and
    // one-per-month invariants are enforced before any row is printed.
    resolve_expiration_series(
        args.from_year..=to_year,
        1..=12,
        &calendar,
        &overrides,
        args.max_backshift,
    )?;

    let mut rows = Vec::new();
    for year in args.from_year..=to_year {
        for month in 1..=12 {
            let nominal = second_thursday(year, month)?;
            let (expiry, overridden) = match overrides.get(year, month) {
                Some(date) => (date, true),
                None => (
                    resolve_expiration(year, month, &calendar, args.max_backshift)?,
                    false,
                ),
            };
            rows.push(ExpiryRow {
                month: format!("{year}-{month:02}"),
                nominal: nominal.to_string(),
                expiry: expiry.to_string(),
                shift_days: expiry.days_between(&nominal),
                overridden,
            });
        }
    }

    if format == OutputFormat::Table && !quiet {
        print_header(&format!("Expiration schedule {}-{to_year}", args.from_year));
    }
    print_output(&rows, format)
}
