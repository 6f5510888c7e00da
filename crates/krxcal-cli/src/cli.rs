//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{CountdownArgs, ExpiriesArgs, TradingDaysArgs};

/// krxcal - KRX trading-day calendar and options-expiry CLI
#[derive(Parser)]
#[command(name = "krxcal")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// List the trading days in a date range
    TradingDays(TradingDaysArgs),

    /// Resolve the monthly options-expiration schedule
    Expiries(ExpiriesArgs),

    /// Print the days-to-expiration countdown per trading day
    Countdown(CountdownArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (one value per line)
    Minimal,
}
