//! krxcal CLI - Command-line interface for the KRX trading calendar.
//!
//! # Usage
//!
//! ```bash
//! # List trading days
//! krxcal trading-days --start 2023-10-01 --end 2023-10-31 --holidays krx_2023.csv
//!
//! # Resolve the expiration schedule
//! krxcal expiries --from-year 2025 --holidays krx_2025.csv --override 2025-10=2025-10-02
//!
//! # Days-to-expiration countdown
//! krxcal countdown --start 2023-10-01 --end 2023-12-31 --holidays krx_2023.csv
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let format = cli.format;
    let quiet = cli.quiet;

    match cli.command {
        Commands::TradingDays(args) => commands::trading_days::execute(args, format, quiet)?,
        Commands::Expiries(args) => commands::expiries::execute(args, format, quiet)?,
        Commands::Countdown(args) => commands::countdown::execute(args, format, quiet)?,
    }

    Ok(())
}
