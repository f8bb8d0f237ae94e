//! # Ride EDA command-line entry point
//!
//! ```bash
//! ride-eda import --file rides.csv
//! ride-eda run --profile
//! ride-eda show --table taxi_rides_zonestats
//! ```
//!
//! Set `RUST_LOG=debug` for stage-level detail; logs are also written under
//! the platform data directory (see [`ride_eda::logging`]).

#![warn(clippy::all, rust_2018_idioms)]
#![expect(clippy::print_stdout, clippy::print_stderr)] // Console output is the CLI's job

mod cli;

use anyhow::Result;
use clap::Parser as _;

fn main() -> Result<()> {
    if let Err(e) = ride_eda::logging::init() {
        eprintln!("Failed to initialise logging: {e}");
    }

    let cli = cli::Cli::parse();
    cli::run_command(cli).inspect_err(|e| {
        tracing::error!("{e:#}");
        if let Ok(path) = ride_eda::logging::get_current_log_path() {
            eprintln!("Details logged to {}", path.display());
        }
    })
}
