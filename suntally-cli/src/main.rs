// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! suntally CLI - monthly Sunsynk solar reports from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Prompt for anything not given on the command line
//! suntally
//!
//! # Fully specified, no prompts
//! suntally export --username me@example.com --password secret --month 2023-08
//!
//! # Write the report somewhere specific
//! suntally export --month 2023-08 --output /tmp/august.csv
//!
//! # Keep the token cache out of the working directory
//! suntally --cache-file ~/.cache/suntally_token.json export --month 2023-08
//! ```

mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::export;
use suntally_store::DEFAULT_CACHE_PATH;

// ============================================================================
// CLI Definition
// ============================================================================

/// suntally CLI - monthly solar production/consumption reports.
#[derive(Parser)]
#[command(name = "suntally")]
#[command(about = "Export monthly Sunsynk solar figures to CSV")]
#[command(long_about = r#"
suntally fetches one month of daily Sunsynk figures and writes them to a
CSV report with one row per day:

  Date, PV, Load, Export, Import, Discharge, Charge

The bearer token is cached between runs; a fresh token skips the login
round trip entirely.

Examples:
  suntally                                 # prompts for anything missing
  suntally export -m 2023-08               # prompts for credentials only
  suntally export -u me -p secret -m 2023-08
"#)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run. If none, runs 'export' by default.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Token cache file.
    #[arg(long, default_value = DEFAULT_CACHE_PATH, global = true)]
    pub cache_file: PathBuf,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Fetch a month of figures and write the CSV report (default).
    #[command(visible_alias = "e")]
    Export(export::ExportArgs),
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error.
    Error = 1,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("suntally_core=debug,suntally_store=debug,suntally_api=debug,suntally_cli=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Some(Commands::Export(args)) => export::run(args, &cli).await,
        None => {
            // Default to export command
            export::run(&export::ExportArgs::default(), &cli).await
        }
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {}", e);
        }
        std::process::exit(ExitCode::Error as i32);
    }

    Ok(())
}
