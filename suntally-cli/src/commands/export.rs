//! Export command - fetch a month of figures and write the CSV report.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use suntally_api::MonthlyReportFetcher;
use suntally_core::ReportMonth;
use suntally_store::TokenCache;
use tracing::{info, warn};

use crate::output::csv::{report_file_name, report_rows, save_report};
use crate::Cli;

/// Arguments for the export command.
#[derive(Args, Default)]
pub struct ExportArgs {
    /// Sunsynk username (prompted for when omitted).
    #[arg(long, short)]
    pub username: Option<String>,

    /// Sunsynk password (prompted for when omitted).
    #[arg(long, short)]
    pub password: Option<String>,

    /// Month to report on, in YYYY-MM format (prompted for when omitted).
    #[arg(long, short)]
    pub month: Option<String>,

    /// Report file to write (default: "PV Monthly <YYYY-MM>.csv").
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Runs the export command.
pub async fn run(args: &ExportArgs, cli: &Cli) -> Result<()> {
    let username = resolve(args.username.as_deref(), "Username")?;
    let password = resolve(args.password.as_deref(), "Password")?;
    let month: ReportMonth = resolve(args.month.as_deref(), "Month (YYYY-MM)")?.parse()?;

    info!(month = %month, "Exporting monthly figures");

    let cache = TokenCache::new(&cli.cache_file);
    let fetcher = MonthlyReportFetcher::new(cache);
    let readings = fetcher.fetch(&username, &password, month.as_str()).await?;

    if readings.is_empty() {
        warn!(month = %month, "No readings returned; writing a header-only report");
    }

    let rows = report_rows(&readings)?;
    let path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(report_file_name(&month)));

    // The one place a failure degrades gracefully: a report that cannot be
    // written (open in another program, unwritable directory) is reported,
    // the run itself still succeeded at fetching.
    match save_report(&path, &rows) {
        Ok(()) => {
            if !cli.quiet {
                println!("Figures are in file {}", path.display());
            }
        }
        Err(e) => {
            warn!(error = %e, path = %path.display(), "Report save failed");
            eprintln!(
                "ERROR: Unable to save report {} - file is open elsewhere or otherwise locked",
                path.display()
            );
        }
    }

    Ok(())
}

/// Returns the given value, or prompts for one on the terminal.
fn resolve(value: Option<&str>, label: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v.to_string()),
        None => prompt(label),
    }
}

/// Prompts on stderr and reads one trimmed line from stdin.
fn prompt(label: &str) -> Result<String> {
    eprint!("{label}: ");
    io::stderr().flush().context("Failed to flush prompt")?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .with_context(|| format!("Failed to read {label} from stdin"))?;

    Ok(line.trim().to_string())
}
