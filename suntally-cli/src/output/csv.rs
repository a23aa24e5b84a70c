//! CSV report writer.
//!
//! One row per day, columns `Date, PV, Load, Export, Import, Discharge,
//! Charge`, rows in the order the readings were built. A day missing one of
//! the metric columns is a hard error; no zero is substituted.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use suntally_core::{CoreError, MonthlyReadings, ReportMonth};

/// Metric columns, in output order. The date column precedes them.
pub const METRIC_COLUMNS: [&str; 6] = ["PV", "Load", "Export", "Import", "Discharge", "Charge"];

/// Default report file name for a month.
pub fn report_file_name(month: &ReportMonth) -> String {
    format!("PV Monthly {month}.csv")
}

// ============================================================================
// Row Building
// ============================================================================

/// Builds the report rows, header first.
///
/// Fails on a day missing any metric column or carrying an unparseable
/// date key.
pub fn report_rows(readings: &MonthlyReadings) -> Result<Vec<Vec<String>>> {
    let mut rows = Vec::with_capacity(readings.len() + 1);

    let mut header = vec!["Date".to_string()];
    header.extend(METRIC_COLUMNS.iter().map(|c| (*c).to_string()));
    rows.push(header);

    for (date, metrics) in readings.iter() {
        let mut row = Vec::with_capacity(METRIC_COLUMNS.len() + 1);
        row.push(date_cell(date)?);

        for metric in METRIC_COLUMNS {
            let value = metrics.get(metric).ok_or_else(|| CoreError::MissingMetric {
                date: date.to_string(),
                metric: metric.to_string(),
            })?;
            row.push(value.to_string());
        }

        rows.push(row);
    }

    Ok(rows)
}

/// Renders a date cell as `DD-Mon-YY` from the first ten characters of the
/// API's time key.
fn date_cell(time: &str) -> Result<String> {
    let date = NaiveDate::parse_from_str(time.get(0..10).unwrap_or(time), "%Y-%m-%d")
        .with_context(|| format!("Unparseable reading date: {time}"))?;
    Ok(date.format("%d-%b-%y").to_string())
}

// ============================================================================
// File Output
// ============================================================================

/// Writes the rows to `path` as CSV.
pub fn save_report(path: &Path, rows: &[Vec<String>]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
