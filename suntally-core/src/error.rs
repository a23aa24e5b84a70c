//! Core error types for suntally.

use thiserror::Error;

/// Core error type for suntally operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Month string did not match `YYYY-MM`.
    #[error("Invalid month format (expected YYYY-MM): {0}")]
    InvalidMonthFormat(String),

    /// A day is missing a metric the report requires.
    #[error("No {metric} reading recorded for {date}")]
    MissingMetric {
        /// Date of the incomplete day.
        date: String,
        /// Label of the missing metric column.
        metric: String,
    },
}
