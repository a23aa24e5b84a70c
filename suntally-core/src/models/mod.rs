//! Domain models for suntally.

pub mod credential;
pub mod month;
pub mod readings;

pub use credential::{expiry_from_day_start, CachedCredential};
pub use month::ReportMonth;
pub use readings::{DayMetrics, MonthlyReadings};
