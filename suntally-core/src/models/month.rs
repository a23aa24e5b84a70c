//! Validated report month.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::CoreError;

// ============================================================================
// Report Month
// ============================================================================

/// A report month in `YYYY-MM` form.
///
/// Validation happens here, at the edge: the energy client itself forwards
/// whatever month string it is handed, so callers constructing requests
/// directly pass their strings through unvalidated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportMonth(String);

impl ReportMonth {
    /// The month as its `YYYY-MM` wire form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ReportMonth {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Fixed width first: chrono accepts unpadded "2023-8-01".
        if s.len() != 7 {
            return Err(CoreError::InvalidMonthFormat(s.to_string()));
        }

        NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d")
            .map_err(|_| CoreError::InvalidMonthFormat(s.to_string()))?;

        Ok(Self(s.to_string()))
    }
}

impl fmt::Display for ReportMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_valid_month() {
        let month: ReportMonth = "2023-08".parse().unwrap();
        assert_eq!(month.as_str(), "2023-08");
        assert_eq!(month.to_string(), "2023-08");
    }

    #[test]
    fn test_accepts_december() {
        assert!("2024-12".parse::<ReportMonth>().is_ok());
    }

    #[test]
    fn test_rejects_month_thirteen() {
        assert!("2023-13".parse::<ReportMonth>().is_err());
    }

    #[test]
    fn test_rejects_month_zero() {
        assert!("2023-00".parse::<ReportMonth>().is_err());
    }

    #[test]
    fn test_rejects_short_year() {
        assert!("23-08".parse::<ReportMonth>().is_err());
    }

    #[test]
    fn test_rejects_unpadded_month() {
        assert!("2023-8".parse::<ReportMonth>().is_err());
    }

    #[test]
    fn test_rejects_garbage() {
        assert!("abc".parse::<ReportMonth>().is_err());
        assert!("".parse::<ReportMonth>().is_err());
        assert!("2023/08".parse::<ReportMonth>().is_err());
    }

    #[test]
    fn test_error_carries_input() {
        let err = "2023-13".parse::<ReportMonth>().unwrap_err();
        assert!(err.to_string().contains("2023-13"));
    }
}
