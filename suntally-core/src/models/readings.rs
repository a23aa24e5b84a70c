//! Per-day energy readings for one month.

use std::collections::HashMap;

/// Metric values recorded for one calendar day, keyed by series label
/// (e.g. `"PV"`, `"Load"`, `"Export"`).
pub type DayMetrics = HashMap<String, f64>;

// ============================================================================
// Monthly Readings
// ============================================================================

/// Daily readings for one month, keyed by the API's date string.
///
/// Built freshly on every stats fetch by replaying the upstream record
/// series point by point. Iteration yields days in first-seen insertion
/// order — the order dates appear in the upstream records, not an explicit
/// date sort. Writing the same `(date, label)` pair twice keeps the later
/// value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlyReadings {
    order: Vec<String>,
    days: HashMap<String, DayMetrics>,
}

impl MonthlyReadings {
    /// Creates an empty set of readings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `value` for `label` on `date`, creating the day on first
    /// encounter. The last write per `(date, label)` pair wins.
    pub fn insert(&mut self, date: &str, label: &str, value: f64) {
        if !self.days.contains_key(date) {
            self.order.push(date.to_string());
        }
        self.days
            .entry(date.to_string())
            .or_default()
            .insert(label.to_string(), value);
    }

    /// Returns the value recorded for `label` on `date`, if any.
    pub fn value(&self, date: &str, label: &str) -> Option<f64> {
        self.days.get(date).and_then(|m| m.get(label)).copied()
    }

    /// Returns all metrics recorded for `date`, if any.
    pub fn day(&self, date: &str) -> Option<&DayMetrics> {
        self.days.get(date)
    }

    /// Number of days with at least one reading.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when no readings have been recorded.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates days in first-seen insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DayMetrics)> {
        self.order.iter().map(|date| {
            let metrics = &self.days[date];
            (date.as_str(), metrics)
        })
    }
}

// ============================================================================
// Tests
// ============================================================================
