// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # suntally Core
//!
//! Core types and models for the suntally report exporter.
//!
//! This crate provides the foundational types used across all other
//! suntally crates, including:
//!
//! - The cached bearer credential and its expiry policy
//! - Per-day energy readings for one month
//! - The validated report month
//! - Error types
//!
//! ## Key Types
//!
//! - [`CachedCredential`] - Bearer token with an absolute expiry timestamp
//! - [`MonthlyReadings`] - Per-day metric values, keyed by date string
//! - [`ReportMonth`] - A `YYYY-MM` month validated at the CLI boundary

pub mod error;
pub mod models;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    expiry_from_day_start, CachedCredential, DayMetrics, MonthlyReadings, ReportMonth,
};
