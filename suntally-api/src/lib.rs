// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # suntally API
//!
//! Client for the Sunsynk cloud API.
//!
//! The endpoints mirror what the vendor's web dashboard calls:
//!
//! - login: `POST /oauth/token`
//! - plant listing: `GET /api/v1/plants?page=1&limit=10&name=&status=`
//! - monthly stats by day: `GET /api/v1/plant/energy/<plantId>/month?lan=en&date=<YYYY-MM>&id=<plantId>`
//!
//! All calls are strictly sequential: login (or cache hit), then plant
//! resolution, then the stats fetch. [`MonthlyReportFetcher`] runs the whole
//! chain and returns the per-day readings.

pub mod auth;
pub mod energy;
pub mod error;
pub mod fetcher;
pub mod http;
pub mod plants;

pub use auth::AuthClient;
pub use energy::EnergyClient;
pub use error::ApiError;
pub use fetcher::MonthlyReportFetcher;
pub use http::HttpClient;
pub use plants::PlantClient;

/// Production API base URL.
///
/// The same API was previously served from `https://pv.inteless.com`.
pub const SUNSYNK_API_BASE: &str = "https://api.sunsynk.net";
