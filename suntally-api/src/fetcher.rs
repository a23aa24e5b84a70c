//! Monthly report fetcher.
//!
//! Runs the whole chain for one report: bearer token (cache or login),
//! plant id, monthly readings. Each call completes before the next begins.

use suntally_core::MonthlyReadings;
use suntally_store::TokenCache;
use tracing::{info, instrument};

use crate::auth::AuthClient;
use crate::energy::EnergyClient;
use crate::error::ApiError;
use crate::plants::PlantClient;
use crate::SUNSYNK_API_BASE;

// ============================================================================
// Fetcher
// ============================================================================

/// Fetches one month of daily readings for the account's plant.
#[derive(Debug)]
pub struct MonthlyReportFetcher {
    auth: AuthClient,
    plants: PlantClient,
    energy: EnergyClient,
}

impl MonthlyReportFetcher {
    /// Creates a fetcher against the production API.
    pub fn new(cache: TokenCache) -> Self {
        Self::with_base_url(SUNSYNK_API_BASE, cache)
    }

    /// Creates a fetcher against a custom API base (tests point this at a
    /// local mock server).
    pub fn with_base_url(base_url: &str, cache: TokenCache) -> Self {
        Self {
            auth: AuthClient::new(base_url, cache),
            plants: PlantClient::new(base_url),
            energy: EnergyClient::new(base_url),
        }
    }

    /// Fetches the daily readings for `month` (`YYYY-MM`).
    #[instrument(skip(self, password))]
    pub async fn fetch(
        &self,
        username: &str,
        password: &str,
        month: &str,
    ) -> Result<MonthlyReadings, ApiError> {
        let bearer = self.auth.bearer_token(username, password).await?;
        let plant_id = self.plants.plant_id(&bearer).await?;
        let readings = self.energy.monthly_readings(&bearer, &plant_id, month).await?;

        info!(plant_id = %plant_id, days = readings.len(), "Fetched monthly readings");
        Ok(readings)
    }
}

// ============================================================================
// Tests
// ============================================================================
