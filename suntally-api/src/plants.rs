//! Plant resolution.
//!
//! One account can register several plants. This client keeps the LAST plant
//! the listing endpoint enumerates; accounts with several plants are not
//! disambiguated. A documented limitation, not a selection strategy.

use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::error::ApiError;
use crate::http::HttpClient;

/// Plant listing endpoint, relative to the API base.
const PLANTS_ENDPOINT: &str = "/api/v1/plants?page=1&limit=10&name=&status=";

// ============================================================================
// Wire Types
// ============================================================================

/// Plant listing response envelope.
#[derive(Debug, Deserialize)]
struct PlantsResponse {
    data: PlantsData,
}

/// Plant collection inside the listing response.
#[derive(Debug, Deserialize)]
struct PlantsData {
    infos: Vec<PlantInfo>,
}

/// One plant registered under the account.
#[derive(Debug, Deserialize)]
struct PlantInfo {
    id: i64,
    #[serde(default)]
    name: Option<String>,
}

// ============================================================================
// Plant Client
// ============================================================================

/// Resolves the account's plant id.
#[derive(Debug)]
pub struct PlantClient {
    http: HttpClient,
    base_url: String,
}

impl PlantClient {
    /// Creates a plant client against `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(),
            base_url: base_url.into(),
        }
    }

    /// Returns the id of the last plant the listing enumerates.
    ///
    /// Multi-plant accounts are not disambiguated; an account with zero
    /// plants is an error.
    #[instrument(skip(self, bearer))]
    pub async fn plant_id(&self, bearer: &str) -> Result<String, ApiError> {
        debug!("Listing plants");

        let url = format!("{}{}", self.base_url, PLANTS_ENDPOINT);
        let response = self.http.get_with_auth(&url, bearer).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http(format!("plant listing: HTTP {status}")));
        }

        let listing: PlantsResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("plant listing body: {e}")))?;

        if listing.data.infos.len() > 1 {
            warn!(
                count = listing.data.infos.len(),
                "Multiple plants on account; keeping the last one"
            );
        }

        let mut plant_id = None;
        for info in &listing.data.infos {
            debug!(id = info.id, name = info.name.as_deref().unwrap_or("-"), "Plant");
            plant_id = Some(info.id);
        }

        plant_id
            .map(|id| id.to_string())
            .ok_or(ApiError::NoPlants)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn listing_body(ids: &[i64]) -> String {
        let infos: Vec<_> = ids
            .iter()
            .map(|id| json!({"id": id, "name": format!("plant-{id}")}))
            .collect();
        json!({"data": {"infos": infos}}).to_string()
    }

    #[tokio::test]
    async fn test_single_plant() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/plants")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("page".into(), "1".into()),
                mockito::Matcher::UrlEncoded("limit".into(), "10".into()),
            ]))
            .match_header("authorization", "Bearer token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(listing_body(&[99_741]))
            .create_async()
            .await;

        let client = PlantClient::new(server.url());
        let id = client.plant_id("Bearer token").await.unwrap();

        assert_eq!(id, "99741");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_last_plant_wins() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/plants")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(listing_body(&[111, 222]))
            .create_async()
            .await;

        let client = PlantClient::new(server.url());
        let id = client.plant_id("Bearer token").await.unwrap();

        assert_eq!(id, "222");
    }

    #[tokio::test]
    async fn test_zero_plants_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/plants")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(listing_body(&[]))
            .create_async()
            .await;

        let client = PlantClient::new(server.url());
        let result = client.plant_id("Bearer token").await;

        assert!(matches!(result, Err(ApiError::NoPlants)));
    }

    #[tokio::test]
    async fn test_http_failure_is_fatal() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/plants")
            .match_query(mockito::Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let client = PlantClient::new(server.url());
        let result = client.plant_id("Bearer token").await;

        assert!(matches!(result, Err(ApiError::Http(_))));
    }
}
