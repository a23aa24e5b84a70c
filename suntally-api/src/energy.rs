//! Monthly energy statistics.
//!
//! The monthly endpoint returns one record series per metric label (PV,
//! Load, Export, Import, Discharge, Charge), each holding a `{time, value}`
//! point per day. [`readings_from_series`] pivots that into a per-day view.

use serde::{Deserialize, Deserializer};
use suntally_core::MonthlyReadings;
use tracing::{debug, instrument};

use crate::error::ApiError;
use crate::http::HttpClient;

// ============================================================================
// Wire Types
// ============================================================================

/// Monthly energy response envelope.
#[derive(Debug, Deserialize)]
struct EnergyResponse {
    data: EnergyData,
}

/// Series collection inside the energy response.
#[derive(Debug, Deserialize)]
struct EnergyData {
    infos: Vec<RecordSeries>,
}

/// One metric's series of daily points.
#[derive(Debug, Deserialize)]
pub(crate) struct RecordSeries {
    pub(crate) label: String,
    pub(crate) records: Vec<RecordPoint>,
}

/// A single daily reading within a series.
#[derive(Debug, Deserialize)]
pub(crate) struct RecordPoint {
    pub(crate) time: String,
    #[serde(deserialize_with = "numeric_value")]
    pub(crate) value: f64,
}

/// The API serializes values as JSON numbers or as number strings,
/// depending on the metric. Accept both.
fn numeric_value<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(value) => Ok(value),
        Raw::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

// ============================================================================
// Reshaping
// ============================================================================

/// Pivots metric-major record series into day-major readings.
///
/// `result[time][label] = value` for every point of every series; the day
/// entry is created on first encounter, and the last write per
/// `(time, label)` pair wins. Series order does not affect the result.
pub(crate) fn readings_from_series(series: &[RecordSeries]) -> MonthlyReadings {
    let mut readings = MonthlyReadings::new();
    for s in series {
        for point in &s.records {
            readings.insert(&point.time, &s.label, point.value);
        }
    }
    readings
}

// ============================================================================
// Energy Client
// ============================================================================

/// Fetches one month of daily readings for a plant.
#[derive(Debug)]
pub struct EnergyClient {
    http: HttpClient,
    base_url: String,
}

impl EnergyClient {
    /// Creates an energy client against `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: HttpClient::new(),
            base_url: base_url.into(),
        }
    }

    /// Fetches the daily readings for `month` (`YYYY-MM`).
    ///
    /// The month string is forwarded as-is; a malformed one errors upstream
    /// or produces an empty result, it is not validated here.
    #[instrument(skip(self, bearer))]
    pub async fn monthly_readings(
        &self,
        bearer: &str,
        plant_id: &str,
        month: &str,
    ) -> Result<MonthlyReadings, ApiError> {
        debug!("Fetching monthly energy");

        let url = format!(
            "{}/api/v1/plant/energy/{}/month?lan=en&date={}&id={}",
            self.base_url, plant_id, month, plant_id
        );
        let response = self.http.get_with_auth(&url, bearer).await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Http(format!("monthly energy: HTTP {status}")));
        }

        let energy: EnergyResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("monthly energy body: {e}")))?;

        let readings = readings_from_series(&energy.data.infos);
        debug!(days = readings.len(), series = energy.data.infos.len(), "Reshaped readings");
        Ok(readings)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn series(label: &str, points: &[(&str, f64)]) -> RecordSeries {
        RecordSeries {
            label: label.to_string(),
            records: points
                .iter()
                .map(|(time, value)| RecordPoint {
                    time: (*time).to_string(),
                    value: *value,
                })
                .collect(),
        }
    }

    #[test]
    fn test_reshape_pivots_series_into_days() {
        let input = vec![
            series("PV", &[("2023-08-01", 5.0)]),
            series("Load", &[("2023-08-01", 3.0)]),
        ];

        let readings = readings_from_series(&input);

        assert_eq!(readings.len(), 1);
        assert_eq!(readings.value("2023-08-01", "PV"), Some(5.0));
        assert_eq!(readings.value("2023-08-01", "Load"), Some(3.0));
    }

    #[test]
    fn test_reshape_is_idempotent() {
        let input = vec![
            series("PV", &[("2023-08-01", 5.0), ("2023-08-02", 6.2)]),
            series("Load", &[("2023-08-01", 3.0), ("2023-08-02", 2.8)]),
        ];

        assert_eq!(readings_from_series(&input), readings_from_series(&input));
    }

    #[test]
    fn test_reshape_last_duplicate_wins() {
        let input = vec![
            series("PV", &[("2023-08-01", 5.0)]),
            series("PV", &[("2023-08-01", 9.9)]),
        ];

        let readings = readings_from_series(&input);
        assert_eq!(readings.value("2023-08-01", "PV"), Some(9.9));
    }

    #[test]
    fn test_reshape_label_order_does_not_matter() {
        let forward = vec![
            series("PV", &[("2023-08-01", 5.0)]),
            series("Load", &[("2023-08-01", 3.0)]),
        ];
        let reversed = vec![
            series("Load", &[("2023-08-01", 3.0)]),
            series("PV", &[("2023-08-01", 5.0)]),
        ];

        assert_eq!(
            readings_from_series(&forward),
            readings_from_series(&reversed)
        );
    }

    #[test]
    fn test_value_accepts_number_strings() {
        let point: RecordPoint =
            serde_json::from_value(json!({"time": "2023-08-01", "value": "5.4"})).unwrap();
        assert_eq!(point.value, 5.4);

        let point: RecordPoint =
            serde_json::from_value(json!({"time": "2023-08-01", "value": 5.4})).unwrap();
        assert_eq!(point.value, 5.4);
    }

    #[test]
    fn test_value_rejects_garbage_strings() {
        let result: Result<RecordPoint, _> =
            serde_json::from_value(json!({"time": "2023-08-01", "value": "n/a"}));
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fetch_builds_expected_request() {
        let mut server = mockito::Server::new_async().await;
        let body = json!({"data": {"infos": [
            {"label": "PV", "records": [{"time": "2023-08-01", "value": 5.0}]},
            {"label": "Load", "records": [{"time": "2023-08-01", "value": 3.0}]}
        ]}})
        .to_string();

        let mock = server
            .mock("GET", "/api/v1/plant/energy/99741/month")
            .match_query(mockito::Matcher::AllOf(vec![
                mockito::Matcher::UrlEncoded("lan".into(), "en".into()),
                mockito::Matcher::UrlEncoded("date".into(), "2023-08".into()),
                mockito::Matcher::UrlEncoded("id".into(), "99741".into()),
            ]))
            .match_header("authorization", "Bearer token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let client = EnergyClient::new(server.url());
        let readings = client
            .monthly_readings("Bearer token", "99741", "2023-08")
            .await
            .unwrap();

        assert_eq!(readings.value("2023-08-01", "PV"), Some(5.0));
        assert_eq!(readings.value("2023-08-01", "Load"), Some(3.0));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_empty_month_yields_empty_readings() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/plant/energy/99741/month")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"data": {"infos": []}}).to_string())
            .create_async()
            .await;

        let client = EnergyClient::new(server.url());
        let readings = client
            .monthly_readings("Bearer token", "99741", "not-a-month")
            .await
            .unwrap();

        assert!(readings.is_empty());
    }

    #[tokio::test]
    async fn test_http_failure_is_fatal() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api/v1/plant/energy/99741/month")
            .match_query(mockito::Matcher::Any)
            .with_status(502)
            .create_async()
            .await;

        let client = EnergyClient::new(server.url());
        let result = client
            .monthly_readings("Bearer token", "99741", "2023-08")
            .await;

        assert!(matches!(result, Err(ApiError::Http(_))));
    }
}
