use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::{Coordinates, HistoryDay, HistoryError, HistoryRange, provider::truncate_body};

use super::HistorySource;

const DAILY_FIELDS: &str =
    "temperature_2m_max,temperature_2m_min,windspeed_10m_max,precipitation_sum,weathercode";

/// Open-Meteo historical archive (`v1/archive`) client.
#[derive(Debug, Clone)]
pub struct OpenMeteoArchive {
    base_url: String,
    http: Client,
}

impl OpenMeteoArchive {
    pub fn new(http: Client, base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/archive", self.base_url)
    }
}

/// Parallel per-day arrays. The archive reports gaps as `null`.
#[derive(Debug, Deserialize)]
struct ArchiveDaily {
    time: Vec<String>,
    temperature_2m_max: Vec<Option<f64>>,
    temperature_2m_min: Vec<Option<f64>>,
    windspeed_10m_max: Vec<Option<f64>>,
    precipitation_sum: Vec<Option<f64>>,
    weathercode: Vec<Option<i32>>,
}

#[derive(Debug, Deserialize)]
struct ArchiveResponse {
    daily: ArchiveDaily,
}

impl ArchiveDaily {
    /// Zip the arrays positionally, keeping the order received.
    fn into_days(self) -> Result<Vec<HistoryDay>, HistoryError> {
        let n = self.time.len();
        let lengths = [
            self.temperature_2m_max.len(),
            self.temperature_2m_min.len(),
            self.windspeed_10m_max.len(),
            self.precipitation_sum.len(),
            self.weathercode.len(),
        ];
        if lengths.iter().any(|&len| len != n) {
            return Err(HistoryError::Unexpected(format!(
                "daily arrays have mismatched lengths: time={n}, others={lengths:?}"
            )));
        }

        self.time
            .iter()
            .enumerate()
            .map(|(i, raw)| {
                let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| {
                    HistoryError::Unexpected(format!("invalid date {raw:?}: {e}"))
                })?;

                Ok(HistoryDay::new(
                    date,
                    self.temperature_2m_max[i].unwrap_or_default(),
                    self.temperature_2m_min[i].unwrap_or_default(),
                    self.windspeed_10m_max[i].unwrap_or_default(),
                    self.precipitation_sum[i].unwrap_or_default(),
                    self.weathercode[i].unwrap_or_default(),
                ))
            })
            .collect()
    }
}

#[async_trait]
impl HistorySource for OpenMeteoArchive {
    #[instrument(skip(self), fields(lat = %coordinates.lat, lon = %coordinates.lon))]
    async fn daily_history(
        &self,
        coordinates: Coordinates,
        range: HistoryRange,
    ) -> Result<Vec<HistoryDay>, HistoryError> {
        let latitude = coordinates.lat.to_string();
        let longitude = coordinates.lon.to_string();
        let start_date = range.start_param();
        let end_date = range.end_param();

        debug!(%start_date, %end_date, "fetching daily history");

        let res = self
            .http
            .get(self.endpoint())
            .query(&[
                ("latitude", latitude.as_str()),
                ("longitude", longitude.as_str()),
                ("start_date", start_date.as_str()),
                ("end_date", end_date.as_str()),
                ("daily", DAILY_FIELDS),
                ("timezone", "auto"),
            ])
            .send()
            .await
            .map_err(|e| HistoryError::Unexpected(format!("request failed: {e}")))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| HistoryError::Unexpected(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            warn!(%status, body = truncate_body(&body), "history request failed");
            return Err(HistoryError::HistoryUnavailable);
        }

        let parsed: ArchiveResponse = serde_json::from_str(&body)
            .map_err(|e| HistoryError::Unexpected(format!("malformed history payload: {e}")))?;

        parsed.daily.into_days()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn daily(json: serde_json::Value) -> ArchiveDaily {
        serde_json::from_value(json).expect("daily block should parse")
    }

    #[test]
    fn endpoint_ignores_trailing_slash() {
        let archive = OpenMeteoArchive::new(Client::new(), "http://localhost:1234/");
        assert_eq!(archive.endpoint(), "http://localhost:1234/v1/archive");
    }

    #[test]
    fn zips_in_received_order_without_resorting() {
        let days = daily(serde_json::json!({
            "time": ["2026-10-13", "2026-10-11", "2026-10-12"],
            "temperature_2m_max": [10.4, 12.5, 11.0],
            "temperature_2m_min": [1.5, 2.4, -0.5],
            "windspeed_10m_max": [9.9, 10.5, 30.2],
            "precipitation_sum": [0.0, 1.25, 0.3],
            "weathercode": [0, 61, 3]
        }))
        .into_days()
        .expect("should zip");

        let dates: Vec<_> = days.iter().map(|d| d.date.to_string()).collect();
        assert_eq!(dates, ["2026-10-13", "2026-10-11", "2026-10-12"]);

        assert_eq!(days[1].temp_max_c, 13);
        assert_eq!(days[1].temp_min_c, 2);
        assert_eq!(days[1].wind_max_kmh, 11);
        assert_eq!(days[1].precipitation_mm, 1.25);
        assert_eq!(days[2].temp_min_c, 0);
    }

    #[test]
    fn nulls_are_read_as_zero() {
        let days = daily(serde_json::json!({
            "time": ["2026-10-11"],
            "temperature_2m_max": [null],
            "temperature_2m_min": [null],
            "windspeed_10m_max": [null],
            "precipitation_sum": [null],
            "weathercode": [null]
        }))
        .into_days()
        .expect("should zip");

        assert_eq!(days[0].temp_max_c, 0);
        assert_eq!(days[0].precipitation_mm, 0.0);
        assert_eq!(days[0].weather_code, 0);
    }

    #[test]
    fn mismatched_lengths_are_rejected() {
        let err = daily(serde_json::json!({
            "time": ["2026-10-11", "2026-10-12"],
            "temperature_2m_max": [1.0],
            "temperature_2m_min": [1.0, 2.0],
            "windspeed_10m_max": [1.0, 2.0],
            "precipitation_sum": [1.0, 2.0],
            "weathercode": [1, 2]
        }))
        .into_days()
        .unwrap_err();

        assert!(matches!(err, HistoryError::Unexpected(msg) if msg.contains("mismatched")));
    }

    #[test]
    fn bad_date_is_unexpected() {
        let err = daily(serde_json::json!({
            "time": ["yesterday"],
            "temperature_2m_max": [1.0],
            "temperature_2m_min": [1.0],
            "windspeed_10m_max": [1.0],
            "precipitation_sum": [1.0],
            "weathercode": [1]
        }))
        .into_days()
        .unwrap_err();

        assert!(matches!(err, HistoryError::Unexpected(_)));
    }
}
