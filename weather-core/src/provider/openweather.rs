use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::{Coordinates, Credential, WeatherError, WeatherSnapshot, provider::truncate_body};

use super::CurrentConditionsSource;

/// OpenWeatherMap `data/2.5/weather` client, metric units.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(http: Client, base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/data/2.5/weather", self.base_url)
    }
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    sys: OwSys,
    coord: OwCoord,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

impl OwCurrentResponse {
    fn into_snapshot(self) -> Option<WeatherSnapshot> {
        let weather = self.weather.into_iter().next()?;

        Some(WeatherSnapshot {
            location_name: self.name,
            country: self.sys.country,
            coordinates: Coordinates { lat: self.coord.lat, lon: self.coord.lon },
            temperature_c: self.main.temp,
            feels_like_c: self.main.feels_like,
            humidity_pct: self.main.humidity,
            wind_speed_mps: self.wind.speed,
            description: weather.description,
            icon: weather.icon,
            condition: weather.main,
        })
    }
}

#[async_trait]
impl CurrentConditionsSource for OpenWeatherProvider {
    #[instrument(skip(self, credential))]
    async fn current(
        &self,
        city: &str,
        credential: &Credential,
    ) -> Result<WeatherSnapshot, WeatherError> {
        let res = self
            .http
            .get(self.endpoint())
            .query(&[("q", city), ("appid", credential.expose()), ("units", "metric")])
            .send()
            .await
            .map_err(|e| WeatherError::Unexpected(format!("request failed: {e}")))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| WeatherError::Unexpected(format!("failed to read response body: {e}")))?;

        debug!(%status, "current conditions response");

        match status {
            StatusCode::NOT_FOUND => return Err(WeatherError::CityNotFound(city.to_string())),
            StatusCode::UNAUTHORIZED => return Err(WeatherError::InvalidCredential),
            s if !s.is_success() => {
                warn!(%status, body = truncate_body(&body), "current conditions request failed");
                return Err(WeatherError::UnknownFailure);
            }
            _ => {}
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body).map_err(|e| {
            warn!(error = %e, "unexpected current conditions payload");
            WeatherError::UnknownFailure
        })?;

        parsed.into_snapshot().ok_or_else(|| {
            warn!("current conditions payload has no weather entry");
            WeatherError::UnknownFailure
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_ignores_trailing_slash() {
        let provider = OpenWeatherProvider::new(Client::new(), "http://localhost:9999/");
        assert_eq!(provider.endpoint(), "http://localhost:9999/data/2.5/weather");
    }

    #[test]
    fn payload_maps_to_snapshot() {
        let body = r#"{
            "coord": {"lon": 2.3488, "lat": 48.8534},
            "weather": [{"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d"}],
            "main": {"temp": 17.52, "feels_like": 16.49, "temp_min": 16.0, "humidity": 72, "pressure": 1015},
            "wind": {"speed": 4.12, "deg": 250},
            "sys": {"country": "FR", "sunrise": 1760000000},
            "name": "Paris",
            "cod": 200
        }"#;

        let parsed: OwCurrentResponse = serde_json::from_str(body).expect("should parse");
        let snap = parsed.into_snapshot().expect("has weather entry");

        assert_eq!(snap.location_name, "Paris");
        assert_eq!(snap.country, "FR");
        assert_eq!(snap.coordinates, Coordinates { lat: 48.8534, lon: 2.3488 });
        assert_eq!(snap.humidity_pct, 72);
        assert_eq!(snap.description, "broken clouds");
        assert_eq!(snap.icon, "04d");
        assert_eq!(snap.condition, "Clouds");
    }

    #[test]
    fn empty_weather_array_is_rejected() {
        let body = r#"{
            "coord": {"lon": 0.0, "lat": 0.0},
            "weather": [],
            "main": {"temp": 1.0, "feels_like": 1.0, "humidity": 1},
            "wind": {"speed": 1.0},
            "sys": {"country": "XX"},
            "name": "Nowhere"
        }"#;

        let parsed: OwCurrentResponse = serde_json::from_str(body).expect("should parse");
        assert!(parsed.into_snapshot().is_none());
    }
}
