use crate::{
    Config, Coordinates, Credential, HistoryDay, HistoryError, HistoryRange, WeatherError,
    WeatherSnapshot,
    provider::{openmeteo::OpenMeteoArchive, openweather::OpenWeatherProvider},
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod openmeteo;
pub mod openweather;

/// Current conditions by city name.
#[async_trait]
pub trait CurrentConditionsSource: Send + Sync + Debug {
    async fn current(
        &self,
        city: &str,
        credential: &Credential,
    ) -> Result<WeatherSnapshot, WeatherError>;
}

/// Daily aggregates for a past date window.
#[async_trait]
pub trait HistorySource: Send + Sync + Debug {
    async fn daily_history(
        &self,
        coordinates: Coordinates,
        range: HistoryRange,
    ) -> Result<Vec<HistoryDay>, HistoryError>;
}

/// Construct the current-conditions source described by `config`.
pub fn current_source_from_config(
    config: &Config,
) -> anyhow::Result<Arc<dyn CurrentConditionsSource>> {
    let http = config.http_client()?;
    Ok(Arc::new(OpenWeatherProvider::new(http, &config.openweather_url)))
}

/// Construct the historical-range source described by `config`.
pub fn history_source_from_config(config: &Config) -> anyhow::Result<Arc<dyn HistorySource>> {
    let http = config.http_client()?;
    Ok(Arc::new(OpenMeteoArchive::new(http, &config.archive_url)))
}

pub(crate) fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body;
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
