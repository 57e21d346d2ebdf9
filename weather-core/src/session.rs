use std::sync::Arc;

use crate::{
    Config, Credential, HistoryDay, HistoryError, WeatherError, WeatherSnapshot,
    fetcher::{HistoryFetcher, WeatherFetcher},
    provider::{
        CurrentConditionsSource, HistorySource, current_source_from_config,
        history_source_from_config,
    },
    range::{Clock, LocalClock},
};

/// One user's lookup session: the credential cell plus both fetchers.
///
/// Data flows one way: a search yields a snapshot, whose coordinates feed the
/// history lookup when the user asks for it.
#[derive(Debug)]
pub struct Session {
    weather: WeatherFetcher,
    history: HistoryFetcher,
    credential: Credential,
}

impl Session {
    pub fn new(
        current: Arc<dyn CurrentConditionsSource>,
        history: Arc<dyn HistorySource>,
        clock: Arc<dyn Clock>,
        credential: Credential,
    ) -> Self {
        Self {
            weather: WeatherFetcher::new(current),
            history: HistoryFetcher::new(history, clock),
            credential,
        }
    }

    /// Session against the endpoints in `config`, dated by the local calendar.
    pub fn from_config(config: &Config, credential: Credential) -> anyhow::Result<Self> {
        Ok(Self::new(
            current_source_from_config(config)?,
            history_source_from_config(config)?,
            Arc::new(LocalClock),
            credential,
        ))
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn set_credential(&mut self, credential: Credential) {
        self.credential = credential;
    }

    /// Look up `city`; a new search supersedes the previous snapshot and history.
    pub async fn search(&self, city: &str) -> Option<Result<WeatherSnapshot, WeatherError>> {
        if city.trim().is_empty() {
            return None;
        }
        self.history.reset();
        self.weather.fetch_current(city, &self.credential).await
    }

    /// Previous-week report for the displayed snapshot; `None` when nothing is displayed.
    pub async fn previous_report(&self) -> Option<Result<Vec<HistoryDay>, HistoryError>> {
        let snapshot = self.weather.snapshot()?;
        Some(self.history.fetch_history(snapshot.coordinates).await)
    }

    pub fn is_busy(&self) -> bool {
        self.weather.is_busy() || self.history.is_busy()
    }

    pub fn weather(&self) -> &WeatherFetcher {
        &self.weather
    }

    pub fn history(&self) -> &HistoryFetcher {
        &self.history
    }
}
