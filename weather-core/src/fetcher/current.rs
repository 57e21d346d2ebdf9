use parking_lot::Mutex;
use std::sync::Arc;
use tracing::debug;

use super::{FetchState, Settle, Slot};
use crate::{Credential, WeatherError, WeatherSnapshot, provider::CurrentConditionsSource};

/// Looks up current conditions and holds the latest outcome plus a busy flag.
#[derive(Debug)]
pub struct WeatherFetcher {
    source: Arc<dyn CurrentConditionsSource>,
    slot: Mutex<Slot<WeatherSnapshot, WeatherError>>,
}

impl WeatherFetcher {
    pub fn new(source: Arc<dyn CurrentConditionsSource>) -> Self {
        Self { source, slot: Mutex::default() }
    }

    /// Fetch current conditions for `city`.
    ///
    /// Returns `None` without touching any state when `city` is blank. A
    /// blank credential fails with [`WeatherError::MissingCredential`] before
    /// any request is made. The outcome is returned to the caller either way,
    /// but only written to [`Self::state`] if no newer call was issued since.
    pub async fn fetch_current(
        &self,
        city: &str,
        credential: &Credential,
    ) -> Option<Result<WeatherSnapshot, WeatherError>> {
        let city = city.trim();
        if city.is_empty() {
            return None;
        }

        let settle = Settle::begin(&self.slot);

        let result = if credential.is_empty() {
            Err(WeatherError::MissingCredential)
        } else {
            self.source.current(city, credential).await
        };

        if let Err(err) = &result {
            debug!(city, error = %err, "current conditions lookup failed");
        }

        settle.finish(result.clone());
        Some(result)
    }

    pub fn state(&self) -> FetchState<WeatherSnapshot, WeatherError> {
        self.slot.lock().state.clone()
    }

    /// The snapshot on display, if the latest request succeeded.
    pub fn snapshot(&self) -> Option<WeatherSnapshot> {
        self.slot.lock().state.success().cloned()
    }

    pub fn is_busy(&self) -> bool {
        self.slot.lock().busy
    }

    /// Drop the displayed result and ignore anything still in flight.
    pub fn clear(&self) {
        self.slot.lock().reset();
    }
}
