//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration & credential handling
//! - The current-conditions and historical-range HTTP sources
//! - Weather-code classification and the trailing-week date range
//! - Stateful fetchers with busy tracking and stale-response suppression
//! - Shared domain models (snapshots, history days)
//!
//! It is used by `weather-cli`, but can also be reused by other front-ends.

pub mod classify;
pub mod config;
pub mod credential;
pub mod error;
pub mod fetcher;
pub mod model;
pub mod provider;
pub mod query;
pub mod range;
pub mod session;

pub use classify::{weather_emoji, weather_label};
pub use config::Config;
pub use credential::Credential;
pub use error::{HistoryError, WeatherError};
pub use fetcher::{FetchState, HistoryBatch, HistoryFetcher, WeatherFetcher};
pub use model::{Coordinates, HistoryDay, WeatherSnapshot};
pub use provider::{CurrentConditionsSource, HistorySource};
pub use query::QueryInput;
pub use range::{Clock, FixedClock, HistoryRange, LocalClock};
pub use session::Session;
