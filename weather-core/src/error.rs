use thiserror::Error;

/// Failures of a current-conditions lookup.
///
/// The `Display` text is what the user sees; it replaces any previous result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WeatherError {
    #[error("Please enter your OpenWeatherMap API key first.")]
    MissingCredential,

    #[error("Invalid API key. Please check your OpenWeatherMap API key.")]
    InvalidCredential,

    #[error("City \"{0}\" not found. Please check the spelling.")]
    CityNotFound(String),

    /// Any other non-success status, or a body that does not have the expected shape.
    #[error("Something went wrong. Please try again.")]
    UnknownFailure,

    /// Raised outside the modeled status codes (unreachable host, broken body stream, ...).
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// Failures of a historical-range lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("Failed to fetch historical weather data.")]
    HistoryUnavailable,

    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}
