use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::classify::{weather_emoji, weather_label};

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Point-in-time reading for one location, as reported by the current-conditions endpoint.
///
/// Temperatures keep the source precision; use the `*_rounded` helpers for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location_name: String,
    pub country: String,
    pub coordinates: Coordinates,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub description: String,
    pub icon: String,
    pub condition: String,
}

impl WeatherSnapshot {
    pub fn temperature_rounded(&self) -> i32 {
        round_half_up(self.temperature_c)
    }

    pub fn feels_like_rounded(&self) -> i32 {
        round_half_up(self.feels_like_c)
    }

    /// Large variant of the provider's condition icon.
    pub fn icon_url(&self) -> String {
        format!("https://openweathermap.org/img/wn/{}@4x.png", self.icon)
    }
}

/// Daily aggregate for one past day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryDay {
    pub date: NaiveDate,
    /// Short English weekday, e.g. `Mon`.
    pub day_name: String,
    pub temp_max_c: i32,
    pub temp_min_c: i32,
    pub wind_max_kmh: i32,
    pub precipitation_mm: f64,
    pub weather_code: i32,
}

impl HistoryDay {
    pub fn new(
        date: NaiveDate,
        temp_max_c: f64,
        temp_min_c: f64,
        wind_max_kmh: f64,
        precipitation_mm: f64,
        weather_code: i32,
    ) -> Self {
        Self {
            date,
            day_name: date.format("%a").to_string(),
            temp_max_c: round_half_up(temp_max_c),
            temp_min_c: round_half_up(temp_min_c),
            wind_max_kmh: round_half_up(wind_max_kmh),
            precipitation_mm,
            weather_code,
        }
    }

    pub fn label(&self) -> &'static str {
        weather_label(self.weather_code)
    }

    pub fn emoji(&self) -> &'static str {
        weather_emoji(self.weather_code)
    }

    /// Month and day, e.g. `Oct 17`.
    pub fn short_date(&self) -> String {
        self.date.format("%b %-d").to_string()
    }
}

/// Rounds to the nearest integer, halves towards positive infinity (`-2.5` becomes `-2`).
pub fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}
