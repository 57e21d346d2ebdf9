use std::fmt::Display;
use weather_core::{HistoryDay, WeatherSnapshot};

pub const EMPTY_STATE: &str = "Search for a city to see the weather";
pub const LOADING: &str = "Fetching weather data…";

/// Weather card: location, headline temperature, and the three stat boxes.
pub fn render_snapshot(snap: &WeatherSnapshot) -> String {
    let feels_like = snap.feels_like_rounded();

    [
        format!("📍 {}, {}", snap.location_name, snap.country),
        String::new(),
        format!("   {}°C  {}", snap.temperature_rounded(), title_case(&snap.description)),
        format!("   Feels like {feels_like}°C"),
        String::new(),
        format!("   Feels Like  {feels_like}°C"),
        format!("   Humidity    {}%", snap.humidity_pct),
        format!("   Wind        {} m/s", snap.wind_speed_mps),
        format!("   Icon        {}", snap.icon_url()),
    ]
    .join("\n")
}

/// One row per day, oldest first.
pub fn render_history(city: &str, days: &[HistoryDay]) -> String {
    let mut lines = vec![format!("Last 7 Days — {city}")];

    lines.extend(days.iter().map(|day| {
        format!(
            "{}  {} {:<7} {:<14} 🌡 {}° / {}°  💨 {} km/h  🌧 {} mm",
            day.emoji(),
            day.day_name,
            day.short_date(),
            day.label(),
            day.temp_max_c,
            day.temp_min_c,
            day.wind_max_kmh,
            day.precipitation_mm,
        )
    }));

    lines.join("\n")
}

pub fn render_error(err: &dyn Display) -> String {
    format!("Error\n  {err}")
}

/// Capitalize the first letter of each word, e.g. `broken clouds` to `Broken Clouds`.
fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
