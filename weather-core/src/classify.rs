//! Weather-code classification for the historical-range provider.
//!
//! Both tables test bounds in ascending order and the first match wins. The
//! buckets intentionally do not line up with the WMO table, nor with each
//! other: the emoji table has fewer buckets than the label table.

/// Human label for a daily weather code.
pub fn weather_label(code: i32) -> &'static str {
    if code == 0 {
        "Clear sky"
    } else if code <= 3 {
        "Partly cloudy"
    } else if code <= 48 {
        "Foggy"
    } else if code <= 57 {
        "Drizzle"
    } else if code <= 65 {
        "Rain"
    } else if code <= 67 {
        "Freezing rain"
    } else if code <= 77 {
        "Snow"
    } else if code <= 82 {
        "Rain showers"
    } else if code <= 86 {
        "Snow showers"
    } else if code <= 99 {
        "Thunderstorm"
    } else {
        "Unknown"
    }
}

/// Emoji glyph for a daily weather code.
pub fn weather_emoji(code: i32) -> &'static str {
    if code == 0 {
        "☀️"
    } else if code <= 3 {
        "⛅"
    } else if code <= 48 {
        "🌫️"
    } else if code <= 65 {
        "🌧️"
    } else if code <= 77 {
        "❄️"
    } else if code <= 82 {
        "🌦️"
    } else if code <= 99 {
        "⛈️"
    } else {
        "🌡️"
    }
}
