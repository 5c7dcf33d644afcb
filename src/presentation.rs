//! Presentation mapping
//!
//! Pure functions deriving everything the screen shows from the stored
//! reading, the unit preference and the current time. Nothing here is cached;
//! the view calls `derive_display` on every frame.

use chrono::NaiveDateTime;

use crate::data::weather::icon_url;
use crate::data::{TemperatureUnit, WeatherCategory, WeatherReading, KELVIN_OFFSET};

/// Clock format, e.g. "Thursday, October 15, 2026 at 3:04:05 PM"
const CLOCK_FORMAT: &str = "%A, %B %-d, %Y at %-I:%M:%S %p";

/// Label used when the provider returned an empty city name
const UNKNOWN_LOCATION: &str = "Unknown location";

/// Everything the weather panel displays for one reading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherView {
    /// "City, CC"
    pub location: String,
    pub description: String,
    pub icon: &'static str,
    /// Provider icon image
    pub icon_url: String,
    /// Current temperature in the preferred unit, e.g. "27 °C"
    pub temperature: String,
    /// "Celsius" or "Fahrenheit"
    pub unit_label: &'static str,
    pub min_temp: String,
    pub max_temp: String,
    pub wind: String,
    pub humidity: String,
}

/// Full derived screen state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayState {
    /// Background category, `None` before the first reading
    pub category: Option<WeatherCategory>,
    /// Weather panel, `None` before the first reading
    pub weather: Option<WeatherView>,
    /// Formatted wall clock
    pub clock: String,
}

/// Derives the display state from its sources
pub fn derive_display(
    reading: Option<&WeatherReading>,
    unit: TemperatureUnit,
    now: NaiveDateTime,
) -> DisplayState {
    DisplayState {
        category: category_for(reading),
        weather: reading.map(|r| weather_view(r, unit)),
        clock: format_clock(now),
    }
}

fn weather_view(reading: &WeatherReading, unit: TemperatureUnit) -> WeatherView {
    WeatherView {
        location: location_label(reading),
        description: reading.description.clone(),
        icon: icon_glyph(&reading.icon),
        icon_url: icon_url(&reading.icon),
        temperature: format_temperature(reading.temperature, unit),
        unit_label: unit.label(),
        // Min/max are always shown in Celsius
        min_temp: format_temperature(reading.temp_min, TemperatureUnit::Celsius),
        max_temp: format_temperature(reading.temp_max, TemperatureUnit::Celsius),
        wind: format!("{} m/s", reading.wind_speed),
        humidity: format!("{}%", reading.humidity),
    }
}

/// Rounds to the nearest integer, halves toward positive infinity
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Converts a Kelvin reading to a whole-degree value in `unit`
pub fn convert_temperature(kelvin: f64, unit: TemperatureUnit) -> i64 {
    let celsius = kelvin - KELVIN_OFFSET;
    match unit {
        TemperatureUnit::Celsius => round_half_up(celsius),
        TemperatureUnit::Fahrenheit => round_half_up(celsius * 9.0 / 5.0 + 32.0),
    }
}

/// Formats a Kelvin reading for display, e.g. "27 °C"
pub fn format_temperature(kelvin: f64, unit: TemperatureUnit) -> String {
    format!("{} {}", convert_temperature(kelvin, unit), unit.symbol())
}

/// Maps a provider condition code to a background category.
///
/// Bands are checked in order and the first match wins:
/// - 200-599: rainy (thunderstorm, drizzle, rain)
/// - 600-699: snowy
/// - 700-799: foggy (atmosphere)
/// - 800: sunny (clear sky)
/// - anything else, including 801+ clouds: cloudy
pub fn classify(code: u32) -> WeatherCategory {
    match code {
        200..=599 => WeatherCategory::Rainy,
        600..=699 => WeatherCategory::Snowy,
        700..=799 => WeatherCategory::Foggy,
        800 => WeatherCategory::Sunny,
        _ => WeatherCategory::Cloudy,
    }
}

/// Category for the current reading, `None` when there is nothing to show
pub fn category_for(reading: Option<&WeatherReading>) -> Option<WeatherCategory> {
    reading.map(|r| classify(r.condition_code))
}

/// "City, CC" with fallbacks for fields the provider left empty
pub fn location_label(reading: &WeatherReading) -> String {
    let city = reading.city.trim();
    let country = reading.country.trim();
    match (city.is_empty(), country.is_empty()) {
        (true, _) => UNKNOWN_LOCATION.to_string(),
        (false, true) => city.to_string(),
        (false, false) => format!("{}, {}", city, country),
    }
}

/// Provider icon id to glyph mapping
///
/// Icon ids are a two-digit group plus a day/night suffix ("10d", "10n").
pub fn icon_glyph(icon: &str) -> &'static str {
    match icon.get(..2) {
        Some("01") => "\u{2600}",  // ☀
        Some("02") => "\u{26C5}",  // ⛅
        Some("03") | Some("04") => "\u{2601}", // ☁
        Some("09") => "\u{1F327}", // 🌧
        Some("10") => "\u{1F326}", // 🌦
        Some("11") => "\u{26C8}",  // ⛈
        Some("13") => "\u{2744}",  // ❄
        Some("50") => "\u{1F32B}", // 🌫
        _ => "?",
    }
}

/// Formats the wall clock with weekday, full date and seconds
pub fn format_clock(now: NaiveDateTime) -> String {
    now.format(CLOCK_FORMAT).to_string()
}
