//! Core data models for weatherview
//!
//! This module contains the data types shared by the fetcher, the input
//! resolver and the presentation layer, plus the two upstream clients.

pub mod geolocation;
pub mod weather;

pub use geolocation::{GeolocationClient, GeolocationError, LocationSource};
pub use weather::{WeatherClient, WeatherError};

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Offset between the Kelvin and Celsius scales
pub const KELVIN_OFFSET: f64 = 273.15;

/// A snapshot of current weather returned by the provider for one query.
///
/// Temperatures are kept on the absolute (Kelvin) scale exactly as received;
/// unit conversion happens only at presentation time.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReading {
    /// City name as reported by the provider
    pub city: String,
    /// ISO country code, empty if the provider omitted it
    pub country: String,
    /// Textual condition description (e.g. "light rain")
    pub description: String,
    /// Provider icon identifier (e.g. "10d")
    pub icon: String,
    /// Current temperature in Kelvin
    pub temperature: f64,
    /// Minimum temperature in Kelvin
    pub temp_min: f64,
    /// Maximum temperature in Kelvin
    pub temp_max: f64,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Relative humidity percentage (0-100)
    pub humidity: u8,
    /// Provider weather-condition code
    pub condition_code: u32,
    /// When this reading was received
    pub fetched_at: DateTime<Utc>,
}

/// Geographic coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// What to ask the weather provider for
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    /// Lookup by city name, typed by the user
    City(String),
    /// Lookup by coordinates, from the geolocation source
    Coordinates(Coordinates),
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationQuery::City(city) => write!(f, "city '{}'", city),
            LocationQuery::Coordinates(c) => write!(f, "lat {} lon {}", c.latitude, c.longitude),
        }
    }
}

/// Temperature display unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    /// Returns the other unit
    pub fn toggled(self) -> Self {
        match self {
            TemperatureUnit::Celsius => TemperatureUnit::Fahrenheit,
            TemperatureUnit::Fahrenheit => TemperatureUnit::Celsius,
        }
    }

    /// Unit suffix used after a temperature value
    pub fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }

    /// Label shown next to the unit switch
    pub fn label(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "Celsius",
            TemperatureUnit::Fahrenheit => "Fahrenheit",
        }
    }
}

/// Weather category that drives the background tint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherCategory {
    Rainy,
    Snowy,
    Foggy,
    Sunny,
    Cloudy,
}

impl WeatherCategory {
    /// Lowercase name of the category
    pub fn name(self) -> &'static str {
        match self {
            WeatherCategory::Rainy => "rainy",
            WeatherCategory::Snowy => "snowy",
            WeatherCategory::Foggy => "foggy",
            WeatherCategory::Sunny => "sunny",
            WeatherCategory::Cloudy => "cloudy",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_toggle_flips_both_ways() {
        assert_eq!(TemperatureUnit::Celsius.toggled(), TemperatureUnit::Fahrenheit);
        assert_eq!(TemperatureUnit::Fahrenheit.toggled(), TemperatureUnit::Celsius);
        assert_eq!(TemperatureUnit::default(), TemperatureUnit::Celsius);
    }

    #[test]
    fn test_unit_symbols_and_labels() {
        assert_eq!(TemperatureUnit::Celsius.symbol(), "°C");
        assert_eq!(TemperatureUnit::Fahrenheit.symbol(), "°F");
        assert_eq!(TemperatureUnit::Celsius.label(), "Celsius");
        assert_eq!(TemperatureUnit::Fahrenheit.label(), "Fahrenheit");
    }

    #[test]
    fn test_unit_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            unit: TemperatureUnit,
        }
        let w: Wrapper = toml::from_str("unit = \"fahrenheit\"").unwrap();
        assert_eq!(w.unit, TemperatureUnit::Fahrenheit);
    }

    #[test]
    fn test_location_query_display() {
        let q = LocationQuery::City("Paris".to_string());
        assert_eq!(q.to_string(), "city 'Paris'");

        let q = LocationQuery::Coordinates(Coordinates {
            latitude: 48.85,
            longitude: 2.35,
        });
        assert_eq!(q.to_string(), "lat 48.85 lon 2.35");
    }

    #[test]
    fn test_category_names() {
        assert_eq!(WeatherCategory::Rainy.name(), "rainy");
        assert_eq!(WeatherCategory::Snowy.name(), "snowy");
        assert_eq!(WeatherCategory::Foggy.name(), "foggy");
        assert_eq!(WeatherCategory::Sunny.name(), "sunny");
        assert_eq!(WeatherCategory::Cloudy.name(), "cloudy");
    }
}
