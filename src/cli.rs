//! Command-line interface parsing for weatherview
//!
//! This module handles parsing of CLI arguments using clap and turns them
//! into a `StartupConfig` of overrides applied on top of the config file.

use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::data::{Coordinates, TemperatureUnit};

/// Error types for CLI argument parsing
#[derive(Debug, Error)]
pub enum CliError {
    /// --city was given but blank
    #[error("City name must not be empty")]
    EmptyCity,

    /// Latitude or longitude outside the valid range
    #[error("Invalid coordinates: latitude {lat} must be within -90..=90 and longitude {lon} within -180..=180")]
    InvalidCoordinates { lat: f64, lon: f64 },
}

/// weatherview - current weather and a live clock in your terminal
#[derive(Parser, Debug)]
#[command(name = "weatherview")]
#[command(about = "Look up current weather by city or location")]
#[command(version)]
pub struct Cli {
    /// Search for this city right away instead of using geolocation
    #[arg(long, value_name = "CITY")]
    pub city: Option<String>,

    /// Start with temperatures in Fahrenheit
    #[arg(long)]
    pub fahrenheit: bool,

    /// Skip the startup location lookup
    #[arg(long)]
    pub no_geolocate: bool,

    /// Fixed latitude to use as the startup location
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Fixed longitude to use as the startup location
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// OpenWeatherMap API key (overrides config file and environment)
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// Path to the config file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Path to the log file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Overrides derived from CLI arguments for application startup
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StartupConfig {
    /// City to search for at startup
    pub initial_city: Option<String>,
    /// Unit to start in, if forced
    pub unit: Option<TemperatureUnit>,
    /// Whether geolocation was switched off
    pub no_geolocate: bool,
    /// Fixed startup coordinates
    pub coordinates: Option<Coordinates>,
    pub api_key: Option<String>,
    pub config_path: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

/// Validates a latitude/longitude pair
///
/// # Returns
/// * `Ok(Coordinates)` if both values are in range
/// * `Err(CliError::InvalidCoordinates)` otherwise
pub fn parse_coordinates(lat: f64, lon: f64) -> Result<Coordinates, CliError> {
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(CliError::InvalidCoordinates { lat, lon });
    }
    Ok(Coordinates {
        latitude: lat,
        longitude: lon,
    })
}

impl StartupConfig {
    /// Creates a StartupConfig from parsed CLI arguments.
    ///
    /// # Returns
    /// * `Ok(StartupConfig)` with the requested overrides
    /// * `Err(CliError)` if a value is unusable
    pub fn from_cli(cli: &Cli) -> Result<Self, CliError> {
        let initial_city = match &cli.city {
            None => None,
            Some(city) if city.trim().is_empty() => return Err(CliError::EmptyCity),
            Some(city) => Some(city.trim().to_string()),
        };

        let coordinates = match (cli.lat, cli.lon) {
            (Some(lat), Some(lon)) => Some(parse_coordinates(lat, lon)?),
            _ => None,
        };

        Ok(StartupConfig {
            initial_city,
            unit: cli.fahrenheit.then_some(TemperatureUnit::Fahrenheit),
            no_geolocate: cli.no_geolocate,
            coordinates,
            api_key: cli.api_key.clone(),
            config_path: cli.config.clone(),
            log_file: cli.log_file.clone(),
        })
    }
}
