//! OpenWeatherMap current-weather client
//!
//! This module provides functionality to fetch current conditions from the
//! OpenWeatherMap API, by city name or by coordinates, and parse them into a
//! `WeatherReading`.

use std::fmt;
use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::{LocationQuery, WeatherReading};

/// Current weather endpoint of the OpenWeatherMap API
pub const OPENWEATHER_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Base URL for provider condition icons
const ICON_BASE_URL: &str = "http://openweathermap.org/img/wn";

/// Longest error body kept in an error message
const MAX_ERROR_BODY: usize = 200;

/// Errors that can occur when fetching weather data
#[derive(Debug, Error)]
pub enum WeatherError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The provider answered with a non-success status
    #[error("Provider returned status {status}: {message}")]
    Status { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("Failed to parse JSON response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Missing expected field in response
    #[error("Missing expected field in response: {0}")]
    MissingField(String),

    /// A city lookup was requested with blank text
    #[error("City name must not be empty")]
    EmptyCity,
}

/// Client for fetching current weather from OpenWeatherMap
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl fmt::Debug for WeatherClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeatherClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl WeatherClient {
    /// Create a new WeatherClient for the given API key with default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: OPENWEATHER_BASE_URL.to_string(),
        }
    }

    /// Create a new WeatherClient whose requests give up after `timeout`
    pub fn with_timeout(
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, WeatherError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::new(api_key).with_client(client))
    }

    /// Replace the underlying HTTP client
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Point the client at a different endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch current weather for a city name or a pair of coordinates
    ///
    /// # Arguments
    /// * `query` - What to look up
    ///
    /// # Returns
    /// * `Ok(WeatherReading)` - The provider's reading for the location
    /// * `Err(WeatherError)` - If the request, the status or the parsing fails
    pub async fn fetch(&self, query: &LocationQuery) -> Result<WeatherReading, WeatherError> {
        let params: Vec<(&str, String)> = match query {
            LocationQuery::City(city) => {
                let city = city.trim();
                if city.is_empty() {
                    return Err(WeatherError::EmptyCity);
                }
                vec![("q", city.to_string())]
            }
            LocationQuery::Coordinates(coords) => vec![
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
            ],
        };

        tracing::debug!(%query, "requesting current weather");

        let response = self
            .client
            .get(&self.base_url)
            .query(&params)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(WeatherError::Status {
                status: status.as_u16(),
                message: provider_message(&text),
            });
        }

        let api_response: CurrentWeatherResponse = serde_json::from_str(&text)?;
        parse_response(api_response)
    }
}

/// URL of the provider's image for an icon id
pub fn icon_url(icon: &str) -> String {
    format!("{}/{}.png", ICON_BASE_URL, icon)
}

/// Pulls the `message` out of a provider error body, falling back to the raw text
fn provider_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        message: String,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(err) => err.message,
        Err(_) => body.chars().take(MAX_ERROR_BODY).collect(),
    }
}

/// Parse the provider response into a WeatherReading
fn parse_response(response: CurrentWeatherResponse) -> Result<WeatherReading, WeatherError> {
    let condition = response
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| WeatherError::MissingField("weather".to_string()))?;

    Ok(WeatherReading {
        city: response.name,
        country: response.sys.and_then(|s| s.country).unwrap_or_default(),
        description: condition.description,
        icon: condition.icon,
        temperature: response.main.temp,
        temp_min: response.main.temp_min,
        temp_max: response.main.temp_max,
        wind_speed: response.wind.speed,
        humidity: response.main.humidity,
        condition_code: condition.id,
        fetched_at: Utc::now(),
    })
}

/// OpenWeatherMap current weather response structure
#[derive(Debug, Deserialize)]
struct CurrentWeatherResponse {
    name: String,
    #[serde(default)]
    sys: Option<SystemInfo>,
    weather: Vec<ConditionEntry>,
    main: MainReadings,
    wind: WindReadings,
}

#[derive(Debug, Deserialize)]
struct SystemInfo {
    #[serde(default)]
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ConditionEntry {
    id: u32,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    temp: f64,
    temp_min: f64,
    temp_max: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct WindReadings {
    speed: f64,
}
