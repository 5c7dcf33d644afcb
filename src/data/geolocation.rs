//! One-shot location lookup
//!
//! A terminal has no browser geolocation prompt, so the "platform" location
//! comes from one of three sources: disabled by the user (denied), a fixed
//! pair of coordinates from configuration, or an IP-based lookup service.
//! Callers only see `Ok(Coordinates)` or a `GeolocationError`.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

use super::Coordinates;

/// Default IP geolocation endpoint
pub const IP_LOOKUP_URL: &str = "http://ip-api.com/json";

/// Reasons a location lookup did not produce coordinates
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeolocationError {
    /// The user turned geolocation off
    #[error("Geolocation permission denied")]
    Denied,

    /// The lookup service could not be reached or answered garbage
    #[error("Geolocation service unavailable: {0}")]
    Unavailable(String),

    /// The lookup service answered but could not locate us
    #[error("Geolocation failed: {0}")]
    Failed(String),
}

impl From<reqwest::Error> for GeolocationError {
    fn from(err: reqwest::Error) -> Self {
        GeolocationError::Unavailable(err.to_string())
    }
}

/// Where coordinates come from
#[derive(Debug, Clone, PartialEq)]
pub enum LocationSource {
    /// Geolocation disabled
    Denied,
    /// Coordinates supplied up front
    Fixed(Coordinates),
    /// Ask an IP geolocation service
    IpLookup { url: String },
}

/// Response from the IP lookup service
#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    status: String,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
    #[serde(default)]
    message: Option<String>,
}

/// Client resolving the current location
#[derive(Debug, Clone)]
pub struct GeolocationClient {
    http_client: Client,
    source: LocationSource,
}

impl GeolocationClient {
    /// Creates a client for the given source
    pub fn new(source: LocationSource) -> Self {
        Self {
            http_client: Client::new(),
            source,
        }
    }

    /// Replace the underlying HTTP client
    pub fn with_client(mut self, http_client: Client) -> Self {
        self.http_client = http_client;
        self
    }

    /// The configured source
    pub fn source(&self) -> &LocationSource {
        &self.source
    }

    /// Resolves the current location once
    pub async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        match &self.source {
            LocationSource::Denied => Err(GeolocationError::Denied),
            LocationSource::Fixed(coords) => Ok(*coords),
            LocationSource::IpLookup { url } => self.lookup_ip(url).await,
        }
    }

    async fn lookup_ip(&self, url: &str) -> Result<Coordinates, GeolocationError> {
        let response = self.http_client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(GeolocationError::Unavailable(format!(
                "status {}",
                response.status()
            )));
        }

        let body: IpLookupResponse = response
            .json()
            .await
            .map_err(|e| GeolocationError::Unavailable(e.to_string()))?;

        if body.status != "success" {
            return Err(GeolocationError::Failed(
                body.message.unwrap_or_else(|| body.status.clone()),
            ));
        }

        match (body.lat, body.lon) {
            (Some(latitude), Some(longitude)) => Ok(Coordinates {
                latitude,
                longitude,
            }),
            _ => Err(GeolocationError::Failed(
                "response is missing coordinates".to_string(),
            )),
        }
    }
}
