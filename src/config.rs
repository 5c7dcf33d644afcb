//! Configuration loading
//!
//! Settings live in a TOML file in the platform config directory
//! (`~/.config/weatherview/config.toml` on Linux). A missing file means
//! defaults. The API key can also come from `WEATHERVIEW_API_KEY` or the
//! command line; command-line values win over the environment, which wins
//! over the file.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::Deserialize;
use thiserror::Error;

use crate::cli::StartupConfig;
use crate::data::geolocation::{LocationSource, IP_LOOKUP_URL};
use crate::data::weather::OPENWEATHER_BASE_URL;
use crate::data::{Coordinates, TemperatureUnit};

/// Environment variable holding the provider API key
pub const API_KEY_ENV: &str = "WEATHERVIEW_API_KEY";

/// Name of the config file inside the config directory
const CONFIG_FILE_NAME: &str = "config.toml";

/// Name of the log file inside the data directory
const LOG_FILE_NAME: &str = "weatherview.log";

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file exists but could not be read
    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema
    #[error("Failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// No API key from any source
    #[error("No API key configured. Set api_key in the config file, the WEATHERVIEW_API_KEY environment variable, or pass --api-key")]
    MissingApiKey,

    /// Only one of latitude/longitude was given
    #[error("Both latitude and longitude must be set to use fixed coordinates")]
    IncompleteCoordinates,

    /// A request timeout of zero would fail every request immediately
    #[error("request_timeout_secs must be at least 1")]
    ZeroTimeout,

    /// No home directory to derive platform paths from
    #[error("Could not determine platform config directory")]
    NoConfigDir,
}

/// Application settings
#[derive(Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// OpenWeatherMap API key
    pub api_key: Option<String>,
    /// Current weather endpoint
    pub base_url: String,
    /// IP geolocation endpoint
    pub geolocation_url: String,
    /// Whether to look up the location at startup
    pub geolocate: bool,
    /// Fixed latitude used instead of the IP lookup
    pub latitude: Option<f64>,
    /// Fixed longitude used instead of the IP lookup
    pub longitude: Option<f64>,
    /// Initial temperature unit
    pub unit: TemperatureUnit,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Clock tick period in milliseconds
    pub clock_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: OPENWEATHER_BASE_URL.to_string(),
            geolocation_url: IP_LOOKUP_URL.to_string(),
            geolocate: true,
            latitude: None,
            longitude: None,
            unit: TemperatureUnit::Celsius,
            request_timeout_secs: 10,
            clock_interval_ms: 1000,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("geolocation_url", &self.geolocation_url)
            .field("geolocate", &self.geolocate)
            .field("latitude", &self.latitude)
            .field("longitude", &self.longitude)
            .field("unit", &self.unit)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("clock_interval_ms", &self.clock_interval_ms)
            .finish()
    }
}

impl Config {
    /// Path of the default config file
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let dirs = project_dirs()?;
        Ok(dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Path of the default log file
    pub fn default_log_path() -> Result<PathBuf, ConfigError> {
        let dirs = project_dirs()?;
        Ok(dirs.data_local_dir().join(LOG_FILE_NAME))
    }

    /// Loads the config from `path`, or from the default location if `None`.
    ///
    /// A file that does not exist yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };

        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Uses the API key from the environment, if one is set
    pub fn apply_env_api_key(&mut self, value: Option<String>) {
        if let Some(key) = value.filter(|k| !k.trim().is_empty()) {
            self.api_key = Some(key);
        }
    }

    /// Applies command-line overrides
    pub fn apply_startup(&mut self, startup: &StartupConfig) {
        if let Some(key) = &startup.api_key {
            self.api_key = Some(key.clone());
        }
        if let Some(unit) = startup.unit {
            self.unit = unit;
        }
        if startup.no_geolocate {
            self.geolocate = false;
        }
        if let Some(coords) = startup.coordinates {
            self.latitude = Some(coords.latitude);
            self.longitude = Some(coords.longitude);
        }
    }

    /// Checks that the settings are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api_key()?;
        if self.latitude.is_some() != self.longitude.is_some() {
            return Err(ConfigError::IncompleteCoordinates);
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    /// The API key, or an error if none is configured
    pub fn api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)
    }

    /// Where the startup location comes from
    pub fn location_source(&self) -> LocationSource {
        if !self.geolocate {
            return LocationSource::Denied;
        }
        match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => LocationSource::Fixed(Coordinates {
                latitude,
                longitude,
            }),
            _ => LocationSource::IpLookup {
                url: self.geolocation_url.clone(),
            },
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn clock_interval(&self) -> Duration {
        Duration::from_millis(self.clock_interval_ms.max(1))
    }
}

fn project_dirs() -> Result<ProjectDirs, ConfigError> {
    ProjectDirs::from("", "", "weatherview").ok_or(ConfigError::NoConfigDir)
}
