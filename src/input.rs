//! Input resolution
//!
//! Decides what to look up: either the city typed into the search field or,
//! once at startup, the coordinates reported by the geolocation source.

use crate::cli::StartupConfig;
use crate::config::Config;
use crate::data::{Coordinates, GeolocationError, LocationQuery, LocationSource};

/// Placeholder shown while the search field is empty
pub const PLACEHOLDER: &str = "Enter city name";

/// Single-line text field holding the city to search for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputField {
    text: String,
}

impl InputField {
    /// Creates an empty field
    pub fn new() -> Self {
        Self::default()
    }

    /// Current contents
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Appends a typed character
    pub fn push(&mut self, c: char) {
        self.text.push(c);
    }

    /// Removes the last character
    pub fn backspace(&mut self) {
        self.text.pop();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    /// Replaces the contents, used when a location lookup names the city
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Builds a city query from the field, `None` if it is blank
    pub fn submit(&self) -> Option<LocationQuery> {
        let city = self.text.trim();
        if city.is_empty() {
            None
        } else {
            Some(LocationQuery::City(city.to_string()))
        }
    }
}

/// How the first lookup of a session starts
#[derive(Debug, Clone, PartialEq)]
pub enum StartupPlan {
    /// Search this city right away, with no location lookup
    Search(String),
    /// Ask the location source once
    Locate(LocationSource),
}

/// Picks the startup path. A city from the command line is a manual search
/// and suppresses the location lookup.
pub fn startup_plan(startup: &StartupConfig, config: &Config) -> StartupPlan {
    match &startup.initial_city {
        Some(city) => StartupPlan::Search(city.clone()),
        None => StartupPlan::Locate(config.location_source()),
    }
}

/// Turns the one-shot startup location result into a query.
///
/// Returns `None` when the lookup failed or when the user already started a
/// manual search, which takes precedence over the automatic one.
pub fn resolve_startup(
    located: Result<Coordinates, GeolocationError>,
    manual_search_started: bool,
) -> Option<LocationQuery> {
    match located {
        Ok(_) if manual_search_started => {
            tracing::debug!("ignoring startup location, a manual search already ran");
            None
        }
        Ok(coords) => {
            tracing::info!(
                latitude = coords.latitude,
                longitude = coords.longitude,
                "startup location resolved"
            );
            Some(LocationQuery::Coordinates(coords))
        }
        Err(err) => {
            tracing::warn!(error = %err, "startup geolocation unavailable, waiting for manual input");
            None
        }
    }
}
