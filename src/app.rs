//! Application state management for weatherview
//!
//! This module contains the main application state, handling keyboard input,
//! fetch results, geolocation results and clock ticks.

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::data::{
    Coordinates, GeolocationError, LocationQuery, LocationSource, TemperatureUnit, WeatherReading,
};
use crate::events::FetchCompletion;
use crate::input::{self, InputField, StartupPlan};
use crate::presentation::{self, DisplayState};

/// Lifecycle of the weather panel
///
/// `Failed` renders exactly like the state before the fetch: empty if there
/// was no reading, the previous reading otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Nothing fetched yet
    Empty,
    /// A fetch is in flight
    Loading,
    /// The last fetch succeeded
    Loaded,
    /// The last fetch failed
    Failed,
}

/// Main application struct managing state and data
pub struct App {
    /// Search field contents
    pub input: InputField,
    /// Latest successful reading
    pub reading: Option<WeatherReading>,
    /// Preferred temperature unit
    pub unit: TemperatureUnit,
    /// Current lifecycle phase
    pub phase: Phase,
    /// Message of the most recent fetch failure, for diagnostics
    pub last_error: Option<String>,
    /// Time of the latest clock tick
    pub now: DateTime<Local>,
    /// Flag to show help overlay
    pub show_help: bool,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Whether the user has searched by hand this session
    manual_search_started: bool,
    /// Whether the startup location result has been handled
    geolocation_done: bool,
    /// Query waiting to be handed to the fetch slot
    pending_query: Option<LocationQuery>,
}

impl App {
    /// Creates a new App instance with default state
    pub fn new() -> Self {
        Self::with_unit(TemperatureUnit::default())
    }

    /// Creates a new App instance starting in `unit`
    pub fn with_unit(unit: TemperatureUnit) -> Self {
        Self {
            input: InputField::new(),
            reading: None,
            unit,
            phase: Phase::Empty,
            last_error: None,
            now: Local::now(),
            show_help: false,
            should_quit: false,
            manual_search_started: false,
            geolocation_done: false,
            pending_query: None,
        }
    }

    /// Everything the screen shows, derived from the current state
    pub fn display_state(&self) -> DisplayState {
        presentation::derive_display(self.reading.as_ref(), self.unit, self.now.naive_local())
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// Hands out the query waiting to be fetched, if any
    pub fn take_pending_query(&mut self) -> Option<LocationQuery> {
        self.pending_query.take()
    }

    /// Searches for the city in the input field. Blank input is ignored.
    pub fn submit_search(&mut self) {
        match self.input.submit() {
            Some(query) => {
                self.manual_search_started = true;
                self.request(query);
            }
            None => tracing::debug!("ignoring search with empty city"),
        }
    }

    /// Types `city` into the field and searches for it
    pub fn search_city(&mut self, city: &str) {
        self.input.set(city);
        self.submit_search();
    }

    fn request(&mut self, query: LocationQuery) {
        self.phase = Phase::Loading;
        self.pending_query = Some(query);
    }

    /// Switches between Celsius and Fahrenheit without refetching
    pub fn toggle_unit(&mut self) {
        self.unit = self.unit.toggled();
    }

    /// Records a clock tick
    pub fn tick(&mut self, now: DateTime<Local>) {
        self.now = now;
    }

    /// Starts the session according to `plan`.
    ///
    /// Returns the location source to query, or `None` when a city search
    /// was started instead.
    pub fn start(&mut self, plan: StartupPlan) -> Option<LocationSource> {
        match plan {
            StartupPlan::Search(city) => {
                self.geolocation_done = true;
                self.search_city(&city);
                None
            }
            StartupPlan::Locate(source) => Some(source),
        }
    }

    /// Handles the result of the one-shot startup location lookup.
    /// Only the first result counts.
    pub fn apply_geolocation(&mut self, located: Result<Coordinates, GeolocationError>) {
        if self.geolocation_done {
            tracing::debug!("ignoring repeated startup location result");
            return;
        }
        self.geolocation_done = true;
        if let Some(query) = input::resolve_startup(located, self.manual_search_started) {
            self.request(query);
        }
    }

    /// Applies a completed fetch the fetch slot accepted as current
    pub fn apply_fetch(&mut self, completion: FetchCompletion) {
        match completion.result {
            Ok(reading) => {
                tracing::info!(
                    city = %reading.city,
                    country = %reading.country,
                    code = reading.condition_code,
                    category = presentation::classify(reading.condition_code).name(),
                    "weather reading updated"
                );
                if matches!(completion.query, LocationQuery::Coordinates(_)) {
                    self.input.set(reading.city.clone());
                }
                self.reading = Some(reading);
                self.phase = Phase::Loaded;
                self.last_error = None;
            }
            Err(err) => {
                tracing::warn!(query = %completion.query, error = %err, "weather fetch failed");
                self.phase = Phase::Failed;
                self.last_error = Some(err.to_string());
            }
        }
    }

    /// Handles keyboard input and updates state accordingly
    ///
    /// # Key Bindings
    /// - printable keys: type into the search field
    /// - `Backspace`: delete the last character
    /// - `Ctrl+U`: clear the search field
    /// - `Enter`: search for the typed city
    /// - `Tab`: toggle Celsius/Fahrenheit
    /// - `F1`: toggle help overlay
    /// - `Esc`: close help, or quit
    /// - `Ctrl+C`: quit
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        let ctrl = key_event.modifiers.contains(KeyModifiers::CONTROL);

        if ctrl && key_event.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        // Help overlay intercepts all keys when shown
        if self.show_help {
            if matches!(key_event.code, KeyCode::Esc | KeyCode::F(1)) {
                self.show_help = false;
            }
            return;
        }

        match key_event.code {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::F(1) => {
                self.show_help = true;
            }
            KeyCode::Enter => {
                self.submit_search();
            }
            KeyCode::Tab => {
                self.toggle_unit();
            }
            KeyCode::Backspace => {
                self.input.backspace();
            }
            KeyCode::Char('u') if ctrl => {
                self.input.clear();
            }
            KeyCode::Char(c)
                if !ctrl && !key_event.modifiers.contains(KeyModifiers::ALT) =>
            {
                self.input.push(c);
            }
            _ => {}
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
