//! Events delivered from background tasks to the main loop
//!
//! The clock, the startup geolocation lookup and weather fetches all run as
//! tokio tasks and report back through one channel, so the main loop is the
//! only place that mutates application state.

use chrono::{DateTime, Local};
use tokio::sync::mpsc;

use crate::data::{Coordinates, GeolocationError, LocationQuery, WeatherError, WeatherReading};

/// Capacity of the event channel
const CHANNEL_CAPACITY: usize = 32;

/// Result of one weather fetch, tagged with the slot generation that started it
#[derive(Debug)]
pub struct FetchCompletion {
    pub generation: u64,
    pub query: LocationQuery,
    pub result: Result<WeatherReading, WeatherError>,
}

/// Messages sent from background tasks to the main loop
#[derive(Debug)]
pub enum AppEvent {
    /// The clock ticked
    Tick(DateTime<Local>),
    /// The one-shot startup location lookup finished
    Located(Result<Coordinates, GeolocationError>),
    /// A weather fetch finished
    Fetched(FetchCompletion),
}

pub type EventSender = mpsc::Sender<AppEvent>;
pub type EventReceiver = mpsc::Receiver<AppEvent>;

/// Creates the event channel shared by all background tasks
pub fn channel() -> (EventSender, EventReceiver) {
    mpsc::channel(CHANNEL_CAPACITY)
}
