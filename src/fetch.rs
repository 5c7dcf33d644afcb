//! Single-slot weather fetching
//!
//! At most one fetch is in flight. Triggering a new one aborts the previous
//! task and bumps the slot generation; completions from older generations
//! are rejected by `accept`, so a slow early answer can never overwrite a
//! newer one.

use tokio::task::JoinHandle;

use crate::data::{LocationQuery, WeatherClient};
use crate::events::{AppEvent, EventSender, FetchCompletion};

/// Owns the in-flight weather request
#[derive(Debug)]
pub struct FetchSlot {
    client: WeatherClient,
    tx: EventSender,
    generation: u64,
    in_flight: Option<JoinHandle<()>>,
}

impl FetchSlot {
    /// Creates an idle slot
    pub fn new(client: WeatherClient, tx: EventSender) -> Self {
        Self {
            client,
            tx,
            generation: 0,
            in_flight: None,
        }
    }

    /// Whether a fetch is still running
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Starts a fetch for `query`, superseding any fetch already running
    ///
    /// # Returns
    /// The generation the completion will carry
    pub fn trigger(&mut self, query: LocationQuery) -> u64 {
        self.cancel();

        self.generation += 1;
        let generation = self.generation;
        let client = self.client.clone();
        let tx = self.tx.clone();

        tracing::info!(generation, %query, "starting weather fetch");

        self.in_flight = Some(tokio::spawn(async move {
            let result = client.fetch(&query).await;
            let completion = FetchCompletion {
                generation,
                query,
                result,
            };
            // The receiver only disappears at shutdown
            let _ = tx.send(AppEvent::Fetched(completion)).await;
        }));

        generation
    }

    /// Checks a completion against the current generation.
    ///
    /// Returns `true` and frees the slot if the completion is current;
    /// stale completions return `false` and must be ignored.
    pub fn accept(&mut self, completion: &FetchCompletion) -> bool {
        if completion.generation != self.generation {
            tracing::debug!(
                stale = completion.generation,
                current = self.generation,
                "discarding superseded weather fetch"
            );
            return false;
        }
        self.in_flight = None;
        true
    }

    /// Aborts the running fetch, if any
    pub fn cancel(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            if !handle.is_finished() {
                tracing::debug!(generation = self.generation, "superseding in-flight fetch");
            }
            handle.abort();
        }
    }
}

impl Drop for FetchSlot {
    fn drop(&mut self) {
        self.cancel();
    }
}
