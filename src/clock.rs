//! Wall clock ticker
//!
//! A periodic task that sends the current local time to the main loop. The
//! task is owned by a `ClockTask` handle and aborted when the handle drops,
//! so the ticker never outlives the view that started it.

use std::time::Duration;

use chrono::Local;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::events::{AppEvent, EventSender};

/// Default tick period
pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

/// Handle owning the clock task
#[derive(Debug)]
pub struct ClockTask {
    handle: JoinHandle<()>,
}

impl ClockTask {
    /// Spawns the ticker. The first tick is sent immediately.
    ///
    /// # Arguments
    /// * `period` - Time between ticks
    /// * `tx` - Channel the ticks are delivered to
    pub fn spawn(period: Duration, tx: EventSender) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                interval.tick().await;
                if tx.send(AppEvent::Tick(Local::now())).await.is_err() {
                    // Receiver gone, nothing left to tick for
                    break;
                }
            }
        });

        Self { handle }
    }

    /// Whether the ticker has stopped
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for ClockTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events;

    #[tokio::test]
    async fn test_clock_ticks_immediately_and_repeats() {
        let (tx, mut rx) = events::channel();
        let _clock = ClockTask::spawn(Duration::from_millis(10), tx);

        for _ in 0..3 {
            let event = tokio::time::timeout(Duration::from_secs(1), rx.recv())
                .await
                .expect("clock should tick");
            assert!(matches!(event, Some(AppEvent::Tick(_))));
        }
    }

    #[tokio::test]
    async fn test_dropping_handle_stops_clock() {
        let (tx, mut rx) = events::channel();
        let clock = ClockTask::spawn(Duration::from_millis(10), tx);

        let first = tokio::time::timeout(Duration::from_secs(1), rx.recv()).await;
        assert!(matches!(first, Ok(Some(AppEvent::Tick(_)))));

        drop(clock);

        // Once the task is aborted its sender is dropped and the channel closes
        let drained = tokio::time::timeout(Duration::from_secs(1), async {
            while rx.recv().await.is_some() {}
        })
        .await;
        assert!(drained.is_ok(), "channel should close after the clock is dropped");
    }

    #[tokio::test]
    async fn test_clock_stops_when_receiver_dropped() {
        let (tx, rx) = events::channel();
        let clock = ClockTask::spawn(Duration::from_millis(5), tx);
        drop(rx);

        tokio::time::timeout(Duration::from_secs(1), async {
            while !clock.is_finished() {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("clock should stop once nobody listens");
    }
}
