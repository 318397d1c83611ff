//! Wall-clock ticker that drives view re-derivation.
//!
//! A [`ClockTicker`] is started when a round or the round list becomes
//! visible and stopped when it is left. The background task publishes the
//! current instant on a [`watch`] channel once per period; it is aborted on
//! [`ClockTicker::stop`] or on drop, so a ticker never outlives its view.

use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

/// Default period between two ticks.
pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

/// Smallest accepted period; `tokio::time::interval` rejects zero.
const MIN_TICK: Duration = Duration::from_millis(1);

/// Handle to a running clock tick task.
#[derive(Debug)]
pub struct ClockTicker {
    rx: watch::Receiver<DateTime<Utc>>,
    handle: JoinHandle<()>,
}

impl ClockTicker {
    /// Spawn the tick task on the current Tokio runtime.
    ///
    /// The first instant is published immediately; subsequent ones once per
    /// `period`. Ticks missed while the runtime was busy are skipped rather
    /// than replayed.
    pub fn start(period: Duration) -> Self {
        let period = period.max(MIN_TICK);
        let (tx, rx) = watch::channel(Utc::now());

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick completes immediately; the initial instant was
            // already published by the channel constructor.
            interval.tick().await;
            loop {
                interval.tick().await;
                if tx.send(Utc::now()).is_err() {
                    break;
                }
            }
        });

        debug!(period_ms = period.as_millis(), "clock ticker started");
        Self { rx, handle }
    }

    /// Latest published instant.
    pub fn now(&self) -> DateTime<Utc> {
        *self.rx.borrow()
    }

    /// Wait for the next tick and return its instant.
    ///
    /// Returns `None` once the ticker task has ended.
    pub async fn changed(&mut self) -> Option<DateTime<Utc>> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }

    /// An additional receiver of the tick instants.
    pub fn subscribe(&self) -> watch::Receiver<DateTime<Utc>> {
        self.rx.clone()
    }

    /// Cancel the tick task and wait until it is gone.
    pub async fn stop(mut self) {
        self.handle.abort();
        // A cancelled task resolves with a JoinError; that is the expected
        // outcome here.
        let _ = (&mut self.handle).await;
        debug!("clock ticker stopped");
    }
}

impl Drop for ClockTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_period() {
        let mut ticker = ClockTicker::start(Duration::from_secs(1));
        let started = tokio::time::Instant::now();

        assert!(ticker.changed().await.is_some());
        assert!(ticker.changed().await.is_some());

        assert_eq!(started.elapsed(), Duration::from_secs(2));
        ticker.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn stop_closes_every_receiver() {
        let mut ticker = ClockTicker::start(DEFAULT_TICK);
        let mut rx = ticker.subscribe();
        assert!(ticker.changed().await.is_some());

        ticker.stop().await;

        while rx.changed().await.is_ok() {}
        assert!(rx.has_changed().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_the_task() {
        let ticker = ClockTicker::start(DEFAULT_TICK);
        let mut rx = ticker.subscribe();
        drop(ticker);

        while rx.changed().await.is_ok() {}
        assert!(rx.has_changed().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn zero_period_is_clamped() {
        let mut ticker = ClockTicker::start(Duration::ZERO);
        assert!(ticker.changed().await.is_some());
        ticker.stop().await;
    }
}
