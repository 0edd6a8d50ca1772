//! Fixed-cadence polling with a cancellable subscription.
//!
//! The poller is a scheduler around a fetcher, not part of the fetch/cache
//! core: it owns a background task that calls [`TimeFetcher::fetch_time`]
//! on every tick and publishes each outcome, success or classified error,
//! on a watch channel. Subscribers always observe the latest outcome;
//! intermediate ones they were too slow for are skipped.

use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::error::FetchError;
use crate::fetcher::TimeFetcher;
use crate::reading::TimeReading;

/// Outcome of one poll.
#[derive(Debug, Clone)]
pub struct PollUpdate {
    pub result: Result<TimeReading, FetchError>,
    /// Local wall-clock stamp taken when the outcome was produced.
    pub polled_at: DateTime<Utc>,
}

/// Calls a [`TimeFetcher`] on a fixed cadence and publishes every outcome.
///
/// The first poll fires immediately, later ones follow the interval. A fetch
/// error is published like a success and the loop keeps going.
///
/// [`TimePoller::stop`] waits for the task to wind down; since an in-flight
/// request is never cancelled, that can take up to the fetcher's own
/// timeout. Dropping the poller cancels the task without waiting.
pub struct TimePoller {
    handle: Option<JoinHandle<()>>,
    cancel_token: CancellationToken,
    updates: watch::Receiver<Option<PollUpdate>>,
}

impl TimePoller {
    /// Spawns the polling task. Must be called from within a tokio runtime.
    pub fn start<F>(fetcher: F, interval: Duration) -> Self
    where
        F: TimeFetcher + Send + Sync + 'static,
    {
        let (tx, rx) = watch::channel(None);
        let cancel_token = CancellationToken::new();
        let handle = tokio::spawn(poll_loop(fetcher, interval, tx, cancel_token.clone()));

        Self {
            handle: Some(handle),
            cancel_token,
            updates: rx,
        }
    }

    /// A receiver over the latest poll outcome. Holds `None` until the first
    /// poll completes.
    pub fn subscribe(&self) -> watch::Receiver<Option<PollUpdate>> {
        self.updates.clone()
    }

    /// The latest outcome without subscribing.
    pub fn latest(&self) -> Option<PollUpdate> {
        self.updates.borrow().clone()
    }

    /// Whether the polling task is still alive.
    pub fn is_running(&self) -> bool {
        self.handle
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Cancels the polling task and waits for it to finish.
    pub async fn stop(mut self) {
        self.cancel_token.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(err) = handle.await {
                warn!("time poller task failed to join: {err}");
            }
        }
    }
}

impl Drop for TimePoller {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}

async fn poll_loop<F: TimeFetcher>(
    fetcher: F,
    interval: Duration,
    updates: watch::Sender<Option<PollUpdate>>,
    cancel_token: CancellationToken,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    info!("time poller started, interval {interval:?}");

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let result = fetcher.fetch_time().await;
                let polled_at = Utc::now();
                match &result {
                    Ok(reading) => debug!("poll got {} {}", reading.date, reading.time),
                    Err(err) => warn!("poll fetch failed: {err}"),
                }
                if updates.send(Some(PollUpdate { result, polled_at })).is_err() {
                    // Every receiver is gone, nobody is listening anymore.
                    break;
                }
            }
            _ = cancel_token.cancelled() => {
                info!("time poller shutting down");
                break;
            }
        }
    }
}
