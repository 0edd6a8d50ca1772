//! Single-slot caching decorator over a [`TimeFetcher`].

use std::sync::RwLock;
use std::time::{Duration, Instant};

use log::debug;

use crate::clock::{Clock, SystemClock};
use crate::error::FetchError;
use crate::fetcher::TimeFetcher;
use crate::reading::TimeReading;

/// How long a cached reading stays valid.
pub const DEFAULT_RETENTION: Duration = Duration::from_secs(60);

/// A reading plus the instant it was captured at.
#[derive(Debug, Clone)]
struct CacheEntry {
    reading: TimeReading,
    captured_at: Instant,
}

/// Memoizes the last successful reading for a fixed retention window.
///
/// Holds at most one entry — there is only one logical resource. A valid
/// entry short-circuits the delegate call; an expired entry is treated as
/// absent and never served. A failed delegate call leaves the slot exactly
/// as it was and propagates the error.
///
/// Concurrent callers are not coordinated: the slot lock is never held
/// across the delegate await, so two tasks that both observe an expired slot
/// will both fetch and both store, last writer wins. Call volume against
/// this service is low enough that in-flight de-duplication is not done.
pub struct CachedTimeFetcher<F, C = SystemClock> {
    inner: F,
    clock: C,
    retention: Duration,
    slot: RwLock<Option<CacheEntry>>,
}

impl<F> CachedTimeFetcher<F> {
    /// Wraps `inner` with the default 60 second retention window.
    pub fn new(inner: F) -> Self {
        Self::with_retention(inner, DEFAULT_RETENTION)
    }

    /// Wraps `inner` with an explicit retention window.
    pub fn with_retention(inner: F, retention: Duration) -> Self {
        Self::with_clock(inner, retention, SystemClock)
    }
}

impl<F, C: Clock> CachedTimeFetcher<F, C> {
    /// Wraps `inner`, reading "now" from the given clock.
    pub fn with_clock(inner: F, retention: Duration, clock: C) -> Self {
        Self {
            inner,
            clock,
            retention,
            slot: RwLock::new(None),
        }
    }

    /// Whether a non-expired entry currently exists.
    pub fn has_valid_entry(&self) -> bool {
        self.valid_entry().is_some()
    }

    /// Seconds until the current entry expires, ceiling-rounded.
    ///
    /// `None` when the slot is empty or the entry has expired.
    pub fn remaining_seconds(&self) -> Option<u64> {
        self.valid_entry().map(|(_, left)| ceil_secs(left))
    }

    /// Unconditionally clears the slot, expired or not. The next call always
    /// reaches the delegate.
    pub fn invalidate(&self) {
        let mut slot = self.slot.write().unwrap();
        *slot = None;
        debug!("cache invalidated");
    }

    /// The current entry and its remaining validity, unless expired.
    fn valid_entry(&self) -> Option<(TimeReading, Duration)> {
        let slot = self.slot.read().unwrap();
        let entry = slot.as_ref()?;
        let elapsed = self.clock.now().duration_since(entry.captured_at);
        if elapsed < self.retention {
            Some((entry.reading.clone(), self.retention - elapsed))
        } else {
            None
        }
    }

    fn store(&self, reading: TimeReading) {
        let mut slot = self.slot.write().unwrap();
        *slot = Some(CacheEntry {
            reading,
            captured_at: self.clock.now(),
        });
    }
}

impl<F: TimeFetcher + Sync, C: Clock> TimeFetcher for CachedTimeFetcher<F, C> {
    async fn fetch_time(&self) -> Result<TimeReading, FetchError> {
        if let Some((reading, left)) = self.valid_entry() {
            debug!("serving cached reading, {}s left in window", ceil_secs(left));
            return Ok(reading);
        }

        debug!("cache empty or expired, fetching fresh reading");
        let reading = self.inner.fetch_time().await?;
        self.store(reading.clone());
        Ok(reading)
    }
}

fn ceil_secs(duration: Duration) -> u64 {
    duration.as_secs() + u64::from(duration.subsec_nanos() > 0)
}
