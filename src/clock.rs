//! Monotonic time source behind a trait, so cache expiry is testable
//! without sleeping.

use std::time::Instant;

/// Where the cache reads "now" from.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// The real monotonic clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Hand-driven clock for tests. Clones share the same underlying instant,
/// so one clone can sit inside a cache while the test advances the other.
#[cfg(test)]
#[derive(Clone)]
pub(crate) struct ManualClock {
    now: std::sync::Arc<std::sync::Mutex<Instant>>,
}

#[cfg(test)]
impl ManualClock {
    pub(crate) fn new() -> Self {
        Self {
            now: std::sync::Arc::new(std::sync::Mutex::new(Instant::now())),
        }
    }

    pub(crate) fn advance(&self, by: std::time::Duration) {
        let mut guard = self.now.lock().unwrap();
        *guard += by;
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock().unwrap()
    }
}
