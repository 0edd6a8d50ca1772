//! Shared test doubles.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::FetchError;
use crate::fetcher::TimeFetcher;
use crate::reading::TimeReading;

/// Fetcher that replays a scripted list of outcomes and counts calls.
///
/// Once the script runs out it keeps answering with a transport error.
/// Clones share the script and the counter, so a test can hand one clone to
/// the code under test and keep another to inspect.
#[derive(Clone)]
pub(crate) struct ScriptedFetcher {
    responses: Arc<Mutex<VecDeque<Result<TimeReading, FetchError>>>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedFetcher {
    pub(crate) fn new(responses: Vec<Result<TimeReading, FetchError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into())),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TimeFetcher for ScriptedFetcher {
    async fn fetch_time(&self) -> Result<TimeReading, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::Transport("script exhausted".into())))
    }
}

pub(crate) fn reading(date: &str, time: &str) -> TimeReading {
    TimeReading {
        date: date.to_string(),
        time: time.to_string(),
    }
}
