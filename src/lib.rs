//! Client for the AFIP official time service.
//!
//! The service at `http://time.afip.gov.ar` answers a plain GET with a small
//! XML document carrying the current official date (`fecha`, `YYYYMMDD`) and
//! time (`hora`, `HHMMSS`). This crate wraps that one call:
//!
//! - [`HttpTimeFetcher`] performs one async fetch and returns a
//!   [`TimeReading`] or a classified [`FetchError`].
//! - [`CachedTimeFetcher`] wraps any fetcher and memoizes the last reading
//!   for a fixed retention window (60 seconds by default).
//! - [`TimePoller`] fetches on a fixed cadence in a background task and
//!   publishes every outcome through a watch subscription.
//!
//! ```no_run
//! use afiptime::{CachedTimeFetcher, HttpTimeFetcher, TimeFetcher};
//!
//! # async fn demo() -> Result<(), afiptime::FetchError> {
//! let fetcher = CachedTimeFetcher::new(HttpTimeFetcher::new());
//! let reading = fetcher.fetch_time().await?;
//! println!("{} {}", reading.formatted_date(), reading.formatted_time());
//! # Ok(())
//! # }
//! ```

mod cache;
mod clock;
mod error;
mod fetcher;
mod parser;
mod poller;
mod reading;

#[cfg(test)]
mod testing;

pub use cache::{CachedTimeFetcher, DEFAULT_RETENTION};
pub use clock::{Clock, SystemClock};
pub use error::FetchError;
pub use fetcher::{FetcherConfig, HttpTimeFetcher, TimeFetcher, DEFAULT_ENDPOINT};
pub use parser::parse_time_document;
pub use poller::{PollUpdate, TimePoller};
pub use reading::TimeReading;
