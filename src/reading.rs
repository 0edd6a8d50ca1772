//! The parsed `{date, time}` pair returned by one successful fetch.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One reading from the time service.
///
/// `date` is expected as `YYYYMMDD` and `time` as `HHMMSS`, but the fetcher
/// only trims whitespace — it never rejects other shapes. Callers that rely
/// on the fixed-length form should check [`TimeReading::is_well_formed`]
/// first or tolerate malformed lengths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeReading {
    pub date: String,
    pub time: String,
}

impl TimeReading {
    /// Whether both fields have the expected fixed-length numeric shape
    /// (8 digits for `date`, 6 for `time`).
    pub fn is_well_formed(&self) -> bool {
        is_digits(&self.date, 8) && is_digits(&self.time, 6)
    }

    /// `YYYYMMDD` rendered as `DD/MM/YYYY`.
    ///
    /// A `date` that is not 8 digits is returned unchanged.
    pub fn formatted_date(&self) -> String {
        if !is_digits(&self.date, 8) {
            return self.date.clone();
        }
        format!("{}/{}/{}", &self.date[6..8], &self.date[4..6], &self.date[0..4])
    }

    /// `HHMMSS` rendered as `HH:MM:SS`.
    ///
    /// A `time` that is not 6 digits is returned unchanged.
    pub fn formatted_time(&self) -> String {
        if !is_digits(&self.time, 6) {
            return self.time.clone();
        }
        format!("{}:{}:{}", &self.time[0..2], &self.time[2..4], &self.time[4..6])
    }

    /// Both fields combined into a calendar datetime.
    ///
    /// `None` when the fields are malformed or name an impossible instant
    /// (month 13, hour 25, ...). The service publishes Argentine official
    /// time; no timezone is attached here.
    pub fn to_datetime(&self) -> Option<NaiveDateTime> {
        if !self.is_well_formed() {
            return None;
        }
        let combined = format!("{}{}", self.date, self.time);
        NaiveDateTime::parse_from_str(&combined, "%Y%m%d%H%M%S").ok()
    }

    /// Signed seconds between this reading and `local`, positive when the
    /// service clock is ahead of the local one.
    pub fn offset_seconds(&self, local: NaiveDateTime) -> Option<i64> {
        self.to_datetime().map(|dt| (dt - local).num_seconds())
    }
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.bytes().all(|b| b.is_ascii_digit())
}
