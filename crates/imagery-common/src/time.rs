//! Time-of-interest handling for catalog queries.

use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The number of days covered by the default search window.
pub const DEFAULT_WINDOW_DAYS: i64 = 50;

/// A closed date range used to filter catalog searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOfInterest {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TimeOfInterest {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TimeParseError> {
        if start > end {
            return Err(TimeParseError::StartAfterEnd { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parse a `YYYY-MM-DD/YYYY-MM-DD` range argument.
    pub fn parse(s: &str) -> Result<Self, TimeParseError> {
        let (start, end) = s
            .split_once('/')
            .ok_or_else(|| TimeParseError::InvalidFormat(s.to_string()))?;
        let start = NaiveDate::parse_from_str(start, "%Y-%m-%d")
            .map_err(|_| TimeParseError::InvalidFormat(s.to_string()))?;
        let end = NaiveDate::parse_from_str(end, "%Y-%m-%d")
            .map_err(|_| TimeParseError::InvalidFormat(s.to_string()))?;
        Self::new(start, end)
    }

    /// The default window: the `days` days ending today (UTC).
    pub fn last_days(days: i64) -> Self {
        let end = Utc::now().date_naive();
        Self {
            start: end - Duration::days(days),
            end,
        }
    }

    /// RFC 3339 interval form expected by the catalog `datetime` field,
    /// covering both endpoint days in full.
    pub fn as_catalog_interval(&self) -> String {
        format!("{}T00:00:00Z/{}T23:59:59Z", self.start, self.end)
    }
}

impl fmt::Display for TimeOfInterest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.start, self.end)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TimeParseError {
    #[error("Invalid time range: {0}. Expected 'YYYY-MM-DD/YYYY-MM-DD'")]
    InvalidFormat(String),

    #[error("Time range start {start} is after end {end}")]
    StartAfterEnd { start: NaiveDate, end: NaiveDate },
}
