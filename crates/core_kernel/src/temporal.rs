//! Calendar-date handling for coverage periods
//!
//! Insurance coverage is expressed in whole calendar days. A coverage window
//! includes both its first and its last day.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical textual form of a calendar date
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Timestamp without an offset, read as UTC
const NAIVE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Errors related to temporal operations
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemporalError {
    #[error("Invalid period: start {start} must not be after end {end}")]
    InvalidPeriod {
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("Unparseable date: {0:?}")]
    InvalidDate(String),
}

/// An inclusive range of calendar days `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CoverageWindow {
    /// First covered day
    pub start: NaiveDate,
    /// Last covered day
    pub end: NaiveDate,
}

impl CoverageWindow {
    /// Creates a window, rejecting `start > end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, TemporalError> {
        if start > end {
            return Err(TemporalError::InvalidPeriod { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns true if `date` falls on or between the first and last day
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// The instant the window's last day begins, in UTC
    pub fn end_instant(&self) -> DateTime<Utc> {
        self.end.and_time(NaiveTime::MIN).and_utc()
    }
}

/// Parses a strict `YYYY-MM-DD` calendar date, ignoring surrounding whitespace
pub fn parse_calendar_date(text: &str) -> Result<NaiveDate, TemporalError> {
    let trimmed = text.trim();
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| TemporalError::InvalidDate(trimmed.to_string()))
}

/// Parses a `YYYY-MM-DD` date, an RFC 3339 timestamp, or a timestamp
/// without an offset
///
/// Timestamps are reduced to their calendar date in UTC. A timestamp without
/// an offset is taken to be UTC already.
pub fn parse_date_or_timestamp(text: &str) -> Result<NaiveDate, TemporalError> {
    let trimmed = text.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Ok(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(ts.with_timezone(&Utc).date_naive());
    }
    NaiveDateTime::parse_from_str(trimmed, NAIVE_TIMESTAMP_FORMAT)
        .map(|ts| ts.date())
        .map_err(|_| TemporalError::InvalidDate(trimmed.to_string()))
}

/// Formats a date in canonical `YYYY-MM-DD` form
pub fn format_calendar_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// The current calendar date in UTC
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}
