//! Calendar date filters.

use std::fmt;

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TelemetryError};

/// Inclusive range of calendar days.
///
/// A timestamp is inside the range when it falls on or after midnight of
/// `start` and strictly before midnight following `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(TelemetryError::InvalidDateRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self { start, end })
    }

    /// Range covering the calendar days of two timestamps.
    pub fn spanning(first: NaiveDateTime, last: NaiveDateTime) -> Result<Self> {
        Self::new(first.date(), last.date())
    }

    /// A range covering a single day.
    pub fn day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Replace either bound, revalidating the result.
    pub fn narrowed(&self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<Self> {
        Self::new(start.unwrap_or(self.start), end.unwrap_or(self.end))
    }

    /// Number of calendar days covered.
    pub fn num_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Whether `timestamp` falls inside the range.
    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        let lower = self.start.and_time(NaiveTime::MIN);
        if timestamp < lower {
            return false;
        }
        match self.end.checked_add_days(Days::new(1)) {
            Some(next) => timestamp < next.and_time(NaiveTime::MIN),
            None => true,
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}
