//! Timestamped readings.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single numeric reading of a series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    /// Local wall-clock time of the reading
    pub timestamp: NaiveDateTime,
    /// Measured value
    pub value: f64,
}

impl Reading {
    /// Create a new reading.
    pub fn new(timestamp: NaiveDateTime, value: f64) -> Self {
        Self { timestamp, value }
    }
}

/// Extract the values of a series in order.
pub fn reading_values(series: &[Reading]) -> Vec<f64> {
    series.iter().map(|r| r.value).collect()
}
