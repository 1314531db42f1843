//! Telemetry rows.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::Metric;

/// One row of a site export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    /// Interval timestamp
    pub timestamp: NaiveDateTime,
    values: [Option<f64>; Metric::COUNT],
}

impl TelemetryRecord {
    /// A row with no recorded values.
    pub fn new(timestamp: NaiveDateTime) -> Self {
        Self {
            timestamp,
            values: [None; Metric::COUNT],
        }
    }

    /// Set a metric value, consuming and returning the row.
    pub fn with(mut self, metric: Metric, value: f64) -> Self {
        self.set(metric, Some(value));
        self
    }

    /// Set or clear a metric value.
    pub fn set(&mut self, metric: Metric, value: Option<f64>) {
        self.values[metric.index()] = value;
    }

    /// Value of `metric`, `None` when the cell was blank.
    pub fn value(&self, metric: Metric) -> Option<f64> {
        self.values[metric.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_record_values() {
        let ts = NaiveDate::from_ymd_opt(2024, 2, 29)
            .unwrap()
            .and_hms_opt(12, 15, 0)
            .unwrap();
        let mut record = TelemetryRecord::new(ts)
            .with(Metric::Energy, 12.5)
            .with(Metric::Voltage, 415.0);

        assert_eq!(record.value(Metric::Energy), Some(12.5));
        assert_eq!(record.value(Metric::Voltage), Some(415.0));
        assert_eq!(record.value(Metric::PowerFactor), None);

        record.set(Metric::Energy, None);
        assert_eq!(record.value(Metric::Energy), None);
    }
}
