//! Loaded site datasets.

use anomaly_spi::Reading;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{DateRange, Metric, SiteSchema, TelemetryRecord};

/// All records of one site, in file order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteDataset {
    pub schema: SiteSchema,
    pub records: Vec<TelemetryRecord>,
}

impl SiteDataset {
    pub fn new(schema: SiteSchema, records: Vec<TelemetryRecord>) -> Self {
        Self { schema, records }
    }

    pub fn id(&self) -> &str {
        &self.schema.id
    }

    pub fn label(&self) -> &str {
        &self.schema.label
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest timestamps, `None` for an empty dataset.
    pub fn time_span(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let first = self.records.iter().map(|r| r.timestamp).min()?;
        let last = self.records.iter().map(|r| r.timestamp).max()?;
        Some((first, last))
    }

    /// Timestamped readings of `metric`, skipping blank cells.
    pub fn series(&self, metric: Metric) -> Vec<Reading> {
        self.records
            .iter()
            .filter_map(|r| r.value(metric).map(|v| Reading::new(r.timestamp, v)))
            .collect()
    }

    /// Values of `metric`, skipping blank cells.
    pub fn values(&self, metric: Metric) -> Vec<f64> {
        self.records.iter().filter_map(|r| r.value(metric)).collect()
    }

    /// Copy of the dataset restricted to `range`.
    pub fn filter(&self, range: &DateRange) -> SiteDataset {
        let records = self
            .records
            .iter()
            .filter(|r| range.contains(r.timestamp))
            .cloned()
            .collect();
        SiteDataset::new(self.schema.clone(), records)
    }
}
