//! Threshold detection result types.

use serde::{Deserialize, Serialize};

use super::{Classification, Reading};

/// Result of classifying a series against a symmetric `mean ± n_std * std_dev` band.
///
/// Values are derived once from the input series and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdResult {
    /// Arithmetic mean of the series.
    pub mean: f64,
    /// Standard deviation of the series.
    pub std_dev: f64,
    /// Band half-width in standard deviations.
    pub n_std: f64,
    /// `mean - n_std * std_dev`
    pub lower_threshold: f64,
    /// `mean + n_std * std_dev`
    pub upper_threshold: f64,
    /// Readings strictly outside the band, in input order.
    pub anomalies: Vec<Reading>,
    /// Number of anomalous readings.
    pub anomaly_count: usize,
}

impl ThresholdResult {
    /// Build the band from precomputed statistics and collect the anomalies of `series`.
    pub fn new(mean: f64, std_dev: f64, n_std: f64, series: &[Reading]) -> Self {
        let lower_threshold = mean - n_std * std_dev;
        let upper_threshold = mean + n_std * std_dev;

        let anomalies: Vec<Reading> = series
            .iter()
            .filter(|r| r.value < lower_threshold || r.value > upper_threshold)
            .copied()
            .collect();
        let anomaly_count = anomalies.len();

        Self {
            mean,
            std_dev,
            n_std,
            lower_threshold,
            upper_threshold,
            anomalies,
            anomaly_count,
        }
    }

    /// Classify a single value. Values on a threshold are `Normal`.
    pub fn classify(&self, value: f64) -> Classification {
        if value < self.lower_threshold || value > self.upper_threshold {
            Classification::Anomaly
        } else {
            Classification::Normal
        }
    }

    /// Classify every reading of a series.
    pub fn classifications(&self, series: &[Reading]) -> Vec<Classification> {
        series.iter().map(|r| self.classify(r.value)).collect()
    }

    /// The inclusive normal band as `(lower, upper)`.
    pub fn band(&self) -> (f64, f64) {
        (self.lower_threshold, self.upper_threshold)
    }

    /// Whether any anomaly was found.
    pub fn has_anomalies(&self) -> bool {
        self.anomaly_count > 0
    }
}
