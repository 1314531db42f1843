//! Anomaly detector implementations.

use anomaly_api::{ThresholdConfig, DEFAULT_N_STD};
use anomaly_spi::{
    reading_values, AnomalyDetector, AnomalyError, Reading, Result, StdDevKind, ThresholdResult,
};

use crate::statistics;

// ============================================================================
// Threshold Detector
// ============================================================================

/// Mean ± N standard deviations anomaly detector.
///
/// The band is computed from the series being classified, so the detector
/// holds only its parameters and can be shared freely.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdAnomalyDetector {
    n_std: f64,
    std_dev_kind: StdDevKind,
}

impl ThresholdAnomalyDetector {
    /// Create a detector with the given band half-width and sample standard deviation.
    pub fn new(n_std: f64) -> Result<Self> {
        AnomalyError::check_n_std(n_std)?;
        Ok(Self {
            n_std,
            std_dev_kind: StdDevKind::Sample,
        })
    }

    /// Create from configuration.
    pub fn from_config(config: ThresholdConfig) -> Result<Self> {
        Ok(Self::new(config.n_std)?.with_std_dev_kind(config.std_dev_kind))
    }

    /// Switch the standard deviation convention.
    pub fn with_std_dev_kind(mut self, kind: StdDevKind) -> Self {
        self.std_dev_kind = kind;
        self
    }

    pub fn n_std(&self) -> f64 {
        self.n_std
    }

    pub fn std_dev_kind(&self) -> StdDevKind {
        self.std_dev_kind
    }

    /// Mean and standard deviation of a validated series.
    fn moments(&self, series: &[Reading]) -> Result<(f64, f64)> {
        if series.is_empty() {
            return Err(AnomalyError::EmptyInput);
        }
        if let Some(index) = series.iter().position(|r| !r.value.is_finite()) {
            return Err(AnomalyError::NonFiniteValue { index });
        }

        let values = reading_values(series);
        let mean = statistics::mean(&values).ok_or(AnomalyError::EmptyInput)?;
        let mean = AnomalyError::check_finite("mean", mean)?;
        // A lone reading has no spread under the sample convention either.
        let std_dev = statistics::std_dev(&values, self.std_dev_kind).unwrap_or(0.0);
        let std_dev = AnomalyError::check_finite("std_dev", std_dev)?;
        Ok((mean, std_dev))
    }
}

impl Default for ThresholdAnomalyDetector {
    fn default() -> Self {
        Self {
            n_std: DEFAULT_N_STD,
            std_dev_kind: StdDevKind::Sample,
        }
    }
}

impl AnomalyDetector for ThresholdAnomalyDetector {
    fn name(&self) -> &str {
        "threshold"
    }

    fn detect(&self, series: &[Reading]) -> Result<ThresholdResult> {
        let (mean, std_dev) = self.moments(series)?;
        let result = ThresholdResult::new(mean, std_dev, self.n_std, series);
        AnomalyError::check_finite("lower_threshold", result.lower_threshold)?;
        AnomalyError::check_finite("upper_threshold", result.upper_threshold)?;
        tracing::debug!(
            points = series.len(),
            mean,
            std_dev,
            anomalies = result.anomaly_count,
            "threshold detection complete"
        );
        Ok(result)
    }

    fn score(&self, series: &[Reading]) -> Result<Vec<f64>> {
        let (mean, std_dev) = self.moments(series)?;
        if std_dev == 0.0 {
            return Ok(vec![0.0; series.len()]);
        }
        Ok(series.iter().map(|r| (r.value - mean) / std_dev).collect())
    }
}

/// Classify `series` with a default-convention detector of width `n_std`.
pub fn detect(series: &[Reading], n_std: f64) -> Result<ThresholdResult> {
    ThresholdAnomalyDetector::new(n_std)?.detect(series)
}
