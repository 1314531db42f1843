//! Anomaly detector trait definition.

use crate::error::Result;
use crate::model::{Reading, ThresholdResult};

/// Anomaly detector trait.
///
/// Implementations classify every reading of a series against a band derived
/// from the series itself. Detection is a pure computation: implementations
/// must not perform I/O or keep state between calls.
pub trait AnomalyDetector: Send + Sync {
    /// Short identifier of the detection method.
    fn name(&self) -> &str;

    /// Compute the band for `series` and collect the readings outside it.
    fn detect(&self, series: &[Reading]) -> Result<ThresholdResult>;

    /// Compute a signed deviation score for every reading.
    fn score(&self, series: &[Reading]) -> Result<Vec<f64>>;
}
