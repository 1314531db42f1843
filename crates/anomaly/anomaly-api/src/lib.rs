//! Anomaly Detection API
//!
//! Configuration types and builders for anomaly detection.

use serde::{Deserialize, Serialize};

// Re-export SPI types
pub use anomaly_spi::{
    AnomalyError, Classification, Reading, Result, StdDevKind, ThresholdResult,
};

/// Default band half-width, in standard deviations.
pub const DEFAULT_N_STD: f64 = 3.0;

// ============================================================================
// Detector Configuration
// ============================================================================

/// Threshold detector configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    /// Band half-width in standard deviations (default: 3.0).
    #[serde(default = "default_n_std")]
    pub n_std: f64,
    /// Standard deviation convention (default: sample).
    #[serde(default)]
    pub std_dev_kind: StdDevKind,
}

fn default_n_std() -> f64 {
    DEFAULT_N_STD
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            n_std: DEFAULT_N_STD,
            std_dev_kind: StdDevKind::Sample,
        }
    }
}

impl ThresholdConfig {
    pub fn new(n_std: f64) -> Self {
        Self {
            n_std,
            ..Self::default()
        }
    }

    /// Check that the configuration describes a usable band.
    pub fn validate(&self) -> Result<()> {
        AnomalyError::check_n_std(self.n_std)
    }
}

/// Builder for [`ThresholdConfig`].
#[derive(Debug, Default)]
pub struct ThresholdConfigBuilder {
    n_std: Option<f64>,
    std_dev_kind: Option<StdDevKind>,
}

impl ThresholdConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the band half-width.
    pub fn n_std(mut self, n_std: f64) -> Self {
        self.n_std = Some(n_std);
        self
    }

    /// Set the standard deviation convention.
    pub fn std_dev_kind(mut self, kind: StdDevKind) -> Self {
        self.std_dev_kind = Some(kind);
        self
    }

    /// Use the population standard deviation.
    pub fn population(self) -> Self {
        self.std_dev_kind(StdDevKind::Population)
    }

    /// Build and validate the configuration.
    pub fn build(self) -> Result<ThresholdConfig> {
        let config = ThresholdConfig {
            n_std: self.n_std.unwrap_or(DEFAULT_N_STD),
            std_dev_kind: self.std_dev_kind.unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }
}
