//! Classification labels and deviation conventions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of comparing a value against an anomaly band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    Normal,
    Anomaly,
}

impl Classification {
    pub fn is_anomaly(self) -> bool {
        matches!(self, Classification::Anomaly)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Normal => write!(f, "Normal"),
            Classification::Anomaly => write!(f, "Anomaly"),
        }
    }
}

/// Denominator used when computing the standard deviation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StdDevKind {
    /// Divide by `n - 1` (Bessel's correction).
    #[default]
    Sample,
    /// Divide by `n`.
    Population,
}

impl StdDevKind {
    /// Degrees of freedom removed from the denominator.
    pub fn ddof(self) -> usize {
        match self {
            StdDevKind::Sample => 1,
            StdDevKind::Population => 0,
        }
    }
}

impl fmt::Display for StdDevKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StdDevKind::Sample => write!(f, "sample"),
            StdDevKind::Population => write!(f, "population"),
        }
    }
}
