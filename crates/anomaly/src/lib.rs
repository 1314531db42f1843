//! # anomaly
//!
//! Threshold anomaly detection for timestamped series.
//! Classifies every reading against a `mean ± n_std * std_dev` band.

pub use anomaly_facade::*;
