//! Data models for anomaly detection.
//!
//! This module contains data structures used throughout the anomaly detection system.

mod classification;
mod reading;
mod threshold_result;

pub use classification::{Classification, StdDevKind};
pub use reading::{reading_values, Reading};
pub use threshold_result::ThresholdResult;
