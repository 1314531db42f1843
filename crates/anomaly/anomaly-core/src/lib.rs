//! Anomaly Detection Core
//!
//! Implementations for threshold anomaly detection and the statistics behind it.

mod detectors;
pub mod statistics;

pub use detectors::*;
