//! Error types for telemetry loading and analysis.

mod telemetry_error;

pub use telemetry_error::{Result, TelemetryError};
