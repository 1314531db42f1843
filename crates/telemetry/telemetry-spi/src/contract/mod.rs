//! Contract definitions for telemetry sources.

mod telemetry_source;

pub use telemetry_source::TelemetrySource;
