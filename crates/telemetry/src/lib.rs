//! # telemetry
//!
//! Loading and analysis of per-site solar telemetry exports.
//!
//! Sites are described by a column schema table, loaded once into a
//! [`TelemetryStore`] and analysed per date range.

pub use telemetry_facade::*;
