//! Telemetry Source Service Provider Interface
//!
//! Defines the site schema table, telemetry records and the contract for
//! loading a site's export.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::TelemetrySource;
pub use error::{Result, TelemetryError};
pub use model::{DateRange, Metric, SiteDataset, SiteSchema, TelemetryRecord};
