//! Telemetry API
//!
//! Configuration types and builders for the site dashboard.

mod config;
mod view;

pub use config::{DashboardConfig, DashboardConfigBuilder, SiteConfig, DEFAULT_DATA_DIR};
pub use view::{SiteSelection, ViewConfig};

// Re-export SPI types
pub use telemetry_spi::{DateRange, Metric, Result, SiteSchema, TelemetryError};
