//! Telemetry Facade
//!
//! Unified re-exports for the telemetry module.
//!
//! This facade provides a single entry point for all telemetry functionality:
//! - `telemetry_spi` - Site schemas, records, datasets and errors
//! - `telemetry_api` - Dashboard configuration and view filters
//! - `telemetry_core` - CSV loading, the load-once store and analytics
//!
//! # Example
//!
//! ```rust,ignore
//! use telemetry_facade::{analyze_site, CsvTelemetrySource, DashboardConfig, TelemetryStore};
//! use anomaly::ThresholdAnomalyDetector;
//!
//! let config = DashboardConfig::default();
//! let source = CsvTelemetrySource::new(&config.data_dir);
//! let store = TelemetryStore::load(&source, &config.sites)?;
//! let site = store.get("site-1")?;
//! let range = store.overall_span().unwrap();
//! let analysis = analyze_site(site, &range, &ThresholdAnomalyDetector::default(), false)?;
//! if let Some(energy) = &analysis.energy {
//!     println!("{} energy anomalies", energy.anomaly_count);
//! }
//! ```

// Re-export everything from SPI
pub use telemetry_spi::*;

// Re-export everything from API
pub use telemetry_api::*;

// Re-export everything from Core
pub use telemetry_core::*;
