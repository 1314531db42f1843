//! Data models for site telemetry.

mod dataset;
mod date_range;
mod metric;
mod record;
mod site;

pub use dataset::SiteDataset;
pub use date_range::DateRange;
pub use metric::Metric;
pub use record::TelemetryRecord;
pub use site::SiteSchema;
