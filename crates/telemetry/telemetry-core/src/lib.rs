//! Telemetry Core
//!
//! Implementations for loading site exports and computing dashboard analytics.

pub mod analytics;
pub mod csv_source;
pub mod store;
pub mod timestamp;

pub use analytics::{
    analyze_site, daily_totals, detect_metric, energy_totals, phase_balance, site_comparison,
    ClassifiedReading, ComparisonRow, DailyTotal, MetricDetail, PhaseBalance, SiteAnalysis,
    SiteEnergyTotal,
};
pub use csv_source::{read_site_csv, CsvTelemetrySource};
pub use store::TelemetryStore;
pub use timestamp::parse_timestamp;
