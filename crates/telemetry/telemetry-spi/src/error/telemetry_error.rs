//! Telemetry error types.

use anomaly_spi::AnomalyError;
use thiserror::Error;

/// Telemetry loading and analysis errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TelemetryError {
    /// Source file could not be opened
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Malformed CSV structure
    #[error("CSV error: {0}")]
    CsvError(String),

    /// Header lacks a column the site schema requires
    #[error("Site '{site}': missing column '{column}'")]
    MissingColumn { site: String, column: String },

    /// Timestamp cell in none of the accepted formats
    #[error("Row {row}: invalid timestamp '{value}'")]
    InvalidTimestamp { row: usize, value: String },

    /// Metric cell that is neither blank nor a number
    #[error("Row {row}: invalid value '{value}' in column '{column}'")]
    InvalidValue {
        row: usize,
        column: String,
        value: String,
    },

    /// Start date after end date
    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange { start: String, end: String },

    /// Site id absent from the configured site table
    #[error("Unknown site: {0}")]
    UnknownSite(String),

    /// No readings for the site in the requested range
    #[error("No data for site '{0}' in the selected range")]
    NoData(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Detection failure on a metric series
    #[error(transparent)]
    Anomaly(#[from] AnomalyError),
}

/// Result type for telemetry operations.
pub type Result<T> = std::result::Result<T, TelemetryError>;
