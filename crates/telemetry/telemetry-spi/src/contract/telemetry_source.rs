//! Telemetry source trait definition.

use crate::error::Result;
use crate::model::{SiteDataset, SiteSchema};

/// Trait for sources that can load a site's telemetry export.
///
/// Implementations read the whole export in one call; callers are expected to
/// load each site once and pass the resulting dataset around by reference.
pub trait TelemetrySource: Send + Sync {
    /// Source name.
    fn name(&self) -> &str;

    /// Load every record of `schema`'s export found at `location`.
    fn load(&self, schema: &SiteSchema, location: &str) -> Result<SiteDataset>;
}
