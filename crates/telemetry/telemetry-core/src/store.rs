//! Load-once telemetry store.

use telemetry_api::SiteConfig;
use telemetry_spi::{DateRange, Result, SiteDataset, TelemetryError, TelemetrySource};

/// Every configured site's dataset, loaded once and then only borrowed.
///
/// The store is owned by the caller; nothing in the analytics layer reads
/// files on its own.
#[derive(Debug, Clone, Default)]
pub struct TelemetryStore {
    datasets: Vec<SiteDataset>,
}

impl TelemetryStore {
    /// Load every site in `sites` from `source`, in order.
    pub fn load(source: &dyn TelemetrySource, sites: &[SiteConfig]) -> Result<Self> {
        let datasets = sites
            .iter()
            .map(|site| source.load(&site.schema, &site.file))
            .collect::<Result<Vec<_>>>()?;
        tracing::debug!(
            source = source.name(),
            sites = datasets.len(),
            "telemetry store ready"
        );
        Ok(Self { datasets })
    }

    /// Wrap datasets that were loaded elsewhere.
    pub fn from_datasets(datasets: Vec<SiteDataset>) -> Self {
        Self { datasets }
    }

    pub fn datasets(&self) -> &[SiteDataset] {
        &self.datasets
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    /// Dataset of the site named by id or label.
    pub fn get(&self, query: &str) -> Result<&SiteDataset> {
        self.datasets
            .iter()
            .find(|d| d.schema.matches(query))
            .ok_or_else(|| TelemetryError::UnknownSite(query.to_string()))
    }

    /// Calendar days from the earliest to the latest reading across all sites.
    pub fn overall_span(&self) -> Option<DateRange> {
        let spans: Vec<_> = self.datasets.iter().filter_map(|d| d.time_span()).collect();
        let first = spans.iter().map(|(first, _)| *first).min()?;
        let last = spans.iter().map(|(_, last)| *last).max()?;
        DateRange::spanning(first, last).ok()
    }
}
