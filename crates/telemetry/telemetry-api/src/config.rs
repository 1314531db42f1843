//! Dashboard configuration types.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anomaly_api::{StdDevKind, ThresholdConfig};
use serde::{Deserialize, Serialize};
use telemetry_spi::{Result, SiteSchema, TelemetryError};

/// Directory searched for site exports when none is configured.
pub const DEFAULT_DATA_DIR: &str = ".";

/// A site and the file holding its export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Export file, relative to the data directory
    pub file: String,
    #[serde(flatten)]
    pub schema: SiteSchema,
}

impl SiteConfig {
    pub fn new(schema: SiteSchema, file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            schema,
        }
    }

    /// The `indregTC{n}` site exported as `cleaned_solar_data_Site_{n}.csv`.
    pub fn indreg(n: u32) -> Self {
        Self::new(
            SiteSchema::indreg(n),
            format!("cleaned_solar_data_Site_{}.csv", n),
        )
    }

    pub fn id(&self) -> &str {
        &self.schema.id
    }
}

/// Top-level configuration of the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Directory holding the site exports
    pub data_dir: PathBuf,
    /// Anomaly band parameters
    pub detection: ThresholdConfig,
    /// Site table, in display order
    pub sites: Vec<SiteConfig>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            detection: ThresholdConfig::default(),
            sites: (1..=3).map(SiteConfig::indreg).collect(),
        }
    }
}

impl DashboardConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: DashboardConfig =
            toml::from_str(source).map_err(|e| TelemetryError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .map_err(|e| TelemetryError::FileNotFound(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&source)
    }

    /// Serialize back to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| TelemetryError::ConfigError(e.to_string()))
    }

    /// Check detection parameters and the site table.
    pub fn validate(&self) -> Result<()> {
        self.detection
            .validate()
            .map_err(|e| TelemetryError::ConfigError(e.to_string()))?;

        if self.sites.is_empty() {
            return Err(TelemetryError::ConfigError(
                "at least one site is required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for site in &self.sites {
            if site.id().trim().is_empty() {
                return Err(TelemetryError::ConfigError("site id is empty".to_string()));
            }
            if site.file.trim().is_empty() {
                return Err(TelemetryError::ConfigError(format!(
                    "site '{}' has no file",
                    site.id()
                )));
            }
            if !seen.insert(site.id().to_lowercase()) {
                return Err(TelemetryError::ConfigError(format!(
                    "duplicate site id '{}'",
                    site.id()
                )));
            }
        }
        Ok(())
    }

    /// Look a site up by id or label.
    pub fn site(&self, query: &str) -> Result<&SiteConfig> {
        self.sites
            .iter()
            .find(|s| s.schema.matches(query))
            .ok_or_else(|| TelemetryError::UnknownSite(query.to_string()))
    }
}

/// Builder for DashboardConfig.
#[derive(Debug, Default)]
pub struct DashboardConfigBuilder {
    data_dir: Option<PathBuf>,
    n_std: Option<f64>,
    std_dev_kind: Option<StdDevKind>,
    sites: Vec<SiteConfig>,
}

impl DashboardConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the data directory.
    pub fn data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Set the band half-width.
    pub fn n_std(mut self, n_std: f64) -> Self {
        self.n_std = Some(n_std);
        self
    }

    /// Set the standard deviation convention.
    pub fn std_dev_kind(mut self, kind: StdDevKind) -> Self {
        self.std_dev_kind = Some(kind);
        self
    }

    /// Append a site.
    pub fn site(mut self, site: SiteConfig) -> Self {
        self.sites.push(site);
        self
    }

    /// Build and validate. With no sites added, the default three-site table is used.
    pub fn build(self) -> Result<DashboardConfig> {
        let defaults = DashboardConfig::default();
        let config = DashboardConfig {
            data_dir: self.data_dir.unwrap_or(defaults.data_dir),
            detection: ThresholdConfig {
                n_std: self.n_std.unwrap_or(defaults.detection.n_std),
                std_dev_kind: self
                    .std_dev_kind
                    .unwrap_or(defaults.detection.std_dev_kind),
            },
            sites: if self.sites.is_empty() {
                defaults.sites
            } else {
                self.sites
            },
        };
        config.validate()?;
        Ok(config)
    }
}
