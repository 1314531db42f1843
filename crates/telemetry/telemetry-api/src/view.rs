//! View filters chosen per invocation.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use telemetry_spi::{DateRange, Result};

/// Which part of the dashboard to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteSelection {
    /// A single site, by id or label
    Site(String),
    /// The cross-site energy comparison
    All,
}

impl FromStr for SiteSelection {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err("site must not be empty".to_string());
        }
        match trimmed.to_lowercase().as_str() {
            "all" | "all-sites" | "all sites" => Ok(SiteSelection::All),
            _ => Ok(SiteSelection::Site(trimmed.to_string())),
        }
    }
}

/// Filters applied to a single dashboard view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    pub selection: SiteSelection,
    /// First day to include; defaults to the earliest loaded day
    pub start: Option<NaiveDate>,
    /// Last day to include; defaults to the latest loaded day
    pub end: Option<NaiveDate>,
    /// Whether to add per-day energy totals
    pub daily: bool,
}

impl ViewConfig {
    pub fn new(selection: SiteSelection) -> Self {
        Self {
            selection,
            start: None,
            end: None,
            daily: false,
        }
    }

    pub fn with_start(mut self, start: Option<NaiveDate>) -> Self {
        self.start = start;
        self
    }

    pub fn with_end(mut self, end: Option<NaiveDate>) -> Self {
        self.end = end;
        self
    }

    pub fn with_daily(mut self, daily: bool) -> Self {
        self.daily = daily;
        self
    }

    /// The requested range, with unset bounds taken from `available`.
    pub fn range(&self, available: DateRange) -> Result<DateRange> {
        available.narrowed(self.start, self.end)
    }
}
