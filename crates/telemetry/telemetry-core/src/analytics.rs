//! Site dashboard analytics.
//!
//! Everything here is a pure function of already-loaded datasets.

use std::collections::BTreeMap;

use anomaly_facade::{
    statistics, AnomalyDetector, AnomalyError, Classification, Reading, StdDevKind,
    ThresholdResult,
};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use telemetry_spi::{DateRange, Metric, Result, SiteDataset, TelemetryError};

use crate::store::TelemetryStore;

// ============================================================================
// Result types
// ============================================================================

/// Mean current per phase and the spread between phases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseBalance {
    pub mean_a: Option<f64>,
    pub mean_b: Option<f64>,
    pub mean_c: Option<f64>,
    /// Average of the three phase means
    pub average: Option<f64>,
    /// `(max - min) / average * 100`
    pub imbalance_pct: Option<f64>,
}

/// Sum of a metric over one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: f64,
}

/// Dashboard figures for one site over a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteAnalysis {
    pub site_id: String,
    pub site_label: String,
    pub range: DateRange,
    /// Rows inside the range
    pub rows: usize,
    /// Energy generated in the range (kWh)
    pub total_energy: f64,
    /// Band of each anomaly metric; `None` when the metric has no readings in range
    pub energy: Option<ThresholdResult>,
    pub power_factor: Option<ThresholdResult>,
    pub voltage: Option<ThresholdResult>,
    pub phase_balance: PhaseBalance,
    /// Per-day energy, when requested
    pub daily_energy: Option<Vec<DailyTotal>>,
}

impl SiteAnalysis {
    /// Detection result of an anomaly metric, if it had readings in range.
    pub fn metric(&self, metric: Metric) -> Option<&ThresholdResult> {
        match metric {
            Metric::Energy => self.energy.as_ref(),
            Metric::PowerFactor => self.power_factor.as_ref(),
            Metric::Voltage => self.voltage.as_ref(),
            _ => None,
        }
    }

    /// Anomalies across all screened metrics.
    pub fn total_anomalies(&self) -> usize {
        Metric::ANOMALY
            .iter()
            .filter_map(|&m| self.metric(m))
            .map(|r| r.anomaly_count)
            .sum()
    }
}

/// A reading with its classification and z-score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedReading {
    pub timestamp: NaiveDateTime,
    pub value: f64,
    pub classification: Classification,
    pub score: f64,
}

/// Per-reading detection detail for one metric of one site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDetail {
    pub site_id: String,
    pub metric: Metric,
    pub range: DateRange,
    pub result: ThresholdResult,
    pub readings: Vec<ClassifiedReading>,
}

/// Unfiltered energy total of a site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteEnergyTotal {
    pub site_id: String,
    pub site_label: String,
    pub total_energy: f64,
}

/// Cross-site comparison figures, computed over each full dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub site_id: String,
    pub site_label: String,
    pub total_energy: f64,
    pub average_power_factor: Option<f64>,
    /// Standard deviation of line voltage
    pub voltage_stability: Option<f64>,
}

// ============================================================================
// Operations
// ============================================================================

/// Compute the single-site dashboard for `range`.
pub fn analyze_site(
    dataset: &SiteDataset,
    range: &DateRange,
    detector: &dyn AnomalyDetector,
    daily: bool,
) -> Result<SiteAnalysis> {
    let data = dataset.filter(range);
    if data.is_empty() {
        return Err(TelemetryError::NoData(dataset.id().to_string()));
    }

    let energy = detect_present(detector, &data.series(Metric::Energy))?;
    let power_factor = detect_present(detector, &data.series(Metric::PowerFactor))?;
    let voltage = detect_present(detector, &data.series(Metric::Voltage))?;

    let analysis = SiteAnalysis {
        site_id: dataset.id().to_string(),
        site_label: dataset.label().to_string(),
        range: *range,
        rows: data.len(),
        total_energy: total(&data, Metric::Energy),
        energy,
        power_factor,
        voltage,
        phase_balance: phase_balance(&data),
        daily_energy: daily.then(|| daily_totals(&data, Metric::Energy)),
    };

    tracing::info!(
        site = %analysis.site_id,
        range = %range,
        rows = analysis.rows,
        anomalies = analysis.total_anomalies(),
        "site analysed"
    );
    Ok(analysis)
}

/// Classify every reading of one metric over `range`.
pub fn detect_metric(
    dataset: &SiteDataset,
    range: &DateRange,
    metric: Metric,
    detector: &dyn AnomalyDetector,
) -> Result<MetricDetail> {
    let data = dataset.filter(range);
    if data.is_empty() {
        return Err(TelemetryError::NoData(dataset.id().to_string()));
    }

    let series = data.series(metric);
    let result = detector.detect(&series)?;
    let scores = detector.score(&series)?;

    let readings = series
        .iter()
        .zip(scores)
        .map(|(reading, score)| ClassifiedReading {
            timestamp: reading.timestamp,
            value: reading.value,
            classification: result.classify(reading.value),
            score,
        })
        .collect();

    Ok(MetricDetail {
        site_id: dataset.id().to_string(),
        metric,
        range: *range,
        result,
        readings,
    })
}

/// Mean phase currents and their imbalance percentage.
///
/// The percentage is undefined when a phase has no readings or the average is zero.
pub fn phase_balance(dataset: &SiteDataset) -> PhaseBalance {
    let [mean_a, mean_b, mean_c] =
        Metric::PHASES.map(|phase| statistics::mean(&dataset.values(phase)));

    let (average, imbalance_pct) = match (mean_a, mean_b, mean_c) {
        (Some(a), Some(b), Some(c)) => {
            let average = (a + b + c) / 3.0;
            let spread = a.max(b).max(c) - a.min(b).min(c);
            let pct = (average != 0.0).then(|| spread / average * 100.0);
            (Some(average), pct)
        }
        _ => (None, None),
    };

    PhaseBalance {
        mean_a,
        mean_b,
        mean_c,
        average,
        imbalance_pct,
    }
}

/// Per-calendar-day sums of `metric`, in ascending date order.
pub fn daily_totals(dataset: &SiteDataset, metric: Metric) -> Vec<DailyTotal> {
    let mut days: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for record in &dataset.records {
        if let Some(value) = record.value(metric) {
            *days.entry(record.timestamp.date()).or_insert(0.0) += value;
        }
    }
    days.into_iter()
        .map(|(date, total)| DailyTotal { date, total })
        .collect()
}

/// Energy generated by each site over its whole dataset.
pub fn energy_totals(store: &TelemetryStore) -> Vec<SiteEnergyTotal> {
    store
        .datasets()
        .iter()
        .map(|d| SiteEnergyTotal {
            site_id: d.id().to_string(),
            site_label: d.label().to_string(),
            total_energy: total(d, Metric::Energy),
        })
        .collect()
}

/// Total energy, average power factor and voltage spread of each site.
pub fn site_comparison(store: &TelemetryStore, kind: StdDevKind) -> Vec<ComparisonRow> {
    store
        .datasets()
        .iter()
        .map(|d| ComparisonRow {
            site_id: d.id().to_string(),
            site_label: d.label().to_string(),
            total_energy: total(d, Metric::Energy),
            average_power_factor: statistics::mean(&d.values(Metric::PowerFactor)),
            voltage_stability: statistics::std_dev(&d.values(Metric::Voltage), kind),
        })
        .collect()
}

/// Detect on a metric series, mapping an all-blank series to `None`.
fn detect_present(
    detector: &dyn AnomalyDetector,
    series: &[Reading],
) -> Result<Option<ThresholdResult>> {
    match detector.detect(series) {
        Ok(result) => Ok(Some(result)),
        Err(AnomalyError::EmptyInput) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Sum of a metric, zero when there are no readings.
fn total(dataset: &SiteDataset, metric: Metric) -> f64 {
    statistics::sum(&dataset.values(metric)).unwrap_or(0.0)
}
