//! Plain-text rendering of dashboard results.

use std::fmt::{self, Write};

use anomaly::ThresholdResult;
use telemetry::{
    ComparisonRow, Metric, MetricDetail, SiteAnalysis, SiteEnergyTotal, TelemetryStore,
};

/// Table of loaded sites with their row counts and time spans.
pub fn sites(store: &TelemetryStore) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "{:<12} {:<16} {:>8}  SPAN", "ID", "SITE", "ROWS")?;
    for dataset in store.datasets() {
        let span = match dataset.time_span() {
            Some((first, last)) => format!("{} .. {}", first, last),
            None => "-".to_string(),
        };
        writeln!(
            out,
            "{:<12} {:<16} {:>8}  {}",
            dataset.id(),
            dataset.label(),
            dataset.len(),
            span
        )?;
    }
    Ok(out)
}

/// The single-site dashboard followed by the cross-site comparison table.
pub fn site_dashboard(
    analysis: &SiteAnalysis,
    totals: &[SiteEnergyTotal],
    rows: &[ComparisonRow],
) -> Result<String, fmt::Error> {
    let mut out = site_analysis(analysis)?;
    writeln!(out)?;
    out.push_str(&comparison(totals, rows)?);
    Ok(out)
}

/// The single-site figures.
pub fn site_analysis(analysis: &SiteAnalysis) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "=== {} ({}) ===", analysis.site_label, analysis.range)?;
    writeln!(
        out,
        "Rows in range: {} over {} day(s)",
        analysis.rows,
        analysis.range.num_days()
    )?;

    writeln!(out, "\nEnergy Generation")?;
    writeln!(
        out,
        "  Total Energy Generated (kWh): {:.2}",
        analysis.total_energy
    )?;
    writeln!(out, "  Energy Anomalies: {}", count(&analysis.energy))?;
    band(&mut out, analysis.energy.as_ref())?;

    writeln!(out, "\nPower Factor Analysis")?;
    writeln!(
        out,
        "  Average Power Factor: {}",
        optional(analysis.power_factor.as_ref().map(|r| r.mean))
    )?;
    writeln!(out, "  Power Factor Anomalies: {}", count(&analysis.power_factor))?;
    band(&mut out, analysis.power_factor.as_ref())?;

    writeln!(out, "\nVoltage Stability")?;
    writeln!(
        out,
        "  Number of Voltage Anomalies: {}",
        count(&analysis.voltage)
    )?;
    band(&mut out, analysis.voltage.as_ref())?;

    let balance = &analysis.phase_balance;
    writeln!(out, "\nCurrent Distribution Across Phases")?;
    for (name, mean) in [("A", balance.mean_a), ("B", balance.mean_b), ("C", balance.mean_c)] {
        writeln!(out, "  Phase {} mean (A): {}", name, optional(mean))?;
    }
    writeln!(out, "  Phase Imbalance (%): {}", optional(balance.imbalance_pct))?;

    if let Some(daily) = &analysis.daily_energy {
        writeln!(out, "\nDaily Energy Generation")?;
        for day in daily {
            writeln!(out, "  {}  {:>12.2} kWh", day.date, day.total)?;
        }
    }

    writeln!(out, "\nAnomaly Details")?;
    for metric in Metric::ANOMALY {
        anomaly_list(&mut out, metric, analysis.metric(metric))?;
    }
    Ok(out)
}

/// Every reading of one metric with its classification.
pub fn metric_detail(detail: &MetricDetail, all: bool) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(
        out,
        "=== {} / {} ({}) ===",
        detail.site_id,
        detail.metric.label(),
        detail.range
    )?;
    writeln!(out, "Readings: {}", detail.readings.len())?;
    writeln!(
        out,
        "Mean: {:.4}  Std dev: {:.4}  n_std: {}",
        detail.result.mean, detail.result.std_dev, detail.result.n_std
    )?;
    band(&mut out, Some(&detail.result))?;
    writeln!(out, "Anomalies found: {}", detail.result.anomaly_count)?;

    let rows: Vec<_> = detail
        .readings
        .iter()
        .filter(|r| all || r.classification.is_anomaly())
        .collect();
    if !rows.is_empty() {
        writeln!(out)?;
        for r in rows {
            writeln!(
                out,
                "  {}  {:>12.4}  score={:>8.3}  {}",
                r.timestamp, r.value, r.score, r.classification
            )?;
        }
    }
    Ok(out)
}

/// The all-sites energy totals and comparison table.
pub fn comparison(totals: &[SiteEnergyTotal], rows: &[ComparisonRow]) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(out, "Total Energy Yield Across Sites")?;
    for total in totals {
        writeln!(
            out,
            "  {} Total Energy (kWh): {:.2}",
            total.site_label, total.total_energy
        )?;
    }

    writeln!(out, "\nComparison Across Sites")?;
    write!(out, "  {:<22}", "Metric")?;
    for row in rows {
        write!(out, " {:>14}", row.site_label)?;
    }
    writeln!(out)?;

    let lines: [(&str, fn(&ComparisonRow) -> Option<f64>); 3] = [
        ("Total Energy", |r| Some(r.total_energy)),
        ("Average Power Factor", |r| r.average_power_factor),
        ("Voltage Stability", |r| r.voltage_stability),
    ];
    for (name, value) in lines {
        write!(out, "  {:<22}", name)?;
        for row in rows {
            write!(out, " {:>14}", optional(value(row)))?;
        }
        writeln!(out)?;
    }
    Ok(out)
}

fn count(result: &Option<ThresholdResult>) -> String {
    match result {
        Some(r) => r.anomaly_count.to_string(),
        None => "n/a".to_string(),
    }
}

fn band(out: &mut String, result: Option<&ThresholdResult>) -> fmt::Result {
    match result.map(ThresholdResult::band) {
        Some((lower, upper)) => writeln!(out, "  Normal band: [{:.4}, {:.4}]", lower, upper),
        None => writeln!(out, "  Normal band: n/a (no readings in range)"),
    }
}

fn anomaly_list(out: &mut String, metric: Metric, result: Option<&ThresholdResult>) -> fmt::Result {
    writeln!(out, "  {} Anomalies", metric.label())?;
    let label = metric.label().to_lowercase();
    match result {
        None => writeln!(out, "    No {} readings in range.", label),
        Some(r) if !r.has_anomalies() => writeln!(out, "    No {} anomalies detected.", label),
        Some(r) => {
            for reading in &r.anomalies {
                writeln!(out, "    {}  {:.4}", reading.timestamp, reading.value)?;
            }
            Ok(())
        }
    }
}

fn optional(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| "n/a".to_string())
}
