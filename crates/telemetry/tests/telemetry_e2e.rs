//! End-to-end tests for the telemetry crate
//!
//! Drives a full dashboard session from a TOML configuration to the
//! per-site and cross-site figures.

use std::fs;

use anomaly::{StdDevKind, ThresholdAnomalyDetector};
use chrono::NaiveDate;
use tempfile::TempDir;
use telemetry::{
    analyze_site, detect_metric, energy_totals, site_comparison, CsvTelemetrySource,
    DashboardConfig, Metric, SiteSelection, TelemetryStore, ViewConfig,
};

const NORTH_CSV: &str = "\
ts,kwh,pf,v_ll,ia,ib,ic
14/02/2024 06:00,0.0,0.50,400,0,0,0
14/02/2024 12:00,40.0,1.00,400,40,38,42
15/02/2024 06:00,0.0,0.50,400,0,0,0
15/02/2024 12:00,44.0,1.00,400,44,40,48
16/02/2024 12:00,42.0,0.25,520,42,42,42
";

const SOUTH_CSV: &str = "\
ts,kwh,pf,v_ll,ia,ib,ic
2024-02-14 12:00:00,30.0,0.90,410,30,30,30
2024-02-15 12:00:00,32.0,0.90,412,32,32,32
";

const CONFIG: &str = r#"
[detection]
n_std = 1.0
std_dev_kind = "sample"

[[sites]]
id = "north"
label = "North Array"
file = "north.csv"
timestamp_column = "ts"
energy_column = "kwh"
power_factor_column = "pf"
voltage_column = "v_ll"
current_a_column = "ia"
current_b_column = "ib"
current_c_column = "ic"

[[sites]]
id = "south"
label = "South Array"
file = "south.csv"
timestamp_column = "ts"
energy_column = "kwh"
power_factor_column = "pf"
voltage_column = "v_ll"
current_a_column = "ia"
current_b_column = "ib"
current_c_column = "ic"
"#;

fn session() -> (TempDir, DashboardConfig, TelemetryStore) {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("north.csv"), NORTH_CSV).unwrap();
    fs::write(dir.path().join("south.csv"), SOUTH_CSV).unwrap();

    let mut config = DashboardConfig::from_toml_str(CONFIG).unwrap();
    config.data_dir = dir.path().to_path_buf();

    let source = CsvTelemetrySource::new(&config.data_dir);
    let store = TelemetryStore::load(&source, &config.sites).unwrap();
    (dir, config, store)
}

#[test]
fn e2e_single_site_view() {
    let (_dir, config, store) = session();
    let detector = ThresholdAnomalyDetector::from_config(config.detection).unwrap();

    let view: ViewConfig = ViewConfig::new("North Array".parse().unwrap())
        .with_start(NaiveDate::from_ymd_opt(2024, 2, 14))
        .with_daily(true);
    let SiteSelection::Site(site) = &view.selection else {
        panic!("expected a single site");
    };
    let range = view.range(store.overall_span().unwrap()).unwrap();
    let analysis = analyze_site(store.get(site).unwrap(), &range, &detector, view.daily).unwrap();

    assert_eq!(analysis.site_id, "north");
    assert_eq!(analysis.rows, 5);
    assert_eq!(analysis.total_energy, 126.0);

    // The surge reading on the 16th is the only voltage outlier.
    let voltage = analysis.voltage.as_ref().unwrap();
    assert_eq!(voltage.anomaly_count, 1);
    assert_eq!(voltage.anomalies[0].value, 520.0);

    let daily = analysis.daily_energy.unwrap();
    let totals: Vec<f64> = daily.iter().map(|d| d.total).collect();
    assert_eq!(totals, vec![40.0, 44.0, 42.0]);
}

#[test]
fn e2e_metric_detail_matches_site_view() {
    let (_dir, config, store) = session();
    let detector = ThresholdAnomalyDetector::from_config(config.detection).unwrap();
    let range = store.overall_span().unwrap();
    let north = store.get("north").unwrap();

    let analysis = analyze_site(north, &range, &detector, false).unwrap();
    let detail = detect_metric(north, &range, Metric::PowerFactor, &detector).unwrap();

    let power_factor = analysis.power_factor.unwrap();
    assert_eq!(detail.result, power_factor);
    let flagged = detail
        .readings
        .iter()
        .filter(|r| r.classification.is_anomaly())
        .count();
    assert_eq!(flagged, power_factor.anomaly_count);
}

#[test]
fn e2e_all_sites_comparison() {
    let (_dir, config, store) = session();

    let totals = energy_totals(&store);
    assert_eq!(totals.len(), 2);
    assert_eq!(totals[0].site_label, "North Array");
    assert_eq!(totals[0].total_energy, 126.0);
    assert_eq!(totals[1].total_energy, 62.0);

    let rows = site_comparison(&store, config.detection.std_dev_kind);
    assert!((rows[1].average_power_factor.unwrap() - 0.9).abs() < 1e-9);
    assert!((rows[1].voltage_stability.unwrap() - 2.0_f64.sqrt()).abs() < 1e-9);

    let population = site_comparison(&store, StdDevKind::Population);
    assert!((population[1].voltage_stability.unwrap() - 1.0).abs() < 1e-9);
}
