//! # solar
//!
//! Command-line dashboard for solar site telemetry.

use std::fs::File;
use std::path::{Path, PathBuf};

use anomaly::{StdDevKind, ThresholdAnomalyDetector, ThresholdConfig};
use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use telemetry::{
    analyze_site, detect_metric, energy_totals, site_comparison, CsvTelemetrySource,
    DashboardConfig, DateRange, Metric, SiteSelection, TelemetryStore, ViewConfig,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod render;

#[derive(Parser)]
#[command(name = "solar")]
#[command(about = "Solar site telemetry dashboard", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the site exports (overrides the configuration)
    #[arg(long, global = true, env = "SOLAR_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Output format on stdout
    #[arg(long, global = true, value_enum, default_value = "text")]
    format: Format,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Range and detection flags shared by the per-site commands.
#[derive(clap::Args, Debug, Clone)]
struct Filters {
    /// First day to include (YYYY-MM-DD or DD/MM/YYYY)
    #[arg(long, value_parser = parse_date)]
    start: Option<NaiveDate>,

    /// Last day to include (YYYY-MM-DD or DD/MM/YYYY)
    #[arg(long, value_parser = parse_date)]
    end: Option<NaiveDate>,

    /// Band half-width in standard deviations
    #[arg(short, long)]
    n_std: Option<f64>,

    /// Use the population standard deviation instead of the sample one
    #[arg(long)]
    population: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List configured sites with their row counts and time spans
    Sites,

    /// Show the dashboard of one site, or the cross-site view for "all"
    ///
    /// Range, --n-std and --daily apply to a single site only.
    Analyze {
        /// Site id or label, or "all"
        #[arg(short, long)]
        site: SiteSelection,

        #[command(flatten)]
        filters: Filters,

        /// Include per-day energy totals
        #[arg(long)]
        daily: bool,

        /// Write the result as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Classify every reading of one metric
    Detect {
        /// Site id or label
        #[arg(short, long)]
        site: String,

        /// Metric (energy, power-factor, voltage, current-phase-a/b/c)
        #[arg(short, long, default_value = "energy")]
        metric: Metric,

        #[command(flatten)]
        filters: Filters,

        /// List normal readings too
        #[arg(long)]
        all: bool,

        /// Write the result as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compare energy, power factor and voltage stability across sites
    Compare {
        /// Use the population standard deviation for voltage stability
        #[arg(long)]
        population: bool,

        /// Write the result as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the effective configuration as TOML
    Config,
}

/// Parse a calendar date given ISO or day-first.
fn parse_date(raw: &str) -> std::result::Result<NaiveDate, String> {
    ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(raw.trim(), format).ok())
        .ok_or_else(|| format!("invalid date '{}': expected YYYY-MM-DD or DD/MM/YYYY", raw))
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .init();
}

fn load_config(path: Option<&Path>, data_dir: Option<PathBuf>) -> Result<DashboardConfig> {
    let mut config = match path {
        Some(path) => DashboardConfig::from_file(path)
            .with_context(|| format!("Failed to load configuration {:?}", path))?,
        None => DashboardConfig::default(),
    };
    if let Some(dir) = data_dir {
        config.data_dir = dir;
    }
    Ok(config)
}

fn load_store(config: &DashboardConfig) -> Result<TelemetryStore> {
    let source = CsvTelemetrySource::new(&config.data_dir);
    let store = TelemetryStore::load(&source, &config.sites)
        .with_context(|| format!("Failed to load site exports from {:?}", source.data_dir()))?;
    tracing::info!(sites = store.len(), data_dir = ?source.data_dir(), "Telemetry store ready");
    Ok(store)
}

/// Detection parameters from the configuration with command-line overrides applied.
fn detector(base: ThresholdConfig, filters: &Filters) -> Result<ThresholdAnomalyDetector> {
    let config = ThresholdConfig {
        n_std: filters.n_std.unwrap_or(base.n_std),
        std_dev_kind: if filters.population {
            StdDevKind::Population
        } else {
            base.std_dev_kind
        },
    };
    Ok(ThresholdAnomalyDetector::from_config(config)?)
}

/// The cross-site view covers every full dataset, so per-site flags have no effect there.
fn check_comparison_flags(filters: &Filters, daily: bool) -> Result<()> {
    let ignored: Vec<&str> = [
        ("--start", filters.start.is_some()),
        ("--end", filters.end.is_some()),
        ("--n-std", filters.n_std.is_some()),
        ("--daily", daily),
    ]
    .into_iter()
    .filter_map(|(flag, set)| set.then_some(flag))
    .collect();

    if !ignored.is_empty() {
        bail!(
            "{} cannot be used with --site all; the comparison covers every full dataset",
            ignored.join(", ")
        );
    }
    Ok(())
}

fn resolve_range(store: &TelemetryStore, filters: &Filters) -> Result<DateRange> {
    let Some(available) = store.overall_span() else {
        bail!("No readings loaded");
    };
    let view = ViewConfig::new(SiteSelection::All)
        .with_start(filters.start)
        .with_end(filters.end);
    Ok(view.range(available)?)
}

fn emit<T: Serialize>(format: Format, text: String, value: &T, output: Option<&Path>) -> Result<()> {
    match format {
        Format::Text => print!("{}", text),
        Format::Json => println!("{}", serde_json::to_string_pretty(value)?),
    }

    if let Some(path) = output {
        let mut file = File::create(path).with_context(|| format!("Failed to create {:?}", path))?;
        serde_json::to_writer_pretty(&mut file, value).context("Failed to write JSON")?;
        eprintln!("Results written to {:?}", path);
    }
    Ok(())
}

fn run_compare(
    store: &TelemetryStore,
    kind: StdDevKind,
    format: Format,
    output: Option<&Path>,
) -> Result<()> {
    let totals = energy_totals(store);
    let rows = site_comparison(store, kind);
    let text = render::comparison(&totals, &rows)?;
    let json = serde_json::json!({
        "energy_totals": totals,
        "comparison": rows,
    });
    emit(format, text, &json, output)
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref(), cli.data_dir)?;
    let format = cli.format;

    match cli.command {
        Commands::Config => {
            print!("{}", config.to_toml_string()?);
            Ok(())
        }

        Commands::Sites => {
            let store = load_store(&config)?;
            let summary: Vec<_> = store
                .datasets()
                .iter()
                .map(|d| {
                    serde_json::json!({
                        "id": d.id(),
                        "label": d.label(),
                        "rows": d.len(),
                        "span": d.time_span(),
                    })
                })
                .collect();
            emit(format, render::sites(&store)?, &summary, None)
        }

        Commands::Analyze {
            site,
            filters,
            daily,
            output,
        } => {
            let kind = if filters.population {
                StdDevKind::Population
            } else {
                config.detection.std_dev_kind
            };
            let site = match site {
                SiteSelection::All => {
                    check_comparison_flags(&filters, daily)?;
                    let store = load_store(&config)?;
                    return run_compare(&store, kind, format, output.as_deref());
                }
                SiteSelection::Site(site) => site,
            };

            let store = load_store(&config)?;
            let detector = detector(config.detection, &filters)?;
            let range = resolve_range(&store, &filters)?;
            let analysis = analyze_site(store.get(&site)?, &range, &detector, daily)?;
            let totals = energy_totals(&store);
            let rows = site_comparison(&store, kind);
            let text = render::site_dashboard(&analysis, &totals, &rows)?;
            let json = serde_json::json!({
                "site": analysis,
                "energy_totals": totals,
                "comparison": rows,
            });
            emit(format, text, &json, output.as_deref())
        }

        Commands::Detect {
            site,
            metric,
            filters,
            all,
            output,
        } => {
            let store = load_store(&config)?;
            let detector = detector(config.detection, &filters)?;
            let range = resolve_range(&store, &filters)?;
            let detail = detect_metric(store.get(&site)?, &range, metric, &detector)?;
            emit(
                format,
                render::metric_detail(&detail, all)?,
                &detail,
                output.as_deref(),
            )
        }

        Commands::Compare { population, output } => {
            let store = load_store(&config)?;
            let kind = if population {
                StdDevKind::Population
            } else {
                config.detection.std_dev_kind
            };
            run_compare(&store, kind, format, output.as_deref())
        }
    }
}

fn main() {
    // Load .env file (optional - won't fail if missing)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_date() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(parse_date("2024-03-05"), Ok(expected));
        assert_eq!(parse_date("05/03/2024"), Ok(expected));
        assert_eq!(parse_date("05-03-2024"), Ok(expected));
        assert!(parse_date("March 5").is_err());
    }

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::try_parse_from([
            "solar", "analyze", "--site", "site-2", "--start", "2024-01-01", "--n-std", "2",
            "--daily", "--format", "json",
        ])
        .unwrap();
        assert_eq!(cli.format, Format::Json);
        match cli.command {
            Commands::Analyze {
                site,
                filters,
                daily,
                ..
            } => {
                assert_eq!(site, SiteSelection::Site("site-2".to_string()));
                assert_eq!(filters.n_std, Some(2.0));
                assert!(daily);
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_parse_analyze_all() {
        let cli = Cli::try_parse_from(["solar", "analyze", "--site", "all"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Analyze {
                site: SiteSelection::All,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_detect_metric() {
        let cli =
            Cli::try_parse_from(["solar", "detect", "--site", "site-1", "--metric", "voltage"])
                .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Detect {
                metric: Metric::Voltage,
                ..
            }
        ));
        assert!(Cli::try_parse_from(["solar", "detect", "-s", "x", "-m", "frequency"]).is_err());
    }

    #[test]
    fn test_detector_overrides() {
        let filters = Filters {
            start: None,
            end: None,
            n_std: Some(1.5),
            population: true,
        };
        let d = detector(ThresholdConfig::default(), &filters).unwrap();
        assert_eq!(d.n_std(), 1.5);
        assert_eq!(d.std_dev_kind(), StdDevKind::Population);

        let bad = Filters {
            n_std: Some(0.0),
            ..filters
        };
        assert!(detector(ThresholdConfig::default(), &bad).is_err());
    }

    #[test]
    fn test_comparison_rejects_per_site_flags() {
        let filters = Filters {
            start: NaiveDate::from_ymd_opt(2024, 1, 1),
            end: None,
            n_std: Some(2.0),
            population: false,
        };
        let err = check_comparison_flags(&filters, true).unwrap_err().to_string();
        assert!(err.contains("--start, --n-std, --daily"));

        let plain = Filters {
            start: None,
            n_std: None,
            population: true,
            ..filters
        };
        assert!(check_comparison_flags(&plain, false).is_ok());
    }

    #[test]
    fn test_data_dir_override() {
        let config = load_config(None, Some(PathBuf::from("/srv/exports"))).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/srv/exports"));
        assert_eq!(config.sites.len(), 3);
    }
}
