//! CSV telemetry source.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use telemetry_spi::{
    Metric, Result, SiteDataset, SiteSchema, TelemetryError, TelemetryRecord, TelemetrySource,
};

use crate::timestamp::parse_timestamp;

/// Loads site exports from CSV files under a data directory.
#[derive(Debug, Clone)]
pub struct CsvTelemetrySource {
    data_dir: PathBuf,
}

impl CsvTelemetrySource {
    /// Create a source reading files relative to `data_dir`.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Full path of an export file.
    pub fn resolve(&self, location: &str) -> PathBuf {
        self.data_dir.join(location)
    }
}

impl TelemetrySource for CsvTelemetrySource {
    fn name(&self) -> &str {
        "csv"
    }

    fn load(&self, schema: &SiteSchema, location: &str) -> Result<SiteDataset> {
        let path = self.resolve(location);
        let file = File::open(&path)
            .map_err(|e| TelemetryError::FileNotFound(format!("{}: {}", path.display(), e)))?;

        let dataset = read_site_csv(schema, BufReader::new(file))?;
        tracing::info!(
            site = %schema.id,
            file = %path.display(),
            rows = dataset.len(),
            "loaded site export"
        );
        Ok(dataset)
    }
}

/// Parse a site export from any reader.
///
/// Blank metric cells and non-finite numbers (`NaN`, `inf`) are kept as
/// missing values; any other non-numeric cell is an error. Row numbers in errors count data rows from 1.
pub fn read_site_csv<R: Read>(schema: &SiteSchema, reader: R) -> Result<SiteDataset> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| TelemetryError::CsvError(e.to_string()))?
        .clone();

    let find = |column: &str| -> Result<usize> {
        headers
            .iter()
            .position(|h| h == column)
            .ok_or_else(|| TelemetryError::MissingColumn {
                site: schema.id.clone(),
                column: column.to_string(),
            })
    };

    let timestamp_idx = find(&schema.timestamp_column)?;
    let metric_idx = Metric::ALL
        .iter()
        .map(|&metric| find(schema.column(metric)).map(|idx| (metric, idx)))
        .collect::<Result<Vec<_>>>()?;

    let mut records = Vec::new();
    for (i, result) in reader.records().enumerate() {
        let row = i + 1;
        let record = result.map_err(|e| TelemetryError::CsvError(e.to_string()))?;

        let raw_ts = record.get(timestamp_idx).unwrap_or_default();
        let timestamp = parse_timestamp(raw_ts).ok_or_else(|| TelemetryError::InvalidTimestamp {
            row,
            value: raw_ts.to_string(),
        })?;

        let mut telemetry = TelemetryRecord::new(timestamp);
        for &(metric, idx) in &metric_idx {
            let cell = record.get(idx).unwrap_or_default();
            telemetry.set(metric, parse_cell(cell, row, schema.column(metric))?);
        }
        records.push(telemetry);
    }

    Ok(SiteDataset::new(schema.clone(), records))
}

fn parse_cell(cell: &str, row: usize, column: &str) -> Result<Option<f64>> {
    if cell.is_empty() {
        return Ok(None);
    }
    let value = cell.parse::<f64>().map_err(|_| TelemetryError::InvalidValue {
        row,
        column: column.to_string(),
        value: cell.to_string(),
    })?;
    // NaN and infinities carry no reading.
    Ok(value.is_finite().then_some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    const HEADER: &str = "indregTC1_timestamp,indregTC1_Energy_kWh_sum,indregTC1_Power_Factor_avg_avg,\
indregTC1_Voltage_LL_V_avg,indregTC1_Current_Phase_A_A_avg,indregTC1_Current_Phase_B_A_avg,\
indregTC1_Current_Phase_C_A_avg";

    fn csv_text(rows: &[&str]) -> String {
        let mut text = String::from(HEADER);
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text.push('\n');
        text
    }

    #[test]
    fn test_read_rows() {
        let text = csv_text(&[
            "01/03/2024 10:00,12.5,0.98,415.2,30.1,29.8,30.4",
            "01/03/2024 10:15,13.0,0.97,414.9,31.0,30.2,30.9",
        ]);
        let data = read_site_csv(&SiteSchema::indreg(1), text.as_bytes()).unwrap();

        assert_eq!(data.len(), 2);
        assert_eq!(data.values(Metric::Energy), vec![12.5, 13.0]);
        assert_eq!(data.values(Metric::CurrentPhaseC), vec![30.4, 30.9]);
        assert_eq!(
            data.records[1].timestamp.to_string(),
            "2024-03-01 10:15:00"
        );
    }

    #[test]
    fn test_blank_and_nan_cells_are_missing() {
        let text = csv_text(&[
            "01/03/2024 10:00,,0.98,415.2,30.1,29.8,30.4",
            "01/03/2024 10:15,13.0,NaN,414.9,31.0,30.2,30.9",
        ]);
        let data = read_site_csv(&SiteSchema::indreg(1), text.as_bytes()).unwrap();
        assert_eq!(data.values(Metric::Energy), vec![13.0]);
        assert_eq!(data.values(Metric::PowerFactor), vec![0.98]);
    }

    #[test]
    fn test_infinite_cells_are_missing() {
        let text = csv_text(&[
            "01/03/2024 10:00,inf,0.98,415.2,30.1,29.8,30.4",
            "01/03/2024 10:15,13.0,0.97,-inf,31.0,30.2,30.9",
            "01/03/2024 10:30,14.0,0.96,Infinity,31.0,30.2,30.9",
        ]);
        let data = read_site_csv(&SiteSchema::indreg(1), text.as_bytes()).unwrap();
        assert_eq!(data.len(), 3);
        assert_eq!(data.values(Metric::Energy), vec![13.0, 14.0]);
        assert!(data.values(Metric::Voltage).is_empty());
    }

    #[test]
    fn test_extra_columns_ignored_and_order_free() {
        let text = "inverter,indregTC1_Voltage_LL_V_avg,indregTC1_timestamp,indregTC1_Energy_kWh_sum,\
indregTC1_Power_Factor_avg_avg,indregTC1_Current_Phase_A_A_avg,indregTC1_Current_Phase_B_A_avg,\
indregTC1_Current_Phase_C_A_avg\nINV-1,415.0,02/03/2024 08:00,1.5,0.95,10,11,12\n";
        let data = read_site_csv(&SiteSchema::indreg(1), text.as_bytes()).unwrap();
        assert_eq!(data.values(Metric::Voltage), vec![415.0]);
        assert_eq!(data.values(Metric::Energy), vec![1.5]);
    }

    #[test]
    fn test_missing_column() {
        let text = "indregTC1_timestamp,indregTC1_Energy_kWh_sum\n01/03/2024 10:00,1.0\n";
        let result = read_site_csv(&SiteSchema::indreg(1), text.as_bytes());
        assert_eq!(
            result.unwrap_err(),
            TelemetryError::MissingColumn {
                site: "site-1".to_string(),
                column: "indregTC1_Power_Factor_avg_avg".to_string(),
            }
        );
    }

    #[test]
    fn test_wrong_site_schema() {
        let text = csv_text(&["01/03/2024 10:00,12.5,0.98,415.2,30.1,29.8,30.4"]);
        let result = read_site_csv(&SiteSchema::indreg(2), text.as_bytes());
        assert!(matches!(result, Err(TelemetryError::MissingColumn { .. })));
    }

    #[test]
    fn test_invalid_timestamp() {
        let text = csv_text(&[
            "01/03/2024 10:00,12.5,0.98,415.2,30.1,29.8,30.4",
            "soon,12.5,0.98,415.2,30.1,29.8,30.4",
        ]);
        let result = read_site_csv(&SiteSchema::indreg(1), text.as_bytes());
        assert_eq!(
            result.unwrap_err(),
            TelemetryError::InvalidTimestamp {
                row: 2,
                value: "soon".to_string(),
            }
        );
    }

    #[test]
    fn test_invalid_value() {
        let text = csv_text(&["01/03/2024 10:00,12.5,high,415.2,30.1,29.8,30.4"]);
        let result = read_site_csv(&SiteSchema::indreg(1), text.as_bytes());
        assert!(matches!(
            result,
            Err(TelemetryError::InvalidValue { row: 1, .. })
        ));
    }

    #[test]
    fn test_source_loads_from_data_dir() {
        let dir = TempDir::new().unwrap();
        let mut file = File::create(dir.path().join("site1.csv")).unwrap();
        write!(
            file,
            "{}",
            csv_text(&["01/03/2024 10:00,12.5,0.98,415.2,30.1,29.8,30.4"])
        )
        .unwrap();

        let source = CsvTelemetrySource::new(dir.path());
        assert_eq!(source.name(), "csv");
        let data = source.load(&SiteSchema::indreg(1), "site1.csv").unwrap();
        assert_eq!(data.len(), 1);
        assert_eq!(data.id(), "site-1");
    }

    #[test]
    fn test_source_missing_file() {
        let dir = TempDir::new().unwrap();
        let source = CsvTelemetrySource::new(dir.path());
        let result = source.load(&SiteSchema::indreg(1), "absent.csv");
        assert!(matches!(result, Err(TelemetryError::FileNotFound(_))));
    }
}
