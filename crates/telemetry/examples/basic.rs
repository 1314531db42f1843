//! Basic example demonstrating the telemetry crate
//!
//! Run with: cargo run --example basic -p telemetry
//!
//! Parses an in-memory export instead of reading files from disk.

use anomaly::ThresholdAnomalyDetector;
use telemetry::{analyze_site, read_site_csv, DateRange, SiteSchema};

const EXPORT: &str = "\
indregTC1_timestamp,indregTC1_Energy_kWh_sum,indregTC1_Power_Factor_avg_avg,indregTC1_Voltage_LL_V_avg,indregTC1_Current_Phase_A_A_avg,indregTC1_Current_Phase_B_A_avg,indregTC1_Current_Phase_C_A_avg
01/07/2024 10:00,10.0,0.98,415.0,30.0,29.0,31.0
01/07/2024 11:00,10.0,0.97,416.0,31.0,30.0,31.5
02/07/2024 10:00,10.0,0.98,414.0,30.5,29.5,31.0
02/07/2024 11:00,10.0,0.99,415.0,30.0,30.0,30.0
03/07/2024 10:00,100.0,0.98,415.0,30.0,29.0,32.0
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== telemetry Basic Example ===\n");

    let dataset = read_site_csv(&SiteSchema::indreg(1), EXPORT.as_bytes())?;
    let (first, last) = dataset.time_span().ok_or("export has no rows")?;
    let range = DateRange::spanning(first, last)?;

    let detector = ThresholdAnomalyDetector::new(1.0)?;
    let analysis = analyze_site(&dataset, &range, &detector, true)?;

    println!("{} ({})", analysis.site_label, analysis.range);
    println!("Total energy: {:.2} kWh", analysis.total_energy);
    if let Some(energy) = &analysis.energy {
        println!("Energy anomalies: {}", energy.anomaly_count);
        for reading in &energy.anomalies {
            println!("   {} -> {:.2} kWh", reading.timestamp, reading.value);
        }
    }
    if let Some(pct) = analysis.phase_balance.imbalance_pct {
        println!("Phase imbalance: {:.2}%", pct);
    }
    for day in analysis.daily_energy.unwrap_or_default() {
        println!("   {} : {:.2} kWh", day.date, day.total);
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
