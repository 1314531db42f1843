//! Basic example demonstrating threshold anomaly detection
//!
//! Run with: cargo run --example basic -p anomaly

use anomaly::{AnomalyDetector, Reading, ThresholdAnomalyDetector};
use chrono::{Duration, NaiveDate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== anomaly Basic Example ===\n");

    let start = NaiveDate::from_ymd_opt(2024, 5, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or("invalid start date")?;

    let values = [10.0, 10.0, 10.0, 10.0, 100.0];
    let series: Vec<Reading> = values
        .iter()
        .enumerate()
        .map(|(i, &v)| Reading::new(start + Duration::days(i as i64), v))
        .collect();

    println!("Series: {:?}\n", values);

    for n_std in [1.0, 2.0, 3.0] {
        let detector = ThresholdAnomalyDetector::new(n_std)?;
        let result = detector.detect(&series)?;
        println!("n_std = {}", n_std);
        println!("   mean = {:.2}, std_dev = {:.2}", result.mean, result.std_dev);
        println!(
            "   band = [{:.2}, {:.2}]",
            result.lower_threshold, result.upper_threshold
        );
        println!("   anomalies = {}", result.anomaly_count);
        for reading in &result.anomalies {
            println!("     {} -> {}", reading.timestamp, reading.value);
        }
    }

    println!("\n=== Example Complete ===");
    Ok(())
}
