//! Descriptive statistics over plain value slices.
//!
//! Every function returns `None` when the statistic is undefined for the input.

use anomaly_spi::StdDevKind;

/// Sum of all values, `None` for an empty slice.
pub fn sum(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum())
}

/// Arithmetic mean.
pub fn mean(data: &[f64]) -> Option<f64> {
    sum(data).map(|s| s / data.len() as f64)
}

/// Variance with the denominator chosen by `kind`.
///
/// Needs more than `kind.ddof()` values.
pub fn variance(data: &[f64], kind: StdDevKind) -> Option<f64> {
    let n = data.len();
    if n <= kind.ddof() {
        return None;
    }
    let m = mean(data)?;
    let squares: f64 = data.iter().map(|x| (x - m).powi(2)).sum();
    Some(squares / (n - kind.ddof()) as f64)
}

/// Standard deviation with the denominator chosen by `kind`.
pub fn std_dev(data: &[f64], kind: StdDevKind) -> Option<f64> {
    variance(data, kind).map(f64::sqrt)
}
