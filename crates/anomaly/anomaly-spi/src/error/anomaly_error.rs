//! Anomaly detection error types.

use thiserror::Error;

/// Anomaly detection errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnomalyError {
    #[error("Empty input: mean and standard deviation are undefined for an empty series")]
    EmptyInput,

    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Non-finite value at index {index}")]
    NonFiniteValue { index: usize },

    #[error("Numeric overflow computing {statistic}")]
    Overflow { statistic: String },
}

impl AnomalyError {
    pub(crate) fn invalid(name: &str, reason: impl Into<String>) -> Self {
        AnomalyError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// Reject a statistic that left the finite range.
    pub fn check_finite(statistic: &str, value: f64) -> Result<f64> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(AnomalyError::Overflow {
                statistic: statistic.to_string(),
            })
        }
    }

    /// `n_std` must be a finite, strictly positive multiplier.
    pub fn check_n_std(n_std: f64) -> Result<()> {
        if !n_std.is_finite() {
            return Err(Self::invalid("n_std", "must be finite"));
        }
        if n_std <= 0.0 {
            return Err(Self::invalid("n_std", "must be positive"));
        }
        Ok(())
    }
}

/// Result type for anomaly detection operations.
pub type Result<T> = std::result::Result<T, AnomalyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_display() {
        let error = AnomalyError::EmptyInput;
        assert_eq!(
            error.to_string(),
            "Empty input: mean and standard deviation are undefined for an empty series"
        );
    }

    #[test]
    fn test_invalid_parameter_display() {
        let error = AnomalyError::InvalidParameter {
            name: "n_std".to_string(),
            reason: "must be positive".to_string(),
        };
        assert_eq!(error.to_string(), "Invalid parameter: n_std - must be positive");
    }

    #[test]
    fn test_non_finite_display() {
        let error = AnomalyError::NonFiniteValue { index: 7 };
        assert_eq!(error.to_string(), "Non-finite value at index 7");
    }

    #[test]
    fn test_overflow_display() {
        let error = AnomalyError::Overflow {
            statistic: "mean".to_string(),
        };
        assert_eq!(error.to_string(), "Numeric overflow computing mean");
    }

    #[test]
    fn test_check_finite() {
        assert_eq!(AnomalyError::check_finite("mean", 2.5), Ok(2.5));
        assert!(matches!(
            AnomalyError::check_finite("mean", f64::INFINITY),
            Err(AnomalyError::Overflow { .. })
        ));
        assert!(AnomalyError::check_finite("std_dev", f64::NAN).is_err());
    }

    #[test]
    fn test_check_n_std() {
        assert!(AnomalyError::check_n_std(3.0).is_ok());
        assert!(AnomalyError::check_n_std(0.5).is_ok());
        assert!(matches!(
            AnomalyError::check_n_std(0.0),
            Err(AnomalyError::InvalidParameter { .. })
        ));
        assert!(matches!(
            AnomalyError::check_n_std(-1.0),
            Err(AnomalyError::InvalidParameter { .. })
        ));
        assert!(AnomalyError::check_n_std(f64::NAN).is_err());
        assert!(AnomalyError::check_n_std(f64::INFINITY).is_err());
    }

    #[test]
    fn test_error_implements_std_error() {
        let error: Box<dyn std::error::Error> = Box::new(AnomalyError::EmptyInput);
        assert!(!error.to_string().is_empty());
    }

    #[test]
    fn test_all_error_variants_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AnomalyError>();
    }
}
