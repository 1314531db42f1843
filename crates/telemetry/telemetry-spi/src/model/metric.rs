//! Measured quantities of a site export.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A per-interval quantity recorded for every site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Metric {
    /// Energy produced in the interval (kWh)
    Energy,
    /// Average power factor
    PowerFactor,
    /// Average line-to-line voltage (V)
    Voltage,
    /// Average phase A current (A)
    CurrentPhaseA,
    /// Average phase B current (A)
    CurrentPhaseB,
    /// Average phase C current (A)
    CurrentPhaseC,
}

impl Metric {
    /// Number of metrics recorded per row.
    pub const COUNT: usize = 6;

    /// Every metric, in column order.
    pub const ALL: [Metric; Metric::COUNT] = [
        Metric::Energy,
        Metric::PowerFactor,
        Metric::Voltage,
        Metric::CurrentPhaseA,
        Metric::CurrentPhaseB,
        Metric::CurrentPhaseC,
    ];

    /// Metrics screened for anomalies.
    pub const ANOMALY: [Metric; 3] = [Metric::Energy, Metric::PowerFactor, Metric::Voltage];

    /// Phase currents.
    pub const PHASES: [Metric; 3] = [
        Metric::CurrentPhaseA,
        Metric::CurrentPhaseB,
        Metric::CurrentPhaseC,
    ];

    /// Position of the metric in [`Metric::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Human-readable name.
    pub fn label(self) -> &'static str {
        match self {
            Metric::Energy => "Energy",
            Metric::PowerFactor => "Power Factor",
            Metric::Voltage => "Voltage",
            Metric::CurrentPhaseA => "Phase A Current",
            Metric::CurrentPhaseB => "Phase B Current",
            Metric::CurrentPhaseC => "Phase C Current",
        }
    }

    /// Unit symbol, empty for dimensionless quantities.
    pub fn unit(self) -> &'static str {
        match self {
            Metric::Energy => "kWh",
            Metric::PowerFactor => "",
            Metric::Voltage => "V",
            Metric::CurrentPhaseA | Metric::CurrentPhaseB | Metric::CurrentPhaseC => "A",
        }
    }

    /// Stable identifier used in configuration and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Metric::Energy => "energy",
            Metric::PowerFactor => "power-factor",
            Metric::Voltage => "voltage",
            Metric::CurrentPhaseA => "current-phase-a",
            Metric::CurrentPhaseB => "current-phase-b",
            Metric::CurrentPhaseC => "current-phase-c",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', "-");
        Metric::ALL
            .into_iter()
            .find(|m| m.key() == normalized)
            .or(match normalized.as_str() {
                "pf" => Some(Metric::PowerFactor),
                "kwh" => Some(Metric::Energy),
                _ => None,
            })
            .ok_or_else(|| format!("Unknown metric: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_all_order() {
        for (i, metric) in Metric::ALL.iter().enumerate() {
            assert_eq!(metric.index(), i);
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!("energy".parse::<Metric>(), Ok(Metric::Energy));
        assert_eq!("power_factor".parse::<Metric>(), Ok(Metric::PowerFactor));
        assert_eq!("Power-Factor".parse::<Metric>(), Ok(Metric::PowerFactor));
        assert_eq!("pf".parse::<Metric>(), Ok(Metric::PowerFactor));
        assert_eq!("voltage".parse::<Metric>(), Ok(Metric::Voltage));
        assert!("frequency".parse::<Metric>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_key() {
        for metric in Metric::ALL {
            assert_eq!(metric.to_string().parse::<Metric>(), Ok(metric));
        }
    }

    #[test]
    fn test_units() {
        assert_eq!(Metric::Energy.unit(), "kWh");
        assert_eq!(Metric::PowerFactor.unit(), "");
        assert_eq!(Metric::CurrentPhaseB.unit(), "A");
    }

    #[test]
    fn test_serde_kebab_case() {
        let json = serde_json::to_string(&Metric::PowerFactor).unwrap();
        assert_eq!(json, "\"power-factor\"");
    }
}
