//! Site column schemas.

use serde::{Deserialize, Serialize};

use super::Metric;

/// Column layout of one site's telemetry export.
///
/// Sites differ only in column names, so every site-specific lookup goes
/// through this table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteSchema {
    /// Identifier used on the command line and in configuration
    pub id: String,
    /// Display name
    pub label: String,
    /// Timestamp column
    pub timestamp_column: String,
    /// Energy column (kWh per interval)
    pub energy_column: String,
    /// Power factor column
    pub power_factor_column: String,
    /// Line-to-line voltage column
    pub voltage_column: String,
    /// Phase A current column
    pub current_a_column: String,
    /// Phase B current column
    pub current_b_column: String,
    /// Phase C current column
    pub current_c_column: String,
}

impl SiteSchema {
    /// Schema of an `indregTC{n}` inverter register export.
    pub fn indreg(n: u32) -> Self {
        let prefix = format!("indregTC{}", n);
        Self {
            id: format!("site-{}", n),
            label: format!("Site {}", n),
            timestamp_column: format!("{}_timestamp", prefix),
            energy_column: format!("{}_Energy_kWh_sum", prefix),
            power_factor_column: format!("{}_Power_Factor_avg_avg", prefix),
            voltage_column: format!("{}_Voltage_LL_V_avg", prefix),
            current_a_column: format!("{}_Current_Phase_A_A_avg", prefix),
            current_b_column: format!("{}_Current_Phase_B_A_avg", prefix),
            current_c_column: format!("{}_Current_Phase_C_A_avg", prefix),
        }
    }

    /// Column holding `metric`.
    pub fn column(&self, metric: Metric) -> &str {
        match metric {
            Metric::Energy => &self.energy_column,
            Metric::PowerFactor => &self.power_factor_column,
            Metric::Voltage => &self.voltage_column,
            Metric::CurrentPhaseA => &self.current_a_column,
            Metric::CurrentPhaseB => &self.current_b_column,
            Metric::CurrentPhaseC => &self.current_c_column,
        }
    }

    /// Whether `query` names this site by id or label, ignoring case.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        self.id.eq_ignore_ascii_case(query) || self.label.eq_ignore_ascii_case(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indreg_columns() {
        let schema = SiteSchema::indreg(2);
        assert_eq!(schema.id, "site-2");
        assert_eq!(schema.label, "Site 2");
        assert_eq!(schema.timestamp_column, "indregTC2_timestamp");
        assert_eq!(schema.column(Metric::Energy), "indregTC2_Energy_kWh_sum");
        assert_eq!(
            schema.column(Metric::PowerFactor),
            "indregTC2_Power_Factor_avg_avg"
        );
        assert_eq!(schema.column(Metric::Voltage), "indregTC2_Voltage_LL_V_avg");
        assert_eq!(
            schema.column(Metric::CurrentPhaseC),
            "indregTC2_Current_Phase_C_A_avg"
        );
    }

    #[test]
    fn test_matches() {
        let schema = SiteSchema::indreg(1);
        assert!(schema.matches("site-1"));
        assert!(schema.matches("SITE-1"));
        assert!(schema.matches("Site 1"));
        assert!(!schema.matches("site-10"));
    }
}
