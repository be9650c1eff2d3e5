//! Mass flow in display units.
//!
//! Volumetric units use ideal-gas density at standard conditions:
//! `rho = P_std * MW / (R_universal * T_std)`.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use pse_core::units::constants::{
    FT3_PER_M3, LB_PER_KG, R_UNIVERSAL, SECONDS_PER_HOUR, STD_P_PA, STD_T_METRIC_K, STD_T_SCF_K,
};
use pse_gas::GasProperties;

/// Output unit for a mass flow rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowUnit {
    KgPerS,
    LbPerS,
    /// Thousand standard cubic feet per hour (60 °F, 1 atm)
    MscfPerHr,
    /// Standard cubic metres per hour (15 °C, 1 atm)
    StdM3PerHr,
}

impl FlowUnit {
    pub const ALL: [Self; 4] = [Self::KgPerS, Self::LbPerS, Self::MscfPerHr, Self::StdM3PerHr];

    /// Rate unit key, e.g. `MSCF/hr`.
    pub fn key(self) -> &'static str {
        match self {
            Self::KgPerS => "kg/s",
            Self::LbPerS => "lb/s",
            Self::MscfPerHr => "MSCF/hr",
            Self::StdM3PerHr => "st m³/hr",
        }
    }

    /// Unit of the quantity accumulated over time, e.g. `MSCF`.
    pub fn total_label(self) -> &'static str {
        match self {
            Self::KgPerS => "kg",
            Self::LbPerS => "lb",
            Self::MscfPerHr => "MSCF",
            Self::StdM3PerHr => "st m³",
        }
    }

    /// Seconds in the time base of the rate unit.
    pub fn seconds_per_time_base(self) -> f64 {
        match self {
            Self::KgPerS | Self::LbPerS => 1.0,
            Self::MscfPerHr | Self::StdM3PerHr => SECONDS_PER_HOUR,
        }
    }

    /// Parse a rate unit key. Unknown keys yield `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|unit| unit.key() == key.trim())
    }
}

impl fmt::Display for FlowUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FlowUnit {
    type Err = String;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        Self::from_key(key).ok_or_else(|| format!("Unknown flow unit '{key}'"))
    }
}

/// A converted value with the label of its accumulated unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DisplayValue {
    pub value: f64,
    pub label: &'static str,
}

/// Ideal-gas density at `STD_P_PA` and the given standard temperature, kg/m³.
pub fn standard_density(molecular_weight: f64, std_temperature_k: f64) -> f64 {
    STD_P_PA * molecular_weight / (R_UNIVERSAL * std_temperature_k)
}

/// Convert a mass flow rate in kg/s to the requested display unit.
pub fn convert_to_display_unit(
    mdot_kg_s: f64,
    gas: &GasProperties,
    unit: FlowUnit,
) -> DisplayValue {
    let value = match unit {
        FlowUnit::KgPerS => mdot_kg_s,
        FlowUnit::LbPerS => mdot_kg_s * LB_PER_KG,
        FlowUnit::MscfPerHr => {
            let density = standard_density(gas.molecular_weight, STD_T_SCF_K);
            let m3_per_s = mdot_kg_s / density;
            m3_per_s * FT3_PER_M3 * SECONDS_PER_HOUR / 1_000.0
        }
        FlowUnit::StdM3PerHr => {
            let density = standard_density(gas.molecular_weight, STD_T_METRIC_K);
            mdot_kg_s / density * SECONDS_PER_HOUR
        }
    };
    DisplayValue {
        value,
        label: unit.total_label(),
    }
}

/// Same as [`convert_to_display_unit`] but keyed by unit string; unknown keys give `None`.
pub fn convert_by_key(mdot_kg_s: f64, gas: &GasProperties, key: &str) -> Option<DisplayValue> {
    FlowUnit::from_key(key).map(|unit| convert_to_display_unit(mdot_kg_s, gas, unit))
}

/// Inverse of the MSCF/hr conversion.
pub fn mscf_per_hr_to_kg_per_s(rate_mscf_per_hr: f64, molecular_weight: f64) -> f64 {
    let density = standard_density(molecular_weight, STD_T_SCF_K);
    rate_mscf_per_hr * 1_000.0 / SECONDS_PER_HOUR / FT3_PER_M3 * density
}

/// Quantity released at a constant rate (in `unit`) over `duration_s` seconds.
pub fn total_release(rate: f64, unit: FlowUnit, duration_s: f64) -> f64 {
    rate * duration_s / unit.seconds_per_time_base()
}
