//! Canonical SI quantities and reference conditions.
//!
//! Inputs are converted to these types once, at the unit-tag boundary.

use uom::si::f64::{
    Area as UomArea, Length as UomLength, MassRate as UomMassRate, Pressure as UomPressure,
    ThermodynamicTemperature as UomThermodynamicTemperature, Time as UomTime,
};

// Public canonical unit types (SI, f64)
pub type Area = UomArea;
pub type Length = UomLength;
pub type MassRate = UomMassRate;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;
pub type Time = UomTime;

#[inline]
pub fn pa(v: f64) -> Pressure {
    use uom::si::pressure::pascal;
    Pressure::new::<pascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn kgps(v: f64) -> MassRate {
    use uom::si::mass_rate::kilogram_per_second;
    MassRate::new::<kilogram_per_second>(v)
}

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn m2(v: f64) -> Area {
    use uom::si::area::square_meter;
    Area::new::<square_meter>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

/// Reference conditions and conversion factors used by the volumetric units.
pub mod constants {
    /// Atmospheric pressure added to gauge inputs.
    pub const ATM_PA: f64 = 101_325.0;

    /// Universal gas constant, J/(kmol·K).
    pub const R_UNIVERSAL: f64 = 8_314.5;

    /// Standard temperature for standard cubic feet (60 °F).
    pub const STD_T_SCF_K: f64 = 288.71;

    /// Standard temperature for standard cubic metres (15 °C).
    pub const STD_T_METRIC_K: f64 = 288.15;

    pub const STD_P_PA: f64 = ATM_PA;

    pub const FT3_PER_M3: f64 = 35.3147;

    pub const LB_PER_KG: f64 = 2.20462;

    pub const SECONDS_PER_HOUR: f64 = 3_600.0;
}

#[cfg(test)]
mod tests {
    use super::*;
    use uom::si::area::square_millimeter;
    use uom::si::thermodynamic_temperature::degree_celsius;

    #[test]
    fn constructors_store_si_values() {
        assert_eq!(pa(5.0).value, 5.0);
        assert_eq!(kgps(1.2).value, 1.2);
        assert_eq!(m(0.0254).value, 0.0254);
        assert_eq!(s(600.0).value, 600.0);
    }

    #[test]
    fn uom_reads_back_in_other_units() {
        assert!((m2(1e-5).get::<square_millimeter>() - 10.0).abs() < 1e-9);
        assert!((k(293.15).get::<degree_celsius>() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn standard_conditions() {
        assert_eq!(constants::STD_P_PA, constants::ATM_PA);
        assert!(constants::STD_T_SCF_K > constants::STD_T_METRIC_K);
    }
}
