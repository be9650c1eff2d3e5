//! Unit tags accepted by the calculator form.
//!
//! Every input arrives as a number plus a unit tag (e.g. `100` + `"psi(g)"`).
//! Tags are parsed once at the boundary into the enums below, which then carry
//! the conversion to canonical SI values:
//!
//! - **Pressure**: gauge tags, converted to absolute Pa by adding one atmosphere
//! - **Temperature**: converted to Kelvin
//! - **Area / diameter**: orifice size, converted to m² / m
//! - **Duration**: release duration, converted to seconds

use std::fmt;
use std::str::FromStr;

use pse_core::units::constants::ATM_PA;
use pse_core::units::{Area, Length, Pressure, Temperature, Time, k, m, m2, pa, s};

use crate::error::GasError;

fn unknown(unit: &str, quantity: &'static str) -> GasError {
    GasError::UnknownUnit {
        unit: unit.to_string(),
        quantity,
    }
}

/// Gauge pressure unit. All form pressures are gauge relative to 1 atm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GaugePressureUnit {
    BarG,
    PsiG,
    KPaG,
    MPaG,
}

impl GaugePressureUnit {
    pub const ALL: [Self; 4] = [Self::BarG, Self::PsiG, Self::KPaG, Self::MPaG];

    pub fn tag(self) -> &'static str {
        match self {
            Self::BarG => "bar(g)",
            Self::PsiG => "psi(g)",
            Self::KPaG => "kPa(g)",
            Self::MPaG => "MPa(g)",
        }
    }

    /// Pascals per unit.
    pub fn pa_per_unit(self) -> f64 {
        match self {
            Self::BarG => 1e5,
            Self::PsiG => 6_894.76,
            Self::KPaG => 1e3,
            Self::MPaG => 1e6,
        }
    }

    /// Gauge reading to absolute pressure.
    pub fn to_absolute(self, gauge: f64) -> Pressure {
        pa(gauge * self.pa_per_unit() + ATM_PA)
    }
}

impl FromStr for GaugePressureUnit {
    type Err = GasError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "bar(g)" | "barg" => Ok(Self::BarG),
            "psi(g)" | "psig" => Ok(Self::PsiG),
            "kpa(g)" | "kpag" => Ok(Self::KPaG),
            "mpa(g)" | "mpag" => Ok(Self::MPaG),
            _ => Err(unknown(tag, "Pressure")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureUnit {
    pub const ALL: [Self; 3] = [Self::Celsius, Self::Fahrenheit, Self::Kelvin];

    pub fn tag(self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
            Self::Kelvin => "K",
        }
    }

    pub fn to_kelvin(self, value: f64) -> Temperature {
        let kelvin = match self {
            Self::Celsius => value + 273.15,
            Self::Fahrenheit => (value - 32.0) * 5.0 / 9.0 + 273.15,
            Self::Kelvin => value,
        };
        k(kelvin)
    }
}

impl FromStr for TemperatureUnit {
    type Err = GasError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim() {
            "°C" | "C" | "c" | "degC" => Ok(Self::Celsius),
            "°F" | "F" | "f" | "degF" => Ok(Self::Fahrenheit),
            "K" | "k" => Ok(Self::Kelvin),
            _ => Err(unknown(tag, "Temperature")),
        }
    }
}

/// Orifice area unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AreaUnit {
    SquareMillimeter,
    SquareCentimeter,
    SquareInch,
    SquareMeter,
}

impl AreaUnit {
    pub const ALL: [Self; 4] = [
        Self::SquareMillimeter,
        Self::SquareCentimeter,
        Self::SquareInch,
        Self::SquareMeter,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            Self::SquareMillimeter => "mm²",
            Self::SquareCentimeter => "cm²",
            Self::SquareInch => "in²",
            Self::SquareMeter => "m²",
        }
    }

    pub fn m2_per_unit(self) -> f64 {
        match self {
            Self::SquareMillimeter => 1e-6,
            Self::SquareCentimeter => 1e-4,
            Self::SquareInch => 6.4516e-4,
            Self::SquareMeter => 1.0,
        }
    }

    pub fn mm2_per_unit(self) -> f64 {
        match self {
            Self::SquareMillimeter => 1.0,
            Self::SquareCentimeter => 100.0,
            Self::SquareInch => 645.16,
            Self::SquareMeter => 1e6,
        }
    }

    pub fn to_area(self, value: f64) -> Area {
        m2(value * self.m2_per_unit())
    }

    pub fn from_area(self, area: Area) -> f64 {
        area.value / self.m2_per_unit()
    }
}

impl FromStr for AreaUnit {
    type Err = GasError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim() {
            "mm²" | "mm2" | "mm^2" => Ok(Self::SquareMillimeter),
            "cm²" | "cm2" | "cm^2" => Ok(Self::SquareCentimeter),
            "in²" | "in2" | "in^2" => Ok(Self::SquareInch),
            "m²" | "m2" | "m^2" => Ok(Self::SquareMeter),
            _ => Err(unknown(tag, "Area")),
        }
    }
}

/// Orifice diameter unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiameterUnit {
    Millimeter,
    Inch,
}

impl DiameterUnit {
    pub const ALL: [Self; 2] = [Self::Millimeter, Self::Inch];

    pub fn tag(self) -> &'static str {
        match self {
            Self::Millimeter => "mm",
            Self::Inch => "inch",
        }
    }

    pub fn mm_per_unit(self) -> f64 {
        match self {
            Self::Millimeter => 1.0,
            Self::Inch => 25.4,
        }
    }

    pub fn to_length(self, value: f64) -> Length {
        m(value * self.mm_per_unit() / 1e3)
    }
}

impl FromStr for DiameterUnit {
    type Err = GasError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "mm" => Ok(Self::Millimeter),
            "inch" | "in" => Ok(Self::Inch),
            _ => Err(unknown(tag, "Diameter")),
        }
    }
}

/// Release duration unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationUnit {
    Seconds,
    Minutes,
    Hours,
}

impl DurationUnit {
    pub const ALL: [Self; 3] = [Self::Seconds, Self::Minutes, Self::Hours];

    pub fn tag(self) -> &'static str {
        match self {
            Self::Seconds => "sec",
            Self::Minutes => "min",
            Self::Hours => "hr",
        }
    }

    pub fn seconds_per_unit(self) -> f64 {
        match self {
            Self::Seconds => 1.0,
            Self::Minutes => 60.0,
            Self::Hours => 3_600.0,
        }
    }

    pub fn to_time(self, value: f64) -> Time {
        s(value * self.seconds_per_unit())
    }
}

impl FromStr for DurationUnit {
    type Err = GasError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        // "minutes" shows up in records written by older form defaults
        match tag.trim().to_ascii_lowercase().as_str() {
            "sec" | "s" | "seconds" => Ok(Self::Seconds),
            "min" | "minutes" => Ok(Self::Minutes),
            "hr" | "h" | "hours" => Ok(Self::Hours),
            _ => Err(unknown(tag, "Duration")),
        }
    }
}

macro_rules! display_tag {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.tag())
            }
        })*
    };
}

display_tag!(
    GaugePressureUnit,
    TemperatureUnit,
    AreaUnit,
    DiameterUnit,
    DurationUnit
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_parse_back() {
        for u in GaugePressureUnit::ALL {
            assert_eq!(u.tag().parse::<GaugePressureUnit>().unwrap(), u);
        }
        for u in TemperatureUnit::ALL {
            assert_eq!(u.tag().parse::<TemperatureUnit>().unwrap(), u);
        }
        for u in AreaUnit::ALL {
            assert_eq!(u.tag().parse::<AreaUnit>().unwrap(), u);
        }
        for u in DiameterUnit::ALL {
            assert_eq!(u.tag().parse::<DiameterUnit>().unwrap(), u);
        }
        for u in DurationUnit::ALL {
            assert_eq!(u.tag().parse::<DurationUnit>().unwrap(), u);
        }
    }

    #[test]
    fn gauge_pressure_adds_atmosphere() {
        let p = GaugePressureUnit::PsiG.to_absolute(100.0);
        assert!((p.value - (689_476.0 + 101_325.0)).abs() < 1e-6);

        let zero = GaugePressureUnit::BarG.to_absolute(0.0);
        assert_eq!(zero.value, ATM_PA);
    }

    #[test]
    fn reject_plain_psi() {
        assert!(matches!(
            "psi".parse::<GaugePressureUnit>(),
            Err(GasError::UnknownUnit { unit, quantity: "Pressure" }) if unit == "psi"
        ));
    }

    #[test]
    fn temperature_conversions() {
        assert!((TemperatureUnit::Celsius.to_kelvin(20.0).value - 293.15).abs() < 1e-9);
        assert!((TemperatureUnit::Fahrenheit.to_kelvin(32.0).value - 273.15).abs() < 1e-9);
        assert_eq!(TemperatureUnit::Kelvin.to_kelvin(300.0).value, 300.0);
    }

    #[test]
    fn area_factors_agree() {
        for u in AreaUnit::ALL {
            assert!((u.m2_per_unit() * 1e6 - u.mm2_per_unit()).abs() < 1e-9);
        }
        let a = AreaUnit::SquareMillimeter.to_area(10.0);
        assert!((a.value - 1e-5).abs() < 1e-18);
        assert!((AreaUnit::SquareCentimeter.from_area(a) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn duration_aliases() {
        assert_eq!("minutes".parse::<DurationUnit>().unwrap(), DurationUnit::Minutes);
        assert_eq!(DurationUnit::Minutes.to_time(10.0).value, 600.0);
        assert!("fortnight".parse::<DurationUnit>().is_err());
    }

    #[test]
    fn diameter_to_length() {
        let d = DiameterUnit::Inch.to_length(1.0);
        assert!((d.value - 0.0254).abs() < 1e-12);
    }
}
