//! Circular orifice area/diameter linkage.

use std::f64::consts::PI;

use pse_gas::{AreaUnit, DiameterUnit};

pub fn diameter_mm_from_area_mm2(area_mm2: f64) -> f64 {
    2.0 * (area_mm2 / PI).sqrt()
}

pub fn area_mm2_from_diameter_mm(diameter_mm: f64) -> f64 {
    PI * (diameter_mm / 2.0).powi(2)
}

/// Diameter (in `diameter_unit`) of a circle with the given area.
pub fn diameter_from_area(area: f64, area_unit: AreaUnit, diameter_unit: DiameterUnit) -> f64 {
    let area_mm2 = area * area_unit.mm2_per_unit();
    diameter_mm_from_area_mm2(area_mm2) / diameter_unit.mm_per_unit()
}

/// Area (in `area_unit`) of a circle with the given diameter.
pub fn area_from_diameter(diameter: f64, diameter_unit: DiameterUnit, area_unit: AreaUnit) -> f64 {
    let diameter_mm = diameter * diameter_unit.mm_per_unit();
    area_mm2_from_diameter_mm(diameter_mm) / area_unit.mm2_per_unit()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_square_millimetres() {
        let d = diameter_from_area(10.0, AreaUnit::SquareMillimeter, DiameterUnit::Millimeter);
        assert!((d - 3.568_25).abs() < 1e-5);
    }

    #[test]
    fn one_inch_diameter() {
        let a = area_from_diameter(1.0, DiameterUnit::Inch, AreaUnit::SquareInch);
        assert!((a - PI / 4.0).abs() < 1e-12);
    }

    #[test]
    fn mixed_units_roundtrip() {
        let d = diameter_from_area(0.5, AreaUnit::SquareCentimeter, DiameterUnit::Inch);
        let a = area_from_diameter(d, DiameterUnit::Inch, AreaUnit::SquareCentimeter);
        assert!((a - 0.5).abs() < 1e-12);
    }
}
