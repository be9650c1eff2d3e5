//! Choices offered by the calculator form.

use std::fmt;

use serde::Serialize;

use pse_flow::FlowUnit;
use pse_gas::{AreaUnit, DiameterUnit, DurationUnit, GaugePressureUnit, TemperatureUnit};

/// A named discharge coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CdPreset {
    pub label: &'static str,
    pub cd: f64,
}

pub const CD_PRESETS: [CdPreset; 3] = [
    CdPreset {
        label: "Sharp-edged orifice",
        cd: 0.61,
    },
    CdPreset {
        label: "Well-rounded nozzle",
        cd: 0.98,
    },
    CdPreset {
        label: "Typical PSV",
        cd: 0.85,
    },
];

/// Typical leak hole size for a piece of equipment, as an area in mm².
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HoleSize {
    Fixed { mm2: f64 },
    Range { min_mm2: f64, max_mm2: f64 },
    /// Full bore of the connected pipe.
    PipeDiameter,
}

impl fmt::Display for HoleSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed { mm2 } => write!(f, "{mm2} mm²"),
            Self::Range { min_mm2, max_mm2 } => write!(f, "{min_mm2}-{max_mm2} mm²"),
            Self::PipeDiameter => f.write_str("pipe Ø"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HoleSizePreset {
    pub category: &'static str,
    pub equipment: &'static str,
    pub failure: &'static str,
    pub hole: HoleSize,
}

const fn hole(
    category: &'static str,
    equipment: &'static str,
    failure: &'static str,
    hole: HoleSize,
) -> HoleSizePreset {
    HoleSizePreset {
        category,
        equipment,
        failure,
        hole,
    }
}

/// Reference hole sizes by equipment type, in table order.
pub const HOLE_SIZE_PRESETS: [HoleSizePreset; 9] = [
    hole("Flanges", "CAF/SWJ", "All", HoleSize::Fixed { mm2: 0.1 }),
    hole("Flanges", "RTJ", "All", HoleSize::Fixed { mm2: 0.25 }),
    hole("Valves", "< 150 mm", "Severe", HoleSize::Fixed { mm2: 2.5 }),
    hole("Valves", "< 150 mm", "Small", HoleSize::Fixed { mm2: 0.25 }),
    hole("Valves", "> 150 mm", "All", HoleSize::Fixed { mm2: 0.25 }),
    hole(
        "Compressors",
        "Centrifugal",
        "Seal",
        HoleSize::Range {
            min_mm2: 50.0,
            max_mm2: 250.0,
        },
    ),
    hole("Compressors", "Reciprocating", "All", HoleSize::Fixed { mm2: 2.5 }),
    hole("Other", "Small bore", "< Full", HoleSize::Fixed { mm2: 0.25 }),
    hole("Other", "Drains", "All", HoleSize::PipeDiameter),
];

/// Unit tags accepted for each input, in form order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitCatalog {
    pub pressure: Vec<&'static str>,
    pub temperature: Vec<&'static str>,
    pub area: Vec<&'static str>,
    pub diameter: Vec<&'static str>,
    pub duration: Vec<&'static str>,
    pub flow: Vec<&'static str>,
    pub cd_presets: Vec<CdPreset>,
    pub hole_sizes: Vec<HoleSizePreset>,
}

pub fn unit_catalog() -> UnitCatalog {
    UnitCatalog {
        pressure: GaugePressureUnit::ALL.iter().map(|u| u.tag()).collect(),
        temperature: TemperatureUnit::ALL.iter().map(|u| u.tag()).collect(),
        area: AreaUnit::ALL.iter().map(|u| u.tag()).collect(),
        diameter: DiameterUnit::ALL.iter().map(|u| u.tag()).collect(),
        duration: DurationUnit::ALL.iter().map(|u| u.tag()).collect(),
        flow: FlowUnit::ALL.iter().map(|u| u.key()).collect(),
        cd_presets: CD_PRESETS.to_vec(),
        hole_sizes: HOLE_SIZE_PRESETS.to_vec(),
    }
}
