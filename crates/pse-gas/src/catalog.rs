//! Fixed ideal-gas property catalog.

use serde::Serialize;

use crate::error::{GasError, GasResult};

/// Ideal-gas properties used by the orifice equations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GasProperties {
    /// Specific heat ratio cp/cv (dimensionless, > 1)
    pub gamma: f64,
    /// Specific gas constant, J/(kg·K)
    pub r_specific: f64,
    /// Molecular weight, kg/kmol
    pub molecular_weight: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GasCatalogEntry {
    pub name: &'static str,
    #[serde(skip)]
    pub aliases: &'static [&'static str],
    pub properties: GasProperties,
}

impl GasCatalogEntry {
    pub fn matches_name(&self, query: &str) -> bool {
        let query = query.trim();
        self.name.eq_ignore_ascii_case(query)
            || self
                .aliases
                .iter()
                .any(|alias| alias.eq_ignore_ascii_case(query))
    }
}

const GAS_CATALOG: [GasCatalogEntry; 8] = [
    GasCatalogEntry {
        name: "Air",
        aliases: &[],
        properties: GasProperties {
            gamma: 1.4,
            r_specific: 287.0,
            molecular_weight: 28.96,
        },
    },
    GasCatalogEntry {
        name: "Nitrogen",
        aliases: &["N2"],
        properties: GasProperties {
            gamma: 1.4,
            r_specific: 296.8,
            molecular_weight: 28.01,
        },
    },
    GasCatalogEntry {
        name: "Oxygen",
        aliases: &["O2"],
        properties: GasProperties {
            gamma: 1.4,
            r_specific: 259.8,
            molecular_weight: 32.0,
        },
    },
    GasCatalogEntry {
        name: "Helium",
        aliases: &["He"],
        properties: GasProperties {
            gamma: 1.66,
            r_specific: 2077.0,
            molecular_weight: 4.0,
        },
    },
    GasCatalogEntry {
        name: "Hydrogen",
        aliases: &["H2"],
        properties: GasProperties {
            gamma: 1.41,
            r_specific: 4124.0,
            molecular_weight: 2.02,
        },
    },
    GasCatalogEntry {
        name: "CO2",
        aliases: &["Carbon Dioxide"],
        properties: GasProperties {
            gamma: 1.29,
            r_specific: 188.9,
            molecular_weight: 44.01,
        },
    },
    GasCatalogEntry {
        name: "Natural Gas",
        aliases: &["NG"],
        properties: GasProperties {
            gamma: 1.32,
            r_specific: 518.3,
            molecular_weight: 16.04,
        },
    },
    GasCatalogEntry {
        name: "Argon",
        aliases: &["Ar"],
        properties: GasProperties {
            gamma: 1.67,
            r_specific: 208.1,
            molecular_weight: 39.95,
        },
    },
];

/// All catalog entries in display order.
pub fn gas_catalog() -> &'static [GasCatalogEntry] {
    &GAS_CATALOG
}

/// Look up a gas by display name or alias, ignoring ASCII case.
pub fn lookup_gas(name: &str) -> GasResult<&'static GasCatalogEntry> {
    gas_catalog()
        .iter()
        .find(|entry| entry.matches_name(name))
        .ok_or_else(|| GasError::UnknownGas {
            name: name.to_string(),
        })
}
