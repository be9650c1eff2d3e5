//! pse-gas: gas property catalog and input unit tags.
//!
//! Provides:
//! - The fixed catalog of ideal-gas properties (gamma, specific R, molecular weight)
//! - Unit tags accepted from the calculator form and their conversion to SI
//!
//! Both tables are `static` and never mutated after start-up.
//!
//! # Example
//!
//! ```
//! use pse_gas::{lookup_gas, GaugePressureUnit, TemperatureUnit};
//!
//! let gas = lookup_gas("Natural Gas").unwrap();
//! let p1 = GaugePressureUnit::PsiG.to_absolute(100.0);
//! let t1 = TemperatureUnit::Celsius.to_kelvin(20.0);
//! assert!(gas.properties.gamma > 1.0);
//! assert!(p1.value > 101_325.0);
//! assert!((t1.value - 293.15).abs() < 1e-9);
//! ```

pub mod catalog;
pub mod error;
pub mod units;

pub use catalog::{GasCatalogEntry, GasProperties, gas_catalog, lookup_gas};
pub use error::{GasError, GasResult};
pub use units::{AreaUnit, DiameterUnit, DurationUnit, GaugePressureUnit, TemperatureUnit};
