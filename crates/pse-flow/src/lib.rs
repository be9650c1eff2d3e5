//! pse-flow: isentropic orifice flow solver and release tiering.
//!
//! Provides:
//! - Forward mass flow through an orifice with choked/subsonic regimes
//! - Conversion of mass flow to display units (mass and standard volume)
//! - Release tier classification for GTM US thresholds
//! - Reverse solve for the orifice area that reaches a target tier
//! - Circular orifice area/diameter linkage
//!
//! All functions are pure and deterministic.
//!
//! # Example
//!
//! ```
//! use pse_core::units::{k, m2, pa};
//! use pse_flow::{FlowConditions, FlowRegime, Orifice};
//! use pse_gas::lookup_gas;
//!
//! let gas = lookup_gas("Natural Gas").unwrap().properties;
//! let conditions = FlowConditions {
//!     p_up: pa(790_801.0),
//!     p_down: pa(101_325.0),
//!     t_up: k(293.15),
//!     gas,
//! };
//!
//! let orifice = Orifice::new(0.61, m2(1e-5));
//! let solution = orifice.mass_flow(&conditions).unwrap();
//! assert_eq!(solution.regime, FlowRegime::Sonic);
//! println!("Mass flow: {} kg/s", solution.mass_flow.value);
//! ```

pub mod common;
pub mod display;
pub mod error;
pub mod geometry;
pub mod orifice;
pub mod tier;

pub use display::{DisplayValue, FlowUnit, convert_to_display_unit, standard_density};
pub use error::{FlowError, FlowResult};
pub use geometry::{area_from_diameter, diameter_from_area};
pub use orifice::{
    FlowConditions, FlowRegime, FlowSolution, Orifice, compute_mass_flow_rate,
    critical_pressure_ratio, mass_flux, sonic_flux, subsonic_flux,
};
pub use tier::{ReleaseTier, ReleaseType, Site, TargetTier, classify_release, required_area};
