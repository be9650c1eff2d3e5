//! Isentropic orifice flow with choking.

use serde::Serialize;
use tracing::debug;

use crate::common::{
    check_discharge_coefficient, check_finite, check_non_negative, check_positive,
};
use crate::error::FlowResult;
use pse_core::units::{Area, MassRate, Pressure, Temperature, k, kgps, m2, pa};
use pse_gas::GasProperties;

/// Flow regime at the orifice throat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FlowRegime {
    /// Choked: throat velocity at the local speed of sound
    Sonic,
    Subsonic,
}

impl FlowRegime {
    /// Regime for a downstream/upstream pressure ratio.
    ///
    /// A ratio exactly at the critical value counts as sonic.
    pub fn for_ratio(pressure_ratio: f64, gamma: f64) -> Self {
        if pressure_ratio <= critical_pressure_ratio(gamma) {
            Self::Sonic
        } else {
            Self::Subsonic
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Sonic => "SONIC (CHOKED)",
            Self::Subsonic => "SUBSONIC",
        }
    }
}

/// Critical pressure ratio (2/(γ+1))^(γ/(γ-1)); flow chokes at or below it.
pub fn critical_pressure_ratio(gamma: f64) -> f64 {
    (2.0 / (gamma + 1.0)).powf(gamma / (gamma - 1.0))
}

/// Gas and boundary conditions on either side of the orifice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowConditions {
    /// Upstream absolute pressure
    pub p_up: Pressure,
    /// Downstream absolute pressure (>= 0; above p_up is rejected by the solve)
    pub p_down: Pressure,
    /// Upstream temperature
    pub t_up: Temperature,
    pub gas: GasProperties,
}

impl FlowConditions {
    /// Reject gas properties and boundary conditions the equations cannot handle.
    pub fn validate(&self) -> FlowResult<()> {
        check_positive(self.gas.gamma - 1.0, "gamma must exceed 1")?;
        check_positive(self.gas.r_specific, "specific gas constant")?;
        check_positive(self.t_up.value, "upstream temperature")?;
        check_positive(self.p_up.value, "upstream pressure")?;
        check_non_negative(self.p_down.value, "downstream pressure")?;
        Ok(())
    }

    pub fn pressure_ratio(&self) -> f64 {
        self.p_down.value / self.p_up.value
    }

    pub fn regime(&self) -> FlowRegime {
        FlowRegime::for_ratio(self.pressure_ratio(), self.gas.gamma)
    }
}

/// Choked mass flux, kg/(s·m²). Independent of the downstream pressure.
pub fn sonic_flux(cd: f64, p_up: f64, gamma: f64, rt: f64) -> f64 {
    let choke_factor = (2.0 / (gamma + 1.0)).powf((gamma + 1.0) / (2.0 * (gamma - 1.0)));
    cd * p_up * (gamma / rt).sqrt() * choke_factor
}

/// Subsonic mass flux, kg/(s·m²), at pressure ratio `pr` = p_down / p_up.
pub fn subsonic_flux(cd: f64, p_up: f64, pr: f64, gamma: f64, rt: f64) -> f64 {
    let bracket = pr.powf(2.0 / gamma) - pr.powf((gamma + 1.0) / gamma);
    cd * p_up * (2.0 * gamma / (rt * (gamma - 1.0)) * bracket).sqrt()
}

/// Mass flow per unit orifice area, kg/(s·m²).
///
/// This is the orifice equation with the area factor removed, shared by the
/// forward solve and the reverse area solve.
pub fn mass_flux(cd: f64, conditions: &FlowConditions) -> FlowResult<(f64, FlowRegime)> {
    let cd = check_discharge_coefficient(cd)?;
    conditions.validate()?;

    let gamma = conditions.gas.gamma;
    let rt = conditions.gas.r_specific * conditions.t_up.value;
    let p_up = conditions.p_up.value;
    let pr = conditions.pressure_ratio();
    let regime = FlowRegime::for_ratio(pr, gamma);

    let flux = match regime {
        FlowRegime::Sonic => sonic_flux(cd, p_up, gamma, rt),
        FlowRegime::Subsonic => subsonic_flux(cd, p_up, pr, gamma, rt),
    };

    // NaN here means p_down > p_up (negative bracket)
    check_finite(flux, "mass flux")?;

    Ok((flux, regime))
}

/// Result of a forward orifice solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowSolution {
    pub mass_flow: MassRate,
    pub regime: FlowRegime,
}

/// Orifice flow element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orifice {
    /// Discharge coefficient (dimensionless, 0 < cd <= 1)
    pub cd: f64,
    /// Orifice throat area
    pub area: Area,
}

impl Orifice {
    pub fn new(cd: f64, area: Area) -> Self {
        Self { cd, area }
    }

    /// Compute mass flow for compressible flow with choking.
    pub fn mass_flow(&self, conditions: &FlowConditions) -> FlowResult<FlowSolution> {
        let area = check_positive(self.area.value, "orifice area")?;
        let (flux, regime) = mass_flux(self.cd, conditions)?;
        let mdot = check_finite(flux * area, "mass flow rate")?;

        debug!(
            cd = self.cd,
            area_m2 = area,
            pressure_ratio = conditions.pressure_ratio(),
            ?regime,
            mdot_kg_s = mdot,
            "orifice mass flow"
        );

        Ok(FlowSolution {
            mass_flow: kgps(mdot),
            regime,
        })
    }
}

/// Primitive-valued entry point: SI inputs in, kg/s and regime out.
pub fn compute_mass_flow_rate(
    cd: f64,
    area_m2: f64,
    p_up_pa: f64,
    p_down_pa: f64,
    t_up_k: f64,
    gamma: f64,
    r_specific: f64,
) -> FlowResult<(f64, FlowRegime)> {
    let conditions = FlowConditions {
        p_up: pa(p_up_pa),
        p_down: pa(p_down_pa),
        t_up: k(t_up_k),
        gas: GasProperties {
            gamma,
            r_specific,
            // Not used by the flow equations
            molecular_weight: f64::NAN,
        },
    };
    let solution = Orifice::new(cd, m2(area_m2)).mass_flow(&conditions)?;
    Ok((solution.mass_flow.value, solution.regime))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FlowError;
    use pse_gas::lookup_gas;

    fn natural_gas_conditions(p_up: f64, p_down: f64) -> FlowConditions {
        FlowConditions {
            p_up: pa(p_up),
            p_down: pa(p_down),
            t_up: k(293.15),
            gas: lookup_gas("Natural Gas").unwrap().properties,
        }
    }

    #[test]
    fn critical_ratio_for_air() {
        // Classic value for gamma = 1.4
        assert!((critical_pressure_ratio(1.4) - 0.528_28).abs() < 1e-4);
    }

    #[test]
    fn natural_gas_example_is_sonic() {
        let p_up = 100.0 * 6_894.76 + 101_325.0;
        let conditions = natural_gas_conditions(p_up, 101_325.0);
        assert!(conditions.pressure_ratio() < critical_pressure_ratio(1.32));

        let solution = Orifice::new(0.61, m2(1e-5))
            .mass_flow(&conditions)
            .unwrap();
        assert_eq!(solution.regime, FlowRegime::Sonic);
        assert!((solution.mass_flow.value - 8.3e-3).abs() < 5e-5);
    }

    #[test]
    fn small_pressure_drop_is_subsonic() {
        let conditions = natural_gas_conditions(120_000.0, 101_325.0);
        let solution = Orifice::new(0.61, m2(1e-5))
            .mass_flow(&conditions)
            .unwrap();
        assert_eq!(solution.regime, FlowRegime::Subsonic);
        assert!(solution.mass_flow.value > 0.0);
    }

    #[test]
    fn equal_pressures_give_zero_flow() {
        let conditions = natural_gas_conditions(101_325.0, 101_325.0);
        let solution = Orifice::new(0.61, m2(1e-5))
            .mass_flow(&conditions)
            .unwrap();
        assert_eq!(solution.regime, FlowRegime::Subsonic);
        assert!(solution.mass_flow.value.abs() < 1e-15);
    }

    #[test]
    fn sonic_flow_ignores_downstream_pressure() {
        let a = natural_gas_conditions(1e6, 0.0);
        let b = natural_gas_conditions(1e6, 2e5);
        let orifice = Orifice::new(0.85, m2(2e-5));
        assert_eq!(
            orifice.mass_flow(&a).unwrap().mass_flow,
            orifice.mass_flow(&b).unwrap().mass_flow
        );
    }

    #[test]
    fn reverse_pressure_is_non_physical() {
        let conditions = natural_gas_conditions(101_325.0, 200_000.0);
        let err = Orifice::new(0.61, m2(1e-5))
            .mass_flow(&conditions)
            .unwrap_err();
        assert_eq!(err, FlowError::NonPhysical { what: "mass flux" });
    }

    #[test]
    fn negative_downstream_pressure_is_rejected() {
        let err = compute_mass_flow_rate(0.61, 1e-5, 790_801.0, -50_000.0, 293.15, 1.32, 518.3)
            .unwrap_err();
        assert_eq!(
            err,
            FlowError::InvalidArg {
                what: "downstream pressure"
            }
        );
    }

    #[test]
    fn vacuum_downstream_is_sonic() {
        let (mdot, regime) =
            compute_mass_flow_rate(0.61, 1e-5, 790_801.0, 0.0, 293.15, 1.32, 518.3).unwrap();
        assert_eq!(regime, FlowRegime::Sonic);
        assert!(mdot > 0.0);
    }

    #[test]
    fn branch_fluxes_meet_at_critical_ratio() {
        let crit = critical_pressure_ratio(1.32);
        let rt = 518.3 * 293.15;
        let sonic = sonic_flux(0.61, 5e5, 1.32, rt);
        let subsonic = subsonic_flux(0.61, 5e5, crit, 1.32, rt);
        assert!((sonic - subsonic).abs() / sonic < 1e-10);
    }

    #[test]
    fn degenerate_gamma_is_rejected() {
        let err = compute_mass_flow_rate(0.61, 1e-5, 2e5, 1e5, 300.0, 1.0, 287.0).unwrap_err();
        assert!(matches!(err, FlowError::InvalidArg { .. }));
    }

    #[test]
    fn non_positive_temperature_is_rejected() {
        let err = compute_mass_flow_rate(0.61, 1e-5, 2e5, 1e5, 0.0, 1.4, 287.0).unwrap_err();
        assert_eq!(
            err,
            FlowError::InvalidArg {
                what: "upstream temperature"
            }
        );
    }

    #[test]
    fn primitive_entry_point_matches_typed_api() {
        let conditions = natural_gas_conditions(5e5, 1e5);
        let typed = Orifice::new(0.61, m2(1e-5)).mass_flow(&conditions).unwrap();
        let (mdot, regime) =
            compute_mass_flow_rate(0.61, 1e-5, 5e5, 1e5, 293.15, 1.32, 518.3).unwrap();
        assert_eq!(mdot, typed.mass_flow.value);
        assert_eq!(regime, typed.regime);
    }

    #[test]
    fn regime_labels() {
        assert_eq!(FlowRegime::Sonic.label(), "SONIC (CHOKED)");
        assert_eq!(FlowRegime::Subsonic.label(), "SUBSONIC");
    }
}
