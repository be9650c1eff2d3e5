//! Calculator requests: forward flow, reverse area solve and orifice sizing.
//!
//! Requests carry numbers exactly as entered plus their unit tags; tags are
//! parsed here, at the service boundary, and everything below works in SI.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use pse_core::numeric::ensure_non_negative;
use pse_core::units::{Area, Time};
use pse_flow::display::total_release;
use pse_flow::tier::target_rate_mscf_per_hr;
use pse_flow::{
    FlowConditions, FlowRegime, FlowUnit, Orifice, ReleaseTier, ReleaseType, Site, TargetTier,
    area_from_diameter, classify_release, convert_to_display_unit, critical_pressure_ratio,
    diameter_from_area,
};
use pse_gas::{
    AreaUnit, DiameterUnit, DurationUnit, GasCatalogEntry, GaugePressureUnit, TemperatureUnit,
    lookup_gas,
};
use pse_records::CalculationDraft;

use crate::error::{AppError, AppResult};

/// Gas, boundary conditions and release context shared by every calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseInputs {
    pub gas: String,
    pub release_type: ReleaseType,
    pub site: Site,
    /// Upstream gauge pressure
    pub p0: f64,
    pub p0_unit: String,
    /// Downstream gauge pressure
    pub p2: f64,
    pub p2_unit: String,
    /// Upstream temperature
    pub t0: f64,
    pub t0_unit: String,
    pub duration: f64,
    pub duration_unit: String,
    pub cd: f64,
}

impl Default for ReleaseInputs {
    fn default() -> Self {
        Self::from(&CalculationDraft::default())
    }
}

impl From<&CalculationDraft> for ReleaseInputs {
    fn from(draft: &CalculationDraft) -> Self {
        Self {
            gas: draft.gas.clone(),
            release_type: draft.release_type,
            site: draft.site,
            p0: draft.p0,
            p0_unit: draft.p0_unit.clone(),
            p2: draft.p2,
            p2_unit: draft.p2_unit.clone(),
            t0: draft.t0,
            t0_unit: draft.t0_unit.clone(),
            duration: draft.duration,
            duration_unit: draft.duration_unit.clone(),
            cd: draft.cd,
        }
    }
}

struct ResolvedInputs {
    gas: &'static GasCatalogEntry,
    conditions: FlowConditions,
    duration: Time,
}

impl ReleaseInputs {
    fn resolve(&self) -> AppResult<ResolvedInputs> {
        let gas = lookup_gas(&self.gas)?;
        let p_up = self.p0_unit.parse::<GaugePressureUnit>()?.to_absolute(self.p0);
        let p_down = self.p2_unit.parse::<GaugePressureUnit>()?.to_absolute(self.p2);
        let t_up = self.t0_unit.parse::<TemperatureUnit>()?.to_kelvin(self.t0);
        let duration = self.duration_unit.parse::<DurationUnit>()?.to_time(self.duration);

        ensure_non_negative(duration.value, "release duration").map_err(|_| {
            AppError::InvalidInput(format!(
                "release duration must be a non-negative number (got {} {})",
                self.duration, self.duration_unit
            ))
        })?;

        Ok(ResolvedInputs {
            gas,
            conditions: FlowConditions {
                p_up,
                p_down,
                t_up,
                gas: gas.properties,
            },
            duration,
        })
    }
}

/// Orifice size as entered: either an area or a circular diameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OrificeSize {
    Area { value: f64, unit: String },
    Diameter { value: f64, unit: String },
}

impl Default for OrificeSize {
    fn default() -> Self {
        OrificeSize::Area {
            value: 10.0,
            unit: AreaUnit::SquareMillimeter.tag().to_string(),
        }
    }
}

impl OrificeSize {
    /// Opening area expressed in `unit`.
    pub fn area_in(&self, unit: AreaUnit) -> AppResult<f64> {
        match self {
            OrificeSize::Area { value, unit: tag } => {
                let from: AreaUnit = tag.parse()?;
                Ok(unit.from_area(from.to_area(*value)))
            }
            OrificeSize::Diameter { value, unit: tag } => {
                let from: DiameterUnit = tag.parse()?;
                Ok(area_from_diameter(*value, from, unit))
            }
        }
    }

    pub fn to_area(&self) -> AppResult<Area> {
        let m2 = self.area_in(AreaUnit::SquareMeter)?;
        Ok(AreaUnit::SquareMeter.to_area(m2))
    }

    fn value(&self) -> f64 {
        match self {
            OrificeSize::Area { value, .. } | OrificeSize::Diameter { value, .. } => *value,
        }
    }
}

/// Forward calculation request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowRequest {
    #[serde(flatten)]
    pub release: ReleaseInputs,
    #[serde(default)]
    pub orifice: OrificeSize,
}

impl From<&CalculationDraft> for FlowRequest {
    fn from(draft: &CalculationDraft) -> Self {
        Self {
            release: ReleaseInputs::from(draft),
            orifice: OrificeSize::Area {
                value: draft.area,
                unit: draft.area_unit.clone(),
            },
        }
    }
}

/// A value tagged with its unit label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UnitValue {
    pub unit: &'static str,
    pub value: f64,
}

/// Result of a forward calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlowReport {
    pub gas: &'static str,
    pub regime: FlowRegime,
    pub regime_label: &'static str,
    pub pressure_ratio: f64,
    pub critical_pressure_ratio: f64,
    pub area_m2: f64,
    pub duration_s: f64,
    pub mass_flow_kg_s: f64,
    /// Flow rate in each of [`FlowUnit::ALL`], keyed by rate unit
    pub rates: Vec<UnitValue>,
    /// Total released over the duration, keyed by accumulated unit
    pub totals: Vec<UnitValue>,
    pub tier: ReleaseTier,
}

impl FlowReport {
    pub fn rate(&self, unit: FlowUnit) -> Option<f64> {
        self.rates
            .iter()
            .find(|r| r.unit == unit.key())
            .map(|r| r.value)
    }

    pub fn total(&self, unit: FlowUnit) -> Option<f64> {
        self.totals
            .iter()
            .find(|t| t.unit == unit.total_label())
            .map(|t| t.value)
    }
}

/// Mass flow, display-unit rates and totals, regime and tier for one release.
pub fn calculate(request: &FlowRequest) -> AppResult<FlowReport> {
    let release = &request.release;
    let resolved = release.resolve()?;
    let area = request.orifice.to_area()?;

    let solution = Orifice::new(release.cd, area).mass_flow(&resolved.conditions)?;
    let mdot = solution.mass_flow.value;
    let gas = &resolved.gas.properties;
    let duration_s = resolved.duration.value;

    let mut rates = Vec::with_capacity(FlowUnit::ALL.len());
    let mut totals = Vec::with_capacity(FlowUnit::ALL.len());
    for unit in FlowUnit::ALL {
        let rate = convert_to_display_unit(mdot, gas, unit);
        rates.push(UnitValue {
            unit: unit.key(),
            value: rate.value,
        });
        totals.push(UnitValue {
            unit: rate.label,
            value: total_release(rate.value, unit, duration_s),
        });
    }

    let rate_mscf = convert_to_display_unit(mdot, gas, FlowUnit::MscfPerHr).value;
    let total_mscf = total_release(rate_mscf, FlowUnit::MscfPerHr, duration_s);
    let tier = classify_release(
        release.release_type,
        release.site,
        duration_s,
        rate_mscf,
        total_mscf,
    );

    debug!(
        gas = resolved.gas.name,
        mdot_kg_s = mdot,
        rate_mscf_per_hr = rate_mscf,
        total_mscf,
        %tier,
        "calculated release"
    );

    Ok(FlowReport {
        gas: resolved.gas.name,
        regime: solution.regime,
        regime_label: solution.regime.label(),
        pressure_ratio: resolved.conditions.pressure_ratio(),
        critical_pressure_ratio: critical_pressure_ratio(gas.gamma),
        area_m2: area.value,
        duration_s,
        mass_flow_kg_s: mdot,
        rates,
        totals,
        tier,
    })
}

fn default_area_unit() -> String {
    AreaUnit::SquareMillimeter.tag().to_string()
}

fn default_diameter_unit() -> String {
    DiameterUnit::Millimeter.tag().to_string()
}

/// Reverse solve request: the orifice size that lands a release in `target_tier`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequiredAreaRequest {
    /// "1" or "2" (also "Tier 1", "tier2")
    pub target_tier: String,
    #[serde(flatten)]
    pub release: ReleaseInputs,
    #[serde(default = "default_area_unit")]
    pub area_unit: String,
    #[serde(default = "default_diameter_unit")]
    pub diameter_unit: String,
}

impl RequiredAreaRequest {
    pub fn new(target_tier: impl Into<String>, release: ReleaseInputs) -> Self {
        Self {
            target_tier: target_tier.into(),
            release,
            area_unit: default_area_unit(),
            diameter_unit: default_diameter_unit(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequiredAreaReport {
    pub target_tier: ReleaseTier,
    pub target_rate_mscf_per_hr: f64,
    pub regime: FlowRegime,
    pub area_m2: f64,
    pub area: f64,
    pub area_unit: &'static str,
    /// Equivalent circular diameter
    pub diameter: f64,
    pub diameter_unit: &'static str,
}

/// Orifice area (and equivalent diameter) needed to reach the target tier.
pub fn required_area(request: &RequiredAreaRequest) -> AppResult<RequiredAreaReport> {
    let target: TargetTier = request.target_tier.parse()?;
    let area_unit: AreaUnit = request.area_unit.parse()?;
    let diameter_unit: DiameterUnit = request.diameter_unit.parse()?;

    let release = &request.release;
    let resolved = release.resolve()?;
    let area = pse_flow::tier::required_area(
        target,
        release.release_type,
        release.site,
        resolved.duration,
        release.cd,
        &resolved.conditions,
    )?;
    let rate = target_rate_mscf_per_hr(target, release.release_type, resolved.duration.value)?;

    let area_value = area_unit.from_area(area);
    let diameter = diameter_from_area(area_value, area_unit, diameter_unit);
    info!(
        ?target,
        gas = resolved.gas.name,
        area = area_value,
        unit = area_unit.tag(),
        "solved required orifice area"
    );

    Ok(RequiredAreaReport {
        target_tier: match target {
            TargetTier::Tier1 => ReleaseTier::Tier1,
            TargetTier::Tier2 => ReleaseTier::Tier2,
        },
        target_rate_mscf_per_hr: rate,
        regime: resolved.conditions.regime(),
        area_m2: area.value,
        area: area_value,
        area_unit: area_unit.tag(),
        diameter,
        diameter_unit: diameter_unit.tag(),
    })
}

/// Area/diameter conversion request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrificeConvertRequest {
    pub orifice: OrificeSize,
    #[serde(default = "default_area_unit")]
    pub area_unit: String,
    #[serde(default = "default_diameter_unit")]
    pub diameter_unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrificeConversion {
    pub area: f64,
    pub area_unit: &'static str,
    pub diameter: f64,
    pub diameter_unit: &'static str,
}

/// Express an orifice as both an area and a circular diameter.
pub fn convert_orifice(request: &OrificeConvertRequest) -> AppResult<OrificeConversion> {
    let area_unit: AreaUnit = request.area_unit.parse()?;
    let diameter_unit: DiameterUnit = request.diameter_unit.parse()?;

    let value = request.orifice.value();
    ensure_non_negative(value, "orifice size").map_err(|_| {
        AppError::InvalidInput(format!("orifice size must be a non-negative number (got {value})"))
    })?;

    let area = request.orifice.area_in(area_unit)?;
    Ok(OrificeConversion {
        area,
        area_unit: area_unit.tag(),
        diameter: diameter_from_area(area, area_unit, diameter_unit),
        diameter_unit: diameter_unit.tag(),
    })
}
