//! Release tier classification and the reverse area solve.
//!
//! Tier thresholds apply to GTM US only and are expressed in MSCF:
//!
//! | release | duration | Tier 1 | Tier 2 | compared against |
//! |---|---|---|---|---|
//! | Indoor | > 1 h | 2.47 | 1.41 | flow rate, MSCF/hr |
//! | Indoor | <= 1 h | 2.47 | 1.41 | total release, MSCF |
//! | Outdoor | any | 3000 | 300 | total release, MSCF |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::common::{check_finite, check_positive};
use crate::display::mscf_per_hr_to_kg_per_s;
use crate::error::{FlowError, FlowResult};
use crate::orifice::{FlowConditions, mass_flux};
use pse_core::units::constants::SECONDS_PER_HOUR;
use pse_core::units::{Area, Time, m2};

pub const INDOOR_TIER1_MSCF: f64 = 2.47;
pub const INDOOR_TIER2_MSCF: f64 = 1.41;
pub const OUTDOOR_TIER1_MSCF: f64 = 3_000.0;
pub const OUTDOOR_TIER2_MSCF: f64 = 300.0;

/// Indoor releases longer than this are judged on flow rate.
pub const INDOOR_RATE_BASIS_AFTER_S: f64 = 3_600.0;

/// Reverse-solve targets sit just above the threshold so the result lands in the tier.
pub const TARGET_MARGIN: f64 = 1.0001;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReleaseType {
    Indoor,
    #[default]
    Outdoor,
}

impl ReleaseType {
    pub fn label(self) -> &'static str {
        match self {
            Self::Indoor => "Indoor",
            Self::Outdoor => "Outdoor",
        }
    }
}

impl fmt::Display for ReleaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ReleaseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "indoor" => Ok(Self::Indoor),
            "outdoor" => Ok(Self::Outdoor),
            _ => Err(format!("Unknown release type '{s}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Site {
    #[default]
    #[serde(rename = "GTM US")]
    GtmUs,
    #[serde(rename = "GTM Canada")]
    GtmCanada,
}

impl Site {
    pub fn label(self) -> &'static str {
        match self {
            Self::GtmUs => "GTM US",
            Self::GtmCanada => "GTM Canada",
        }
    }

    pub fn supports_tiering(self) -> bool {
        matches!(self, Self::GtmUs)
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Site {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gtm us" | "us" => Ok(Self::GtmUs),
            "gtm canada" | "canada" => Ok(Self::GtmCanada),
            _ => Err(format!("Unknown site '{s}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ReleaseTier {
    #[serde(rename = "Tier 1")]
    Tier1,
    #[serde(rename = "Tier 2")]
    Tier2,
    #[serde(rename = "Tier 3")]
    Tier3,
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl ReleaseTier {
    pub fn label(self) -> &'static str {
        match self {
            Self::Tier1 => "Tier 1",
            Self::Tier2 => "Tier 2",
            Self::Tier3 => "Tier 3",
            Self::NotApplicable => "N/A",
        }
    }
}

impl fmt::Display for ReleaseTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tier the reverse solve aims for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetTier {
    Tier1,
    Tier2,
}

impl FromStr for TargetTier {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "1" | "tier1" => Ok(Self::Tier1),
            "2" | "tier2" => Ok(Self::Tier2),
            _ => Err(FlowError::UnsupportedTier { tier: s.to_string() }),
        }
    }
}

/// What a tier threshold is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierBasis {
    /// Flow rate, MSCF/hr
    FlowRate,
    /// Total release over the duration, MSCF
    TotalRelease,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TierLimits {
    pub tier1_mscf: f64,
    pub tier2_mscf: f64,
    pub basis: TierBasis,
}

/// Thresholds for a release type and duration.
pub fn tier_limits(release_type: ReleaseType, duration_s: f64) -> TierLimits {
    match release_type {
        ReleaseType::Indoor if duration_s > INDOOR_RATE_BASIS_AFTER_S => TierLimits {
            tier1_mscf: INDOOR_TIER1_MSCF,
            tier2_mscf: INDOOR_TIER2_MSCF,
            basis: TierBasis::FlowRate,
        },
        ReleaseType::Indoor => TierLimits {
            tier1_mscf: INDOOR_TIER1_MSCF,
            tier2_mscf: INDOOR_TIER2_MSCF,
            basis: TierBasis::TotalRelease,
        },
        ReleaseType::Outdoor => TierLimits {
            tier1_mscf: OUTDOOR_TIER1_MSCF,
            tier2_mscf: OUTDOOR_TIER2_MSCF,
            basis: TierBasis::TotalRelease,
        },
    }
}

/// Classify a release from its MSCF/hr rate and MSCF total.
pub fn classify_release(
    release_type: ReleaseType,
    site: Site,
    duration_s: f64,
    rate_mscf_per_hr: f64,
    total_mscf: f64,
) -> ReleaseTier {
    if !site.supports_tiering() {
        return ReleaseTier::NotApplicable;
    }

    let limits = tier_limits(release_type, duration_s);
    let measure = match limits.basis {
        TierBasis::FlowRate => rate_mscf_per_hr,
        TierBasis::TotalRelease => total_mscf,
    };

    if measure >= limits.tier1_mscf {
        ReleaseTier::Tier1
    } else if measure >= limits.tier2_mscf {
        ReleaseTier::Tier2
    } else {
        ReleaseTier::Tier3
    }
}

/// Flow rate (MSCF/hr) that lands just inside the target tier.
pub fn target_rate_mscf_per_hr(
    target: TargetTier,
    release_type: ReleaseType,
    duration_s: f64,
) -> FlowResult<f64> {
    let limits = tier_limits(release_type, duration_s);
    let threshold = match target {
        TargetTier::Tier1 => limits.tier1_mscf,
        TargetTier::Tier2 => limits.tier2_mscf,
    } * TARGET_MARGIN;

    match limits.basis {
        TierBasis::FlowRate => Ok(threshold),
        TierBasis::TotalRelease => {
            let duration_s = check_positive(duration_s, "release duration")?;
            Ok(threshold * SECONDS_PER_HOUR / duration_s)
        }
    }
}

/// Orifice area whose release reaches `target` under the given conditions.
///
/// Only GTM US has tier thresholds; other sites return `UnsupportedSite`.
pub fn required_area(
    target: TargetTier,
    release_type: ReleaseType,
    site: Site,
    duration: Time,
    cd: f64,
    conditions: &FlowConditions,
) -> FlowResult<Area> {
    if !site.supports_tiering() {
        return Err(FlowError::UnsupportedSite { site });
    }

    let rate_mscf = target_rate_mscf_per_hr(target, release_type, duration.value)?;
    let target_mdot = mscf_per_hr_to_kg_per_s(rate_mscf, conditions.gas.molecular_weight);
    let target_mdot = check_finite(target_mdot, "target mass flow rate")?;

    let (flux, regime) = mass_flux(cd, conditions)?;
    let area = check_finite(target_mdot / flux, "required area")?;

    debug!(
        ?target,
        ?release_type,
        rate_mscf_per_hr = rate_mscf,
        target_mdot_kg_s = target_mdot,
        ?regime,
        area_m2 = area,
        "reverse area solve"
    );

    Ok(m2(area))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outdoor_thresholds() {
        let classify =
            |total| classify_release(ReleaseType::Outdoor, Site::GtmUs, 600.0, 0.0, total);
        assert_eq!(classify(3_000.0 * TARGET_MARGIN), ReleaseTier::Tier1);
        assert_eq!(classify(3_000.0), ReleaseTier::Tier1);
        assert_eq!(classify(300.0 * TARGET_MARGIN), ReleaseTier::Tier2);
        assert_eq!(classify(2_999.9), ReleaseTier::Tier2);
        assert_eq!(classify(299.9), ReleaseTier::Tier3);
    }

    #[test]
    fn indoor_short_release_uses_total() {
        let tier = classify_release(ReleaseType::Indoor, Site::GtmUs, 3_600.0, 100.0, 1.5);
        assert_eq!(tier, ReleaseTier::Tier2);
    }

    #[test]
    fn indoor_long_release_uses_rate() {
        let tier = classify_release(ReleaseType::Indoor, Site::GtmUs, 3_601.0, 2.5, 0.0);
        assert_eq!(tier, ReleaseTier::Tier1);
        let tier = classify_release(ReleaseType::Indoor, Site::GtmUs, 7_200.0, 1.0, 1e6);
        assert_eq!(tier, ReleaseTier::Tier3);
    }

    #[test]
    fn canada_is_not_tiered() {
        let tier = classify_release(ReleaseType::Outdoor, Site::GtmCanada, 600.0, 1e6, 1e6);
        assert_eq!(tier, ReleaseTier::NotApplicable);
    }

    #[test]
    fn target_tier_parsing() {
        assert_eq!("1".parse::<TargetTier>().unwrap(), TargetTier::Tier1);
        assert_eq!("Tier 2".parse::<TargetTier>().unwrap(), TargetTier::Tier2);
        assert!(matches!(
            "3".parse::<TargetTier>(),
            Err(FlowError::UnsupportedTier { tier }) if tier == "3"
        ));
    }

    #[test]
    fn target_rates() {
        let long =
            target_rate_mscf_per_hr(TargetTier::Tier1, ReleaseType::Indoor, 7_200.0).unwrap();
        assert_eq!(long, INDOOR_TIER1_MSCF * TARGET_MARGIN);

        let outdoor =
            target_rate_mscf_per_hr(TargetTier::Tier2, ReleaseType::Outdoor, 1_800.0).unwrap();
        assert!((outdoor - 600.0 * TARGET_MARGIN).abs() < 1e-9);

        assert!(target_rate_mscf_per_hr(TargetTier::Tier2, ReleaseType::Outdoor, 0.0).is_err());
    }

    #[test]
    fn site_and_release_type_serde_names() {
        assert_eq!(serde_json::to_string(&Site::GtmUs).unwrap(), "\"GTM US\"");
        let site: Site = serde_json::from_str("\"GTM Canada\"").unwrap();
        assert_eq!(site, Site::GtmCanada);
        let release: ReleaseType = serde_json::from_str("\"Indoor\"").unwrap();
        assert_eq!(release, ReleaseType::Indoor);
        assert_eq!(
            serde_json::to_string(&ReleaseTier::NotApplicable).unwrap(),
            "\"N/A\""
        );
    }
}
