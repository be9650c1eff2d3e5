//! Error types for flow calculations.

use pse_core::PseError;
use thiserror::Error;

use crate::tier::Site;

/// Errors that can occur during flow calculations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlowError {
    #[error("Non-physical value: {what}")]
    NonPhysical { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Tier calculation only available for GTM US (site: {site})")]
    UnsupportedSite { site: Site },

    #[error("Unsupported target tier '{tier}' (expected 1 or 2)")]
    UnsupportedTier { tier: String },
}

pub type FlowResult<T> = Result<T, FlowError>;

impl From<PseError> for FlowError {
    fn from(e: PseError) -> Self {
        match e {
            PseError::NonFinite { what, .. } => FlowError::NonPhysical { what },
            PseError::InvalidArg { what } => FlowError::InvalidArg { what },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FlowError::NonPhysical { what: "mass flux" };
        assert!(err.to_string().contains("mass flux"));

        let err = FlowError::UnsupportedSite {
            site: Site::GtmCanada,
        };
        assert!(err.to_string().contains("GTM Canada"));
    }

    #[test]
    fn error_conversion() {
        let core_err = PseError::NonFinite {
            what: "gamma",
            value: f64::NAN,
        };
        let flow_err: FlowError = core_err.into();
        assert_eq!(flow_err, FlowError::NonPhysical { what: "gamma" });
    }
}
