//! Common utilities for flow calculations.

use pse_core::numeric::{ensure_finite, ensure_non_negative, ensure_positive};

use crate::error::{FlowError, FlowResult};

/// Ensure a value is finite, returning FlowError if not.
pub fn check_finite(value: f64, what: &'static str) -> FlowResult<f64> {
    ensure_finite(value, what).map_err(|_| FlowError::NonPhysical { what })
}

/// Ensure a value is finite and strictly positive.
pub fn check_positive(value: f64, what: &'static str) -> FlowResult<f64> {
    Ok(ensure_positive(value, what)?)
}

/// Ensure a value is finite and not below zero.
pub fn check_non_negative(value: f64, what: &'static str) -> FlowResult<f64> {
    Ok(ensure_non_negative(value, what)?)
}

/// Discharge coefficient must lie in (0, 1].
pub fn check_discharge_coefficient(cd: f64) -> FlowResult<f64> {
    let cd = check_positive(cd, "discharge coefficient")?;
    if cd > 1.0 {
        return Err(FlowError::InvalidArg {
            what: "discharge coefficient must not exceed 1",
        });
    }
    Ok(cd)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_finite() {
        assert!(check_finite(1.0, "test").is_ok());
        assert!(check_finite(f64::INFINITY, "test").is_err());
        assert!(check_finite(f64::NAN, "test").is_err());
    }

    #[test]
    fn test_check_non_negative() {
        assert_eq!(check_non_negative(0.0, "p"), Ok(0.0));
        assert_eq!(
            check_non_negative(-1.0, "p"),
            Err(FlowError::InvalidArg { what: "p" })
        );
        assert_eq!(
            check_non_negative(f64::NAN, "p"),
            Err(FlowError::NonPhysical { what: "p" })
        );
    }

    #[test]
    fn test_check_discharge_coefficient() {
        assert_eq!(check_discharge_coefficient(0.61), Ok(0.61));
        assert_eq!(check_discharge_coefficient(1.0), Ok(1.0));
        assert!(check_discharge_coefficient(0.0).is_err());
        assert!(check_discharge_coefficient(1.2).is_err());
        assert!(check_discharge_coefficient(f64::NAN).is_err());
    }
}
