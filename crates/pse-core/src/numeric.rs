//! Float checks shared by the solver crates.

use crate::PseError;

/// Floating point type used throughout the calculator
pub type Real = f64;

/// `|a - b| / max(|a|, |b|)`, or zero when both are zero.
pub fn relative_diff(a: Real, b: Real) -> Real {
    let scale = a.abs().max(b.abs());
    if scale == 0.0 { 0.0 } else { (a - b).abs() / scale }
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, PseError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(PseError::NonFinite { what, value: v })
    }
}

/// Finite and strictly greater than zero.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, PseError> {
    match ensure_finite(v, what)? {
        v if v > 0.0 => Ok(v),
        _ => Err(PseError::InvalidArg { what }),
    }
}

/// Finite and not below zero.
pub fn ensure_non_negative(v: Real, what: &'static str) -> Result<Real, PseError> {
    match ensure_finite(v, what)? {
        v if v >= 0.0 => Ok(v),
        _ => Err(PseError::InvalidArg { what }),
    }
}
