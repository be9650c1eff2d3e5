//! Gas catalog and unit tag errors.

use thiserror::Error;

/// Result type for catalog and unit lookups.
pub type GasResult<T> = Result<T, GasError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GasError {
    /// Name not present in the gas catalog.
    #[error("Unknown gas '{name}'")]
    UnknownGas { name: String },

    /// Unit tag not recognized for this quantity.
    #[error("Unknown unit '{unit}' for {quantity}")]
    UnknownUnit {
        unit: String,
        quantity: &'static str,
    },
}
