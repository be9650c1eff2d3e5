//! pse-core: shared foundation for the PSE flow calculator.
//!
//! Contains:
//! - units (uom SI types + constructors + reference conditions)
//! - numeric (Real + finiteness/sign checks + relative difference)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

pub use error::{PseError, PseResult};
pub use numeric::*;
pub use units::*;
