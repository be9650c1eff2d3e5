use thiserror::Error;

pub type PseResult<T> = Result<T, PseError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PseError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },
}
