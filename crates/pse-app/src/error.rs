//! Error types for the pse-app service layer.

use std::path::PathBuf;

use pse_flow::FlowError;
use pse_gas::GasError;
use pse_records::RecordsError;

/// Application error type that wraps errors from the backend crates
/// and provides a unified error interface for the CLI and the web app.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Gas(#[from] GasError),

    #[error("Calculation error: {0}")]
    Flow(#[from] FlowError),

    #[error("Storage error: {0}")]
    Records(#[from] RecordsError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Calculation not found: {0}")]
    RecordNotFound(String),

    #[error("Failed to read config file: {path}")]
    ConfigFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for pse-app operations.
pub type AppResult<T> = Result<T, AppError>;

/// Coarse classification of an [`AppError`] for front ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request carried bad or non-physical inputs
    BadInput,
    /// A record id did not match anything
    NotFound,
    /// Valid inputs for a configuration the calculator does not handle
    Unsupported,
    Internal,
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Gas(_) | AppError::InvalidInput(_) | AppError::Validation(_) => {
                ErrorKind::BadInput
            }
            AppError::Flow(
                FlowError::UnsupportedSite { .. } | FlowError::UnsupportedTier { .. },
            ) => ErrorKind::Unsupported,
            AppError::Flow(_) => ErrorKind::BadInput,
            AppError::RecordNotFound(_) => ErrorKind::NotFound,
            AppError::Records(_)
            | AppError::ConfigFileRead { .. }
            | AppError::ConfigParse { .. }
            | AppError::Io(_) => ErrorKind::Internal,
        }
    }
}
