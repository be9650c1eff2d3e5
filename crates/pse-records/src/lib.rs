//! pse-records: saved calculation records and their JSON file store.

pub mod store;
pub mod types;

pub use store::{LoadedRecords, RecordStore, WriteOutcome};
pub use types::*;

pub type RecordsResult<T> = Result<T, RecordsError>;

#[derive(thiserror::Error, Debug)]
pub enum RecordsError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("refusing to overwrite {path}: it holds calculations that could not be loaded")]
    WriteBlocked { path: std::path::PathBuf },
}
