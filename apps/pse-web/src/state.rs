use std::path::PathBuf;

use pse_records::RecordStore;
use tokio::sync::RwLock;

/// Shared server state. Store mutations and their file rewrite happen under one write lock.
pub struct AppState {
    pub store: RwLock<RecordStore>,
}

impl AppState {
    /// Open (or start empty) the record store at `store_path`.
    pub fn open(store_path: impl Into<PathBuf>) -> Self {
        Self {
            store: RwLock::new(RecordStore::open(store_path)),
        }
    }
}
