//! Record storage API.
//!
//! The in-memory list is the source of truth for the session. Every mutation
//! rewrites the whole backing file as one pretty-printed JSON array.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::types::{CalculationDraft, CalculationRecord};
use crate::{RecordsError, RecordsResult};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Result of a mutation: the in-memory change always happens, durability may not.
#[derive(Debug)]
#[must_use]
pub struct WriteOutcome<T> {
    pub value: T,
    /// Set when the backing file could not be rewritten.
    pub persist_error: Option<RecordsError>,
}

impl<T> WriteOutcome<T> {
    pub fn is_durable(&self) -> bool {
        self.persist_error.is_none()
    }

    pub fn into_result(self) -> RecordsResult<T> {
        match self.persist_error {
            None => Ok(self.value),
            Some(err) => Err(err),
        }
    }
}

/// What a lenient read of a store file recovered.
#[derive(Debug, Clone, Default)]
pub struct LoadedRecords {
    pub records: Vec<CalculationRecord>,
    /// Entries that were not JSON objects and could not be recovered.
    pub skipped: usize,
}

#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
    records: Vec<CalculationRecord>,
    /// Set when the file on disk held data this session could not load and no
    /// backup of it exists; writes are refused so that data is not overwritten.
    write_blocked: bool,
}

impl RecordStore {
    /// Open the store at `path`, loading existing records.
    ///
    /// Malformed fields fall back to form defaults and unreadable entries are skipped.
    /// A file that is not a JSON array yields an empty store. In both lossy cases the
    /// original file is copied to `<path>.bak` before anything can overwrite it.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if !path.exists() {
            debug!(path = %path.display(), "no calculations file yet");
            return Self {
                path,
                records: Vec::new(),
                write_blocked: false,
            };
        }

        let (records, lossy) = match Self::load(&path) {
            Ok(loaded) => {
                info!(
                    path = %path.display(),
                    count = loaded.records.len(),
                    skipped = loaded.skipped,
                    "loaded calculations"
                );
                (loaded.records, loaded.skipped > 0)
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "error loading calculations, starting empty"
                );
                (Vec::new(), true)
            }
        };

        let write_blocked = lossy && !back_up(&path);
        Self {
            path,
            records,
            write_blocked,
        }
    }

    /// Read a store file record by record.
    ///
    /// Fails only when the file cannot be read or is not a JSON array.
    pub fn load(path: &Path) -> RecordsResult<LoadedRecords> {
        let content = fs::read_to_string(path)?;
        let values: Vec<serde_json::Value> = serde_json::from_str(&content)?;

        let mut loaded = LoadedRecords::default();
        for (index, value) in values.into_iter().enumerate() {
            match CalculationRecord::from_stored_value(value) {
                Ok(record) => loaded.records.push(record),
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        index,
                        error = %err,
                        "skipping unreadable calculation"
                    );
                    loaded.skipped += 1;
                }
            }
        }
        Ok(loaded)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where `open` copies a file it could not fully load.
    pub fn backup_path(&self) -> PathBuf {
        backup_path(&self.path)
    }

    /// Records in insertion order.
    pub fn list(&self) -> &[CalculationRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Assign a fresh id and timestamp, append, and rewrite the file.
    pub fn append(&mut self, draft: CalculationDraft) -> WriteOutcome<CalculationRecord> {
        let id = uuid::Uuid::new_v4().to_string();
        let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
        let record = draft.into_record(id, timestamp);

        self.records.push(record.clone());
        info!(id = %record.id, title = %record.inputs.calculation_title, "saved calculation");

        WriteOutcome {
            value: record,
            persist_error: self.persist().err(),
        }
    }

    /// Remove every record with `id`, returning them in their former order.
    ///
    /// An unknown id is a no-op and leaves the file untouched.
    pub fn remove(&mut self, id: &str) -> WriteOutcome<Vec<CalculationRecord>> {
        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.records)
            .into_iter()
            .partition(|r| r.id == id);
        self.records = kept;

        if removed.is_empty() {
            debug!(id, "delete requested for unknown calculation");
            return WriteOutcome {
                value: removed,
                persist_error: None,
            };
        }
        info!(id, count = removed.len(), "deleted calculation");

        WriteOutcome {
            value: removed,
            persist_error: self.persist().err(),
        }
    }

    fn persist(&self) -> RecordsResult<()> {
        let result = if self.write_blocked {
            Err(RecordsError::WriteBlocked {
                path: self.path.clone(),
            })
        } else {
            self.write_file()
        };
        if let Err(err) = &result {
            warn!(path = %self.path.display(), error = %err, "error saving calculations");
        }
        result
    }

    fn write_file(&self) -> RecordsResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.records)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".bak");
    PathBuf::from(name)
}

/// Copy `path` aside. Returns false when no backup could be made.
fn back_up(path: &Path) -> bool {
    let backup = backup_path(path);
    match fs::copy(path, &backup) {
        Ok(_) => {
            warn!(backup = %backup.display(), "kept a copy of the calculations file");
            true
        }
        Err(err) => {
            warn!(
                backup = %backup.display(),
                error = %err,
                "could not back up calculations file, saving disabled"
            );
            false
        }
    }
}
