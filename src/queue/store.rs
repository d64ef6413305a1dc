use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::slots::slot_sort_key;
use super::types::AppointmentRecord;

/// Errors from reading or rewriting the queue file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access queue file: {0}")]
    Io(#[from] std::io::Error),
    #[error("queue file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// File-backed store for the appointment queue.
///
/// The whole collection is read and rewritten on every operation. Writes are
/// not atomic; a crash mid-write can leave a truncated file. The service
/// keeps exactly one `QueueStore` behind a mutex so there is a single
/// mutation path.
#[derive(Debug)]
pub struct QueueStore {
    path: PathBuf,
}

impl QueueStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        QueueStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the full queue in file order. A missing or empty file is an
    /// empty queue, not an error; anything else that fails to parse is.
    pub fn load(&self) -> Result<Vec<AppointmentRecord>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }
        let records = serde_json::from_str(&contents)?;
        Ok(records)
    }

    /// Reads the queue sorted chronologically by slot, the order the staff
    /// view presents it in.
    pub fn load_sorted(&self) -> Result<Vec<AppointmentRecord>, StoreError> {
        let mut records = self.load()?;
        records.sort_by_key(|r| slot_sort_key(&r.slot));
        Ok(records)
    }

    /// Overwrites the queue file with `records`, pretty-printed with stable
    /// field order.
    pub fn save(&self, records: &[AppointmentRecord]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}
