//! JSON file backed history
//!
//! The whole history is rewritten atomically after every change. A failed
//! write leaves both the file and the in-memory state untouched.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use atomicwrites::{AtomicFile, OverwriteBehavior};
use tracing::{debug, info, warn};
use crate::{ConversionRecord, HistoryEntry, HistoryError, HistoryStore, MemoryStore, RecordId};

/// History persisted as a single JSON document
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    state: MemoryStore,
}

impl JsonFileStore {
    /// Open `path`, starting empty if the file does not exist yet
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, HistoryError> {
        let path = path.into();
        let mut state: MemoryStore = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text).map_err(|source| HistoryError::Format {
                path: path.clone(),
                source,
            })?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => MemoryStore::new(),
            Err(source) => return Err(HistoryError::Io { path, source }),
        };

        if state.reconcile_next_id() {
            warn!(path = %path.display(), "id counter behind stored records, raised");
        }

        let store = JsonFileStore { path, state };
        info!(path = %store.path.display(), records = store.state.len(), "history opened");
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self, state: &MemoryStore) -> Result<(), HistoryError> {
        let io_error = |source: io::Error| HistoryError::Io { path: self.path.clone(), source };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        let contents = serde_json::to_string_pretty(state).map_err(|source| HistoryError::Format {
            path: self.path.clone(),
            source,
        })?;

        AtomicFile::new(&self.path, OverwriteBehavior::AllowOverwrite)
            .write(|f| {
                f.write_all(contents.as_bytes())?;
                f.flush()
            })
            .map_err(|e| match e {
                atomicwrites::Error::Internal(e) | atomicwrites::Error::User(e) => io_error(e),
            })?;

        debug!(path = %self.path.display(), "history written");
        Ok(())
    }

    /// Apply `change` to a copy of the state, persist it, then commit
    fn transact<T>(
        &mut self,
        change: impl FnOnce(&mut MemoryStore) -> Result<T, HistoryError>,
    ) -> Result<T, HistoryError> {
        let mut next = self.state.clone();
        let value = change(&mut next)?;
        self.save(&next)?;
        self.state = next;
        Ok(value)
    }
}

impl HistoryStore for JsonFileStore {
    fn create(&mut self, record: ConversionRecord) -> Result<HistoryEntry, HistoryError> {
        self.transact(|state| state.create(record))
    }

    fn list(&self) -> Vec<HistoryEntry> {
        self.state.list()
    }

    fn get(&self, id: RecordId) -> Option<HistoryEntry> {
        self.state.get(id)
    }

    fn delete(&mut self, id: RecordId) -> Result<HistoryEntry, HistoryError> {
        self.transact(|state| state.delete(id))
    }

    fn len(&self) -> usize {
        self.state.len()
    }
}
