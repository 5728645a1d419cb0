//! History stores
//!
//! A store owns the records; callers never mutate entries in place. Stores
//! are not synchronised themselves, wrap them in a `Mutex` when shared.

use serde::{Serialize, Deserialize};
use tracing::debug;
use crate::{ConversionRecord, HistoryEntry, HistoryError, RecordId};

/// Create / list / delete access to saved conversions
pub trait HistoryStore: Send {
    /// Store a record and return it with its new id
    fn create(&mut self, record: ConversionRecord) -> Result<HistoryEntry, HistoryError>;

    /// All entries, newest first
    fn list(&self) -> Vec<HistoryEntry>;

    fn get(&self, id: RecordId) -> Option<HistoryEntry>;

    /// Remove an entry and return it
    fn delete(&mut self, id: RecordId) -> Result<HistoryEntry, HistoryError>;

    fn len(&self) -> usize {
        self.list().len()
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// In-memory store, lost when the process exits
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryStore {
    next_id: RecordId,
    entries: Vec<HistoryEntry>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the id counter past every stored id
    ///
    /// Returns true when the counter had to be moved.
    pub(crate) fn reconcile_next_id(&mut self) -> bool {
        let highest = self.entries.iter().map(|e| e.id).max().unwrap_or(0);
        if self.next_id < highest {
            self.next_id = highest;
            true
        } else {
            false
        }
    }
}

impl HistoryStore for MemoryStore {
    fn create(&mut self, record: ConversionRecord) -> Result<HistoryEntry, HistoryError> {
        self.next_id += 1;
        let entry = HistoryEntry { id: self.next_id, record };
        self.entries.push(entry.clone());
        debug!(id = entry.id, "conversion saved");
        Ok(entry)
    }

    fn list(&self) -> Vec<HistoryEntry> {
        let mut entries = self.entries.clone();
        entries.sort_by(|a, b| {
            b.record.timestamp.cmp(&a.record.timestamp).then(b.id.cmp(&a.id))
        });
        entries
    }

    fn get(&self, id: RecordId) -> Option<HistoryEntry> {
        self.entries.iter().find(|e| e.id == id).cloned()
    }

    fn delete(&mut self, id: RecordId) -> Result<HistoryEntry, HistoryError> {
        let index = self.entries
            .iter()
            .position(|e| e.id == id)
            .ok_or(HistoryError::NotFound(id))?;
        debug!(id, "conversion deleted");
        Ok(self.entries.remove(index))
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
