//! Planete History - saved conversions
//!
//! Records are created by the presentation layer after it has asked the
//! conversion engine for a result; the engine never touches this crate.
//!
//! Stores:
//! - `MemoryStore`: process lifetime only
//! - `JsonFileStore`: one JSON document, rewritten atomically

mod error;
mod file;
mod record;
mod store;

pub use error::HistoryError;
pub use file::JsonFileStore;
pub use record::{ConversionRecord, HistoryEntry, RecordId};
pub use store::{HistoryStore, MemoryStore};
