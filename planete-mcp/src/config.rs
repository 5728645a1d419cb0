//! Environment configuration
//!
//! - `PLANETE_DATA_PATH`: directory holding `history.json` (default `.planete`)
//! - `PLANETE_HISTORY`: `file` (default) or `memory`
//! - `RUST_LOG`: log filter, defaults to `info`

use std::env;
use std::path::PathBuf;
use planete_history::{HistoryError, HistoryStore, JsonFileStore, MemoryStore};

const HISTORY_FILE: &str = "history.json";

#[derive(Debug, Clone, PartialEq)]
pub enum HistoryBackend {
    Memory,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub data_path: PathBuf,
    pub history: HistoryBackend,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let data_path = lookup("PLANETE_DATA_PATH")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(".planete"));

        let history = match lookup("PLANETE_HISTORY").as_deref() {
            Some(mode) if mode.eq_ignore_ascii_case("memory") => HistoryBackend::Memory,
            _ => HistoryBackend::File(data_path.join(HISTORY_FILE)),
        };

        Config { data_path, history }
    }

    pub fn open_history(&self) -> Result<Box<dyn HistoryStore>, HistoryError> {
        let store: Box<dyn HistoryStore> = match &self.history {
            HistoryBackend::Memory => Box::new(MemoryStore::new()),
            HistoryBackend::File(path) => Box::new(JsonFileStore::open(path.clone())?),
        };
        Ok(store)
    }
}
