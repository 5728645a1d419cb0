//! History errors

use std::io;
use std::path::PathBuf;
use thiserror::Error;
use crate::RecordId;

#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("cannot access history file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed history file {path}: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no conversion record with id {0}")]
    NotFound(RecordId),
}
