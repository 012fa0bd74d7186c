use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Directory-level failures. Per-file failures never surface as an `EngineError`;
/// they are logged and reported in the operation result instead.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read undo record {}: {source}", path.display())]
    UndoRecordIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Malformed undo record {}: {source}", path.display())]
    UndoRecordFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Undo record {} has an invalid operation id '{id}'", path.display())]
    UndoRecordId { path: PathBuf, id: String },
}

pub type Result<T, E = EngineError> = std::result::Result<T, E>;
