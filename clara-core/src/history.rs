use crate::error::{EngineError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Name of the undo record written into the target directory after a run
pub const UNDO_RECORD_FILE: &str = ".clara-last-rename.json";

/// One file renamed by a run (old path -> new path)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mapping {
    pub old_path: PathBuf,
    pub new_path: PathBuf,
}

/// A completed rename batch with everything needed to reverse it
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    pub id: Uuid,
    pub directory: PathBuf,
    pub created_at: DateTime<Utc>,
    /// In execution order (ascending counter)
    pub mappings: Vec<Mapping>,
}

impl Operation {
    pub fn new(directory: &Path, mappings: Vec<Mapping>) -> Self {
        Self {
            id: Uuid::new_v4(),
            directory: directory.to_path_buf(),
            created_at: Utc::now(),
            mappings,
        }
    }
}

/// Operations created by one engine, with the most recent one tracked explicitly
#[derive(Debug, Default)]
pub struct OperationStore {
    operations: HashMap<Uuid, Operation>,
    last: Option<Uuid>,
}

impl OperationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an operation and make it the most recent one
    pub fn insert(&mut self, operation: Operation) {
        self.last = Some(operation.id);
        self.operations.insert(operation.id, operation);
    }

    pub fn get(&self, id: &Uuid) -> Option<&Operation> {
        self.operations.get(id)
    }

    /// The operation inserted last
    pub fn last(&self) -> Option<&Operation> {
        self.last.as_ref().and_then(|id| self.operations.get(id))
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

/// On-disk shape of `.clara-last-rename.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UndoRecord {
    pub operation_id: String,
    pub mappings: Vec<Mapping>,
}

impl From<&Operation> for UndoRecord {
    fn from(operation: &Operation) -> Self {
        Self {
            operation_id: operation.id.to_string(),
            mappings: operation.mappings.clone(),
        }
    }
}

pub fn undo_record_path(dir: &Path) -> PathBuf {
    dir.join(UNDO_RECORD_FILE)
}

/// Write the undo record into `dir`, replacing any previous one
pub fn write_undo_record(dir: &Path, record: &UndoRecord) -> io::Result<PathBuf> {
    let path = undo_record_path(dir);
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&path)?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, record)?;
    writer.flush()?;
    Ok(path)
}

/// Read the undo record stored in `dir`
pub fn read_undo_record(dir: &Path) -> Result<UndoRecord> {
    let path = undo_record_path(dir);
    let file = File::open(&path).map_err(|source| EngineError::UndoRecordIo {
        path: path.clone(),
        source,
    })?;

    serde_json::from_reader(BufReader::new(file))
        .map_err(|source| EngineError::UndoRecordFormat { path, source })
}

/// Turn a persisted record back into an [`Operation`] for `dir`.
///
/// Relative mapping paths are resolved against `dir`, not the working directory.
pub fn operation_from_record(dir: &Path, record: UndoRecord) -> Result<Operation> {
    let id = Uuid::parse_str(&record.operation_id).map_err(|_| EngineError::UndoRecordId {
        path: undo_record_path(dir),
        id: record.operation_id.clone(),
    })?;

    Ok(Operation {
        id,
        directory: dir.to_path_buf(),
        created_at: Utc::now(),
        mappings: record
            .mappings
            .into_iter()
            .map(|m| Mapping {
                old_path: resolve_in(dir, m.old_path),
                new_path: resolve_in(dir, m.new_path),
            })
            .collect(),
    })
}

fn resolve_in(dir: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        dir.join(path)
    }
}
