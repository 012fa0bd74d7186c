use crate::error::{EngineError, Result};
use crate::history::{write_undo_record, Mapping, Operation, OperationStore, UndoRecord};
use crate::log::LogSink;
use crate::scanner::scan_directory;
use serde::Serialize;
use std::fs;
use std::path::{self, Path};
use uuid::Uuid;

/// Result of a rename run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResult {
    /// `None` when nothing was renamed
    pub operation_id: Option<Uuid>,
    pub renamed: usize,
    pub mappings: Vec<Mapping>,
}

impl RunResult {
    fn empty() -> Self {
        Self {
            operation_id: None,
            renamed: 0,
            mappings: Vec::new(),
        }
    }
}

/// Counter prefix: zero-padded to four digits below 1000, plain decimal above
pub fn format_counter(counter: u64) -> String {
    if counter < 1000 {
        format!("{counter:04}")
    } else {
        counter.to_string()
    }
}

/// Clamp an optional start number to a non-negative counter, defaulting to 1
pub fn normalize_start_number(start: Option<i64>) -> u64 {
    start
        .and_then(|n| u64::try_from(n).ok())
        .unwrap_or(1)
}

/// Coerce free-form text (a form field, a CLI argument) to a start number.
///
/// Integral decimal values are accepted, including `"7.0"`; negative,
/// fractional, non-numeric and empty input all fall back to 1.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn coerce_start_number(raw: Option<&str>) -> u64 {
    let Some(text) = raw.map(str::trim).filter(|t| !t.is_empty()) else {
        return 1;
    };

    if let Ok(n) = text.parse::<u64>() {
        return n;
    }

    match text.parse::<f64>() {
        Ok(n) if n.is_finite() && n >= 0.0 && n.fract() == 0.0 && n <= u64::MAX as f64 => {
            n as u64
        },
        _ => 1,
    }
}

/// Rename every dated page in `dir` to `"<counter> <original name>"`,
/// numbering from `first`.
///
/// `dir` is made absolute before anything is renamed, so the stored mappings
/// and the undo record stay valid from any working directory. Candidates are processed in scan order. A failed rename is logged and
/// skipped without consuming its counter value, so the next candidate gets
/// the same number. When at least one file was renamed the batch is stored
/// as an [`Operation`] and mirrored to the undo record in `dir`; a failure to
/// write that record is only a warning.
pub fn run_renames(
    dir: &Path,
    extension: Option<&str>,
    first: u64,
    store: &mut OperationStore,
    log: &mut LogSink,
) -> Result<RunResult> {
    let dir = &path::absolute(dir).map_err(|source| EngineError::ReadDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut counter = first;
    log.info(format!(
        "Starting rename: dir={}, ext={}, start={}",
        dir.display(),
        extension.unwrap_or("any"),
        counter
    ));

    let scan = scan_directory(dir, extension, log)?;
    if scan.items.is_empty() {
        log.info("Nothing to rename.");
        return Ok(RunResult::empty());
    }

    let mut mappings = Vec::with_capacity(scan.items.len());
    for item in &scan.items {
        let old_name = item.name();
        let new_name = format!("{} {}", format_counter(counter), old_name);
        let old_path = dir.join(old_name);
        let new_path = dir.join(&new_name);

        match fs::rename(&old_path, &new_path) {
            Ok(()) => {
                log.info(format!("Renamed: \"{old_name}\" -> \"{new_name}\""));
                mappings.push(Mapping { old_path, new_path });
                counter = counter.saturating_add(1);
            },
            Err(e) => {
                log.warn(format!("ERROR renaming \"{old_name}\": {e}"));
            },
        }
    }

    if mappings.is_empty() {
        log.warn("No file could be renamed; no undo data recorded.");
        return Ok(RunResult::empty());
    }

    let operation = Operation::new(dir, mappings);
    let operation_id = operation.id;

    match write_undo_record(dir, &UndoRecord::from(&operation)) {
        Ok(path) => log.info(format!(
            "Undo data saved to {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        )),
        Err(e) => log.warn(format!("WARNING: could not write undo file: {e}")),
    }

    let result = RunResult {
        operation_id: Some(operation_id),
        renamed: operation.mappings.len(),
        mappings: operation.mappings.clone(),
    };
    store.insert(operation);

    Ok(result)
}
