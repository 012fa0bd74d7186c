use crate::history::OperationStore;
use crate::log::LogSink;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Error reported when there is no operation matching the request
pub const NO_OPERATION: &str = "no operation to undo";

/// Result of undoing a rename batch
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UndoResult {
    pub undone: usize,
    pub errors: Vec<String>,
    /// `None` when no operation was found
    pub operation_id: Option<Uuid>,
}

impl UndoResult {
    fn no_operation() -> Self {
        Self {
            undone: 0,
            errors: vec![NO_OPERATION.to_string()],
            operation_id: None,
        }
    }
}

/// Target used when the original path is taken: `foo.jpg` -> `foo (restore).jpg`
pub fn restore_target(original: &Path) -> PathBuf {
    let stem = original
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match original.extension() {
        Some(ext) => format!("{stem} (restore).{}", ext.to_string_lossy()),
        None => format!("{stem} (restore)"),
    };
    original.with_file_name(name)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Reverse the renames of an operation.
///
/// `id` selects an operation from the store; `None` selects the most recent
/// one. An unknown or unparsable id, or an empty store, yields a zero-effect
/// result with a single error. Mappings are restored last-renamed first. If
/// the original path is occupied, the file is restored next to it under a
/// `" (restore)"` name instead. Each failed restore is logged and collected in
/// `errors` without stopping the remaining ones.
pub fn undo_operation(id: Option<&str>, store: &OperationStore, log: &mut LogSink) -> UndoResult {
    let operation = match id {
        Some(raw) => Uuid::parse_str(raw.trim())
            .ok()
            .and_then(|uuid| store.get(&uuid)),
        None => store.last(),
    };

    let Some(operation) = operation else {
        log.warn("No operation to undo.");
        return UndoResult::no_operation();
    };

    log.info(format!(
        "Undoing operation {} ({} files)",
        operation.id,
        operation.mappings.len()
    ));

    let mut result = UndoResult {
        undone: 0,
        errors: Vec::new(),
        operation_id: Some(operation.id),
    };

    for mapping in operation.mappings.iter().rev() {
        let target = if mapping.old_path.exists() {
            restore_target(&mapping.old_path)
        } else {
            mapping.old_path.clone()
        };

        match fs::rename(&mapping.new_path, &target) {
            Ok(()) => {
                log.info(format!(
                    "Undo: \"{}\" -> \"{}\"",
                    file_name(&mapping.new_path),
                    file_name(&target)
                ));
                result.undone += 1;
            },
            Err(e) => {
                let message = format!("{}: {e}", file_name(&mapping.new_path));
                log.warn(format!("ERROR undoing \"{}\": {e}", file_name(&mapping.new_path)));
                result.errors.push(message);
            },
        }
    }

    log.info(format!(
        "Undo finished: {} restored, {} failed",
        result.undone,
        result.errors.len()
    ));

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::{Mapping, Operation};
    use tempfile::TempDir;

    #[test]
    fn test_restore_target() {
        assert_eq!(
            restore_target(Path::new("/d/foo.jpg")),
            PathBuf::from("/d/foo (restore).jpg")
        );
        assert_eq!(
            restore_target(Path::new("/d/AT 09-10-1941.p.1.jpeg")),
            PathBuf::from("/d/AT 09-10-1941.p.1 (restore).jpeg")
        );
        assert_eq!(
            restore_target(Path::new("/d/README")),
            PathBuf::from("/d/README (restore)")
        );
    }

    #[test]
    fn test_undo_without_operation() {
        let store = OperationStore::new();
        let mut log = LogSink::new();

        let result = undo_operation(None, &store, &mut log);
        assert_eq!(result.undone, 0);
        assert_eq!(result.errors, vec![NO_OPERATION.to_string()]);
        assert!(result.operation_id.is_none());
    }

    #[test]
    fn test_undo_unknown_or_invalid_id() {
        let temp = TempDir::new().unwrap();
        let mut store = OperationStore::new();
        store.insert(Operation::new(temp.path(), vec![]));
        let mut log = LogSink::new();

        let unknown = Uuid::new_v4().to_string();
        let result = undo_operation(Some(unknown.as_str()), &store, &mut log);
        assert_eq!(result.errors, vec![NO_OPERATION.to_string()]);

        let result = undo_operation(Some("latest"), &store, &mut log);
        assert!(result.operation_id.is_none());
    }

    #[test]
    fn test_undo_reports_missing_sources() {
        let temp = TempDir::new().unwrap();
        let mut store = OperationStore::new();
        store.insert(Operation::new(
            temp.path(),
            vec![Mapping {
                old_path: temp.path().join("a.jpg"),
                new_path: temp.path().join("0001 a.jpg"),
            }],
        ));
        let mut log = LogSink::new();

        let result = undo_operation(None, &store, &mut log);
        assert_eq!(result.undone, 0);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].starts_with("0001 a.jpg: "));
        assert!(result.operation_id.is_some());
    }

    #[test]
    fn test_undo_restores_in_reverse_order() {
        let temp = TempDir::new().unwrap();
        // Both mappings point at the same original; reverse order means the
        // second renamed file lands on the free name and the first one collides
        fs::write(temp.path().join("0001 x.jpg"), b"first").unwrap();
        fs::write(temp.path().join("0002 x.jpg"), b"second").unwrap();

        let mut store = OperationStore::new();
        store.insert(Operation::new(
            temp.path(),
            vec![
                Mapping {
                    old_path: temp.path().join("x.jpg"),
                    new_path: temp.path().join("0001 x.jpg"),
                },
                Mapping {
                    old_path: temp.path().join("x.jpg"),
                    new_path: temp.path().join("0002 x.jpg"),
                },
            ],
        ));
        let mut log = LogSink::new();

        let result = undo_operation(None, &store, &mut log);
        assert_eq!(result.undone, 2);
        assert_eq!(fs::read(temp.path().join("x.jpg")).unwrap(), b"second");
        assert_eq!(
            fs::read(temp.path().join("x (restore).jpg")).unwrap(),
            b"first"
        );
    }
}
