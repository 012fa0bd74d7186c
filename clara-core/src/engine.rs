use crate::apply::{normalize_start_number, run_renames, RunResult};
use crate::error::Result;
use crate::history::{operation_from_record, read_undo_record, OperationStore};
use crate::log::{LogLine, LogSink, SubscriptionId};
use crate::scanner::{scan_directory, ScanResult};
use crate::undo::{undo_operation, UndoResult};
use std::path::Path;
use std::sync::mpsc::Receiver;
use uuid::Uuid;

/// Rename engine: scan, run and undo over one operation store and one log.
///
/// Engines share nothing; two instances never see each other's operations.
/// Operations run one after another and each filesystem call completes
/// before the next one starts.
#[derive(Debug, Default)]
pub struct Engine {
    store: OperationStore,
    log: LogSink,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// List the dated pages in `dir`, sorted by date then page
    pub fn scan(&mut self, dir: &Path, extension: Option<&str>) -> Result<ScanResult> {
        scan_directory(dir, extension, &mut self.log)
    }

    /// Prefix every dated page in `dir` with a sequential counter.
    ///
    /// A missing or negative `start_number` counts from 1.
    pub fn run(
        &mut self,
        dir: &Path,
        extension: Option<&str>,
        start_number: Option<i64>,
    ) -> Result<RunResult> {
        self.run_from(dir, extension, normalize_start_number(start_number))
    }

    /// Like [`Engine::run`], with the first counter value already resolved
    pub fn run_from(&mut self, dir: &Path, extension: Option<&str>, first: u64) -> Result<RunResult> {
        run_renames(dir, extension, first, &mut self.store, &mut self.log)
    }

    /// Reverse the given operation, or the most recent one when `id` is `None`
    pub fn undo(&mut self, id: Option<&str>) -> UndoResult {
        undo_operation(id, &self.store, &mut self.log)
    }

    /// Register the undo record persisted in `dir` as the most recent operation.
    ///
    /// The engine never reads undo records by itself; a front end that
    /// outlives a single run (or restarts between run and undo) opts in here.
    pub fn load_undo_record(&mut self, dir: &Path) -> Result<Uuid> {
        let record = read_undo_record(dir)?;
        let operation = operation_from_record(dir, record)?;
        let id = operation.id;
        self.log.info(format!(
            "Loaded undo data for operation {id} ({} files)",
            operation.mappings.len()
        ));
        self.store.insert(operation);
        Ok(id)
    }

    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&LogLine) + Send + 'static,
    {
        self.log.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.log.unsubscribe(id)
    }

    /// Receive log lines over a channel instead of a callback
    pub fn log_channel(&mut self) -> (SubscriptionId, Receiver<LogLine>) {
        self.log.channel()
    }

    pub fn log_lines(&self) -> &[LogLine] {
        self.log.lines()
    }

    pub fn operations(&self) -> &OperationStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::UNDO_RECORD_FILE;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_engines_do_not_share_operations() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("AT 09-10-1941.p.1.jpeg"), b"x").unwrap();

        let mut first = Engine::new();
        let mut second = Engine::new();
        let run = first.run(temp.path(), None, None).unwrap();
        assert!(run.operation_id.is_some());

        let result = second.undo(None);
        assert_eq!(result.undone, 0);
        assert!(temp.path().join("0001 AT 09-10-1941.p.1.jpeg").exists());
        assert!(second.operations().is_empty());
        assert_eq!(first.operations().len(), 1);
    }

    #[test]
    fn test_load_undo_record_enables_undo_in_fresh_engine() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("AT 09-10-1941.p.1.jpeg"), b"x").unwrap();

        let run = Engine::new().run(temp.path(), None, Some(3)).unwrap();

        let mut engine = Engine::new();
        let id = engine.load_undo_record(temp.path()).unwrap();
        assert_eq!(Some(id), run.operation_id);

        let result = engine.undo(Some(id.to_string().as_str()));
        assert_eq!(result.undone, 1);
        assert!(result.errors.is_empty());
        assert!(temp.path().join("AT 09-10-1941.p.1.jpeg").exists());
        assert!(temp.path().join(UNDO_RECORD_FILE).exists());
    }

    #[test]
    fn test_load_undo_record_missing() {
        let temp = TempDir::new().unwrap();
        let mut engine = Engine::new();
        assert!(engine.load_undo_record(temp.path()).is_err());
        assert!(engine.operations().is_empty());
    }

    #[test]
    fn test_run_from_accepts_counters_beyond_signed_range() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("AT 09-10-1941.p.1.jpeg"), b"x").unwrap();

        let first = u64::try_from(i64::MAX).unwrap() + 1;
        let result = Engine::new()
            .run_from(temp.path(), None, first)
            .unwrap();

        assert_eq!(result.renamed, 1);
        assert!(temp
            .path()
            .join(format!("{first} AT 09-10-1941.p.1.jpeg"))
            .exists());
    }

    #[test]
    fn test_run_records_absolute_paths() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("AT 09-10-1941.p.1.jpeg"), b"x").unwrap();

        let run = Engine::new().run(temp.path(), None, None).unwrap();
        assert!(run.mappings[0].old_path.is_absolute());

        let record = crate::history::read_undo_record(temp.path()).unwrap();
        assert!(record.mappings.iter().all(|m| m.old_path.is_absolute() && m.new_path.is_absolute()));
    }
}
