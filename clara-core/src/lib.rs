#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod apply;
pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod history;
pub mod log;
pub mod output;
pub mod scanner;
pub mod undo;

pub use apply::{coerce_start_number, format_counter, normalize_start_number, RunResult};
pub use config::Config;
pub use engine::Engine;
pub use error::EngineError;
pub use extract::{extract, Candidate, PageInfo};
pub use history::{
    read_undo_record, write_undo_record, Mapping, Operation, OperationStore, UndoRecord,
    UNDO_RECORD_FILE,
};
pub use log::{LogLine, LogSink, SubscriptionId};
pub use output::{OutputFormat, OutputFormatter, VersionResult};
pub use scanner::{matches_extension, ScanResult};
pub use undo::{restore_target, UndoResult, NO_OPERATION};
