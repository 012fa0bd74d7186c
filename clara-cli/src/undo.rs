use anyhow::Result;
use clara_core::{Engine, OutputFormatter};
use std::path::Path;

use crate::OutputFormat;

/// Returns false when the undo reported errors
pub fn handle_undo(
    engine: &mut Engine,
    dir: &Path,
    id: Option<&str>,
    output: OutputFormat,
) -> Result<bool> {
    // Each invocation is a fresh process, so the batch to undo comes from disk
    if let Err(e) = engine.load_undo_record(dir) {
        tracing::debug!(error = %e, "no usable undo record");
    }

    let result = engine.undo(id);

    match output {
        OutputFormat::Json => println!("{}", result.format_json()),
        OutputFormat::Summary => print!("{}", result.format_summary()),
    }

    Ok(result.errors.is_empty())
}
