use anyhow::{Context, Result};
use clara_core::{read_undo_record, OutputFormatter};
use std::path::Path;

use crate::OutputFormat;

pub fn handle_last(dir: &Path, output: OutputFormat) -> Result<()> {
    let record = read_undo_record(dir)
        .with_context(|| format!("No undo record in {}", dir.display()))?;

    match output {
        OutputFormat::Json => println!("{}", record.format_json()),
        OutputFormat::Summary => print!("{}", record.format_summary()),
    }

    Ok(())
}
