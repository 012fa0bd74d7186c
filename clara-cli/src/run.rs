use anyhow::{Context, Result};
use clara_core::{coerce_start_number, normalize_start_number, Engine, OutputFormatter};
use std::path::Path;

use crate::OutputFormat;

pub fn handle_run(
    engine: &mut Engine,
    dir: &Path,
    extension: Option<&str>,
    start: Option<&str>,
    default_start: i64,
    output: OutputFormat,
) -> Result<()> {
    let first = match start {
        Some(raw) => coerce_start_number(Some(raw)),
        None => normalize_start_number(Some(default_start)),
    };

    let result = engine
        .run_from(dir, extension, first)
        .with_context(|| format!("Failed to rename files in {}", dir.display()))?;

    match output {
        OutputFormat::Json => println!("{}", result.format_json()),
        OutputFormat::Summary => print!("{}", result.format_summary()),
    }

    Ok(())
}
