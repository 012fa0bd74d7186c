use anyhow::{Context, Result};
use clara_core::{Engine, OutputFormatter};
use std::path::Path;

use crate::OutputFormat;

pub fn handle_scan(
    engine: &mut Engine,
    dir: &Path,
    extension: Option<&str>,
    output: OutputFormat,
) -> Result<()> {
    let result = engine
        .scan(dir, extension)
        .with_context(|| format!("Failed to scan {}", dir.display()))?;

    match output {
        OutputFormat::Json => println!("{}", result.format_json()),
        OutputFormat::Summary => print!("{}", result.format_summary()),
    }

    Ok(())
}
