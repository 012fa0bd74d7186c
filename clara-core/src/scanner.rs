use crate::error::{EngineError, Result};
use crate::extract::Candidate;
use crate::log::LogSink;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Result of scanning a directory for dated page images
#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    /// Files that passed the extension filter
    pub total: usize,
    /// Files among `total` whose names carry valid date/page metadata
    pub matched: usize,
    /// Matched files sorted by date, then page
    pub items: Vec<Candidate>,
}

/// Normalize an extension filter to a lowercase `.ext` suffix.
///
/// `None`, empty and whitespace-only filters mean "any extension".
pub fn normalize_extension(extension: Option<&str>) -> Option<String> {
    let ext = extension?.trim().to_lowercase();
    if ext.is_empty() {
        return None;
    }
    if ext.starts_with('.') {
        Some(ext)
    } else {
        Some(format!(".{ext}"))
    }
}

/// Case-insensitive suffix test of a filename against an extension filter
pub fn matches_extension(name: &str, extension: Option<&str>) -> bool {
    match normalize_extension(extension) {
        Some(suffix) => name.to_lowercase().ends_with(&suffix),
        None => true,
    }
}

/// List the regular files directly inside `dir`, keep the ones passing the
/// extension filter and extract their date/page metadata.
///
/// Only a failure to list the directory is an error. Files whose names do not
/// carry metadata are left out of `items` but still counted in `total`.
pub fn scan_directory(dir: &Path, extension: Option<&str>, log: &mut LogSink) -> Result<ScanResult> {
    log.info(format!(
        "Scanning directory: {} (ext={})",
        dir.display(),
        extension.map(str::trim).filter(|e| !e.is_empty()).unwrap_or("any")
    ));

    let read_dir_error = |source| EngineError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_error)? {
        let entry = entry.map_err(read_dir_error)?;
        // An entry that cannot be classified is skipped like any other non-file
        let Ok(file_type) = entry.file_type() else {
            continue;
        };
        if !file_type.is_file() {
            continue;
        }
        names.push(entry.file_name());
    }
    // read_dir order is platform dependent; byte order makes ties reproducible
    names.sort();

    let mut total = 0;
    let mut items = Vec::new();
    for name in &names {
        let lossy = name.to_string_lossy();
        if !matches_extension(&lossy, extension) {
            continue;
        }
        total += 1;

        // Names that are not valid UTF-8 cannot carry the page pattern
        if let Some(candidate) = name.to_str().and_then(Candidate::from_name) {
            items.push(candidate);
        }
    }

    // Stable sort: equal (date, page) keep listing order
    items.sort_by_key(|c| (c.date(), c.page()));

    let matched = items.len();
    log.info(format!(
        "Found {matched} matching files with valid date/page data ({total} considered)."
    ));

    Ok(ScanResult {
        total,
        matched,
        items,
    })
}
