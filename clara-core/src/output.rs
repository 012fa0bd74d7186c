use crate::apply::RunResult;
use crate::history::UndoRecord;
use crate::scanner::ScanResult;
use crate::undo::UndoResult;
use comfy_table::{Cell, Color, Table};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::Path;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

/// Result of a version command
#[derive(Debug, Serialize, Deserialize)]
pub struct VersionResult {
    pub name: String,
    pub version: String,
}

/// Trait for formatting output in different formats
pub trait OutputFormatter {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }
    fn format_json(&self) -> String;
    fn format_summary(&self) -> String;
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

impl OutputFormatter for ScanResult {
    fn format_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();

        if !self.items.is_empty() {
            let mut table = Table::new();
            table.set_header(vec![
                Cell::new("#").fg(Color::Cyan),
                Cell::new("Date").fg(Color::Cyan),
                Cell::new("Page").fg(Color::Cyan),
                Cell::new("File").fg(Color::Cyan),
            ]);

            for (index, item) in self.items.iter().enumerate() {
                table.add_row(vec![
                    (index + 1).to_string(),
                    item.date().format("%Y-%m-%d").to_string(),
                    item.page().to_string(),
                    item.name().to_string(),
                ]);
            }

            writeln!(output, "{table}").unwrap();
        }

        writeln!(
            output,
            "Matched {} of {} files with date/page data",
            self.matched, self.total
        )
        .unwrap();

        output
    }
}

impl OutputFormatter for RunResult {
    fn format_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let Some(id) = self.operation_id else {
            return "Nothing renamed\n".to_string();
        };

        let mut output = String::new();
        for mapping in &self.mappings {
            writeln!(
                output,
                "{} -> {}",
                file_name(&mapping.old_path),
                file_name(&mapping.new_path)
            )
            .unwrap();
        }

        writeln!(output, "✓ Renamed {} files", self.renamed).unwrap();
        writeln!(output, "Operation ID: {id}").unwrap();
        writeln!(output, "Undo with: clara undo").unwrap();

        output
    }
}

impl OutputFormatter for UndoResult {
    fn format_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();

        match self.operation_id {
            Some(id) => writeln!(output, "Undo of operation {id}").unwrap(),
            None => writeln!(output, "Nothing undone").unwrap(),
        }

        if self.undone > 0 {
            writeln!(output, "✓ Restored {} files", self.undone).unwrap();
        }

        for error in &self.errors {
            writeln!(output, "✗ {error}").unwrap();
        }

        output
    }
}

impl OutputFormatter for UndoRecord {
    fn format_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = format!("Last operation: {}\n", self.operation_id);

        for mapping in &self.mappings {
            writeln!(
                output,
                "{} <- {}",
                file_name(&mapping.old_path),
                file_name(&mapping.new_path)
            )
            .unwrap();
        }

        writeln!(output, "{} files can be restored", self.mappings.len()).unwrap();

        output
    }
}

impl OutputFormatter for VersionResult {
    fn format_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        format!("{} {}", self.name, self.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::Mapping;
    use std::path::PathBuf;
    use uuid::Uuid;

    fn mapping(old: &str, new: &str) -> Mapping {
        Mapping {
            old_path: PathBuf::from(old),
            new_path: PathBuf::from(new),
        }
    }

    #[test]
    fn test_run_result_json_format() {
        let id = Uuid::new_v4();
        let result = RunResult {
            operation_id: Some(id),
            renamed: 1,
            mappings: vec![mapping("/d/a.jpg", "/d/0001 a.jpg")],
        };

        let value: serde_json::Value = serde_json::from_str(&result.format_json()).unwrap();
        assert_eq!(value["operationId"], id.to_string());
        assert_eq!(value["renamed"], 1);
        assert_eq!(value["mappings"][0]["oldPath"], "/d/a.jpg");
        assert_eq!(value["mappings"][0]["newPath"], "/d/0001 a.jpg");
    }

    #[test]
    fn test_empty_run_result() {
        let result = RunResult {
            operation_id: None,
            renamed: 0,
            mappings: vec![],
        };

        assert!(result.format_json().contains("\"operationId\":null"));
        assert_eq!(result.format_summary(), "Nothing renamed\n");
    }

    #[test]
    fn test_run_result_summary_format() {
        let result = RunResult {
            operation_id: Some(Uuid::nil()),
            renamed: 1,
            mappings: vec![mapping("/d/a.jpg", "/d/0001 a.jpg")],
        };

        let summary = result.format(OutputFormat::Summary);
        assert!(summary.contains("a.jpg -> 0001 a.jpg"));
        assert!(summary.contains("✓ Renamed 1 files"));
        assert!(summary.contains("Operation ID: 00000000-0000-0000-0000-000000000000"));
    }

    #[test]
    fn test_undo_result_formats() {
        let result = UndoResult {
            undone: 0,
            errors: vec!["no operation to undo".to_string()],
            operation_id: None,
        };

        assert_eq!(
            result.format_json(),
            r#"{"undone":0,"errors":["no operation to undo"],"operationId":null}"#
        );
        let summary = result.format_summary();
        assert!(summary.contains("Nothing undone"));
        assert!(summary.contains("✗ no operation to undo"));
    }

    #[test]
    fn test_undo_record_summary() {
        let record = UndoRecord {
            operation_id: "abc".to_string(),
            mappings: vec![mapping("/d/a.jpg", "/d/0001 a.jpg")],
        };

        let summary = record.format_summary();
        assert!(summary.starts_with("Last operation: abc"));
        assert!(summary.contains("a.jpg <- 0001 a.jpg"));
        assert!(summary.contains("1 files can be restored"));
    }

    #[test]
    fn test_version_result_json_format() {
        let result = VersionResult {
            name: "clara".to_string(),
            version: "0.1.0".to_string(),
        };
        assert_eq!(
            result.format_json(),
            r#"{"name":"clara","version":"0.1.0"}"#
        );
    }
}
