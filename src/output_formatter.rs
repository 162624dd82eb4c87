use crate::errors::Result;
use crate::file_renamer::{BatchReport, RenameOutcome};
use serde::Serialize;
use std::io::Write;

/// Defines the possible output formats for a batch report.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// A simple, human-readable summary.
    #[default]
    Text,
    /// JSON format, suitable for machine processing.
    Json,
}

/// Handles the formatting of batch reports.
pub struct OutputFormatter {
    format: OutputFormat,
    list_changes: bool,
    tool_name: String,
    tool_version: String,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    tool: &'a str,
    version: &'a str,
    renamed: usize,
    unchanged: usize,
    skipped: usize,
    #[serde(flatten)]
    report: &'a BatchReport,
}

impl OutputFormatter {
    /// Creates a new `OutputFormatter`.
    ///
    /// # Arguments
    ///
    /// * `format` - The `OutputFormat` to use.
    /// * `list_changes` - Whether the text format lists every renamed and skipped
    ///   file, not just the totals. JSON always carries every outcome.
    pub fn new(format: OutputFormat, list_changes: bool) -> Self {
        Self {
            format,
            list_changes,
            tool_name: env!("CARGO_PKG_NAME").to_string(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Writes the formatted report to `writer`.
    pub fn write_report<W: Write>(&self, report: &BatchReport, writer: &mut W) -> Result<()> {
        let output = match self.format {
            OutputFormat::Text => self.format_text(report),
            OutputFormat::Json => self.format_json(report)?,
        };
        writeln!(writer, "{output}")?;
        Ok(())
    }

    fn format_text(&self, report: &BatchReport) -> String {
        let mut output = String::new();
        let verb = if report.dry_run { "Would rename" } else { "Renamed" };

        if self.list_changes {
            for outcome in &report.outcomes {
                match outcome {
                    RenameOutcome::Renamed { from, to } => {
                        output.push_str(&format!("{verb}: {} -> {}\n", from.display(), to.display()));
                    }
                    RenameOutcome::Skipped { path, reason } => {
                        output.push_str(&format!("Skipped: {} ({reason})\n", path.display()));
                    }
                    RenameOutcome::Unchanged { .. } => {}
                }
            }
            output.push('\n');
        }

        output.push_str(&"-".repeat(50));
        output.push('\n');
        output.push_str(&format!("Operation: {}\n", report.operation));
        output.push_str(&format!("Files processed: {}\n", report.outcomes.len()));
        output.push_str(&format!("Files {}: {}\n", if report.dry_run { "to rename" } else { "renamed" }, report.renamed()));
        output.push_str(&format!("Files unchanged: {}", report.unchanged()));
        if report.skipped() > 0 {
            output.push_str(&format!("\nFiles skipped: {}", report.skipped()));
        }
        output
    }

    fn format_json(&self, report: &BatchReport) -> Result<String> {
        let output = JsonReport {
            tool: &self.tool_name,
            version: &self.tool_version,
            renamed: report.renamed(),
            unchanged: report.unchanged(),
            skipped: report.skipped(),
            report,
        };
        Ok(serde_json::to_string_pretty(&output)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::FailurePolicy;
    use chrono::Utc;
    use std::path::PathBuf;

    fn create_test_report(dry_run: bool) -> BatchReport {
        BatchReport {
            operation: "remove".to_string(),
            policy: FailurePolicy::SkipAndContinue,
            dry_run,
            started_at: Utc::now(),
            outcomes: vec![
                RenameOutcome::Renamed {
                    from: PathBuf::from("/photos/IMG_v2.jpg"),
                    to: PathBuf::from("/photos/IMG.jpg"),
                },
                RenameOutcome::Unchanged {
                    path: PathBuf::from("/photos/other.jpg"),
                },
                RenameOutcome::Skipped {
                    path: PathBuf::from("/photos/_v2"),
                    reason: "resulting name is empty".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_json_format() {
        let formatter = OutputFormatter::new(OutputFormat::Json, false);
        let report = create_test_report(false);

        let output = formatter.format_json(&report).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["operation"], "remove");
        assert_eq!(parsed["policy"], "skip_and_continue");
        assert_eq!(parsed["renamed"], 1);
        assert_eq!(parsed["skipped"], 1);
        assert_eq!(parsed["outcomes"][0]["status"], "renamed");
        assert_eq!(parsed["outcomes"][2]["reason"], "resulting name is empty");
    }

    #[test]
    fn test_text_summary_only() {
        let formatter = OutputFormatter::new(OutputFormat::Text, false);
        let output = formatter.format_text(&create_test_report(false));

        assert!(output.contains("Files renamed: 1"));
        assert!(output.contains("Files skipped: 1"));
        assert!(!output.contains("IMG_v2.jpg"));
    }

    #[test]
    fn test_text_lists_changes_in_dry_run() {
        let formatter = OutputFormatter::new(OutputFormat::Text, true);
        let output = formatter.format_text(&create_test_report(true));

        assert!(output.contains("Would rename: /photos/IMG_v2.jpg -> /photos/IMG.jpg"));
        assert!(output.contains("Skipped: /photos/_v2 (resulting name is empty)"));
        assert!(output.contains("Files to rename: 1"));
    }

    #[test]
    fn test_write_report_ends_with_newline() {
        let formatter = OutputFormatter::new(OutputFormat::Text, false);
        let mut buffer = Vec::new();
        formatter
            .write_report(&create_test_report(false), &mut buffer)
            .unwrap();

        assert!(String::from_utf8(buffer).unwrap().ends_with('\n'));
    }
}
