//! Output formatting for human and JSON modes
//!
//! Human mode prints one progress line per page as it is processed and a
//! summary at the end. JSON mode stays quiet until the run is done and then
//! prints the whole [`RunReport`].

use std::path::Path;

use colored::Colorize;
use serde::Serialize;

use crate::models::{FileOutcome, FileTask};
use crate::patcher::ClosingRepair;

/// Output mode for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output (machine-readable)
    Json,
}

/// What happened to one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    /// Page path as configured (relative to the root)
    pub page: String,
    /// Path that was actually opened
    pub path: String,
    /// File name used in progress lines
    #[serde(skip)]
    pub name: String,
    /// Outcome
    #[serde(flatten)]
    pub outcome: FileOutcome,
    /// Container that was wrapped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<String>,
    /// Whether the import line was inserted
    pub import_inserted: bool,
    /// How the wrapper was closed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closing: Option<ClosingRepair>,
    /// The change was computed but not written
    pub dry_run: bool,
}

impl FileReport {
    /// Start a report for a task; the outcome defaults to `NoChange`
    #[must_use]
    pub fn new(task: &FileTask, path: &Path, dry_run: bool) -> Self {
        Self {
            page: task.path().display().to_string(),
            path: path.display().to_string(),
            name: task.display_name(),
            outcome: FileOutcome::NoChange,
            container: None,
            import_inserted: false,
            closing: None,
            dry_run,
        }
    }

    /// Render the progress line for this page (human mode only)
    pub fn render(&self, mode: OutputMode) {
        if mode == OutputMode::Human {
            println!("{}", self.progress_line());
            if self.closing == Some(ClosingRepair::Unbalanced) {
                println!(
                    "  {} closing parenthesis not added, check {} by hand",
                    "⚠".yellow(),
                    self.name
                );
            }
        }
    }

    /// The human progress line, without trailing newline
    #[must_use]
    pub fn progress_line(&self) -> String {
        match &self.outcome {
            FileOutcome::AlreadyCompliant => {
                format!("{} {} is already compliant", "✓".green(), self.name)
            },
            FileOutcome::Updated if self.dry_run => {
                format!("{} Would update: {}", "✓".green(), self.name)
            },
            FileOutcome::Updated => format!("{} Updated: {}", "✓".green(), self.name),
            FileOutcome::NoChange => format!("{} No change for: {}", "⚠".yellow(), self.name),
            FileOutcome::NotFound => format!("{} File not found: {}", "✗".red(), self.path),
            FileOutcome::Failed(detail) => {
                format!("{} Error processing {}: {detail}", "✗".red(), self.name)
            },
        }
    }
}

/// Result of a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    /// Per-page reports in processing order
    pub files: Vec<FileReport>,
    /// Pages wrapped in this run
    pub updated: usize,
    /// Pages that already had the wrapper
    pub already_compliant: usize,
    /// Pages with no matching body container
    pub no_change: usize,
    /// Pages missing from disk
    pub not_found: usize,
    /// Pages that failed with an error
    pub failed: usize,
    /// Nothing was written
    pub dry_run: bool,
}

impl RunReport {
    /// Empty report
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            ..Self::default()
        }
    }

    /// Record a page
    pub fn push(&mut self, report: FileReport) {
        match report.outcome {
            FileOutcome::AlreadyCompliant => self.already_compliant += 1,
            FileOutcome::Updated => self.updated += 1,
            FileOutcome::NoChange => self.no_change += 1,
            FileOutcome::NotFound => self.not_found += 1,
            FileOutcome::Failed(_) => self.failed += 1,
        }
        self.files.push(report);
    }

    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => self.render_human(),
            OutputMode::Json => self.render_json(),
        }
    }

    /// The human summary line
    #[must_use]
    pub fn summary_line(&self) -> String {
        let verb = if self.dry_run { "would be updated" } else { "updated" };
        format!(
            "Done! {} file(s) {verb} ({} already compliant, {} unchanged, {} not found, {} failed).",
            self.updated, self.already_compliant, self.no_change, self.not_found, self.failed
        )
    }

    fn render_human(&self) {
        println!("\n{}", self.summary_line());
    }

    fn render_json(&self) {
        println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
    }
}

/// Generic operation result for simple commands
#[derive(Debug, Serialize)]
pub struct OperationResult {
    /// Whether the operation succeeded
    pub success: bool,
    /// Human-readable message
    pub message: String,
}

impl OperationResult {
    /// Render the result based on output mode
    pub fn render(&self, mode: OutputMode) {
        match mode {
            OutputMode::Human => println!("{}", self.message),
            OutputMode::Json => {
                println!("{}", serde_json::to_string_pretty(self).unwrap_or_default());
            },
        }
    }
}
