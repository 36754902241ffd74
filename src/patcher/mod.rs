//! Patcher - applies the safe-area wrapper to page files
//!
//! Each page goes through the same linear stages:
//!
//! ```text
//! read -> marker check -> import insertion -> body wrap -> closing repair -> write
//! ```
//!
//! A page that already carries a marker stops after the marker check. A page
//! where no body container matches is left untouched, including the import.
//! Errors are caught per page and never abort the run.
//!
//! # Examples
//!
//! ```
//! use safe_area_patch::config::PatchConfig;
//! use safe_area_patch::patcher::{Patcher, SourcePatch};
//!
//! let patcher = Patcher::new(PatchConfig::default()).unwrap();
//! let source = "import 'x.dart';\n\nfinal p = Scaffold(\n  body: Center(child: x),\n);\n";
//! match patcher.patch_source(source) {
//!     SourcePatch::Wrapped(w) => assert!(w.text.contains("SafeAreaBottom(")),
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```

mod closing;
mod rewrite;

use std::fs;
use std::path::Path;

pub use closing::{ClosingRepair, ClosingRepairer};
pub use rewrite::{BodyWrap, RewriteRules};

use crate::config::PatchConfig;
use crate::error::PatchError;
use crate::models::{FileOutcome, FileTask};
use crate::output::{FileReport, RunReport};

/// Result of running the text stages over one source
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourcePatch {
    /// A marker is present; nothing to do
    AlreadyMarked,
    /// No body container matched
    Unmatched,
    /// The body was wrapped
    Wrapped(WrappedSource),
}

/// A source whose body now sits inside the wrapper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedSource {
    /// Patched text
    pub text: String,
    /// Container that was wrapped
    pub container: String,
    /// Whether the import line was inserted
    pub import_inserted: bool,
    /// How the wrapper was closed
    pub closing: ClosingRepair,
}

/// Applies the configured rewrite to pages under a root
#[derive(Debug)]
pub struct Patcher {
    config: PatchConfig,
    rules: RewriteRules,
    repairer: ClosingRepairer,
    dry_run: bool,
}

impl Patcher {
    /// Compile the rewrite rules for a config
    pub fn new(config: PatchConfig) -> Result<Self, PatchError> {
        let rules = RewriteRules::new(&config)?;
        let repairer = ClosingRepairer::new(config.closing)?;
        Ok(Self {
            config,
            rules,
            repairer,
            dry_run: false,
        })
    }

    /// Compute changes without writing them
    #[must_use]
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// The config this patcher was built from
    #[must_use]
    pub const fn config(&self) -> &PatchConfig {
        &self.config
    }

    /// Tasks for every configured page, in order
    #[must_use]
    pub fn tasks(&self) -> Vec<FileTask> {
        self.config.pages.iter().map(FileTask::new).collect()
    }

    /// Run the text stages over a source without touching the filesystem
    #[must_use]
    pub fn patch_source(&self, content: &str) -> SourcePatch {
        if self.rules.has_marker(content) {
            return SourcePatch::AlreadyMarked;
        }

        let with_import = self.rules.insert_import(content);
        if with_import.is_none() {
            log::warn!("no import line to anchor the {} import on", self.config.wrapper);
        }
        let import_inserted = with_import.is_some();
        let staged = with_import.as_deref().unwrap_or(content);

        let Some(wrap) = self.rules.wrap_body(staged) else {
            return SourcePatch::Unmatched;
        };
        log::debug!("wrapping body container {}", wrap.container);

        let (text, closing) = self.repairer.repair(&wrap);
        log::debug!("closing repair: {closing}");

        SourcePatch::Wrapped(WrappedSource {
            text,
            container: wrap.container,
            import_inserted,
            closing,
        })
    }

    /// Process one page, catching every error into the report
    #[must_use]
    pub fn process(&self, task: &FileTask) -> FileReport {
        let path = self.config.page_path(task.path());
        let mut report = FileReport::new(task, &path, self.dry_run);

        match self.try_process(&path) {
            Ok(SourcePatch::AlreadyMarked) => {
                log::debug!("{} already has {}", path.display(), self.config.wrapper);
                report.outcome = FileOutcome::AlreadyCompliant;
            },
            Ok(SourcePatch::Unmatched) => {
                log::warn!("no body container matched in {}", path.display());
                report.outcome = FileOutcome::NoChange;
            },
            Ok(SourcePatch::Wrapped(wrapped)) => {
                if wrapped.closing == ClosingRepair::Unbalanced {
                    log::warn!(
                        "could not close {} in {}; fix the parentheses by hand",
                        self.config.wrapper,
                        path.display()
                    );
                }
                report.outcome = FileOutcome::Updated;
                report.container = Some(wrapped.container);
                report.import_inserted = wrapped.import_inserted;
                report.closing = Some(wrapped.closing);
            },
            Err(PatchError::NotFound(missing)) => {
                log::warn!("file not found: {}", missing.display());
                report.outcome = FileOutcome::NotFound;
            },
            Err(e) => {
                log::error!("failed to process {}: {e}", path.display());
                report.outcome = FileOutcome::Failed(e.to_string());
            },
        }

        log::debug!("{} -> {}", report.page, report.outcome);
        report
    }

    fn try_process(&self, path: &Path) -> Result<SourcePatch, PatchError> {
        if !path.exists() {
            return Err(PatchError::NotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path).map_err(|e| PatchError::io(path, e))?;
        let patch = self.patch_source(&content);

        if let SourcePatch::Wrapped(wrapped) = &patch {
            if self.dry_run {
                log::info!("dry run: not writing {}", path.display());
            } else {
                fs::write(path, &wrapped.text).map_err(|e| PatchError::io(path, e))?;
            }
        }

        Ok(patch)
    }

    /// Process every configured page in order.
    ///
    /// `on_report` is called after each page, before the next one starts.
    pub fn run(&self, mut on_report: impl FnMut(&FileReport)) -> RunReport {
        let mut run = RunReport::new(self.dry_run);
        for task in self.tasks() {
            let report = self.process(&task);
            on_report(&report);
            run.push(report);
        }
        run
    }
}
