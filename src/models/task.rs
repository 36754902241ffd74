//! Page file tasks

use std::path::{Path, PathBuf};

/// A page file to examine, relative to the configured root
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FileTask {
    path: PathBuf,
}

impl FileTask {
    /// Create a task for a relative page path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The relative path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name for progress lines, falling back to the full path
    #[must_use]
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map_or_else(|| self.path.display().to_string(), |n| n.to_string_lossy().into_owned())
    }
}
