//! Per-file outcomes

use serde::Serialize;

/// What happened to a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum FileOutcome {
    /// A marker was already present; nothing touched
    AlreadyCompliant,
    /// The body was wrapped (and written unless dry-run)
    Updated,
    /// No body pattern matched; nothing written
    NoChange,
    /// The page does not exist
    NotFound,
    /// Reading, rewriting or writing failed
    Failed(String),
}

impl FileOutcome {
    /// Short label used in human output
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::AlreadyCompliant => "already compliant",
            Self::Updated => "updated",
            Self::NoChange => "no change",
            Self::NotFound => "not found",
            Self::Failed(_) => "error",
        }
    }
}

impl std::fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Failed(detail) => write!(f, "error: {detail}"),
            other => write!(f, "{}", other.label()),
        }
    }
}
