//! Patch configuration
//!
//! Holds the page list, the project root and the rewrite parameters. The
//! defaults patch the auth pages of the wizi_learn app.
//! A TOML file can override any key:
//!
//! ```toml
//! root = "/home/me/apk_wizi_learn"
//! containers = ["SingleChildScrollView", "Center"]
//! closing = "two-line"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::paths;

/// Project the pages live in
pub const DEFAULT_ROOT: &str = "/c/laragon/www/cursor/code/apk_wizi_learn";

/// Import inserted after the first import of each patched page
pub const DEFAULT_IMPORT_LINE: &str =
    "import 'package:wizi_learn/core/widgets/safe_area_bottom.dart';";

/// Wrapper widget inserted around the body
pub const DEFAULT_WRAPPER: &str = "SafeAreaBottom";

/// Pages patched by default, relative to the root
pub const DEFAULT_PAGES: [&str; 8] = [
    "lib/features/auth/presentation/pages/terms_page.dart",
    "lib/features/auth/presentation/pages/thanks_page.dart",
    "lib/features/auth/presentation/pages/user_point_page.dart",
    "lib/features/auth/presentation/pages/user_manual_page.dart",
    "lib/features/auth/presentation/pages/contact_faq_page.dart",
    "lib/features/auth/presentation/pages/quiz_detail_page.dart",
    "lib/features/auth/presentation/pages/splash_page.dart",
    "lib/features/auth/presentation/pages/auth/login_page.dart",
];

/// Body containers recognized, in priority order
pub const DEFAULT_CONTAINERS: [&str; 5] =
    ["SingleChildScrollView", "Center", "Padding", "ListView", "Column"];

/// How the wrapper's closing parenthesis is added after a body wrap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClosingStrategy {
    /// Find the wrapped constructor's matching parenthesis
    #[default]
    Balanced,
    /// Extend the first `),` / `),` line pair after the wrap
    TwoLine,
}

impl std::fmt::Display for ClosingStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Balanced => write!(f, "balanced"),
            Self::TwoLine => write!(f, "two-line"),
        }
    }
}

impl std::str::FromStr for ClosingStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "balanced" => Ok(Self::Balanced),
            "two-line" | "two_line" => Ok(Self::TwoLine),
            _ => Err(format!("Invalid closing strategy: {s}. Use: balanced, two-line")),
        }
    }
}

/// Everything the patcher needs to know about a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatchConfig {
    /// Directory the page paths are relative to
    pub root: PathBuf,
    /// Page files to patch, in processing order
    pub pages: Vec<PathBuf>,
    /// Import statement inserted after the first import
    pub import_line: String,
    /// Wrapper constructor name
    pub wrapper: String,
    /// Any of these substrings marks a page as already patched
    pub markers: Vec<String>,
    /// Body containers to wrap, highest priority first
    pub containers: Vec<String>,
    /// Closing repair strategy
    pub closing: ClosingStrategy,
}

impl Default for PatchConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            pages: DEFAULT_PAGES.iter().map(PathBuf::from).collect(),
            import_line: DEFAULT_IMPORT_LINE.to_string(),
            wrapper: DEFAULT_WRAPPER.to_string(),
            markers: vec![DEFAULT_WRAPPER.to_string(), "safe_area_bottom".to_string()],
            containers: DEFAULT_CONTAINERS.iter().map(ToString::to_string).collect(),
            closing: ClosingStrategy::default(),
        }
    }
}

impl PatchConfig {
    /// Parse and validate a config from TOML text
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content, path)
    }

    /// Resolve the config for a run.
    ///
    /// An explicit path must exist. Otherwise the local file, then the user
    /// config file are tried, falling back to the defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            log::debug!("loading config from {}", path.display());
            return Self::load_file(path);
        }

        for candidate in paths::config_candidates() {
            if candidate.is_file() {
                log::debug!("loading config from {}", candidate.display());
                return Self::load_file(&candidate);
            }
        }

        log::debug!("no config file found, using defaults");
        Ok(Self::default())
    }

    /// Serialize to TOML (used by `init`)
    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject configurations the patcher cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.wrapper.trim().is_empty() {
            return Err(ConfigError::Invalid("wrapper must not be empty".to_string()));
        }
        if self.markers.iter().all(|m| m.is_empty()) {
            return Err(ConfigError::Invalid("at least one non-empty marker is required".to_string()));
        }
        if self.containers.is_empty() {
            return Err(ConfigError::Invalid("at least one container is required".to_string()));
        }
        if let Some(bad) = self.containers.iter().find(|c| !is_identifier(c)) {
            return Err(ConfigError::Invalid(format!("container is not an identifier: {bad:?}")));
        }
        let import = self.import_line.trim();
        if !import.starts_with("import ") || !import.ends_with(';') {
            return Err(ConfigError::Invalid(format!(
                "import_line must look like `import '...';`, got {:?}",
                self.import_line
            )));
        }
        Ok(())
    }

    /// Absolute location of a page
    #[must_use]
    pub fn page_path(&self, page: &Path) -> PathBuf {
        self.root.join(page)
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}
