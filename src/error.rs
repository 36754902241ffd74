//! Error types for configuration loading and file patching

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while processing a single page file
#[derive(Debug, Error)]
pub enum PatchError {
    /// The page file does not exist under the configured root
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Reading or writing the page file failed
    #[error("io error on {path}: {source}")]
    Io {
        /// The file being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A rewrite rule could not be compiled
    #[error("invalid rewrite pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl PatchError {
    /// Wrap an I/O error with the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("failed to read config {path}: {source}")]
    Read {
        /// Config file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for [`crate::config::PatchConfig`]
    #[error("failed to parse config {path}: {source}")]
    Parse {
        /// Config file path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: toml::de::Error,
    },

    /// The configuration was parsed but holds unusable values
    #[error("invalid config: {0}")]
    Invalid(String),
}
