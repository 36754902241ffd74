//! Config file locations
//!
//! ```text
//! ./safe-area-patch.toml                  # Project-local, checked first
//! ~/.config/safe-area-patch/config.toml   # User-level fallback
//! ```

use std::path::PathBuf;

/// Project-local config filename
pub const LOCAL_CONFIG: &str = "safe-area-patch.toml";

/// Directory under the user config dir
const APP_DIR: &str = "safe-area-patch";

/// User-level config filename
const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Path to the project-local config file (relative to the working directory)
#[must_use]
pub fn local_config() -> PathBuf {
    PathBuf::from(LOCAL_CONFIG)
}

/// Path to the user-level config file, if the platform has a config dir
#[must_use]
pub fn global_config() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join(GLOBAL_CONFIG_FILE))
}

/// Config files to try, in order
#[must_use]
pub fn config_candidates() -> Vec<PathBuf> {
    let mut candidates = vec![local_config()];
    candidates.extend(global_config());
    candidates
}
