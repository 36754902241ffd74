//! Write a starter config file

use std::fs;
use std::path::Path;

use safe_area_patch::config::PatchConfig;
use safe_area_patch::output::{OperationResult, OutputMode};
use safe_area_patch::paths;

/// Write `config` to `./safe-area-patch.toml`
pub fn init(config: &PatchConfig, force: bool, mode: OutputMode) -> anyhow::Result<()> {
    let path = Path::new(paths::LOCAL_CONFIG);

    if path.exists() && !force {
        OperationResult {
            success: false,
            message: format!("Already initialized ({} exists). Use --force to overwrite.", path.display()),
        }
        .render(mode);
        return Ok(());
    }

    let content = format!(
        "# safe-area-patch config\n#\n# Pages are relative to `root`. Containers are tried in order;\n# `closing` is \"balanced\" or \"two-line\".\n\n{}",
        config.to_toml()?
    );
    fs::write(path, content)?;
    log::debug!("wrote {}", path.display());

    OperationResult {
        success: true,
        message: format!("Created {}", path.display()),
    }
    .render(mode);

    Ok(())
}
