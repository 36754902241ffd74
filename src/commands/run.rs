//! Patch the configured pages

use safe_area_patch::config::PatchConfig;
use safe_area_patch::output::OutputMode;
use safe_area_patch::patcher::Patcher;

/// Patch every configured page, one at a time.
///
/// Per-page failures are reported, not returned; the command only fails
/// when the rewrite rules cannot be built.
pub fn run(config: PatchConfig, dry_run: bool, mode: OutputMode) -> anyhow::Result<()> {
    let patcher = Patcher::new(config)?.dry_run(dry_run);
    let config = patcher.config();

    log::debug!(
        "patching {} page(s) under {} ({} closing)",
        config.pages.len(),
        config.root.display(),
        config.closing
    );

    if mode == OutputMode::Human {
        let action = if dry_run { "Checking" } else { "Adding" };
        println!("{action} {} in {} page(s)...\n", config.wrapper, config.pages.len());
    }

    let report = patcher.run(|file| file.render(mode));
    report.render(mode);

    Ok(())
}
