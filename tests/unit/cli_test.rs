//! Integration tests for the safe-area-patch CLI

use assert_cmd::cargo;
use predicates::prelude::*;

use crate::common::{SCROLL_PAGE, SCROLL_PAGE_PATCHED, STACK_PAGE, TestProject};

const PAGE: &str = "lib/pages/terms_page.dart";

/// Command isolated from any user-level config
fn patch_cmd(project: &TestProject) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(cargo::cargo_bin!("safe-area-patch"));
    cmd.current_dir(project.path())
        .env("XDG_CONFIG_HOME", project.path().join(".config"))
        .env("HOME", project.path());
    cmd
}

#[test]
fn test_version() {
    let project = TestProject::new();
    patch_cmd(&project)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("safe-area-patch"));
}

#[test]
fn test_help() {
    let project = TestProject::new();
    patch_cmd(&project)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("twice is harmless"));
}

#[test]
fn test_no_args_patches_configured_pages() {
    let project = TestProject::new();
    project.add_page(PAGE, SCROLL_PAGE);
    let config = project.config(&[PAGE]);
    std::fs::write(project.path().join("safe-area-patch.toml"), config.to_toml().unwrap()).unwrap();

    patch_cmd(&project)
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated: terms_page.dart"))
        .stdout(predicate::str::contains("Done! 1 file(s) updated"));

    assert_eq!(project.read(PAGE), SCROLL_PAGE_PATCHED);
}

#[test]
fn test_root_flag_overrides_config() {
    let project = TestProject::new();
    project.add_page("app/lib/a.dart", SCROLL_PAGE);
    let mut config = project.config(&["lib/a.dart"]);
    config.root = "/nonexistent".into();
    let config_path = project.write_config(&config);

    patch_cmd(&project)
        .arg("--config")
        .arg(&config_path)
        .arg("--root")
        .arg(project.path().join("app"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated: a.dart"));
}

#[test]
fn test_missing_and_unchanged_pages_still_succeed() {
    let project = TestProject::new();
    project.add_page("b.dart", STACK_PAGE);
    let config_path = project.write_config(&project.config(&["missing.dart", "b.dart"]));

    patch_cmd(&project)
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("File not found:"))
        .stdout(predicate::str::contains("No change for: b.dart"))
        .stdout(predicate::str::contains("1 not found"));
}

#[test]
fn test_dry_run_leaves_files() {
    let project = TestProject::new();
    project.add_page(PAGE, SCROLL_PAGE);
    let config_path = project.write_config(&project.config(&[PAGE]));

    patch_cmd(&project)
        .args(["run", "--dry-run", "--config"])
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Would update: terms_page.dart"));

    assert_eq!(project.read(PAGE), SCROLL_PAGE);
}

#[test]
fn test_json_output() {
    let project = TestProject::new();
    project.add_page(PAGE, SCROLL_PAGE);
    let config_path = project.write_config(&project.config(&[PAGE, "gone.dart"]));

    let output = patch_cmd(&project)
        .args(["--json", "--config"])
        .arg(&config_path)
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["updated"], 1);
    assert_eq!(json["not_found"], 1);
    assert_eq!(json["files"][0]["status"], "updated");
    assert_eq!(json["files"][0]["container"], "SingleChildScrollView");
    assert_eq!(json["files"][1]["status"], "not_found");
}

#[test]
fn test_bad_config_fails() {
    let project = TestProject::new();
    let path = project.path().join("bad.toml");
    std::fs::write(&path, "containers = []\n").unwrap();

    patch_cmd(&project)
        .arg("--config")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
}

#[test]
fn test_init_creates_config() {
    let project = TestProject::new();

    patch_cmd(&project)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created safe-area-patch.toml"));

    let content = project.read("safe-area-patch.toml");
    assert!(content.contains("SingleChildScrollView"));
    assert!(content.contains("closing = \"balanced\""));
}

#[test]
fn test_init_refuses_overwrite() {
    let project = TestProject::new();
    patch_cmd(&project).arg("init").assert().success();

    patch_cmd(&project)
        .args(["init", "--root", "/elsewhere"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Already initialized"));

    patch_cmd(&project).args(["init", "--force", "--root", "/elsewhere"]).assert().success();
    assert!(project.read("safe-area-patch.toml").contains("/elsewhere"));
}

#[test]
fn test_init_force_replaces_broken_config() {
    let project = TestProject::new();
    std::fs::write(project.path().join("safe-area-patch.toml"), "containers = [\n").unwrap();

    patch_cmd(&project).assert().failure().stderr(predicate::str::contains("failed to parse config"));

    patch_cmd(&project)
        .args(["init", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created safe-area-patch.toml"));

    assert!(project.read("safe-area-patch.toml").contains("SingleChildScrollView"));
}

#[test]
fn test_unbalanced_closing_is_flagged() {
    let project = TestProject::new();
    project.add_page(PAGE, SCROLL_PAGE);
    let config_path = project.write_config(&project.config(&[PAGE]));

    patch_cmd(&project)
        .args(["run", "--closing", "two-line", "--config"])
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated: terms_page.dart"))
        .stdout(predicate::str::contains("closing parenthesis not added"));

    assert!(project.read(PAGE).contains("body: SafeAreaBottom("));
}
