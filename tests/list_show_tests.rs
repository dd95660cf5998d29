//! List and show command integration tests

mod common;

use assert_cmd::Command;
use predicates::prelude::*;

// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
fn sprout_cmd() -> Command {
    Command::cargo_bin("sprout").unwrap()
}

fn populated_workspace() -> common::TestWorkspace {
    let workspace = common::TestWorkspace::new();
    workspace.write_config(&[]);

    workspace.create_module(
        "managers/telemetry",
        Some(
            "path: managers/telemetry\n\
             version: 1.2.0\n\
             type: manager\n\
             description: Telemetry hub\n\
             dependencies:\n  - https://github.com/example/retry-util\n",
        ),
    );
    workspace.write_file("managers/telemetry/init.sh", "exit 0\n");
    workspace.write_file("managers/telemetry/refresh.sh", "exit 0\n");

    workspace.create_module("utils/retry-util", Some("path: utils/retry-util\nversion: 0.3.0\n"));
    workspace
}

#[test]
fn test_list_shows_modules_with_versions() {
    let workspace = populated_workspace();

    sprout_cmd()
        .args(["list", "-w"])
        .arg(&workspace.path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Placed modules (2):"))
        .stdout(predicate::str::contains("telemetry"))
        .stdout(predicate::str::contains("v1.2.0"))
        .stdout(predicate::str::contains("retry-util"))
        .stdout(predicate::str::contains("v0.3.0"))
        .stdout(predicate::str::contains("Type: manager"))
        .stdout(predicate::str::contains("Hooks: init, refresh"));
}

#[test]
fn test_list_verbose_shows_paths() {
    let workspace = populated_workspace();

    sprout_cmd()
        .args(["list", "-v", "-w"])
        .arg(&workspace.path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Telemetry hub"))
        .stdout(predicate::str::contains("managers/telemetry"));
}

#[test]
fn test_list_module_without_manifest_uses_defaults() {
    let workspace = common::TestWorkspace::new();
    workspace.write_config(&[]);
    workspace.create_module("utils/bare", None);

    sprout_cmd()
        .args(["list", "-w"])
        .arg(&workspace.path)
        .assert()
        .success()
        .stdout(predicate::str::contains("bare"))
        .stdout(predicate::str::contains("v0.0.1"));
}

#[test]
fn test_list_honors_configured_directories() {
    let workspace = common::TestWorkspace::new();
    workspace.write_file(
        "sprout.yaml",
        "modules: []\ndirectories:\n  - services\n",
    );
    workspace.create_module("services/api", Some("path: services/api\nversion: 2.0.0\n"));
    workspace.create_module("utils/ignored", Some("path: utils/ignored\nversion: 1.0.0\n"));

    sprout_cmd()
        .args(["list", "-w"])
        .arg(&workspace.path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Placed modules (1):"))
        .stdout(predicate::str::contains("api"))
        .stdout(predicate::str::contains("ignored").not());
}

#[test]
fn test_show_displays_module_details() {
    let workspace = populated_workspace();

    sprout_cmd()
        .args(["show", "telemetry", "-w"])
        .arg(&workspace.path)
        .assert()
        .success()
        .stdout(predicate::str::contains("telemetry"))
        .stdout(predicate::str::contains("Version: 1.2.0"))
        .stdout(predicate::str::contains("Type: manager"))
        .stdout(predicate::str::contains("Description: Telemetry hub"))
        .stdout(predicate::str::contains("Hooks: init, refresh"))
        .stdout(predicate::str::contains("https://github.com/example/retry-util"));
}

#[test]
fn test_show_module_without_hooks_or_dependencies() {
    let workspace = populated_workspace();

    sprout_cmd()
        .args(["show", "retry-util", "-w"])
        .arg(&workspace.path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Version: 0.3.0"))
        .stdout(predicate::str::contains("Hooks: None"))
        .stdout(predicate::str::contains("Dependencies: None"));
}

#[test]
fn test_show_verbose_includes_full_path() {
    let workspace = populated_workspace();

    sprout_cmd()
        .args(["show", "telemetry", "-v", "-w"])
        .arg(&workspace.path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Full path:"));
}
