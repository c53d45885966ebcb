//! CLI integration tests for securenest
//!
//! Exercises the vault and generator commands end-to-end with
//! assert_cmd, isolating every test behind its own data and config
//! directories.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Helper to create a command isolated to the given directories.
fn securenest_cmd(dirs: &TestDirs) -> Command {
    let mut cmd = Command::cargo_bin("securenest").unwrap();
    cmd.env("SECURENEST_DATA_DIR", dirs.data.path());
    cmd.env("SECURENEST_CONFIG_DIR", dirs.config.path());
    cmd
}

struct TestDirs {
    data: TempDir,
    config: TempDir,
}

fn test_dirs() -> TestDirs {
    TestDirs {
        data: TempDir::new().unwrap(),
        config: TempDir::new().unwrap(),
    }
}

#[test]
fn test_add_and_list() {
    let dirs = test_dirs();

    securenest_cmd(&dirs)
        .args(["add", "GitHub", "--username", "octocat", "--password", "hunter2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Entry 'GitHub' added."));

    securenest_cmd(&dirs)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("GitHub (octocat)"));
}

#[test]
fn test_list_empty_vault() {
    let dirs = test_dirs();

    securenest_cmd(&dirs)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries found."));
}

#[test]
fn test_show_masks_password_by_default() {
    let dirs = test_dirs();

    securenest_cmd(&dirs)
        .args(["add", "Mail", "--password", "s3cret!"])
        .assert()
        .success();

    securenest_cmd(&dirs)
        .args(["show", "Mail"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Title: Mail"))
        .stdout(predicate::str::contains("********"))
        .stdout(predicate::str::contains("s3cret!").not());

    securenest_cmd(&dirs)
        .args(["show", "Mail", "--reveal"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Password: s3cret!"));
}

#[test]
fn test_show_missing_entry_fails() {
    let dirs = test_dirs();

    securenest_cmd(&dirs)
        .args(["show", "Nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_delete_moves_to_trash_and_restore_brings_back() {
    let dirs = test_dirs();

    securenest_cmd(&dirs)
        .args(["add", "Bounce", "--password", "pw"])
        .assert()
        .success();

    securenest_cmd(&dirs)
        .args(["delete", "Bounce"])
        .assert()
        .success()
        .stdout(predicate::str::contains("moved to trash"));

    securenest_cmd(&dirs)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bounce").not());

    securenest_cmd(&dirs)
        .args(["trash", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Bounce"));

    securenest_cmd(&dirs)
        .args(["trash", "restore", "Bounce"])
        .assert()
        .success()
        .stdout(predicate::str::contains("restored"));

    securenest_cmd(&dirs)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Bounce"));

    securenest_cmd(&dirs)
        .args(["trash", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Trash is empty."));
}

#[test]
fn test_delete_missing_entry_fails() {
    let dirs = test_dirs();

    securenest_cmd(&dirs)
        .args(["delete", "Ghost"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_purge_removes_from_trash_only() {
    let dirs = test_dirs();

    securenest_cmd(&dirs)
        .args(["add", "Stay", "--password", "pw"])
        .assert()
        .success();
    securenest_cmd(&dirs)
        .args(["add", "Gone", "--password", "pw"])
        .assert()
        .success();
    securenest_cmd(&dirs)
        .args(["delete", "Gone"])
        .assert()
        .success();

    securenest_cmd(&dirs)
        .args(["trash", "purge", "Gone"])
        .assert()
        .success()
        .stdout(predicate::str::contains("permanently deleted"));

    securenest_cmd(&dirs)
        .args(["trash", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Trash is empty."));

    securenest_cmd(&dirs)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Stay"));
}

#[test]
fn test_generate_respects_length() {
    let dirs = test_dirs();

    let output = securenest_cmd(&dirs)
        .args(["generate", "--length", "24"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let password = String::from_utf8(output.stdout).unwrap();
    assert_eq!(password.trim_end().len(), 24);
}

#[test]
fn test_generate_numbers_only() {
    let dirs = test_dirs();

    let output = securenest_cmd(&dirs)
        .args(["generate", "--no-letters", "--no-symbols"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let password = String::from_utf8(output.stdout).unwrap();
    assert!(password.trim_end().chars().all(|c| c.is_ascii_digit()));
}

#[test]
fn test_generate_with_nothing_enabled_fails() {
    let dirs = test_dirs();

    securenest_cmd(&dirs)
        .args(["generate", "--no-letters", "--no-numbers", "--no-symbols"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No character classes selected"));
}

#[test]
fn test_add_with_generated_password() {
    let dirs = test_dirs();

    securenest_cmd(&dirs)
        .args(["add", "Generated", "--generate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Password: "))
        .stdout(predicate::str::contains("Strength: "));
}

#[test]
fn test_config_set_get_round_trip() {
    let dirs = test_dirs();

    securenest_cmd(&dirs)
        .args(["config", "set", "generator.length", "20"])
        .assert()
        .success();

    securenest_cmd(&dirs)
        .args(["config", "get", "generator.length"])
        .assert()
        .success()
        .stdout(predicate::str::contains("20"));

    securenest_cmd(&dirs)
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("breach.base_url"));
}

#[test]
fn test_config_rejects_unknown_key() {
    let dirs = test_dirs();

    securenest_cmd(&dirs)
        .args(["config", "set", "nope", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown configuration key"));
}

#[test]
fn test_check_collapses_failed_lookup_to_zero() {
    let dirs = test_dirs();

    // Point the breach endpoint at a local closed port so the lookup
    // fails fast without touching the network.
    securenest_cmd(&dirs)
        .args(["config", "set", "breach.base_url", "http://127.0.0.1:9"])
        .assert()
        .success();
    securenest_cmd(&dirs)
        .args(["config", "set", "breach.connect_timeout_secs", "1"])
        .assert()
        .success();
    securenest_cmd(&dirs)
        .args(["config", "set", "breach.request_timeout_secs", "1"])
        .assert()
        .success();

    securenest_cmd(&dirs)
        .args(["check", "--password", "admin"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not found in known breaches."));

    securenest_cmd(&dirs)
        .args(["check", "--password", "admin", "--strict"])
        .assert()
        .success()
        .stdout(predicate::str::contains("unknown"));
}

#[test]
fn test_check_requires_password_or_title() {
    let dirs = test_dirs();

    securenest_cmd(&dirs)
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--password"));
}

#[test]
fn test_quiet_add_prints_nothing() {
    let dirs = test_dirs();

    securenest_cmd(&dirs)
        .args(["--quiet", "add", "Silent", "--password", "pw"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}
