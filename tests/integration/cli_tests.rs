//! CLI integration tests
//!
//! These tests verify exit codes and output shape for both subcommands.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

/// Get the path to the test fixtures directory
fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/project")
}

fn symref() -> Command {
    Command::cargo_bin("symref").expect("binary builds")
}

#[test]
fn test_cli_help() {
    symref()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("refs"))
        .stdout(predicate::str::contains("dead"));
}

#[test]
fn test_refs_reports_definition_and_references() {
    symref()
        .args(["refs", "IUser", "-d"])
        .arg(fixtures_path())
        .assert()
        .success()
        .stdout(predicate::str::contains("interface"))
        .stdout(predicate::str::contains("types.ts"))
        .stdout(predicate::str::contains("UserService.ts"));
}

#[test]
fn test_refs_zero_references_is_a_success() {
    symref()
        .args(["refs", "slugify", "-d"])
        .arg(fixtures_path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No references found"));
}

#[test]
fn test_refs_include_internal_flips_the_same_query() {
    symref()
        .args(["refs", "slugify", "--include-internal", "-d"])
        .arg(fixtures_path())
        .assert()
        .success()
        .stdout(predicate::str::contains("labels.ts:5"));
}

#[test]
fn test_refs_unknown_symbol_fails() {
    symref()
        .args(["refs", "DoesNotExist", "-d"])
        .arg(fixtures_path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("DoesNotExist"));
}

#[test]
fn test_refs_json_output() {
    symref()
        .args(["refs", "slugify", "--format", "json", "-d"])
        .arg(fixtures_path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"has_references\": false"))
        .stdout(predicate::str::contains("\"symbol\": \"slugify\""));
}

#[test]
fn test_dead_lists_unreferenced_members() {
    symref()
        .args(["dead", "NotificationService.ts", "-d"])
        .arg(fixtures_path())
        .assert()
        .success()
        .stdout(predicate::str::contains("notify"))
        .stdout(predicate::str::contains("class NotificationService"));
}

#[test]
fn test_dead_empty_result_is_a_success() {
    symref()
        .args(["dead", "types.ts", "-d"])
        .arg(fixtures_path())
        .assert()
        .success();
}

#[test]
fn test_dead_unknown_file_fails() {
    symref()
        .args(["dead", "not_here.ts", "-d"])
        .arg(fixtures_path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not_here.ts"));
}

#[test]
fn test_exclude_pattern_drops_the_declaring_file() {
    symref()
        .args(["refs", "IUser", "--exclude", "types.ts", "-d"])
        .arg(fixtures_path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("IUser"));
}

#[test]
fn test_invalid_pattern_is_rejected() {
    symref()
        .args(["refs", "IUser", "--include", "src/[", "-d"])
        .arg(fixtures_path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid glob pattern"));
}
