//! Integration tests for `medcompare config`.
//!
//! All filesystem-touching tests set `MEDCOMPARE_CONFIG` to a temp path so
//! they never read or write `~/.medcompare/config.yaml`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn medcompare() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("medcompare"));
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Returns a `TempDir` and the path string for a config file inside it.
fn temp_config_path() -> (TempDir, String) {
    let dir = TempDir::new().expect("temp dir");
    let path = dir
        .path()
        .join("config.yaml")
        .to_string_lossy()
        .into_owned();
    (dir, path)
}

#[test]
fn test_config_help_shows_show_and_set_subcommands() {
    medcompare()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("show"))
        .stdout(predicate::str::contains("set"));
}

#[test]
fn test_config_show_without_file_uses_defaults() {
    let (_dir, path) = temp_config_path();
    medcompare()
        .args(["config", "show"])
        .env("MEDCOMPARE_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("bootstrap.env_dir:"))
        .stdout(predicate::str::contains("venv"))
        .stdout(predicate::str::contains("5000"))
        .stdout(predicate::str::contains("numpy==1.26.4"));
}

#[test]
fn test_config_show_json_includes_path_and_values() {
    let (_dir, path) = temp_config_path();
    let assert = medcompare()
        .args(["config", "show", "--json"])
        .env("MEDCOMPARE_CONFIG", &path)
        .assert()
        .success();
    let value: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(value["path"], path.as_str());
    assert_eq!(value["config"]["bootstrap"]["port"], 5000);
    assert_eq!(value["config"]["bootstrap"]["host"], "127.0.0.1");
}

#[test]
fn test_config_set_then_show_round_trips() {
    let (_dir, path) = temp_config_path();
    medcompare()
        .args(["config", "set", "bootstrap.port", "8080"])
        .env("MEDCOMPARE_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Set bootstrap.port = 8080"));

    medcompare()
        .args(["config", "show"])
        .env("MEDCOMPARE_CONFIG", &path)
        .assert()
        .success()
        .stdout(predicate::str::contains("8080"));
}

#[test]
fn test_config_set_unknown_key_fails() {
    let (_dir, path) = temp_config_path();
    medcompare()
        .args(["config", "set", "bootstrap.shell", "bash"])
        .env("MEDCOMPARE_CONFIG", &path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("bootstrap.shell"));
    assert!(!std::path::Path::new(&path).exists());
}

#[test]
fn test_config_set_invalid_port_json_error() {
    let (_dir, path) = temp_config_path();
    let assert = medcompare()
        .args(["--json", "config", "set", "bootstrap.port", "not-a-port"])
        .env("MEDCOMPARE_CONFIG", &path)
        .assert()
        .code(1);
    let value: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(value["error"], true);
    assert_eq!(value["code"], "invalid_config");
}

#[test]
fn test_config_show_rejects_malformed_file() {
    let (_dir, path) = temp_config_path();
    std::fs::write(&path, "bootstrap: [not, a, map]\n").unwrap();
    medcompare()
        .args(["config", "show"])
        .env("MEDCOMPARE_CONFIG", &path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot parse"));
}
