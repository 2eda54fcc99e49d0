//! Integration tests for the CLI surface: help, version and argument parsing.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn medcompare() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("medcompare"));
    cmd.env("NO_COLOR", "1");
    cmd
}

// --- Help and version tests ---

#[test]
fn test_cli_no_args_shows_help_and_exits_two() {
    // clap with arg_required_else_help shows help on stderr and exits 2
    medcompare().assert().code(2).stderr(predicate::str::contains(
        "Compare diabetes medicine costs across insurance plans",
    ));
}

#[test]
fn test_cli_help_flag_lists_commands() {
    let assert = medcompare().arg("--help").assert().success();
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    for command in ["setup", "compare", "report", "explore", "coverage", "config", "version"] {
        assert!(stdout.contains(command), "help should list `{command}`");
    }
}

#[test]
fn test_cli_version_flag_shows_version() {
    medcompare()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("medcompare"));
}

#[test]
fn test_version_command_shows_version() {
    medcompare()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("medcompare 0.1.0"));
}

#[test]
fn test_version_command_json_outputs_valid_json() {
    let assert = medcompare().args(["version", "--json"]).assert().success();
    let value: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).expect("valid JSON");
    assert_eq!(value["version"], "0.1.0");
}

#[test]
fn test_unknown_command_fails() {
    medcompare()
        .arg("frobnicate")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_compare_rejects_unknown_sort_key() {
    medcompare()
        .args(["compare", "--sort", "price"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid value"));
}

#[test]
fn test_report_requires_medicine_and_insurance() {
    medcompare()
        .args(["report", "--medicine", "Metformin"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--insurance"));
}

#[test]
fn test_explore_refuses_json_mode() {
    medcompare()
        .args(["explore", "--json"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains(r#""error": true"#));
}

#[test]
fn test_explore_refuses_non_terminal_stdin() {
    medcompare()
        .arg("explore")
        .write_stdin("")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("interactive terminal"));
}

#[test]
fn test_setup_binary_help() {
    Command::new(assert_cmd::cargo::cargo_bin!("medcompare-setup"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"));
}
