//! Integration tests for the CLI skeleton: help, version, argument errors.

#![allow(clippy::expect_used)]

use assert_cmd::Command;
use predicates::prelude::*;

fn fleet_agent() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("fleet-agent"))
}

#[test]
fn test_cli_no_args_shows_help_and_exits_two() {
    fleet_agent()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("association compilation"));
}

#[test]
fn test_cli_help_lists_commands() {
    fleet_agent()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("compile"))
        .stdout(predicate::str::contains("inventory"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_version_command_shows_version() {
    fleet_agent()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("fleet-agent 0.1.0"));
}

#[test]
fn test_version_command_json_outputs_valid_json() {
    let output = fleet_agent()
        .args(["version", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output).expect("valid JSON");
    assert_eq!(json["version"], "0.1.0");
}

#[test]
fn test_unknown_subcommand_is_rejected() {
    fleet_agent()
        .arg("provision")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

#[test]
fn test_compile_requires_message_argument() {
    fleet_agent()
        .arg("compile")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("<MESSAGE>"));
}
