//! Integration tests for `fleet-agent inventory`.
//!
//! Gatherers read a fake system root inside the temp dir, so results do not
//! depend on the machine running the tests.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn fleet_agent(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("fleet-agent"));
    cmd.env("FLEET_AGENT_CONFIG", dir.join("config.yaml"));
    cmd
}

/// Temp dir with config, fake system root, policy dir and spool dir.
fn workspace() -> TempDir {
    let dir = TempDir::new().expect("temp dir");
    let root = dir.path();
    std::fs::create_dir_all(root.join("system/etc")).expect("mkdir");
    std::fs::write(root.join("system/etc/hostname"), "web-01\n").expect("hostname");
    std::fs::create_dir_all(root.join("policy")).expect("mkdir");
    let config = format!(
        "agent:\n  system_root: {}\ninventory:\n  policy_dir: {}\n  spool_dir: {}\n",
        root.join("system").display(),
        root.join("policy").display(),
        root.join("spool").display(),
    );
    std::fs::write(root.join("config.yaml"), config).expect("write config");
    dir
}

fn write_policy(dir: &TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("policy").join("InventoryPolicy.json");
    std::fs::write(&path, body).expect("write policy");
    path
}

fn spooled_files(dir: &TempDir) -> Vec<PathBuf> {
    match std::fs::read_dir(dir.path().join("spool")) {
        Ok(entries) => entries.map(|e| e.expect("entry").path()).collect(),
        Err(_) => Vec::new(),
    }
}

#[test]
fn test_inventory_gatherers_lists_builtin_gatherers() {
    let dir = workspace();
    fleet_agent(dir.path())
        .args(["inventory", "gatherers"])
        .assert()
        .success()
        .stdout(predicate::str::contains("AWS:Application"))
        .stdout(predicate::str::contains("AWS:InstanceInformation"));
}

#[test]
fn test_inventory_run_without_policy_is_skipped() {
    let dir = workspace();
    fleet_agent(dir.path())
        .args(["inventory", "run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("skipped"));
    assert!(spooled_files(&dir).is_empty());
}

#[test]
fn test_inventory_run_uploads_collected_items() {
    let dir = workspace();
    write_policy(
        &dir,
        r#"{"InventoryPolicy":{"AWS:InstanceInformation":{},"AWS:Application":{}}}"#,
    );
    fleet_agent(dir.path())
        .args(["inventory", "run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("uploaded: 2 item(s) uploaded"));

    let files = spooled_files(&dir);
    assert_eq!(files.len(), 1);
    let batch: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&files[0]).expect("read")).expect("json");
    assert_eq!(batch[0]["TypeName"], "AWS:InstanceInformation");
    assert_eq!(batch[0]["Content"][0]["ComputerName"], "web-01");
    assert_eq!(batch[1]["TypeName"], "AWS:Application");
    assert_eq!(batch[1]["ContentHash"].as_str().map(str::len), Some(64));
}

#[test]
fn test_inventory_run_unknown_gatherer_fails_without_upload() {
    let dir = workspace();
    write_policy(
        &dir,
        r#"{"InventoryPolicy":{"AWS:InstanceInformation":{},"AWS:Nope":{}}}"#,
    );
    fleet_agent(dir.path())
        .args(["inventory", "run"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "Unrecognized inventory gatherer - AWS:Nope",
        ));
    assert!(spooled_files(&dir).is_empty());
}

#[test]
fn test_inventory_run_size_limit_fails_without_upload() {
    let dir = workspace();
    // A 2 KB hostname against a 1 KB item limit.
    std::fs::write(dir.path().join("system/etc/hostname"), "h".repeat(2_000)).expect("write");
    let config = std::fs::read_to_string(dir.path().join("config.yaml")).expect("read");
    std::fs::write(
        dir.path().join("config.yaml"),
        format!("{config}  item_size_limit_kb: 1\n  total_size_limit_kb: 1\n"),
    )
    .expect("write");
    write_policy(&dir, r#"{"InventoryPolicy":{"AWS:InstanceInformation":{}}}"#);

    fleet_agent(dir.path())
        .args(["inventory", "run"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Size limit exceeded"));
    assert!(spooled_files(&dir).is_empty());
}

#[test]
fn test_inventory_run_unreadable_policy_fails() {
    let dir = workspace();
    write_policy(&dir, "{ not json");
    fleet_agent(dir.path())
        .args(["inventory", "run"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("policy_unreadable"));
}

#[test]
fn test_inventory_run_policy_flag_overrides_configured_path() {
    let dir = workspace();
    let custom = dir.path().join("custom.json");
    std::fs::write(&custom, r#"{"InventoryPolicy":{"AWS:Application":{}}}"#).expect("write");
    fleet_agent(dir.path())
        .args(["inventory", "run", "--policy"])
        .arg(&custom)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 item(s) uploaded"));
}

#[test]
fn test_inventory_run_json_output() {
    let dir = workspace();
    let stdout = fleet_agent(dir.path())
        .args(["inventory", "run", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&stdout).expect("json");
    assert_eq!(json["status"], "skipped");
    assert_eq!(json["items"], 0);
}
