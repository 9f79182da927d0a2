use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn wardbill_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("wardbill"))
}

#[test]
fn test_help() {
    wardbill_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Billing and statement-of-account CLI",
        ));
}

#[test]
fn test_version() {
    wardbill_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("wardbill"));
}

#[test]
fn test_init_creates_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("wardbill-config");

    wardbill_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized wardbill config"));

    assert!(config_path.join("config.toml").exists());
}

#[test]
fn test_init_fails_if_exists() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("wardbill-config");

    // First init should succeed
    wardbill_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success();

    // Second init should fail
    wardbill_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_staged_without_init() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("nonexistent");

    wardbill_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "staged",
            "--patient",
            "7",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_stage_invalid_item_format() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("wardbill-config");

    // Item parsing fails before config or network are touched
    wardbill_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "stage",
            "--patient",
            "7",
            "--item",
            "consulting",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid item format"));
}

#[test]
fn test_stage_zero_quantity() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("wardbill-config");

    wardbill_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "stage",
            "--patient",
            "7",
            "--item",
            "12:0",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid quantity"));
}

#[test]
fn test_stage_no_items() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("wardbill-config");

    wardbill_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "stage",
            "--patient",
            "7",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No items specified"));
}

#[test]
fn test_pay_rejects_non_positive_amount() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("wardbill-config");

    wardbill_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "pay",
            "--patient",
            "7",
            "--amount",
            "0",
            "--method",
            "cash",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("greater than zero"));
}

fn write_staged(config_path: &std::path::Path, staged: &str) {
    // Key matches the template facility id "main"
    fs::write(config_path.join("pending_charges_main.json"), staged).unwrap();
}

const STAGED_FIXTURE: &str = r#"{
  "7": [
    {
      "id": "0194f2a0-0000-7000-8000-000000000001",
      "saved_at": "2026-01-10T08:30:00Z",
      "items": [
        {"service_id": 9, "service_name": "Room - Private", "unit_price": 1500.0, "quantity": 2},
        {"service_id": 4, "service_name": "Newborn Screening", "unit_price": 1750.0, "quantity": 1}
      ]
    }
  ]
}"#;

#[test]
fn test_staged_lists_groups_and_total() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("wardbill-config");

    wardbill_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success();

    write_staged(&config_path, STAGED_FIXTURE);

    wardbill_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "staged",
            "--patient",
            "7",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Room - Private"))
        .stdout(predicate::str::contains("Newborn Screening"))
        .stdout(predicate::str::contains("₱4,750.00"));
}

#[test]
fn test_staged_is_per_patient() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("wardbill-config");

    wardbill_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success();

    write_staged(&config_path, STAGED_FIXTURE);

    wardbill_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "staged",
            "--patient",
            "8",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("No staged charges for patient 8"));
}

#[test]
fn test_unstage_removes_group() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("wardbill-config");

    wardbill_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success();

    write_staged(&config_path, STAGED_FIXTURE);

    wardbill_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "unstage",
            "--patient",
            "7",
            "--group",
            "0194f2a0-0000-7000-8000-000000000001",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed staged group"));

    wardbill_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "staged",
            "--patient",
            "7",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("No staged charges"));
}

#[test]
fn test_unstage_unknown_group_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("wardbill-config");

    wardbill_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success();

    write_staged(&config_path, STAGED_FIXTURE);

    wardbill_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "unstage",
            "--patient",
            "7",
            "--group",
            "no-such-group",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_set_qty_updates_and_removes() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("wardbill-config");

    wardbill_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success();

    write_staged(&config_path, STAGED_FIXTURE);

    wardbill_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "set-qty",
            "--patient",
            "7",
            "--service",
            "9",
            "--qty",
            "3",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("quantity 3"));

    // 3 x 1,500.00 + 1 x 1,750.00
    wardbill_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "staged",
            "--patient",
            "7",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("₱6,250.00"));

    // Quantity 0 deletes the line
    wardbill_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "set-qty",
            "--patient",
            "7",
            "--service",
            "9",
            "--qty",
            "0",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed service 9"));

    wardbill_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "staged",
            "--patient",
            "7",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Room - Private").not());
}

#[test]
fn test_set_qty_unknown_service_fails() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("wardbill-config");

    wardbill_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success();

    wardbill_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "set-qty",
            "--patient",
            "7",
            "--service",
            "42",
            "--qty",
            "1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not staged"));
}

#[test]
fn test_clear_staged() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("wardbill-config");

    wardbill_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success();

    write_staged(&config_path, STAGED_FIXTURE);

    wardbill_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "clear-staged",
            "--patient",
            "7",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleared staged charges"));

    wardbill_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "staged",
            "--patient",
            "7",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("No staged charges"));
}

#[test]
fn test_corrupt_staging_file_degrades_to_empty() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("wardbill-config");

    wardbill_cmd()
        .args(["-C", config_path.to_str().unwrap(), "init"])
        .assert()
        .success();

    write_staged(&config_path, "{{ not json");

    // Persistence faults are never surfaced as blocking errors
    wardbill_cmd()
        .args([
            "-C",
            config_path.to_str().unwrap(),
            "staged",
            "--patient",
            "7",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("No staged charges"));
}
