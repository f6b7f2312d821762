//! Black-box tests for the ledgerdesk binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn ledgerdesk(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("ledgerdesk").unwrap();
    cmd.env("LEDGERDESK_DATA_DIR", data_dir.path())
        .env_remove("LEDGERDESK_API_URL")
        .env_remove("RUST_LOG");
    cmd
}

fn write_entry(dir: &TempDir, name: &str, body: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn help_lists_commands() {
    let data_dir = TempDir::new().unwrap();
    ledgerdesk(&data_dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("entry"))
        .stdout(predicate::str::contains("ledger"))
        .stdout(predicate::str::contains("chat"));
}

#[test]
fn check_accepts_balanced_entry() {
    let data_dir = TempDir::new().unwrap();
    let file = write_entry(
        &data_dir,
        "balanced.json",
        r#"{
            "date": "2025-09-01",
            "reference": "REF001",
            "description": "Capital injection",
            "lines": [
                {"account_code": 1001, "debit": 2500.00, "credit": 0},
                {"account_code": 3001, "debit": 0, "credit": 2500.00}
            ]
        }"#,
    );

    ledgerdesk(&data_dir)
        .args(["entry", "check"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Balanced"))
        .stdout(predicate::str::contains("Ready to create."));
}

#[test]
fn check_rejects_unbalanced_entry_without_reference() {
    let data_dir = TempDir::new().unwrap();
    let file = write_entry(
        &data_dir,
        "unbalanced.json",
        r#"{
            "date": "2025-09-01",
            "description": "Rent",
            "lines": [
                {"account_code": 5001, "debit": 5000, "credit": 0},
                {"account_code": 1001, "debit": 0, "credit": 4999.99}
            ]
        }"#,
    );

    ledgerdesk(&data_dir)
        .args(["je", "check"])
        .arg(&file)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Out of balance by"))
        .stdout(predicate::str::contains("Cannot create:"))
        .stderr(predicate::str::contains("Reference is required"))
        .stderr(predicate::str::contains("out of balance"));
}

#[test]
fn check_reports_bad_date() {
    let data_dir = TempDir::new().unwrap();
    let file = write_entry(
        &data_dir,
        "bad-date.json",
        r#"{"date": "01/09/2025", "reference": "R", "description": "D", "lines": []}"#,
    );

    ledgerdesk(&data_dir)
        .args(["entry", "check"])
        .arg(&file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid date format"));
}

#[test]
fn config_shows_data_directory() {
    let data_dir = TempDir::new().unwrap();
    ledgerdesk(&data_dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains(data_dir.path().to_str().unwrap()))
        .stdout(predicate::str::contains("Initialized:        false"));
}

#[test]
fn api_url_flag_overrides_settings() {
    let data_dir = TempDir::new().unwrap();
    ledgerdesk(&data_dir)
        .args(["--api-url", "http://ledger.test:9000", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("http://ledger.test:9000"));
}

#[test]
fn init_writes_settings_file() {
    let data_dir = TempDir::new().unwrap();
    ledgerdesk(&data_dir).arg("init").assert().success();

    let settings = data_dir.path().join("config.json");
    assert!(settings.exists());
    let text = std::fs::read_to_string(settings).unwrap();
    assert!(text.contains("api_url"));

    ledgerdesk(&data_dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized:        true"));
}
