//! Integration tests for the rxverify CLI
//!
//! These run the real binary with an isolated home directory, pointing the
//! knowledge service at a local fake where a live answer is needed.

#[path = "../common/mod.rs"]
#[allow(dead_code)]
mod common;

use std::fs;
use std::path::Path;

use assert_cmd::cargo;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;

use common::fake_gemini::{FakeGemini, Reply};

/// Helper function to create an rxverify command isolated in `home`
fn rxverify(home: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(cargo::cargo_bin!("rxverify"));
    cmd.env("HOME", home)
        .env_remove("GEMINI_API_KEY")
        .env_remove("GOOGLE_API_KEY")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

/// Helper to write a config that points at a fake Gemini
fn write_fake_config(home: &Path, base_url: &str) -> std::path::PathBuf {
    let path = home.join("rx.toml");
    fs::write(
        &path,
        format!(
            "[knowledge]\nbase_url = \"{base_url}\"\napi_key_env = \"RXVERIFY_IT_KEY\"\n\
             search_grounding = false\ntimeout_secs = 10\n"
        ),
    )
    .unwrap();
    path
}

fn stdout_json(output: &std::process::Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

// =============================================================================
// BASICS
// =============================================================================

#[test]
fn test_version() {
    let temp = TempDir::new().unwrap();
    rxverify(temp.path())
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("rxverify v"));
}

#[test]
fn test_version_json() {
    let temp = TempDir::new().unwrap();
    rxverify(temp.path())
        .args(["--json", "version"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"version\""));
}

#[test]
fn test_no_command_shows_hint() {
    let temp = TempDir::new().unwrap();
    rxverify(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("rxverify --help"));
}

// =============================================================================
// FAIL-SAFE WITHOUT A KNOWLEDGE SERVICE
// =============================================================================

#[test]
fn test_verify_without_key_is_suspect_and_recorded() {
    let temp = TempDir::new().unwrap();

    let output = rxverify(temp.path())
        .args(["--json", "verify", "--name", "Tylenol", "--ndc", "50580-491-02"])
        .args(["--user", "pharmacist-1"])
        .assert()
        .code(1)
        .get_output()
        .clone();

    let json = stdout_json(&output);
    assert_eq!(json["verdict"]["isSuspect"], true);
    assert_eq!(json["verdict"]["drugName"], "Tylenol");
    assert_eq!(json["resolution"]["state"], "fail_safe");
    assert!(json["scanId"].is_string());

    let output = rxverify(temp.path())
        .args(["--json", "history"])
        .assert()
        .success()
        .get_output()
        .clone();
    let history = stdout_json(&output);
    assert_eq!(history["scans"][0]["status"], "Unknown");
    assert_eq!(history["scans"][0]["barcode"], "50580-491-02");
    assert_eq!(history["scans"][0]["userId"], "pharmacist-1");
    assert_eq!(history["scans"][0]["isFlagged"], true);
}

#[test]
fn test_verify_with_no_identifiers_still_answers() {
    let temp = TempDir::new().unwrap();
    rxverify(temp.path())
        .args(["verify", "--no-record"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("SUSPECT"))
        .stdout(predicate::str::contains("N/A"));
}

#[test]
fn test_no_record_leaves_history_empty() {
    let temp = TempDir::new().unwrap();
    rxverify(temp.path())
        .args(["verify", "--name", "Amoxil", "--no-record"])
        .assert()
        .code(1);

    rxverify(temp.path())
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("No scans recorded."));
}

// =============================================================================
// LIVE ANSWERS FROM A FAKE SERVICE
// =============================================================================

#[test]
fn test_corroborated_package_exits_zero() {
    let temp = TempDir::new().unwrap();
    let fake = FakeGemini::start(vec![Reply::verdict(&json!({
        "isSuspect": false,
        "reason": "Registered with NAFDAC",
        "drugName": "Amoxil",
        "manufacturer": "GSK",
        "approvalInfo": "NAFDAC A4-1234"
    }))]);
    let config = write_fake_config(temp.path(), &fake.base_url);

    rxverify(temp.path())
        .env("RXVERIFY_IT_KEY", "it-key")
        .arg("--config")
        .arg(&config)
        .args(["verify", "--name", "Amoxil", "--barcode", "123"])
        .assert()
        .success()
        .stdout(predicate::str::contains("NOT SUSPECT"))
        .stdout(predicate::str::contains("GSK"));

    assert_eq!(fake.next_request().api_key.as_deref(), Some("it-key"));

    rxverify(temp.path())
        .arg("--config")
        .arg(&config)
        .args(["--json", "history"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"Verified\""));
}

#[test]
fn test_request_file_with_nafdac_number() {
    let temp = TempDir::new().unwrap();
    let fake = FakeGemini::start(vec![Reply::verdict(&json!({
        "isSuspect": true,
        "reason": "No matching registration found"
    }))]);
    let config = write_fake_config(temp.path(), &fake.base_url);
    let request = temp.path().join("request.json");
    fs::write(&request, r#"{"nafdacNumber": " A4-9999 "}"#).unwrap();

    let output = rxverify(temp.path())
        .env("RXVERIFY_IT_KEY", "it-key")
        .arg("--config")
        .arg(&config)
        .args(["--json", "verify", "--no-record", "--request"])
        .arg(&request)
        .assert()
        .code(1)
        .get_output()
        .clone();

    let json = stdout_json(&output);
    assert_eq!(
        json["verdict"],
        json!({"isSuspect": true, "reason": "No matching registration found"})
    );
    assert_eq!(json["resolution"]["state"], "flagged");

    let prompt = fake.next_request().body["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(prompt.contains("- NAFDAC Registration Number: A4-9999\n"));
}

// =============================================================================
// CONFIG
// =============================================================================

#[test]
fn test_config_init_writes_file() {
    let temp = TempDir::new().unwrap();
    rxverify(temp.path())
        .args(["config", "--init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote configuration"));

    let written = fs::read_to_string(temp.path().join(".rxverify/config.toml")).unwrap();
    assert!(written.contains("[knowledge]"));
    assert!(written.contains("regulator = \"NAFDAC\""));
}

#[test]
fn test_config_reports_missing_key() {
    let temp = TempDir::new().unwrap();
    rxverify(temp.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("API key (GEMINI_API_KEY): not set"));
}

#[test]
fn test_invalid_config_is_an_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.toml");
    fs::write(&path, "[knowledge\n").unwrap();

    rxverify(temp.path())
        .arg("--config")
        .arg(&path)
        .args(["verify", "--name", "Amoxil"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("invalid config"));
}
