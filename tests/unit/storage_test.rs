//! Tests for scan history storage

use rxverify::adapters::file::JsonlScanHistory;
use rxverify::core::models::{Failure, ScanRecord, ScanStatus, Verification, VerificationVerdict};
use rxverify::core::ports::ScanHistory;
use tempfile::TempDir;

#[test]
fn test_recorded_scan_round_trips() {
    let temp = TempDir::new().unwrap();
    let history = JsonlScanHistory::new(temp.path().join("scans.jsonl"));

    let verification = Verification::resolved(VerificationVerdict {
        is_suspect: true,
        reason: "Registration belongs to a different product".to_string(),
        drug_name: Some("Amoxil".to_string()),
        manufacturer: None,
        approval_info: None,
    });
    let scan = ScanRecord::from_verification(&verification, "A4-9999", Some("u1".to_string()));
    history.append(&scan).unwrap();

    let scans = history.list(None).unwrap();
    assert_eq!(scans, vec![scan]);
    assert_eq!(scans[0].status, ScanStatus::Suspect);
}

#[test]
fn test_history_accumulates_across_instances() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("scans.jsonl");

    for barcode in ["a", "b", "c"] {
        let scan = ScanRecord::from_verification(
            &Verification::fail_safe(Failure::Schema, Some(barcode)),
            barcode,
            None,
        );
        JsonlScanHistory::new(&path).append(&scan).unwrap();
    }

    let scans = JsonlScanHistory::new(&path).list(None).unwrap();
    assert_eq!(scans.len(), 3);
    assert!(scans.iter().all(|s| s.status == ScanStatus::Unknown && s.is_flagged));
}

#[test]
fn test_unknown_user_filter_is_empty() {
    let temp = TempDir::new().unwrap();
    let history = JsonlScanHistory::new(temp.path().join("scans.jsonl"));
    let scan = ScanRecord::from_verification(
        &Verification::fail_safe(Failure::Transport, None),
        "x",
        Some("u1".to_string()),
    );
    history.append(&scan).unwrap();

    assert!(history.list(Some("someone-else")).unwrap().is_empty());
}
