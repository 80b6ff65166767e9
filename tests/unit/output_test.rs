//! Tests for the Output module
//!
//! Output provides structured result types that can be rendered as either
//! human-readable text or machine-parseable JSON.

use rxverify::core::models::{Failure, ScanRecord, Verification, VerificationVerdict};
use rxverify::output::{HistoryResult, OperationResult, OutputMode, VerifyResult};

fn corroborated() -> Verification {
    Verification::resolved(VerificationVerdict {
        is_suspect: false,
        reason: "Registered".to_string(),
        drug_name: Some("Amoxil".to_string()),
        manufacturer: Some("GSK".to_string()),
        approval_info: None,
    })
}

#[test]
fn output_mode_default() {
    assert_eq!(OutputMode::default(), OutputMode::Human);
}

#[test]
fn verify_result_serialization() {
    let v = corroborated();
    let result = VerifyResult {
        verdict: v.verdict,
        resolution: v.resolution,
        scan_id: Some("scan-1".to_string()),
    };

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["verdict"]["isSuspect"], false);
    assert_eq!(json["verdict"]["manufacturer"], "GSK");
    assert_eq!(json["resolution"]["state"], "corroborated");
    assert_eq!(json["scanId"], "scan-1");
}

#[test]
fn verify_result_fail_safe_serialization() {
    let v = Verification::fail_safe(Failure::Timeout, None);
    let result = VerifyResult {
        verdict: v.verdict,
        resolution: v.resolution,
        scan_id: None,
    };

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["verdict"]["isSuspect"], true);
    assert_eq!(json["resolution"]["state"], "fail_safe");
    assert_eq!(json["resolution"]["failure"], "timeout");
    assert!(json.get("scanId").is_none());
    assert_eq!(result.headline(), "SUSPECT (check incomplete)");
}

#[test]
fn history_result_serialization() {
    let scan = ScanRecord::from_verification(&corroborated(), "50580-491-02", None);
    let json = serde_json::to_value(HistoryResult { scans: vec![scan] }).unwrap();

    assert_eq!(json["scans"][0]["barcode"], "50580-491-02");
    assert_eq!(json["scans"][0]["status"], "Verified");
    assert_eq!(json["scans"][0]["isFlagged"], false);
}

#[test]
fn operation_result_serialization() {
    let result = OperationResult {
        success: true,
        message: "done".to_string(),
    };
    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("\"success\":true"));
}
