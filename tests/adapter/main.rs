//! Adapter tests
//!
//! Drive the Gemini adapter against a local fake of the API.

#[path = "../common/mod.rs"]
#[allow(dead_code)]
mod common;

use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use rxverify::adapters::gemini::{GeminiClient, GeminiSettings};
use rxverify::core::models::{Failure, IdentifierSet, Resolution, VerificationVerdict};
use rxverify::core::ports::{Instruction, KnowledgeError, KnowledgeService};
use rxverify::core::services::{Verifier, normalize, render_instruction};
use serde_json::json;

use common::fake_gemini::{FakeGemini, Reply};

fn client(base_url: &str, search_grounding: bool) -> GeminiClient {
    GeminiClient::new(GeminiSettings {
        api_key: Some("test-key".to_string()),
        base_url: base_url.to_string(),
        search_grounding,
        timeout: Duration::from_secs(5),
        ..GeminiSettings::default()
    })
    .unwrap()
}

fn instruction() -> Instruction {
    render_instruction(&normalize(IdentifierSet::named("Amoxil")), "NAFDAC")
}

// =============================================================================
// REQUEST SHAPE
// =============================================================================

#[tokio::test]
async fn test_request_reaches_generate_content_with_key() {
    let fake = FakeGemini::start(vec![Reply::text("{}")]);
    let text = client(&fake.base_url, true).generate(&instruction()).await.unwrap();
    assert_eq!(text, "{}");

    let request = fake.next_request();
    assert_eq!(request.url, "/v1beta/models/gemini-2.0-flash:generateContent");
    assert_eq!(request.api_key.as_deref(), Some("test-key"));
    assert!(request.body["tools"][0].get("google_search").is_some());
    let prompt = request.body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("- Drug Name: Amoxil"));
}

#[tokio::test]
async fn test_ungrounded_request_sends_schema() {
    let fake = FakeGemini::start(vec![Reply::text("{}")]);
    client(&fake.base_url, false).generate(&instruction()).await.unwrap();

    let body = fake.next_request().body;
    assert!(body.get("tools").is_none());
    assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
    assert_eq!(
        body["generationConfig"]["responseSchema"]["required"],
        json!(["isSuspect", "reason"])
    );
}

// =============================================================================
// FAILURE MAPPING
// =============================================================================

#[tokio::test]
async fn test_error_status_is_reported() {
    let fake = FakeGemini::start(vec![Reply::Status(
        500,
        r#"{"error": {"message": "internal"}}"#.to_string(),
    )]);
    let err = client(&fake.base_url, true).generate(&instruction()).await.unwrap_err();

    match err {
        KnowledgeError::Status { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("internal"));
        },
        other => panic!("expected Status, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unreadable_envelope_is_invalid_response() {
    let fake = FakeGemini::start(vec![Reply::Status(200, "<html>oops</html>".to_string())]);
    let err = client(&fake.base_url, true).generate(&instruction()).await.unwrap_err();
    assert!(matches!(err, KnowledgeError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_blocked_prompt_is_invalid_response() {
    let fake = FakeGemini::start(vec![Reply::Status(
        200,
        json!({"promptFeedback": {"blockReason": "SAFETY"}}).to_string(),
    )]);
    let err = client(&fake.base_url, true).generate(&instruction()).await.unwrap_err();
    assert!(matches!(err, KnowledgeError::InvalidResponse(ref m) if m.contains("SAFETY")));
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let fake = FakeGemini::start(vec![Reply::Silence]);
    let slow = GeminiClient::new(GeminiSettings {
        api_key: Some("test-key".to_string()),
        base_url: fake.base_url.clone(),
        timeout: Duration::from_millis(200),
        ..GeminiSettings::default()
    })
    .unwrap();

    let err = slow.generate(&instruction()).await.unwrap_err();
    assert!(matches!(err, KnowledgeError::Timeout));
}

#[tokio::test]
async fn test_refused_connection_is_transport() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let err = client(&format!("http://127.0.0.1:{port}/v1beta"), true)
        .generate(&instruction())
        .await
        .unwrap_err();
    assert!(matches!(err, KnowledgeError::Transport(_)));
}

// =============================================================================
// END TO END THROUGH THE VERIFIER
// =============================================================================

#[tokio::test]
async fn test_fenced_verdict_is_decoded() {
    let fake = FakeGemini::start(vec![Reply::text(
        "```json\n{\"isSuspect\": false, \"reason\": \"Listed in the NAFDAC Greenbook\", \
         \"drugName\": \"Amoxil\", \"manufacturer\": \"GSK\"}\n```",
    )]);
    let verifier = Verifier::new(Arc::new(client(&fake.base_url, true)));

    let outcome = verifier.verify_detailed(&normalize(IdentifierSet::named("Amoxil"))).await;

    assert_eq!(outcome.resolution, Resolution::Corroborated);
    assert_eq!(
        outcome.verdict,
        VerificationVerdict {
            is_suspect: false,
            reason: "Listed in the NAFDAC Greenbook".to_string(),
            drug_name: Some("Amoxil".to_string()),
            manufacturer: Some("GSK".to_string()),
            approval_info: None,
        }
    );
}

#[tokio::test]
async fn test_server_error_becomes_fail_safe() {
    let fake = FakeGemini::start(vec![Reply::Status(503, "unavailable".to_string())]);
    let verifier = Verifier::new(Arc::new(client(&fake.base_url, true)));

    let outcome = verifier.verify_detailed(&normalize(IdentifierSet::named("Amoxil"))).await;

    assert_eq!(outcome.resolution, Resolution::FailSafe(Failure::Transport));
    assert!(outcome.verdict.is_suspect);
    assert_eq!(outcome.verdict.drug_name.as_deref(), Some("Amoxil"));
}

#[tokio::test]
async fn test_empty_candidate_becomes_fail_safe() {
    let fake = FakeGemini::start(vec![Reply::Status(200, json!({"candidates": []}).to_string())]);
    let verifier = Verifier::new(Arc::new(client(&fake.base_url, true)));

    let outcome = verifier.verify_detailed(&normalize(IdentifierSet::default())).await;

    assert_eq!(outcome.resolution, Resolution::FailSafe(Failure::Schema));
}

#[tokio::test]
async fn test_suspect_verdict_passes_through() {
    let fake = FakeGemini::start(vec![Reply::verdict(&json!({
        "isSuspect": true,
        "reason": "A4-9999 is registered to a different product"
    }))]);
    let verifier = Verifier::new(Arc::new(client(&fake.base_url, false)));

    let outcome = verifier
        .verify_detailed(&normalize(IdentifierSet {
            drug_name: Some("Amoxil".to_string()),
            registration_number: Some("A4-9999".to_string()),
            ..IdentifierSet::default()
        }))
        .await;

    assert_eq!(outcome.resolution, Resolution::Flagged);
    assert_eq!(outcome.verdict.reason, "A4-9999 is registered to a different product");
}
