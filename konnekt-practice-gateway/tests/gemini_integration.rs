//! Integration tests for the Gemini gateway
//!
//! A wiremock server stands in for the generateContent endpoint.

use konnekt_practice_core::{ActivityContent, ActivityKind, FeedbackResult};
use konnekt_practice_gateway::{
    ContentGateway, GatewayConfig, GatewayError, GeminiGateway, PracticeContentService,
    STRUCTURED_FAILURE_MESSAGE,
};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "gemini-test";
const ENDPOINT: &str = "/v1beta/models/gemini-test:generateContent";

fn gateway(server: &MockServer) -> GeminiGateway {
    let config = GatewayConfig::default()
        .with_api_key("test-key")
        .with_model(MODEL)
        .with_base_url(server.uri());
    GeminiGateway::new(config).unwrap()
}

fn text_reply(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

// =============================================================================
// Unstructured calls
// =============================================================================

#[tokio::test]
async fn test_text_generation_sends_key_and_trims() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(text_reply("  What is your hobby?\n")),
        )
        .expect(1)
        .mount(&server)
        .await;

    let text = gateway(&server).generate_text("ask something").await.unwrap();
    assert_eq!(text, "What is your hobby?");
}

#[tokio::test]
async fn test_service_error_surfaces_status_and_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": { "code": 429, "message": "Resource has been exhausted", "status": "RESOURCE_EXHAUSTED" }
        })))
        .mount(&server)
        .await;

    let err = gateway(&server).generate_text("hi").await.unwrap_err();
    match err {
        GatewayError::Status { status, message } => {
            assert_eq!(status, 429);
            assert_eq!(message, "Resource has been exhausted");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_timeout_is_a_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(text_reply("late"))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let config = GatewayConfig::default()
        .with_api_key("test-key")
        .with_model(MODEL)
        .with_base_url(server.uri())
        .with_timeout(Duration::from_millis(50));
    let gateway = GeminiGateway::new(config).unwrap();

    assert!(matches!(
        gateway.generate_text("hi").await,
        Err(GatewayError::Http(_))
    ));
}

// =============================================================================
// Structured calls
// =============================================================================

#[tokio::test]
async fn test_structured_call_sends_json_config() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(body_partial_json(json!({
            "generationConfig": { "responseMimeType": "application/json" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_reply(
            r#"{"question":"She ___ to school.","options":["go","goes","going"],"answer":"goes","hint":"Use -s for he/she/it."}"#,
        )))
        .expect(1)
        .mount(&server)
        .await;

    let service = PracticeContentService::new(Arc::new(gateway(&server)));
    let content = service.fetch_content(ActivityKind::Grammar).await.unwrap();

    match content {
        ActivityContent::Grammar(grammar) => {
            assert_eq!(grammar.options, vec!["go", "goes", "going"]);
            assert_eq!(grammar.answer, "goes");
        }
        other => panic!("unexpected content: {:?}", other),
    }
}

#[tokio::test]
async fn test_schema_is_sent_with_structured_call() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .and(body_partial_json(json!({
            "generationConfig": {
                "responseJsonSchema": { "type": "object" }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_reply(
            r#"{"praise":"Well done!","corrections":[{"original":"I goes","corrected":"I go","explanation":"Use 'go' with I."}]}"#,
        )))
        .mount(&server)
        .await;

    let service = PracticeContentService::new(Arc::new(gateway(&server)));
    let feedback = service
        .evaluate_writing("Describe your day.", "I goes to work.")
        .await
        .unwrap();

    assert_eq!(feedback.corrections.len(), 1);
    assert!(!FeedbackResult::Writing(feedback).earns_point());
}

#[tokio::test]
async fn test_malformed_structured_reply_uses_fixed_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_reply("not json at all")))
        .mount(&server)
        .await;

    let service = PracticeContentService::new(Arc::new(gateway(&server)));
    let failure = service
        .fetch_content(ActivityKind::Listening)
        .await
        .unwrap_err();

    assert_eq!(failure.message, STRUCTURED_FAILURE_MESSAGE);
}

#[tokio::test]
async fn test_duplicate_options_are_rejected() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(ENDPOINT))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_reply(
            r#"{"sentence":"I like tea.","question":"What do I like?","options":["tea","tea","coffee"],"answer":"tea"}"#,
        )))
        .mount(&server)
        .await;

    let service = PracticeContentService::new(Arc::new(gateway(&server)));
    assert!(matches!(
        service.generate_listening().await,
        Err(GatewayError::InvalidContent(_))
    ));
}
