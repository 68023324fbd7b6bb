//! Integration tests for the chat endpoint.
//!
//! Covers transcript shaping as seen by the collaborator, the assistant-turn
//! response shape, and the error taxonomy (client input, configuration,
//! upstream failure).

mod common;

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use common::{post_json, response_json, test_app, test_app_without_chat_model};
use server_core::domains::chat::relay::{LEGAL_SYSTEM_PROMPT, SYSTEM_ACK};
use server_core::domains::chat::generation_defaults;
use server_core::kernel::{MockChatModel, TestDependencies};

#[tokio::test]
async fn test_single_message_is_relayed_with_preamble() {
    let deps = TestDependencies::new()
        .with_chat_model(MockChatModel::new().with_response("Section 302 IPC covers murder."));
    let app = test_app(&deps);

    let response = app
        .oneshot(post_json(
            "/chat",
            json!({"messages": [{"role": "user", "content": "What is Section 302 IPC?"}]}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["role"], "assistant");
    assert_eq!(body["content"], "Section 302 IPC covers murder.");

    // Exactly one collaborator call, with the two-turn preamble prepended
    let calls = deps.chat_model.calls();
    assert_eq!(calls.len(), 1);
    let contents = &calls[0].contents;
    assert_eq!(contents.len(), 3);
    assert_eq!(contents[0].role, "user");
    assert_eq!(contents[0].text(), LEGAL_SYSTEM_PROMPT);
    assert_eq!(contents[1].role, "model");
    assert_eq!(contents[1].text(), SYSTEM_ACK);
    assert_eq!(contents[2].role, "user");
    assert_eq!(contents[2].text(), "What is Section 302 IPC?");

    assert_eq!(calls[0].config, generation_defaults());
}

#[tokio::test]
async fn test_history_is_replayed_before_the_new_message() {
    let deps = TestDependencies::new();
    let app = test_app(&deps);

    let response = app
        .oneshot(post_json(
            "/chat",
            json!({"messages": [
                {"role": "user", "content": "What is bail?"},
                {"role": "assistant", "content": "Bail is conditional release."},
                {"role": "user", "content": "And anticipatory bail?"}
            ]}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let calls = deps.chat_model.calls();
    assert_eq!(calls.len(), 1);
    let contents = &calls[0].contents;
    assert_eq!(contents.len(), 5);
    assert_eq!(contents[2].role, "user");
    assert_eq!(contents[2].text(), "What is bail?");
    assert_eq!(contents[3].role, "model");
    assert_eq!(contents[3].text(), "Bail is conditional release.");
    assert_eq!(contents[4].role, "user");
    assert_eq!(contents[4].text(), "And anticipatory bail?");
}

#[tokio::test]
async fn test_empty_transcript_is_rejected_without_collaborator_call() {
    let deps = TestDependencies::new();
    let app = test_app(&deps);

    let response = app
        .oneshot(post_json("/chat", json!({"messages": []})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Invalid request body");
    assert!(deps.chat_model.calls().is_empty());
}

#[tokio::test]
async fn test_malformed_body_is_rejected() {
    let deps = TestDependencies::new();
    let app = test_app(&deps);

    for body in [
        json!({}),
        json!({"messages": [{"role": "oracle", "content": "hi"}]}),
        json!({"messages": "not-a-list"}),
    ] {
        let response = app.clone().oneshot(post_json("/chat", body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
    assert!(deps.chat_model.calls().is_empty());
}

#[tokio::test]
async fn test_missing_credential_reports_configuration_error() {
    let deps = TestDependencies::new();
    let app = test_app_without_chat_model(&deps);

    let response = app
        .oneshot(post_json(
            "/chat",
            json!({"messages": [{"role": "user", "content": "hello"}]}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response_json(response).await;
    assert_eq!(body["error"], "Gemini API key is not configured");
}

#[tokio::test]
async fn test_collaborator_failure_is_surfaced_generically() {
    let deps = TestDependencies::new().with_chat_model(MockChatModel::new().with_failure());
    let app = test_app(&deps);

    let response = app
        .oneshot(post_json(
            "/chat",
            json!({"messages": [{"role": "user", "content": "hello"}]}),
        ))
        .await
        .unwrap();

    // The mock's error text must not leak through
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response_json(response).await;
    assert_eq!(body["error"], "An error occurred while processing your request");
    assert_eq!(deps.chat_model.calls().len(), 1);
}
