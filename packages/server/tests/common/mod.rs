//! Shared helpers for router tests.
//!
//! Tests drive the real Axum router with mock collaborators injected via
//! `TestDependencies`, so every assertion covers the full HTTP path.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;

use server_core::kernel::TestDependencies;
use server_core::server::build_router;

/// Router backed by the given mocks
pub fn test_app(deps: &TestDependencies) -> Router {
    build_router(Arc::new(deps.server_deps()))
}

/// Router with no LLM collaborator configured
pub fn test_app_without_chat_model(deps: &TestDependencies) -> Router {
    build_router(Arc::new(deps.server_deps_without_chat_model()))
}

/// Build a JSON POST request
pub fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Read a response body as JSON
pub async fn response_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
