//! Health endpoint smoke test.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use common::{response_json, test_app};
use server_core::kernel::TestDependencies;

#[tokio::test]
async fn test_health_reports_healthy() {
    let deps = TestDependencies::new();
    let app = test_app(&deps);

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["status"], "healthy");
}
