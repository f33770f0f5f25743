mod common;

use std::sync::Arc;

use agcas_db::MemoryStore;
use axum::http::StatusCode;
use common::*;

#[tokio::test]
async fn health_reports_ok_with_a_live_store() {
    let app = build_test_app(Arc::new(MemoryStore::new()));

    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));

    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["store_healthy"], true);
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn health_reports_degraded_when_the_store_fails() {
    let flaky = Arc::new(FlakyStore::default());
    flaky.fail_writes(true);
    let app = build_test_app(flaky);

    let response = get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["store_healthy"], false);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = build_test_app(Arc::new(MemoryStore::new()));
    let response = get(app, "/api/v1/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
