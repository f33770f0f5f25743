mod common;

use std::sync::Arc;

use agcas_core::roles::LayoutTheme;
use agcas_db::models::role::CreateRole;
use agcas_db::{MemoryStore, Store};
use axum::http::StatusCode;
use common::*;
use serde_json::json;

fn memory_store() -> Arc<dyn Store> {
    Arc::new(MemoryStore::new())
}

#[tokio::test]
async fn member_without_role_gets_defaults() {
    let store = memory_store();
    let member = seed_member(store.as_ref(), "new@agcas.test", None).await;
    let app = build_test_app(store);

    let response = get_auth(app, "/api/v1/me/access", &token_for(member.id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["member_id"], member.id);
    assert!(json["data"]["role_id"].is_null());
    assert_eq!(json["data"]["is_admin"], false);
    assert_eq!(json["data"]["landing_page"], "Events");
    assert_eq!(json["data"]["layout_theme"], "default");
    assert_eq!(json["data"]["show_tours"], true);
    assert_eq!(json["data"]["excluded_features"], json!([]));
}

#[tokio::test]
async fn summary_reflects_the_role() {
    let store = memory_store();
    let mut input = CreateRole::named("Alumni");
    input.excluded_features = vec!["page_user_JobBoard".to_string()];
    input.default_landing_page = Some("Dashboard".to_string());
    input.layout_theme = LayoutTheme::NewHeader;
    input.show_tours = false;
    let role = seed_role(store.as_ref(), input).await;
    let member = seed_member(store.as_ref(), "alum@agcas.test", Some(role.id)).await;
    let app = build_test_app(store);

    let response = get_auth(app, "/api/v1/me/access", &token_for(member.id)).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["role_name"], "Alumni");
    assert_eq!(json["data"]["landing_page"], "Dashboard");
    assert_eq!(json["data"]["layout_theme"], "new_header");
    assert_eq!(json["data"]["show_tours"], false);
    assert_eq!(json["data"]["excluded_features"], json!(["page_user_JobBoard"]));
}

#[tokio::test]
async fn admin_with_data_export_excluded() {
    let store = memory_store();
    let (_, token) = seed_admin(store.as_ref(), &["page_admin_DataExport"]).await;
    let app = build_test_app(store);

    let response = get_auth(app.clone(), "/api/v1/me/access", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["is_admin"], true);

    let response = get_auth(app.clone(), "/api/v1/me/access/page_admin_DataExport", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["known"], true);
    assert_eq!(json["data"]["decision"], "denied");

    let response = get_auth(app.clone(), "/api/v1/me/access/page_user_Events", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["decision"], "authorized");

    let response = get_auth(app, "/api/v1/me/access/page_admin_RoleManagement", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["decision"], "authorized");
}

#[tokio::test]
async fn admin_pages_are_denied_to_members() {
    let store = memory_store();
    let role = seed_role(store.as_ref(), CreateRole::named("Member")).await;
    let member = seed_member(store.as_ref(), "m@agcas.test", Some(role.id)).await;
    let app = build_test_app(store);
    let token = token_for(member.id);

    let response = get_auth(app.clone(), "/api/v1/me/access/page_admin_DataExport", &token).await;
    assert_eq!(body_json(response).await["data"]["decision"], "denied");

    let response = get_auth(app, "/api/v1/me/access/element_PurchaseButton", &token).await;
    assert_eq!(body_json(response).await["data"]["decision"], "authorized");
}

#[tokio::test]
async fn unknown_feature_ids_follow_the_exclusion_list() {
    let store = memory_store();
    let mut input = CreateRole::named("Legacy");
    input.excluded_features = vec!["page_user_Retired".to_string()];
    let role = seed_role(store.as_ref(), input).await;
    let member = seed_member(store.as_ref(), "l@agcas.test", Some(role.id)).await;
    let app = build_test_app(store);
    let token = token_for(member.id);

    let response = get_auth(app.clone(), "/api/v1/me/access/page_user_Retired", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["known"], false);
    assert_eq!(json["data"]["decision"], "denied");

    let response = get_auth(app, "/api/v1/me/access/page_user_Whatever", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["known"], false);
    assert_eq!(json["data"]["decision"], "authorized");
}

#[tokio::test]
async fn deleted_role_resolves_as_no_role() {
    let store = memory_store();
    let (admin, token) = seed_admin(store.as_ref(), &["page_user_Events"]).await;
    let app = build_test_app(store.clone());

    store
        .delete_role(admin.role_id.expect("admin has a role"))
        .await
        .unwrap();

    let response = get_auth(app.clone(), "/api/v1/me/access", &token).await;
    let json = body_json(response).await;
    assert_eq!(json["data"]["is_admin"], false);
    assert!(json["data"]["role_name"].is_null());
    assert_eq!(json["data"]["landing_page"], "Events");

    let response = get_auth(app.clone(), "/api/v1/me/access/page_user_Events", &token).await;
    assert_eq!(body_json(response).await["data"]["decision"], "authorized");

    let response = get_auth(app, "/api/v1/admin/roles", &token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn feature_catalog_lists_every_entry() {
    let store = memory_store();
    let member = seed_member(store.as_ref(), "m@agcas.test", None).await;
    let app = build_test_app(store);

    let response = get_auth(app.clone(), "/api/v1/features", &token_for(member.id)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let entries = json["data"].as_array().unwrap();
    assert_eq!(entries.len(), agcas_core::features::Feature::ALL.len());

    let role_management = entries
        .iter()
        .find(|e| e["id"] == "page_admin_RoleManagement")
        .expect("catalog lists role management");
    assert_eq!(role_management["category"], "admin_page");
    assert_eq!(role_management["label"], "Role Management");

    let response = get(app, "/api/v1/features").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn invalid_token_is_rejected() {
    let app = build_test_app(memory_store());
    let response = get_auth(app, "/api/v1/me/access", "not-a-jwt").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Invalid or expired token");
}
