#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use agcas_api::auth::jwt::{generate_access_token, JwtConfig};
use agcas_api::config::{ServerConfig, StoreBackend};
use agcas_api::router::build_app_router;
use agcas_api::state::AppState;
use agcas_core::types::{Date, DbId};
use agcas_db::models::member::{CreateMember, Member};
use agcas_db::models::role::{CreateRole, Role, UpdateRole};
use agcas_db::{MemberStore, MemoryStore, RoleStore, Store};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

const TEST_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        store_backend: StoreBackend::Memory,
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            access_token_expiry_mins: 15,
        },
    }
}

/// Build the full application router over `store`, with the same middleware
/// stack production uses.
pub fn build_test_app(store: Arc<dyn Store>) -> Router {
    let config = test_config();
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Mint an access token for `member_id`.
pub fn token_for(member_id: DbId) -> String {
    generate_access_token(member_id, &test_config().jwt).expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Seeding
// ---------------------------------------------------------------------------

pub async fn seed_role(store: &dyn Store, input: CreateRole) -> Role {
    store.create_role(&input).await.expect("role insert should succeed")
}

pub async fn seed_member(store: &dyn Store, email: &str, role_id: Option<DbId>) -> Member {
    let mut input = CreateMember::with_email(email);
    input.role_id = role_id;
    store
        .create_member(&input)
        .await
        .expect("member insert should succeed")
}

/// Create an admin role with the given exclusions and a member holding it.
/// Returns the member and a token for them.
pub async fn seed_admin(store: &dyn Store, excluded: &[&str]) -> (Member, String) {
    let mut input = CreateRole::named("Administrator");
    input.is_admin = true;
    input.excluded_features = excluded.iter().map(|s| s.to_string()).collect();
    let role = seed_role(store, input).await;
    let member = seed_member(store, "admin@agcas.test", Some(role.id)).await;
    let token = token_for(member.id);
    (member, token)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    app.oneshot(request).await.expect("router should respond")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

// ---------------------------------------------------------------------------
// Failing store
// ---------------------------------------------------------------------------

/// A [`MemoryStore`] whose writes can be switched to fail, to exercise the
/// store-failure path without a database.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    fail_writes: AtomicBool,
}

impl FlakyStore {
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), sqlx::Error> {
        if self.fail_writes.load(Ordering::SeqCst) {
            Err(sqlx::Error::PoolTimedOut)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RoleStore for FlakyStore {
    async fn create_role(&self, input: &CreateRole) -> Result<Role, sqlx::Error> {
        self.check()?;
        self.inner.create_role(input).await
    }

    async fn find_role(&self, id: DbId) -> Result<Option<Role>, sqlx::Error> {
        self.inner.find_role(id).await
    }

    async fn list_roles(&self) -> Result<Vec<Role>, sqlx::Error> {
        self.inner.list_roles().await
    }

    async fn update_role(
        &self,
        id: DbId,
        input: &UpdateRole,
    ) -> Result<Option<Role>, sqlx::Error> {
        self.check()?;
        self.inner.update_role(id, input).await
    }

    async fn delete_role(&self, id: DbId) -> Result<bool, sqlx::Error> {
        self.check()?;
        self.inner.delete_role(id).await
    }

    async fn clear_default_except(&self, keep_id: DbId) -> Result<u64, sqlx::Error> {
        self.check()?;
        self.inner.clear_default_except(keep_id).await
    }
}

#[async_trait]
impl MemberStore for FlakyStore {
    async fn create_member(&self, input: &CreateMember) -> Result<Member, sqlx::Error> {
        self.check()?;
        self.inner.create_member(input).await
    }

    async fn find_member(&self, id: DbId) -> Result<Option<Member>, sqlx::Error> {
        self.inner.find_member(id).await
    }

    async fn list_members(&self, role_id: Option<DbId>) -> Result<Vec<Member>, sqlx::Error> {
        self.inner.list_members(role_id).await
    }

    async fn set_member_role(
        &self,
        id: DbId,
        role_id: Option<DbId>,
        role_effective_from: Option<Date>,
    ) -> Result<Option<Member>, sqlx::Error> {
        self.check()?;
        self.inner.set_member_role(id, role_id, role_effective_from).await
    }

    async fn count_members_with_role(&self, role_id: DbId) -> Result<i64, sqlx::Error> {
        self.inner.count_members_with_role(role_id).await
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        self.check()
    }
}
