pub mod access;
pub mod health;
pub mod members;
pub mod roles;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /features                         feature catalog (auth required)
/// /me/access                        caller's access summary (auth required)
/// /me/access/{feature_id}           caller's decision for one feature
///
/// /admin/roles                      list, create (Role Management page)
/// /admin/roles/{id}                 get, update, delete
///
/// /admin/members                    list, ?role_id= filter (Member Role Assignment page)
/// /admin/members/{id}               get
/// /admin/members/{id}/role          assign or clear role (PUT)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(access::router())
        .nest("/admin/roles", roles::router())
        .nest("/admin/members", members::router())
}
