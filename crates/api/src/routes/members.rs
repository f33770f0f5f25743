//! Route definitions for the `/admin/members` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::members;
use crate::state::AppState;

/// Routes mounted at `/admin/members`.
///
/// ```text
/// GET /               -> list_members
/// GET /{id}           -> get_member
/// PUT /{id}/role      -> assign_role
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(members::list_members))
        .route("/{id}", get(members::get_member))
        .route("/{id}/role", put(members::assign_role))
}
