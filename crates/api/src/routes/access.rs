//! Route definitions for the caller's access and the feature catalog.

use axum::routing::get;
use axum::Router;

use crate::handlers::access;
use crate::state::AppState;

/// Routes merged at the `/api/v1` root.
///
/// ```text
/// GET /features                 -> list_features
/// GET /me/access                -> my_access
/// GET /me/access/{feature_id}   -> feature_access
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/features", get(access::list_features))
        .route("/me/access", get(access::my_access))
        .route("/me/access/{feature_id}", get(access::feature_access))
}
