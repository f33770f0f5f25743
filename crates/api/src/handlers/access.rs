//! Handlers for the caller's own access and the feature catalog.
//!
//! Pages call these to decide what to render. Every response is computed
//! from the request's [`AuthContext`].

use agcas_core::access::{AccessDecision, AccessRequirement};
use agcas_core::features::{catalog, Feature};
use agcas_core::roles::LayoutTheme;
use agcas_core::types::DbId;
use axum::extract::Path;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::context::AuthContext;
use crate::response::DataResponse;

/// Response body for `GET /me/access`.
#[derive(Debug, Serialize)]
pub struct AccessSummary {
    pub member_id: DbId,
    pub role_id: Option<DbId>,
    pub role_name: Option<String>,
    pub is_admin: bool,
    pub landing_page: String,
    pub layout_theme: LayoutTheme,
    pub show_tours: bool,
    pub excluded_features: Vec<String>,
}

/// Response body for `GET /me/access/{feature_id}`.
#[derive(Debug, Serialize)]
pub struct FeatureAccess {
    pub feature: String,
    /// Whether the catalog knows this identifier.
    pub known: bool,
    pub decision: AccessDecision,
}

/// GET /api/v1/features
///
/// The feature catalog for the role editor.
pub async fn list_features(_ctx: AuthContext) -> AppResult<impl IntoResponse> {
    Ok(Json(DataResponse { data: catalog() }))
}

/// GET /api/v1/me/access
pub async fn my_access(ctx: AuthContext) -> AppResult<impl IntoResponse> {
    let role = ctx.role.as_ref();
    let summary = AccessSummary {
        member_id: ctx.member.id,
        role_id: role.map(|r| r.id),
        role_name: role.map(|r| r.name.clone()),
        is_admin: ctx.is_admin(),
        landing_page: ctx.landing_page().to_string(),
        layout_theme: role.map_or(LayoutTheme::Default, |r| r.theme()),
        show_tours: role.map_or(true, |r| r.show_tours),
        excluded_features: role
            .map(|r| r.excluded_features.clone())
            .unwrap_or_default(),
    };
    Ok(Json(DataResponse { data: summary }))
}

/// GET /api/v1/me/access/{feature_id}
///
/// Catalog entries are checked with their own requirement (admin pages
/// also need the admin flag). Unknown identifiers are only checked against
/// the role's exclusions.
pub async fn feature_access(
    ctx: AuthContext,
    Path(feature_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let (known, decision) = match Feature::from_id(&feature_id) {
        Some(feature) => (true, ctx.check(AccessRequirement::for_feature(feature))),
        None if ctx.is_feature_excluded(&feature_id) => (false, AccessDecision::Denied),
        None => (false, AccessDecision::Authorized),
    };

    Ok(Json(DataResponse {
        data: FeatureAccess {
            feature: feature_id,
            known,
            decision,
        },
    }))
}
