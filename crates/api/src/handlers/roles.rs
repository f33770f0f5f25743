//! Handlers for the `/admin/roles` resource (Role Management page).
//!
//! All handlers require an admin role that does not exclude
//! `page_admin_RoleManagement`.

use agcas_core::types::DbId;
use agcas_db::models::role::{CreateRole, UpdateRole};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::rbac::{RequirePage, RoleManagementPage};
use crate::response::DataResponse;
use crate::services::role_registry;
use crate::state::AppState;

type Guard = RequirePage<RoleManagementPage>;

/// GET /api/v1/admin/roles
pub async fn list_roles(
    RequirePage(_admin, ..): Guard,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let roles = role_registry::list_roles(state.store.as_ref()).await?;
    Ok(Json(DataResponse { data: roles }))
}

/// POST /api/v1/admin/roles
///
/// Create a role. Returns 201 Created.
pub async fn create_role(
    RequirePage(admin, ..): Guard,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateRole>,
) -> AppResult<impl IntoResponse> {
    let role = role_registry::create_role(state.store.as_ref(), input).await?;

    tracing::info!(role_id = role.id, member_id = admin.member.id, "Role created via API");

    Ok((StatusCode::CREATED, Json(DataResponse { data: role })))
}

/// GET /api/v1/admin/roles/{id}
pub async fn get_role(
    RequirePage(_admin, ..): Guard,
    State(state): State<AppState>,
    Path(role_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let role = role_registry::get_role(state.store.as_ref(), role_id).await?;
    Ok(Json(DataResponse { data: role }))
}

/// PUT /api/v1/admin/roles/{id}
///
/// Partially update a role.
pub async fn update_role(
    RequirePage(admin, ..): Guard,
    State(state): State<AppState>,
    Path(role_id): Path<DbId>,
    AppJson(input): AppJson<UpdateRole>,
) -> AppResult<impl IntoResponse> {
    let role = role_registry::update_role(state.store.as_ref(), role_id, input).await?;

    tracing::info!(role_id, member_id = admin.member.id, "Role updated via API");

    Ok(Json(DataResponse { data: role }))
}

/// DELETE /api/v1/admin/roles/{id}
///
/// Delete a role. Members holding it are not reassigned; the response
/// reports how many were left pointing at it.
pub async fn delete_role(
    RequirePage(admin, ..): Guard,
    State(state): State<AppState>,
    Path(role_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deletion = role_registry::delete_role(state.store.as_ref(), role_id).await?;

    tracing::info!(role_id, member_id = admin.member.id, "Role deleted via API");

    Ok(Json(DataResponse { data: deletion }))
}
