//! Handlers for the `/admin/members` resource (Member Role Assignment page).

use agcas_core::error::CoreError;
use agcas_core::types::DbId;
use agcas_db::models::member::{Member, MemberResponse};
use agcas_db::models::role::Role;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::rbac::{MemberRoleAssignmentPage, RequirePage};
use crate::response::DataResponse;
use crate::services::role_assignment::{self, AssignRoleRequest};
use crate::state::AppState;

type Guard = RequirePage<MemberRoleAssignmentPage>;

/// Query parameters for `GET /admin/members`.
#[derive(Debug, Deserialize)]
pub struct MemberListParams {
    /// Only members whose `role_id` equals this value.
    pub role_id: Option<DbId>,
}

/// GET /api/v1/admin/members
///
/// List members with their role names resolved.
pub async fn list_members(
    RequirePage(_admin, ..): Guard,
    State(state): State<AppState>,
    Query(params): Query<MemberListParams>,
) -> AppResult<impl IntoResponse> {
    let members = state.store.list_members(params.role_id).await?;

    // Pre-fetch all roles to avoid one lookup per member.
    let roles = state.store.list_roles().await?;
    let today = chrono::Utc::now().date_naive();

    let data: Vec<MemberResponse> = members
        .iter()
        .map(|m| MemberResponse::build(m, find_role(&roles, m.role_id), today))
        .collect();

    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/admin/members/{id}
pub async fn get_member(
    RequirePage(_admin, ..): Guard,
    State(state): State<AppState>,
    Path(member_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let member = state
        .store
        .find_member(member_id)
        .await?
        .ok_or(AppError::Core(CoreError::member_not_found(member_id)))?;
    let data = member_response(&state, &member).await?;
    Ok(Json(DataResponse { data }))
}

/// PUT /api/v1/admin/members/{id}/role
///
/// Assign a role (with an effective-from date when the role requires one),
/// or clear it with `{"role_id": null}`.
pub async fn assign_role(
    RequirePage(admin, ..): Guard,
    State(state): State<AppState>,
    Path(member_id): Path<DbId>,
    AppJson(input): AppJson<AssignRoleRequest>,
) -> AppResult<impl IntoResponse> {
    let member = role_assignment::assign_role(state.store.as_ref(), member_id, input).await?;

    tracing::info!(
        member_id,
        assigned_by = admin.member.id,
        role_id = ?member.role_id,
        "Member role changed via API",
    );

    let data = member_response(&state, &member).await?;
    Ok(Json(DataResponse { data }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn find_role(roles: &[Role], role_id: Option<DbId>) -> Option<&Role> {
    role_id.and_then(|id| roles.iter().find(|r| r.id == id))
}

async fn member_response(
    state: &AppState,
    member: &Member,
) -> AppResult<MemberResponse> {
    let role = match member.role_id {
        Some(role_id) => state.store.find_role(role_id).await?,
        None => None,
    };
    let today = chrono::Utc::now().date_naive();
    Ok(MemberResponse::build(member, role.as_ref(), today))
}
