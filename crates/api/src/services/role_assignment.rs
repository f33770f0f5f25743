//! Member-role assignment.

use agcas_core::assignment::{plan_assignment, AssignmentWrite};
use agcas_core::error::CoreError;
use agcas_core::types::{Date, DbId};
use agcas_db::models::member::Member;
use agcas_db::Store;
use serde::Deserialize;

use crate::error::AppResult;

/// Request body for `PUT /admin/members/{id}/role`.
///
/// A null or missing `role_id` clears the member's role.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssignRoleRequest {
    #[serde(default)]
    pub role_id: Option<DbId>,
    #[serde(default)]
    pub effective_from: Option<Date>,
}

/// Bind `member_id` to the requested role, or clear it.
///
/// All validation happens before the single store write, so a rejected
/// request leaves the member unchanged.
pub async fn assign_role(
    store: &dyn Store,
    member_id: DbId,
    request: AssignRoleRequest,
) -> AppResult<Member> {
    let write = match request.role_id {
        None => AssignmentWrite::CLEARED,
        Some(role_id) => {
            let role = store
                .find_role(role_id)
                .await?
                .ok_or(CoreError::role_not_found(role_id))?;
            plan_assignment(
                role.id,
                role.requires_effective_from_date,
                request.effective_from,
            )?
        }
    };

    let member = store
        .set_member_role(member_id, write.role_id, write.role_effective_from)
        .await?
        .ok_or(CoreError::member_not_found(member_id))?;

    tracing::info!(
        member_id,
        role_id = ?member.role_id,
        effective_from = ?member.role_effective_from,
        "Member role assigned",
    );
    Ok(member)
}
