//! Member entity model and DTOs.

use agcas_core::assignment::assignment_is_active;
use agcas_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::role::Role;

/// A member row from the `members` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Member {
    pub id: DbId,
    pub email: String,
    pub full_name: Option<String>,
    /// May point at a role that has since been deleted.
    pub role_id: Option<DbId>,
    pub role_effective_from: Option<Date>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a member. Members normally arrive through the CRM
/// sync; this exists for seeding and tests.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMember {
    pub email: String,
    pub full_name: Option<String>,
    #[serde(default)]
    pub role_id: Option<DbId>,
    #[serde(default)]
    pub role_effective_from: Option<Date>,
}

impl CreateMember {
    pub fn with_email(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            full_name: None,
            role_id: None,
            role_effective_from: None,
        }
    }
}

/// Member representation for the assignment screen, with the role resolved.
#[derive(Debug, Clone, Serialize)]
pub struct MemberResponse {
    pub id: DbId,
    pub email: String,
    pub full_name: Option<String>,
    pub role_id: Option<DbId>,
    /// `None` when unassigned or when `role_id` is dangling.
    pub role_name: Option<String>,
    pub role_effective_from: Option<Date>,
    /// Whether the effective-from date has been reached.
    pub role_active: bool,
    pub updated_at: Timestamp,
}

impl MemberResponse {
    /// Build a view from a member row and the already-resolved role.
    pub fn build(member: &Member, role: Option<&Role>, today: Date) -> Self {
        Self {
            id: member.id,
            email: member.email.clone(),
            full_name: member.full_name.clone(),
            role_id: member.role_id,
            role_name: role.map(|r| r.name.clone()),
            role_effective_from: member.role_effective_from,
            role_active: role.is_some()
                && assignment_is_active(member.role_effective_from, today),
            updated_at: member.updated_at,
        }
    }
}
