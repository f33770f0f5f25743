//! Per-request access context.
//!
//! Resolves the caller's member row and role once, then hands the pair to
//! the handler. Every access decision in the service is made from this
//! value; nothing reads the role from anywhere else.

use agcas_core::access::{
    check_access, is_admin, is_feature_excluded, resolve_landing_page, AccessDecision,
    AccessRequirement, RoleResolution,
};
use agcas_core::error::CoreError;
use agcas_db::models::member::Member;
use agcas_db::models::role::Role;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// The authenticated member and their resolved role.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub member: Member,
    /// `None` when the member has no role or the role was deleted.
    pub role: Option<Role>,
}

impl AuthContext {
    pub fn resolution(&self) -> RoleResolution<'_, Role> {
        RoleResolution::Resolved(self.role.as_ref())
    }

    pub fn is_admin(&self) -> bool {
        is_admin(self.role.as_ref())
    }

    pub fn is_feature_excluded(&self, feature_id: &str) -> bool {
        is_feature_excluded(self.role.as_ref(), feature_id)
    }

    pub fn landing_page(&self) -> &str {
        resolve_landing_page(self.role.as_ref())
    }

    pub fn check(&self, requirement: AccessRequirement) -> AccessDecision {
        check_access(self.resolution(), requirement)
    }

    /// Fail with `Forbidden` unless the requirement is `Authorized`.
    pub fn require(&self, requirement: AccessRequirement) -> Result<(), AppError> {
        match self.check(requirement) {
            AccessDecision::Authorized => Ok(()),
            AccessDecision::Denied => {
                tracing::debug!(
                    member_id = self.member.id,
                    role_id = ?self.member.role_id,
                    feature = ?requirement.feature.map(|f| f.id()),
                    admin_only = requirement.admin_only,
                    "Access denied",
                );
                Err(AppError::Core(CoreError::Forbidden(denial_message(
                    requirement,
                ))))
            }
            AccessDecision::Loading => Err(AppError::Core(CoreError::Forbidden(
                "Role not resolved".into(),
            ))),
        }
    }
}

fn denial_message(requirement: AccessRequirement) -> String {
    match (requirement.admin_only, requirement.feature) {
        (true, Some(feature)) => format!("Admin access to {} required", feature.label()),
        (true, None) => "Admin role required".to_string(),
        (false, Some(feature)) => format!("{} is not available for your role", feature.label()),
        (false, None) => "Access denied".to_string(),
    }
}

impl FromRequestParts<AppState> for AuthContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;

        let member = state
            .store
            .find_member(user.member_id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Unknown member".into()))
            })?;

        let role = match member.role_id {
            Some(role_id) => {
                let role = state.store.find_role(role_id).await?;
                if role.is_none() {
                    tracing::warn!(
                        member_id = member.id,
                        role_id,
                        "Member references a deleted role; treating as no role",
                    );
                }
                role
            }
            None => None,
        };

        Ok(AuthContext { member, role })
    }
}
