//! Page guards.
//!
//! Each guarded admin page is a marker type naming its catalog entry. The
//! [`RequirePage`] extractor resolves the caller's [`AuthContext`] and
//! rejects the request unless the role is admin and does not exclude the
//! page.

use std::marker::PhantomData;

use agcas_core::access::AccessRequirement;
use agcas_core::features::Feature;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use super::context::AuthContext;
use crate::error::AppError;
use crate::state::AppState;

/// An administrator page backed by a catalog entry.
pub trait GuardedPage: Send + Sync + 'static {
    const FEATURE: Feature;
}

/// `page_admin_RoleManagement`.
pub struct RoleManagementPage;

impl GuardedPage for RoleManagementPage {
    const FEATURE: Feature = Feature::RoleManagement;
}

/// `page_admin_MemberRoleAssignment`.
pub struct MemberRoleAssignmentPage;

impl GuardedPage for MemberRoleAssignmentPage {
    const FEATURE: Feature = Feature::MemberRoleAssignment;
}

/// An [`AuthContext`] that passed the access check for page `P`.
///
/// ```ignore
/// async fn list(RequirePage(ctx, ..): RequirePage<RoleManagementPage>) -> AppResult<()> {
///     Ok(())
/// }
/// ```
pub struct RequirePage<P: GuardedPage>(pub AuthContext, pub PhantomData<P>);

impl<P: GuardedPage> FromRequestParts<AppState> for RequirePage<P> {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let ctx = AuthContext::from_request_parts(parts, state).await?;
        ctx.require(AccessRequirement::admin_page(P::FEATURE))?;
        Ok(RequirePage(ctx, PhantomData))
    }
}
