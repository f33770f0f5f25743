//! Feature gate evaluator.
//!
//! Pure functions of a role snapshot. A missing role (member without an
//! assignment, or whose assignment points at a deleted role) is unrestricted
//! by the feature check and is never an administrator.
//!
//! Guarded operations go through [`check_access`], which also models the
//! window where the caller's role has not been resolved yet: that state is
//! [`AccessDecision::Loading`] and never grants access.

use serde::Serialize;

use crate::features::{Feature, FeatureCategory};
use crate::roles::{RoleGrants, DEFAULT_LANDING_PAGE};

/// `true` iff a role is present and lists `feature_id` in its exclusions.
///
/// Unknown identifiers are never excluded.
pub fn is_feature_excluded<R: RoleGrants + ?Sized>(role: Option<&R>, feature_id: &str) -> bool {
    role.is_some_and(|r| r.excluded_features().iter().any(|f| f == feature_id))
}

/// `true` iff a role is present and flagged as admin.
pub fn is_admin<R: RoleGrants + ?Sized>(role: Option<&R>) -> bool {
    role.is_some_and(|r| r.is_admin())
}

/// The page a member lands on after sign-in.
pub fn resolve_landing_page<R: RoleGrants + ?Sized>(role: Option<&R>) -> &str {
    role.map_or(DEFAULT_LANDING_PAGE, |r| r.default_landing_page())
}

// ---------------------------------------------------------------------------
// Three-state decisions
// ---------------------------------------------------------------------------

/// Whether the caller's role is known yet.
#[derive(Debug)]
pub enum RoleResolution<'a, R: ?Sized> {
    /// The role lookup has not completed.
    Pending,
    /// The lookup completed; `None` means the member has no role.
    Resolved(Option<&'a R>),
}

// Manual impls: derives would require `R: Clone`.
impl<R: ?Sized> Clone for RoleResolution<'_, R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: ?Sized> Copy for RoleResolution<'_, R> {}

/// What a guarded page or action needs from the caller's role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccessRequirement {
    /// Feature that must not be excluded, if any.
    pub feature: Option<Feature>,
    /// Whether the role must carry the admin flag.
    pub admin_only: bool,
}

impl AccessRequirement {
    /// A member-facing feature: any role that does not exclude it.
    pub fn feature(feature: Feature) -> Self {
        Self {
            feature: Some(feature),
            admin_only: false,
        }
    }

    /// An administrator page: admin flag plus the page not being excluded.
    pub fn admin_page(feature: Feature) -> Self {
        Self {
            feature: Some(feature),
            admin_only: true,
        }
    }

    /// The requirement a catalog entry carries on its own: admin pages need
    /// the admin flag, everything else only needs to not be excluded.
    pub fn for_feature(feature: Feature) -> Self {
        match feature.category() {
            FeatureCategory::AdminPage => Self::admin_page(feature),
            FeatureCategory::UserPage | FeatureCategory::Element => Self::feature(feature),
        }
    }

    /// Admin flag only, no feature check.
    pub fn admin() -> Self {
        Self {
            feature: None,
            admin_only: true,
        }
    }
}

/// Outcome of an access check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDecision {
    /// Role still unresolved; render nothing and grant nothing.
    Loading,
    Authorized,
    Denied,
}

/// Evaluate a requirement against the caller's role resolution.
pub fn check_access<R: RoleGrants + ?Sized>(
    resolution: RoleResolution<'_, R>,
    requirement: AccessRequirement,
) -> AccessDecision {
    let role = match resolution {
        RoleResolution::Pending => return AccessDecision::Loading,
        RoleResolution::Resolved(role) => role,
    };

    if requirement.admin_only && !is_admin(role) {
        return AccessDecision::Denied;
    }
    if let Some(feature) = requirement.feature {
        if is_feature_excluded(role, feature.id()) {
            return AccessDecision::Denied;
        }
    }
    AccessDecision::Authorized
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
