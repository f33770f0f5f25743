//! Authentication and access extractors.
//!
//! - [`auth::AuthUser`] -- the member id from a verified Bearer token.
//! - [`context::AuthContext`] -- the member plus their resolved role.
//! - [`rbac::RequirePage`] -- an [`AuthContext`](context::AuthContext) that
//!   passed the access check for a guarded admin page.

pub mod auth;
pub mod context;
pub mod rbac;
