//! Domain error taxonomy shared by every layer of the service.

use crate::types::DbId;

/// Errors raised by domain rules before any store write happens.
///
/// Store failures are not represented here; they travel as `sqlx::Error`
/// and are mapped at the HTTP boundary.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced role or member id does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// A required field is missing or a cross-field rule was violated.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The caller could not be identified.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The caller was identified but the access decision was `Denied`.
    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl CoreError {
    /// Shorthand for a missing role.
    pub fn role_not_found(id: DbId) -> Self {
        CoreError::NotFound { entity: "Role", id }
    }

    /// Shorthand for a missing member.
    pub fn member_not_found(id: DbId) -> Self {
        CoreError::NotFound {
            entity: "Member",
            id,
        }
    }
}
