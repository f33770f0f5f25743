//! Member-role assignment rules.
//!
//! The store write happens elsewhere; this module decides what that write
//! contains, or rejects the request before anything is written.

use crate::error::CoreError;
use crate::types::{Date, DbId};

/// Message surfaced when a dated role is assigned without a date.
pub const EFFECTIVE_FROM_REQUIRED: &str = "Effective From date required";

/// The values to persist on a member after an assignment request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignmentWrite {
    pub role_id: Option<DbId>,
    pub role_effective_from: Option<Date>,
}

impl AssignmentWrite {
    /// Clears both the role and its effective date.
    pub const CLEARED: AssignmentWrite = AssignmentWrite {
        role_id: None,
        role_effective_from: None,
    };
}

/// Decide the write for assigning `role_id` to a member.
///
/// `requires_effective_from_date` comes from the target role. When the role
/// does not require a date, any supplied date is dropped so stale dates from
/// a previous assignment never linger.
pub fn plan_assignment(
    role_id: DbId,
    requires_effective_from_date: bool,
    effective_from: Option<Date>,
) -> Result<AssignmentWrite, CoreError> {
    if !requires_effective_from_date {
        return Ok(AssignmentWrite {
            role_id: Some(role_id),
            role_effective_from: None,
        });
    }

    match effective_from {
        Some(date) => Ok(AssignmentWrite {
            role_id: Some(role_id),
            role_effective_from: Some(date),
        }),
        None => Err(CoreError::Validation(EFFECTIVE_FROM_REQUIRED.to_string())),
    }
}

/// Whether a dated assignment has taken effect on `today`.
///
/// Undated assignments are always active. This is informational and does
/// not change which role the evaluator sees.
pub fn assignment_is_active(effective_from: Option<Date>, today: Date) -> bool {
    effective_from.map_or(true, |date| date <= today)
}
