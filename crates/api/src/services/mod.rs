//! Role registry and member-role assignment.
//!
//! Both services work against `&dyn Store` and perform no authorization:
//! callers reach them only through page-guarded handlers.

pub mod role_assignment;
pub mod role_registry;
