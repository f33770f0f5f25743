//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod member_repo;
pub mod role_repo;

pub use member_repo::MemberRepo;
pub use role_repo::RoleRepo;
