//! Store traits the service is written against.
//!
//! Handlers and services only see `dyn Store`, so the same code runs on
//! PostgreSQL in production and on [`crate::MemoryStore`] in tests. Every
//! method is a single async call; failures surface as `sqlx::Error` and
//! leave the store untouched.

use agcas_core::types::{Date, DbId};
use async_trait::async_trait;

use crate::models::member::{CreateMember, Member};
use crate::models::role::{CreateRole, Role, UpdateRole};
use crate::repositories::{MemberRepo, RoleRepo};
use crate::DbPool;

/// Storage for roles.
#[async_trait]
pub trait RoleStore: Send + Sync {
    async fn create_role(&self, input: &CreateRole) -> Result<Role, sqlx::Error>;
    async fn find_role(&self, id: DbId) -> Result<Option<Role>, sqlx::Error>;
    /// All roles, sorted by name.
    async fn list_roles(&self) -> Result<Vec<Role>, sqlx::Error>;
    async fn update_role(&self, id: DbId, input: &UpdateRole)
        -> Result<Option<Role>, sqlx::Error>;
    async fn delete_role(&self, id: DbId) -> Result<bool, sqlx::Error>;
    async fn clear_default_except(&self, keep_id: DbId) -> Result<u64, sqlx::Error>;
}

/// Storage for the member fields this service owns.
#[async_trait]
pub trait MemberStore: Send + Sync {
    async fn create_member(&self, input: &CreateMember) -> Result<Member, sqlx::Error>;
    async fn find_member(&self, id: DbId) -> Result<Option<Member>, sqlx::Error>;
    async fn list_members(&self, role_id: Option<DbId>) -> Result<Vec<Member>, sqlx::Error>;
    /// Overwrite both role columns in one write.
    async fn set_member_role(
        &self,
        id: DbId,
        role_id: Option<DbId>,
        role_effective_from: Option<Date>,
    ) -> Result<Option<Member>, sqlx::Error>;
    async fn count_members_with_role(&self, role_id: DbId) -> Result<i64, sqlx::Error>;
    /// Liveness check for `/health`.
    async fn ping(&self) -> Result<(), sqlx::Error>;
}

/// Everything the service needs from persistence.
pub trait Store: RoleStore + MemberStore {}

impl<T: RoleStore + MemberStore> Store for T {}

// ---------------------------------------------------------------------------
// PostgreSQL
// ---------------------------------------------------------------------------

/// [`Store`] backed by a PostgreSQL pool.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleStore for PgStore {
    async fn create_role(&self, input: &CreateRole) -> Result<Role, sqlx::Error> {
        RoleRepo::create(&self.pool, input).await
    }

    async fn find_role(&self, id: DbId) -> Result<Option<Role>, sqlx::Error> {
        RoleRepo::find_by_id(&self.pool, id).await
    }

    async fn list_roles(&self) -> Result<Vec<Role>, sqlx::Error> {
        RoleRepo::list(&self.pool).await
    }

    async fn update_role(
        &self,
        id: DbId,
        input: &UpdateRole,
    ) -> Result<Option<Role>, sqlx::Error> {
        RoleRepo::update(&self.pool, id, input).await
    }

    async fn delete_role(&self, id: DbId) -> Result<bool, sqlx::Error> {
        RoleRepo::delete(&self.pool, id).await
    }

    async fn clear_default_except(&self, keep_id: DbId) -> Result<u64, sqlx::Error> {
        RoleRepo::clear_default_except(&self.pool, keep_id).await
    }
}

#[async_trait]
impl MemberStore for PgStore {
    async fn create_member(&self, input: &CreateMember) -> Result<Member, sqlx::Error> {
        MemberRepo::create(&self.pool, input).await
    }

    async fn find_member(&self, id: DbId) -> Result<Option<Member>, sqlx::Error> {
        MemberRepo::find_by_id(&self.pool, id).await
    }

    async fn list_members(&self, role_id: Option<DbId>) -> Result<Vec<Member>, sqlx::Error> {
        MemberRepo::list(&self.pool, role_id).await
    }

    async fn set_member_role(
        &self,
        id: DbId,
        role_id: Option<DbId>,
        role_effective_from: Option<Date>,
    ) -> Result<Option<Member>, sqlx::Error> {
        MemberRepo::set_role(&self.pool, id, role_id, role_effective_from).await
    }

    async fn count_members_with_role(&self, role_id: DbId) -> Result<i64, sqlx::Error> {
        MemberRepo::count_with_role(&self.pool, role_id).await
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        crate::health_check(&self.pool).await
    }
}
