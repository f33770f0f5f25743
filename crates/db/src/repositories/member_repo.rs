//! Repository for the `members` table.

use agcas_core::types::{Date, DbId};
use sqlx::PgPool;

use crate::models::member::{CreateMember, Member};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, email, full_name, role_id, role_effective_from, created_at, updated_at";

/// Provides the member operations this service owns.
pub struct MemberRepo;

impl MemberRepo {
    /// Insert a new member, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateMember) -> Result<Member, sqlx::Error> {
        let query = format!(
            "INSERT INTO members (email, full_name, role_id, role_effective_from)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(&input.email)
            .bind(&input.full_name)
            .bind(input.role_id)
            .bind(input.role_effective_from)
            .fetch_one(pool)
            .await
    }

    /// Find a member by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Member>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM members WHERE id = $1");
        sqlx::query_as::<_, Member>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List members ordered by email, optionally only those holding `role_id`.
    pub async fn list(pool: &PgPool, role_id: Option<DbId>) -> Result<Vec<Member>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM members
             WHERE ($1::BIGINT IS NULL OR role_id = $1)
             ORDER BY email ASC"
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(role_id)
            .fetch_all(pool)
            .await
    }

    /// Overwrite a member's role binding in a single statement.
    ///
    /// Both columns are always written, so `None` clears them. Returns `None`
    /// if no row with the given `id` exists.
    pub async fn set_role(
        pool: &PgPool,
        id: DbId,
        role_id: Option<DbId>,
        role_effective_from: Option<Date>,
    ) -> Result<Option<Member>, sqlx::Error> {
        let query = format!(
            "UPDATE members SET
                role_id = $2,
                role_effective_from = $3,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(id)
            .bind(role_id)
            .bind(role_effective_from)
            .fetch_optional(pool)
            .await
    }

    /// Count members whose `role_id` points at the given role.
    pub async fn count_with_role(pool: &PgPool, role_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM members WHERE role_id = $1")
            .bind(role_id)
            .fetch_one(pool)
            .await
    }
}
