//! Repository for the `roles` table.

use agcas_core::types::DbId;
use sqlx::PgPool;

use crate::models::role::{CreateRole, Role, UpdateRole};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, excluded_features, is_default, is_admin, \
                       show_tours, default_landing_page, layout_theme, \
                       requires_effective_from_date, created_at, updated_at";

/// Provides CRUD operations for roles.
pub struct RoleRepo;

impl RoleRepo {
    /// Insert a new role, returning the created row.
    ///
    /// The caller is responsible for normalizing `input` first.
    pub async fn create(pool: &PgPool, input: &CreateRole) -> Result<Role, sqlx::Error> {
        let query = format!(
            "INSERT INTO roles (name, description, excluded_features, is_default, is_admin,
                                show_tours, default_landing_page, layout_theme,
                                requires_effective_from_date)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Role>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.excluded_features)
            .bind(input.is_default)
            .bind(input.is_admin)
            .bind(input.show_tours)
            .bind(input.landing_page())
            .bind(input.layout_theme.as_str())
            .bind(input.requires_effective_from_date)
            .fetch_one(pool)
            .await
    }

    /// Find a role by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles WHERE id = $1");
        sqlx::query_as::<_, Role>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all roles ordered by name for display.
    pub async fn list(pool: &PgPool) -> Result<Vec<Role>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roles ORDER BY lower(name) ASC, id ASC");
        sqlx::query_as::<_, Role>(&query).fetch_all(pool).await
    }

    /// Update a role. Only non-`None` fields in `input` are applied.
    ///
    /// `description` uses `Option<Option<String>>` so it can be cleared.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRole,
    ) -> Result<Option<Role>, sqlx::Error> {
        let query = format!(
            "UPDATE roles SET
                name = COALESCE($2, name),
                description = CASE WHEN $3 THEN $4 ELSE description END,
                excluded_features = COALESCE($5, excluded_features),
                is_default = COALESCE($6, is_default),
                is_admin = COALESCE($7, is_admin),
                show_tours = COALESCE($8, show_tours),
                default_landing_page = COALESCE($9, default_landing_page),
                layout_theme = COALESCE($10, layout_theme),
                requires_effective_from_date = COALESCE($11, requires_effective_from_date),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Role>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.description.is_some())
            .bind(input.description.as_ref().and_then(|d| d.as_deref()))
            .bind(&input.excluded_features)
            .bind(input.is_default)
            .bind(input.is_admin)
            .bind(input.show_tours)
            .bind(&input.default_landing_page)
            .bind(input.layout_theme.map(|t| t.as_str()))
            .bind(input.requires_effective_from_date)
            .fetch_optional(pool)
            .await
    }

    /// Delete a role. Members referencing it are left untouched.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM roles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Clear `is_default` on every role except `keep_id`.
    ///
    /// Returns the number of roles that lost the flag.
    pub async fn clear_default_except(pool: &PgPool, keep_id: DbId) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE roles SET is_default = false, updated_at = NOW()
             WHERE is_default AND id <> $1",
        )
        .bind(keep_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
