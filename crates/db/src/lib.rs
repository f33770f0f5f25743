//! Persistence for roles and members.
//!
//! - [`models`] -- row structs and request DTOs.
//! - [`repositories`] -- sqlx queries against PostgreSQL.
//! - [`store`] -- the [`Store`] traits the service is written against, with
//!   the PostgreSQL implementation [`PgStore`].
//! - [`memory`] -- an in-process [`MemoryStore`] for tests and local demos.

use sqlx::postgres::PgPoolOptions;

pub mod memory;
pub mod models;
pub mod repositories;
pub mod store;

pub use memory::MemoryStore;
pub use store::{MemberStore, PgStore, RoleStore, Store};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(20)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations in `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
