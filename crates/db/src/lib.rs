//! Persistence for puzzle boards.
//!
//! [`store::BoardStore`] is the seam the rest of the service talks to. It has
//! two implementations: [`pg_store::PgBoardStore`] over PostgreSQL (backed by
//! the zero-sized [`repositories::BoardRepo`]) and
//! [`memory::MemoryBoardStore`] for local development and tests.

pub mod memory;
pub mod models;
pub mod pg_store;
pub mod repositories;
pub mod store;

use sqlx::postgres::PgPoolOptions;

pub use memory::MemoryBoardStore;
pub use pg_store::PgBoardStore;
pub use store::{BoardStore, SharedStore, StoreError};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
