//! Postgres persistence for search popularity counters.

pub mod search_counts;

pub use marquee_core::MovieSnapshot;
pub use search_counts::{get_search_count, list_trending, record_search, SearchCountRow};

use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;

// Resolved relative to this crate's manifest: <workspace-root>/migrations/
static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations");

/// Connection pool sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 1,
            acquire_timeout_secs: 10,
        }
    }
}

impl PoolConfig {
    #[must_use]
    pub fn from_app_config(config: &marquee_core::AppConfig) -> Self {
        Self {
            max_connections: config.db_max_connections,
            min_connections: config.db_min_connections,
            acquire_timeout_secs: config.db_acquire_timeout_secs,
        }
    }

    fn options(self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(Duration::from_secs(self.acquire_timeout_secs))
    }
}

#[derive(Debug, Error)]
pub enum DbError {
    #[error("DATABASE_URL is not set")]
    MissingDatabaseUrl,
    #[error("search term is empty after normalization")]
    EmptySearchTerm,
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
    #[error(transparent)]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Opens a pool against `database_url`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if no connection can be established.
pub async fn connect_pool(database_url: &str, config: PoolConfig) -> Result<PgPool, DbError> {
    let pool = config.options().connect(database_url).await?;
    Ok(pool)
}

/// Opens a pool from the `DATABASE_URL` and `DB_*` settings.
///
/// # Errors
///
/// Returns [`DbError::MissingDatabaseUrl`] if no URL is configured, or
/// [`DbError::Sqlx`] if no connection can be established.
pub async fn connect_pool_from_config(config: &marquee_core::AppConfig) -> Result<PgPool, DbError> {
    let Some(database_url) = config.database_url.as_deref() else {
        return Err(DbError::MissingDatabaseUrl);
    };
    connect_pool(database_url, PoolConfig::from_app_config(config)).await
}

/// Applies pending migrations and returns how many were new.
///
/// # Errors
///
/// Returns [`DbError::Migration`] if a migration fails.
pub async fn run_migrations(pool: &PgPool) -> Result<usize, DbError> {
    // Missing bookkeeping table means a fresh database.
    let known: Vec<i64> = sqlx::query_scalar("SELECT version FROM _sqlx_migrations WHERE success")
        .fetch_all(pool)
        .await
        .unwrap_or_default();

    MIGRATOR.run(pool).await?;

    let pending = MIGRATOR
        .iter()
        .filter(|m| !m.migration_type.is_down_migration() && !known.contains(&m.version))
        .count();
    Ok(pending)
}

/// Round-trips `SELECT 1` through the pool.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn health_check(pool: &PgPool) -> Result<(), DbError> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
