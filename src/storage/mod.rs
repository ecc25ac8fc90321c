//! Storage bootstrap shared by the user and goal stores
//!
//! Opens the SQLite pool and applies the schema. The per-resource stores live
//! next to their services (`auth::storage`, `goals::storage`).

use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use thiserror::Error;
use tracing::{info, warn};

/// Errors surfaced by any store backend
#[derive(Debug, Error)]
pub enum StorageError {
    /// A uniqueness constraint rejected the write
    #[error("duplicate value for {0}")]
    Duplicate(String),

    #[error("record not found")]
    NotFound,

    /// A foreign key points at a row that does not exist
    #[error("dangling reference: {0}")]
    MissingReference(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StorageError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Self::Duplicate(db.message().to_string())
            }
            sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                Self::MissingReference(db.message().to_string())
            }
            sqlx::Error::RowNotFound => Self::NotFound,
            _ => Self::Backend(err.to_string()),
        }
    }
}

const USERS_SCHEMA: &str = include_str!("../../migrations/001_create_users_table.sql");
const GOALS_SCHEMA: &str = include_str!("../../migrations/002_create_goals_table.sql");

/// Open a SQLite pool and apply the schema.
///
/// In-memory URLs get a single connection, since every SQLite memory
/// connection is its own database.
pub async fn connect(database_url: &str) -> Result<SqlitePool> {
    info!("Initializing database: {}", database_url);

    let in_memory = database_url.contains(":memory:");
    let mut options = SqliteConnectOptions::from_str(database_url)
        .context("Invalid database URL format")?
        .create_if_missing(true)
        .foreign_keys(true);
    if !in_memory {
        options = options.journal_mode(SqliteJournalMode::Wal);
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(if in_memory { 1 } else { 5 })
        .connect_with(options)
        .await
        .context("Failed to connect to database")?;

    migrate(&pool).await?;
    info!("Database ready");

    Ok(pool)
}

/// Apply the schema. Every statement is idempotent.
pub async fn migrate(pool: &SqlitePool) -> Result<()> {
    for (name, schema) in [("users", USERS_SCHEMA), ("goals", GOALS_SCHEMA)] {
        sqlx::raw_sql(schema)
            .execute(pool)
            .await
            .with_context(|| format!("Failed to run {name} migration"))?;
    }
    Ok(())
}

/// Close the pool, logging instead of failing.
pub async fn close(pool: &SqlitePool) {
    if pool.is_closed() {
        warn!("Database pool already closed");
        return;
    }
    pool.close().await;
    info!("Database pool closed");
}
