//! Database layer for the billing store.
//!
//! # Tables
//!
//! - `products` - Catalog with live stock counts (see [`catalog`])
//! - `customers` - One row per registered customer, keyed by bill number
//! - `cart` - In-flight cart lines, purged when a bill is paid
//! - `paid_bills` - Immutable record of finalized bills (see [`ledger`])
//!
//! # Migrations
//!
//! Migrations are embedded from `crates/billing/migrations/` and run via:
//! ```bash
//! cargo run -p tillpoint-cli -- migrate
//! ```

pub mod catalog;
pub mod ledger;

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use thiserror::Error;

pub use catalog::CatalogStore;
pub use ledger::LedgerStore;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique mobile or email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `SQLite` connection pool with sensible defaults.
///
/// The database file is created on first use and foreign keys are enforced
/// on every connection.
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g. `sqlite://tillpoint.db`)
/// * `max_connections` - Upper bound on pooled connections
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(
    database_url: &str,
    max_connections: u32,
) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Create an in-memory pool with the schema applied, for tests and demos.
///
/// A single pooled connection keeps every caller on the same in-memory
/// database.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection or migration fails.
pub async fn create_memory_pool() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    MIGRATOR.run(&pool).await?;
    Ok(pool)
}
