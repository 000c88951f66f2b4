//! Persistence layer: SQLite pool, schema migrations, and repositories.
//!
//! Repositories are thin statement wrappers. They accept any sqlx
//! executor so the service layer can run several of them inside one
//! transaction.

pub mod notes;
pub mod tag_notes;
pub mod tags;

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

pub use notes::NoteRepository;
pub use tag_notes::TagNoteRepository;
pub use tags::TagRepository;

use crate::error::AppError;

/// Opens a connection pool to the given SQLite url.
///
/// Foreign keys are enforced on every connection so join rows follow
/// their note or tag on delete.
///
/// # Errors
///
/// Returns [`AppError::Database`] if the url is malformed or the database
/// cannot be opened.
pub async fn connect(
    database_url: &str,
    max_connections: u32,
    acquire_timeout: Duration,
) -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect_with(options)
        .await?;
    tracing::info!(database_url, max_connections, "database pool opened");
    Ok(pool)
}

/// Opens a private in-memory database with the schema applied.
///
/// Held on a single never-expiring connection because every SQLite
/// memory connection is its own database.
///
/// # Errors
///
/// Returns [`AppError`] if the database cannot be opened or migrated.
pub async fn connect_in_memory() -> Result<SqlitePool, AppError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;
    migrate(&pool).await?;
    Ok(pool)
}

/// Applies the embedded migrations under `migrations/`.
///
/// # Errors
///
/// Returns [`AppError::Migration`] if a migration fails.
pub async fn migrate(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("database migrations complete");
    Ok(())
}
