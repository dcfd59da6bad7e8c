// ABOUTME: Database connection management for the spec store
// ABOUTME: Pool construction, SQLite pragmas, and embedded migrations

use std::path::Path;
use std::time::Duration;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::Result;

/// Embedded migrations for the six spec tables.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Open the spec database, configure SQLite, and run migrations.
///
/// The returned pool is the process-wide store handle: constructed once at
/// startup, passed to whoever needs it, closed on shutdown.
pub async fn connect(database_path: &Path) -> Result<SqlitePool> {
    if let Some(parent) = database_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let database_url = format!("sqlite:{}?mode=rwc", database_path.display());
    debug!("Connecting to database: {}", database_url);

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(30))
        .connect(&database_url)
        .await?;

    sqlx::query("PRAGMA journal_mode = WAL").execute(&pool).await?;
    sqlx::query("PRAGMA foreign_keys = ON").execute(&pool).await?;
    sqlx::query("PRAGMA synchronous = NORMAL").execute(&pool).await?;

    info!("Database connection established");

    MIGRATOR.run(&pool).await?;
    debug!("Database migrations completed");

    Ok(pool)
}
