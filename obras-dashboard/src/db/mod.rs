//! Database access layer for obras-dashboard
//!
//! All connections are read-only; the importer is the only writer.

use std::str::FromStr;

use anyhow::{Context, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

pub mod summary;

/// Connect to an existing database in read-only mode
///
/// Never creates the file: a missing database means nothing was imported yet.
pub async fn connect_readonly(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("Invalid database URL: {}", database_url))?
        .read_only(true)
        .create_if_missing(false);

    let pool = SqlitePoolOptions::new()
        .max_connections(4)
        .connect_with(options)
        .await
        .with_context(|| {
            format!(
                "Failed to open {} read-only\nRun obras-import first to create and fill the database.",
                database_url
            )
        })?;

    Ok(pool)
}
