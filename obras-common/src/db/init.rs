//! Database initialization
//!
//! Opens (creating if missing) the obras database and brings the schema up:
//! tables are created from the declarative definitions in `table_schemas`
//! on first run and checked for drift on every later run.

use crate::db::table_schemas::sync_all_table_schemas;
use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::{info, warn};

/// Open the database at `database_url` and create tables if needed
pub async fn init_database(database_url: &str) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    // The importer is a single sequential writer
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    info!("Opened database: {}", database_url);

    init_schema(&pool).await?;

    Ok(pool)
}

/// Create all tables on an already-open pool
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query("PRAGMA foreign_keys = ON").execute(pool).await?;

    let drift = sync_all_table_schemas(pool).await?;
    if !drift.is_empty() {
        warn!(
            "Database schema differs from the expected definition in {} place(s); see warnings above",
            drift.len()
        );
    }

    Ok(())
}
