//! obras-import - load the works spreadsheet into the obras database
//!
//! Idempotent: rows whose `ID obra` is already stored are skipped, so the
//! same workbook can be imported any number of times.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use obras_common::config::{load_dotenv, resolve_database_url, DATABASE_URL_ENV};
use obras_common::db::init_database;
use obras_import::columns::DEFAULT_SHEET;
use obras_import::spreadsheet::read_sheet;
use obras_import::Importer;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "obras-import")]
#[command(about = "Import construction works from a spreadsheet", long_about = None)]
#[command(version)]
struct Args {
    /// Workbook to import (.xlsx, .xls or .ods)
    #[arg(default_value = "Datos.xlsx")]
    file: PathBuf,

    /// Sheet holding the works table
    #[arg(short, long, default_value = DEFAULT_SHEET)]
    sheet: String,

    /// Database URL (overrides OBRAS_DATABASE_URL and the config file)
    #[arg(short, long)]
    database_url: Option<String>,

    /// Create the tables and exit without importing
    #[arg(long)]
    init_only: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let env_file = load_dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting obras-import v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    if let Some(path) = &env_file {
        info!("Loaded environment from {}", path.display());
    }

    let args = Args::parse();

    let database_url = resolve_database_url(args.database_url.as_deref(), DATABASE_URL_ENV)
        .context("Failed to resolve database URL")?;

    let pool = init_database(&database_url)
        .await
        .with_context(|| format!("Failed to open database {}", database_url))?;
    info!("✓ Schema ready");

    if args.init_only {
        info!("--init-only given, nothing imported");
        return Ok(());
    }

    let table = read_sheet(&args.file, &args.sheet)
        .with_context(|| format!("Failed to read sheet '{}' of {}", args.sheet, args.file.display()))?;

    if table.is_empty() {
        warn!("No data rows found in {}", args.file.display());
    }

    let report = Importer::new(pool.clone())
        .run(&table)
        .await
        .context("Import aborted")?;

    if report.rows_not_inserted() > 0 {
        warn!(
            "{} row(s) were not inserted ({} skipped, {} rejected, {} failed)",
            report.rows_not_inserted(),
            report.works_skipped,
            report.rows_rejected,
            report.rows_failed
        );
    }

    pool.close().await;
    Ok(())
}
