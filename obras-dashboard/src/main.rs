//! obras-dashboard - read-only summary dashboard for the obras database
//!
//! Serves the per-project and per-crew work counts on 127.0.0.1.

use anyhow::{Context, Result};
use clap::Parser;
use obras_common::config::{load_dotenv, resolve_database_url, DATABASE_URL_ENV};
use obras_dashboard::{build_router, db, AppState};
use tracing::{error, info};

/// Default listening port
const DEFAULT_PORT: u16 = 5780;

#[derive(Parser, Debug)]
#[command(name = "obras-dashboard")]
#[command(about = "Serve the construction works summary dashboard", long_about = None)]
#[command(version)]
struct Args {
    /// Database URL (overrides OBRAS_DATABASE_URL and the config file)
    #[arg(short, long)]
    database_url: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "OBRAS_DASHBOARD_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,
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

    // Build identification before any database delay
    info!(
        "Starting obras-dashboard v{} [{}] built {} ({})",
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
    info!("Database: {}", database_url);

    let pool = match db::connect_readonly(&database_url).await {
        Ok(pool) => {
            info!("✓ Connected to database (read-only)");
            pool
        }
        Err(e) => {
            error!("Failed to connect to database: {:#}", e);
            return Err(e);
        }
    };

    let app = build_router(AppState::new(pool));

    let addr = format!("127.0.0.1:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("obras-dashboard listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
