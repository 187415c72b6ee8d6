//! obras-dashboard library - read-only summary dashboard
//!
//! Serves two grouped counts of works (per project and per crew, split by
//! work type) as JSON and as a static HTML page that draws them.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (read-only)
    pub db: SqlitePool,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    let api = Router::new()
        .route("/api/summary/projects", get(api::get_project_summary))
        .route("/api/summary/crews", get(api::get_crew_summary));

    let ui = Router::new()
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .merge(api::health_routes());

    Router::new()
        .merge(api)
        .merge(ui)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
