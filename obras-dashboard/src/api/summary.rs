//! Summary API: works counted per group and work type

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::db::summary::{self, GroupBy, SummaryRow};
use crate::AppState;

/// Body of both summary endpoints
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub group_by: GroupBy,
    pub rows: Vec<SummaryRow>,
}

/// GET /api/summary/projects
pub async fn get_project_summary(
    State(state): State<AppState>,
) -> Result<Json<SummaryResponse>, SummaryError> {
    summary_for(&state, GroupBy::Project).await
}

/// GET /api/summary/crews
pub async fn get_crew_summary(
    State(state): State<AppState>,
) -> Result<Json<SummaryResponse>, SummaryError> {
    summary_for(&state, GroupBy::Crew).await
}

async fn summary_for(state: &AppState, group_by: GroupBy) -> Result<Json<SummaryResponse>, SummaryError> {
    let rows = summary::works_by(&state.db, group_by).await?;
    Ok(Json(SummaryResponse { group_by, rows }))
}

/// Summary API errors
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl IntoResponse for SummaryError {
    fn into_response(self) -> Response {
        error!("Summary query failed: {}", self);

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
