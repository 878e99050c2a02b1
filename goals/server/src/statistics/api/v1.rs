use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use goals_core::GoalStatistics;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::goal::GoalState;
use crate::web::api::ErrorResponse;

/// Goal counts per status.
#[derive(Debug, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct StatisticsResponse {
    /// Number of goals
    pub total: usize,
    /// Goals with status `completed`
    pub completed: usize,
    /// Goals with status `inProgress`
    pub in_progress: usize,
    /// Goals with status `canceled`
    pub canceled: usize,
    /// Goals with status `notStarted`
    pub not_started: usize,
}

impl From<GoalStatistics> for StatisticsResponse {
    fn from(stats: GoalStatistics) -> Self {
        Self {
            total: stats.total,
            completed: stats.completed,
            in_progress: stats.in_progress,
            canceled: stats.canceled,
            not_started: stats.not_started,
        }
    }
}

/// Handler for GET /api/v1/statistics - Returns goal counts per status.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/v1/statistics",
    responses(
        (status = 200, description = "Successfully computed statistics", body = StatisticsResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Statistics"
)]
pub async fn get_statistics_handler(
    State(state): State<GoalState>,
) -> Result<Json<StatisticsResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state.service.statistics().await {
        Ok(stats) => Ok(Json(StatisticsResponse::from(stats))),
        Err(err) => {
            tracing::error!("Failed to compute statistics: {}", err);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new(
                    "Failed to compute statistics".to_string(),
                )),
            ))
        }
    }
}

/// Creates and returns the statistics API router.
pub fn create_api_router(state: GoalState) -> Router {
    Router::new()
        .route("/statistics", get(get_statistics_handler))
        .with_state(state)
}
