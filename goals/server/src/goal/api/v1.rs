use crate::goal::GoalState;
use crate::web::api::ErrorResponse;
use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
};
use goals_core::{Goal, GoalServiceError};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// JSON representation of a Goal for API responses.
#[derive(Debug, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct GoalJson {
    /// Unique identifier for the goal
    pub id: u32,
    /// Title of the goal
    pub title: String,
    /// One of `completed`, `inProgress`, `canceled`, `notStarted`
    pub status: String,
}

impl From<Goal> for GoalJson {
    fn from(goal: Goal) -> Self {
        Self {
            id: goal.id(),
            status: goal.status().as_str().to_string(),
            title: goal.title().to_string(),
        }
    }
}

/// API response for listing all goals.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GoalsResponse {
    /// List of goals in stored order
    pub goals: Vec<GoalJson>,
    /// Total number of goals
    pub count: usize,
}

/// Handler for GET /api/v1/goals - Returns all goals in JSON format.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/v1/goals",
    responses(
        (status = 200, description = "Successfully retrieved goals", body = GoalsResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Goals"
)]
pub async fn get_goals_handler(
    State(state): State<GoalState>,
) -> Result<Json<GoalsResponse>, (StatusCode, Json<ErrorResponse>)> {
    match state.service.get_goals().await {
        Ok(goals) => {
            let goals: Vec<GoalJson> = goals.into_iter().map(GoalJson::from).collect();
            let count = goals.len();
            Ok(Json(GoalsResponse { goals, count }))
        }
        Err(err) => {
            tracing::error!("Failed to get goals: {}", err);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to retrieve goals".to_string())),
            ))
        }
    }
}

/// Handler for GET /api/v1/goals/{id} - Returns a single goal.
#[tracing::instrument(skip(state))]
#[utoipa::path(
    get,
    path = "/api/v1/goals/{id}",
    params(
        ("id" = u32, Path, description = "ID of the goal")
    ),
    responses(
        (status = 200, description = "Successfully retrieved goal", body = GoalJson),
        (status = 404, description = "Goal not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Goals"
)]
pub async fn get_goal_handler(
    State(state): State<GoalState>,
    Path(id): Path<u32>,
) -> Result<Json<GoalJson>, (StatusCode, Json<ErrorResponse>)> {
    match state.service.get_goal(id).await {
        Ok(goal) => Ok(Json(GoalJson::from(goal))),
        Err(err @ GoalServiceError::NotFound(_)) => Err((
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(err.to_string())),
        )),
        Err(err) => {
            tracing::error!("Failed to get goal {}: {}", id, err);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::new("Failed to retrieve goal".to_string())),
            ))
        }
    }
}

/// Creates and returns the goals API router.
pub fn create_api_router(state: GoalState) -> Router {
    Router::new()
        .route("/goals", get(get_goals_handler))
        .route("/goals/{id}", get(get_goal_handler))
        .with_state(state)
}
