use axum::{Json, Router, routing::get};
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::goal::GoalState;
use crate::goal::api::v1::{GoalJson, GoalsResponse};
use crate::statistics::api::v1::StatisticsResponse;

/// JSON response for API errors
#[derive(Debug, Serialize, Deserialize, PartialEq, ToSchema)]
pub struct ErrorResponse {
    /// Human readable description of the failure
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: String) -> Self {
        Self { error }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::goal::api::v1::get_goals_handler,
        crate::goal::api::v1::get_goal_handler,
        crate::statistics::api::v1::get_statistics_handler,
    ),
    components(schemas(GoalJson, GoalsResponse, StatisticsResponse, ErrorResponse)),
    tags(
        (name = "Goals", description = "Read access to goals"),
        (name = "Statistics", description = "Goal counts per status")
    )
)]
pub struct ApiDoc;

/// Handler for GET /api/v1/openapi.json
async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Creates the API routes for JSON API endpoints.
pub fn create_api_router(goal_state: GoalState) -> Router {
    let api_routes = Router::new()
        .merge(crate::goal::api::v1::create_api_router(goal_state.clone()))
        .merge(crate::statistics::api::v1::create_api_router(goal_state))
        .route("/openapi.json", get(openapi_handler));
    Router::new().nest("/api/v1", api_routes)
}
