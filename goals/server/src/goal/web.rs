use askama::Template;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use goals_core::GoalServiceError;
use serde::{Deserialize, Serialize};

use crate::goal::action::{ActionPayload, GoalAction};
use crate::goal::{GoalRow, GoalState};
use crate::web::WebError;

/// Returns true when the request was issued by htmx.
pub fn is_htmx_request(headers: &HeaderMap) -> bool {
    headers
        .get("hx-request")
        .is_some_and(|value| value.as_bytes() == b"true")
}

/// Error type for goal action handlers.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// A required request field is missing or malformed.
    #[error("{0}")]
    Validation(String),
    /// The `_action` discriminator is not one of the known actions.
    #[error("Invalid action '{0}'")]
    InvalidAction(String),
    /// Represents a goal service error.
    #[error("Goal service error: {0}")]
    Service(#[from] GoalServiceError),
    /// Represents an error during template rendering.
    #[error("Template rendering failed")]
    Template(#[from] askama::Error),
}

impl HandlerError {
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            HandlerError::Validation(message) => (StatusCode::BAD_REQUEST, message.clone()),
            HandlerError::InvalidAction(_) => {
                (StatusCode::BAD_REQUEST, "Invalid action".to_string())
            }
            HandlerError::Service(err @ GoalServiceError::EmptyTitle) => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            HandlerError::Service(err @ GoalServiceError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, err.to_string())
            }
            HandlerError::Service(
                GoalServiceError::Storage(_) | GoalServiceError::IdSpaceExhausted(_),
            )
            | HandlerError::Template(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An error occurred".to_string(),
            ),
        }
    }

    /// Renders the error as an htmx error fragment or as a JSON error body.
    pub fn into_response_for(self, htmx: bool) -> Response {
        let (status_code, message) = self.status_and_message();
        if status_code.is_server_error() {
            tracing::error!("Goal action failed: {}", self);
        } else {
            tracing::warn!("Goal action rejected: {}", self);
        }

        if !htmx {
            return (status_code, Json(ActionResponse::error(message))).into_response();
        }

        let error_template = ErrorMessageTemplate::new(message);
        let Ok(rendered) = error_template.render() else {
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        };

        let mut response = (status_code, Html(rendered)).into_response();
        // Retarget the error into the page's error slot instead of the table
        let headers = response.headers_mut();
        headers.insert(
            HeaderName::from_static("hx-retarget"),
            HeaderValue::from_static("#error-message"),
        );
        headers.insert(
            HeaderName::from_static("hx-reswap"),
            HeaderValue::from_static("innerHTML"),
        );
        response
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        self.into_response_for(false)
    }
}

/// JSON body returned by the action endpoint.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ActionResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActionResponse {
    pub fn success() -> Self {
        Self {
            success: Some(true),
            error: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: None,
            error: Some(message),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TableQuery {
    #[serde(default)]
    edit: bool,
}

#[derive(Template)]
#[template(path = "goals.html")]
struct GoalsTemplate {
    goals: Vec<GoalRow>,
    edit: bool,
}

#[derive(Template)]
#[template(path = "goals/goals_table.html")]
struct GoalsTableTemplate {
    goals: Vec<GoalRow>,
    edit: bool,
}

impl GoalsTableTemplate {
    pub fn new(goals: Vec<GoalRow>, edit: bool) -> Self {
        Self { goals, edit }
    }
}

#[derive(Template)]
#[template(path = "goals/error_message.html")]
struct ErrorMessageTemplate {
    message: String,
}

impl ErrorMessageTemplate {
    pub fn new(message: String) -> Self {
        Self { message }
    }
}

/// Loads every goal and prepares it for rendering.
async fn load_rows(state: &GoalState) -> Result<Vec<GoalRow>, GoalServiceError> {
    let goals = state.service.get_goals().await?;
    Ok(goals.into_iter().map(GoalRow::from).collect())
}

/// Handler for GET /goals that displays the goal list page.
#[tracing::instrument(skip(state))]
async fn goals_page_handler(State(state): State<GoalState>) -> Result<Html<String>, WebError> {
    let goals = load_rows(&state).await?;
    let template = GoalsTemplate { goals, edit: false };
    template.render().map(Html).map_err(WebError::from)
}

/// Handler for GET /goals/table that returns the goals table fragment,
/// read-only or as an editor.
#[tracing::instrument(skip(state))]
async fn goals_table_handler(
    State(state): State<GoalState>,
    Query(query): Query<TableQuery>,
) -> Response {
    let rendered = async {
        let goals = load_rows(&state).await?;
        let html = GoalsTableTemplate::new(goals, query.edit).render()?;
        Ok::<_, HandlerError>(html)
    }
    .await;

    match rendered {
        Ok(html) => Html(html).into_response(),
        Err(err) => err.into_response_for(true),
    }
}

async fn perform_action(state: &GoalState, action: GoalAction) -> Result<(), HandlerError> {
    match action {
        GoalAction::Add { title } => {
            state.service.add_goal(title.unwrap_or_default()).await?;
        }
        GoalAction::Save { id, patch } => {
            state.service.update_goal(id, patch).await?;
        }
        GoalAction::Delete { id } => {
            state.service.delete_goal(id).await?;
        }
    }
    Ok(())
}

/// Handler for POST /goals that adds, saves or deletes a goal.
///
/// htmx requests get the refreshed editor table back; everyone else gets a
/// JSON success flag.
#[tracing::instrument(skip(state, headers, request))]
async fn goal_action_handler(
    State(state): State<GoalState>,
    headers: HeaderMap,
    ActionPayload(request): ActionPayload,
) -> Response {
    let htmx = is_htmx_request(&headers);

    let result = async {
        let action = GoalAction::try_from(request)?;
        tracing::debug!(?action, "Performing goal action");
        perform_action(&state, action).await?;
        if htmx {
            let goals = load_rows(&state).await?;
            let html = GoalsTableTemplate::new(goals, true).render()?;
            Ok::<_, HandlerError>(Some(html))
        } else {
            Ok(None)
        }
    }
    .await;

    match result {
        Ok(Some(html)) => Html(html).into_response(),
        Ok(None) => Json(ActionResponse::success()).into_response(),
        Err(err) => err.into_response_for(htmx),
    }
}

/// Creates and returns the goal router with all goal-related page routes.
pub fn create_goal_router(state: GoalState) -> Router {
    Router::new()
        .route("/goals", get(goals_page_handler).post(goal_action_handler))
        .route("/goals/table", get(goals_table_handler))
        .with_state(state)
}
