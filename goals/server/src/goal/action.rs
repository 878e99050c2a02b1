use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    http::{HeaderMap, header},
    response::Response,
};
use goals_core::{GoalPatch, GoalStatus};
use serde::Deserialize;

use crate::goal::web::{HandlerError, is_htmx_request};

/// Raw body of a `POST /goals` request, before validation.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRequest {
    #[serde(rename = "_action")]
    pub action: Option<String>,
    pub goal_id: Option<u32>,
    pub id: Option<u32>,
    pub title: Option<String>,
    pub status: Option<String>,
}

impl ActionRequest {
    /// The targeted goal, from `goalId` or else `id`.
    pub fn target_id(&self) -> Option<u32> {
        self.goal_id.or(self.id)
    }
}

/// A validated goal action.
#[derive(Debug, Clone, PartialEq)]
pub enum GoalAction {
    Add { title: Option<String> },
    Save { id: u32, patch: GoalPatch },
    Delete { id: u32 },
}

impl TryFrom<ActionRequest> for GoalAction {
    type Error = HandlerError;

    fn try_from(request: ActionRequest) -> Result<Self, Self::Error> {
        match request.action.as_deref() {
            Some("add") => Ok(GoalAction::Add {
                title: request.title,
            }),
            Some("save" | "update") => {
                let id = request.target_id().ok_or_else(|| {
                    HandlerError::Validation("Missing required fields".to_string())
                })?;
                let status = request
                    .status
                    .map(|status| status.parse::<GoalStatus>())
                    .transpose()
                    .map_err(|err| HandlerError::Validation(err.to_string()))?;
                if request.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
                    return Err(HandlerError::Validation(
                        "Goal title must not be empty".to_string(),
                    ));
                }
                let patch = GoalPatch {
                    title: request.title,
                    status,
                };
                if patch.is_empty() {
                    return Err(HandlerError::Validation(
                        "Missing required fields".to_string(),
                    ));
                }
                Ok(GoalAction::Save { id, patch })
            }
            Some("delete") => {
                let id = request
                    .target_id()
                    .ok_or_else(|| HandlerError::Validation("Missing id".to_string()))?;
                Ok(GoalAction::Delete { id })
            }
            other => Err(HandlerError::InvalidAction(
                other.unwrap_or_default().to_string(),
            )),
        }
    }
}

/// Extracts an [`ActionRequest`] from either a JSON or a url-encoded form body.
///
/// Bodies that cannot be parsed are rejected as validation failures.
pub struct ActionPayload(pub ActionRequest);

impl<S> FromRequest<S> for ActionPayload
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let htmx = is_htmx_request(req.headers());
        let parsed = if is_json_request(req.headers()) {
            Json::<ActionRequest>::from_request(req, state)
                .await
                .map(|Json(request)| request)
                .map_err(|rejection| rejection.body_text())
        } else {
            Form::<ActionRequest>::from_request(req, state)
                .await
                .map(|Form(request)| request)
                .map_err(|rejection| rejection.body_text())
        };

        parsed.map(ActionPayload).map_err(|message| {
            tracing::warn!("Rejected goal action body: {}", message);
            HandlerError::Validation("Malformed request body".to_string()).into_response_for(htmx)
        })
    }
}

fn is_json_request(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|content_type| content_type.starts_with("application/json"))
}
