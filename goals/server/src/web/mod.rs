use askama::Template;
use axum::Router;
use axum::http::{HeaderName, StatusCode};
use axum::response::Html;
use goals_core::{GoalService, GoalServiceError, JsonFileStore};
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::goal::web::create_goal_router;
use crate::goal::GoalState;
use crate::statistics::web::create_statistics_router;

pub mod api;

/// Custom error type for page handlers.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// Represents an error during template rendering.
    /// The specific `askama::Error` is captured as the source of this error.
    #[error("Template rendering failed")]
    Template(#[from] askama::Error),
    /// Goals could not be loaded.
    #[error("Goal service error: {0}")]
    Service(#[from] GoalServiceError),
}

impl axum::response::IntoResponse for WebError {
    fn into_response(self) -> axum::response::Response {
        tracing::error!("Page rendering failed: {}", self);
        let user_facing_error_message =
            "An unexpected error occurred while processing your request. Please try again later.";
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(format!(
                "<h1>Internal Server Error</h1><p>{}</p>",
                user_facing_error_message
            )),
        )
            .into_response()
    }
}

/// Builds the goal service described by `config`.
pub fn build_goal_service(config: &Config) -> GoalService<JsonFileStore> {
    let store = JsonFileStore::new(config.data_path.clone());
    let service = if config.serialize_writes {
        GoalService::serialized(store)
    } else {
        GoalService::new(store)
    };
    service.with_placeholder_title(config.placeholder_title.clone())
}

/// Assembles every page and API route around `goal_state`.
pub fn create_app(goal_state: GoalState) -> Router {
    Router::new()
        .route("/health", axum::routing::get(health_check_handler))
        .route("/", axum::routing::get(welcome_handler))
        .merge(create_goal_router(goal_state.clone()))
        .merge(create_statistics_router(goal_state.clone()))
        .merge(api::create_api_router(goal_state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::new().expose_headers([
                    HeaderName::from_static("hx-retarget"),
                    HeaderName::from_static("hx-reswap"),
                ])),
        )
}

#[tracing::instrument(skip(config))]
pub async fn start_web_server(config: Config) -> anyhow::Result<()> {
    let service = build_goal_service(&config);
    service.store().initialize().await?;
    tracing::info!(
        "Using goal file {} (serialized writes: {})",
        service.store().path().display(),
        config.serialize_writes
    );

    let app = create_app(GoalState::new(service));

    let server_address = format!("0.0.0.0:{}", &config.port);
    let listener = tokio::net::TcpListener::bind(&server_address).await?;
    tracing::info!("Web server running on http://{}", server_address);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tracing::instrument]
pub async fn health_check_handler() -> &'static str {
    "OK"
}

#[tracing::instrument]
pub async fn welcome_handler() -> Result<Html<String>, WebError> {
    let template = IndexTemplate::new();
    template.render().map(Html).map_err(WebError::from)
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate;

impl IndexTemplate {
    pub fn new() -> Self {
        Self
    }
}
