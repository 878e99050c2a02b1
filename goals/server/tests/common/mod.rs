use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use goals_core::{Goal, GoalService, GoalStore, JsonFileStore};
use goals_server::goal::GoalState;
use tempfile::TempDir;
use tower::ServiceExt;

/// Test context for endpoint tests backed by a temporary goal file.
pub struct TestContext {
    #[allow(dead_code)] // directory is kept so it is not removed mid-test
    pub dir: TempDir,
    pub store: JsonFileStore,
    pub app: Router,
}

/// Creates a goal file holding `goals` and the full application around it.
pub async fn setup_with_goals(goals: &[Goal]) -> anyhow::Result<TestContext> {
    // Allow multiple calls to init for tests.
    let _ = tracing_subscriber::fmt().try_init();
    let dir = tempfile::tempdir()?;
    let store = JsonFileStore::new(dir.path().join("db.json"));
    store.initialize().await?;
    store.save_goals(goals).await?;

    let state = GoalState::new(GoalService::serialized(store.clone()));
    let app = goals_server::web::create_app(state);
    Ok(TestContext { dir, store, app })
}

#[allow(dead_code)]
pub async fn setup() -> anyhow::Result<TestContext> {
    setup_with_goals(&[]).await
}

/// Response parts the tests assert on.
#[allow(dead_code)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: String,
}

#[allow(dead_code)]
impl TestResponse {
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("response body should be JSON")
    }
}

/// Sends `request` through a clone of the app and collects the response.
pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    TestResponse {
        status,
        headers,
        body: String::from_utf8(body.to_vec()).unwrap(),
    }
}

#[allow(dead_code)]
pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[allow(dead_code)]
pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[allow(dead_code)]
pub fn post_form(uri: &str, body: &str, htmx: bool) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded");
    if htmx {
        builder = builder.header("hx-request", "true");
    }
    builder.body(Body::from(body.to_string())).unwrap()
}
