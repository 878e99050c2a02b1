use goals_core::{Goal, GoalService, GoalStore, JsonFileStore};
use tempfile::TempDir;

/// Test context holding a goal file inside its own temporary directory.
pub struct TestContext {
    #[allow(dead_code)] // directory is kept so it is not removed mid-test
    pub dir: TempDir,
    pub store: JsonFileStore,
}

pub async fn setup() -> anyhow::Result<TestContext> {
    // Allow multiple calls to init for tests.
    let _ = tracing_subscriber::fmt().try_init();
    let dir = tempfile::tempdir()?;
    let store = JsonFileStore::new(dir.path().join("db.json"));
    store.initialize().await?;
    Ok(TestContext { dir, store })
}

#[allow(dead_code)]
pub async fn setup_with_goals(goals: &[Goal]) -> anyhow::Result<TestContext> {
    let context = setup().await?;
    context.store.save_goals(goals).await?;
    Ok(context)
}

#[allow(dead_code)]
pub fn service(context: &TestContext) -> GoalService<JsonFileStore> {
    GoalService::new(context.store.clone())
}
