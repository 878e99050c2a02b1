use crate::goal::{Goal, GoalPatch, GoalStatus};
use crate::statistics::GoalStatistics;
use crate::store::{GoalStore, StoreError};
use tokio::sync::{Mutex, MutexGuard};

/// Title used when a goal is added without one.
pub const DEFAULT_PLACEHOLDER_TITLE: &str = "New goal";

/// Error type for GoalService operations.
#[derive(Debug, thiserror::Error)]
pub enum GoalServiceError {
    /// The backing store could not be read or written.
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
    /// No goal with the given ID exists.
    #[error("Goal with ID {0} not found")]
    NotFound(u32),
    /// An update tried to set a blank title.
    #[error("Goal title must not be empty")]
    EmptyTitle,
    /// The highest stored ID leaves no room for another goal.
    #[error("No goal IDs left after {0}")]
    IdSpaceExhausted(u32),
}

/// CRUD operations over the goal collection.
///
/// Every operation loads the full collection, changes it in memory and
/// writes the full collection back. A service built with [`GoalService::new`]
/// runs those cycles independently, so two concurrent mutations can lose
/// one of the changes. [`GoalService::serialized`] holds a lock across each
/// mutating cycle instead.
pub struct GoalService<S> {
    store: S,
    write_lock: Option<Mutex<()>>,
    placeholder_title: String,
}

impl<S: GoalStore> GoalService<S> {
    /// Creates a service whose mutations are not coordinated with each other.
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_lock: None,
            placeholder_title: DEFAULT_PLACEHOLDER_TITLE.to_string(),
        }
    }

    /// Creates a service that runs one mutation at a time.
    pub fn serialized(store: S) -> Self {
        Self {
            write_lock: Some(Mutex::new(())),
            ..Self::new(store)
        }
    }

    /// Sets the title given to goals added without one.
    pub fn with_placeholder_title(mut self, title: impl Into<String>) -> Self {
        self.placeholder_title = title.into();
        self
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    async fn begin_write(&self) -> Option<MutexGuard<'_, ()>> {
        match &self.write_lock {
            Some(lock) => Some(lock.lock().await),
            None => None,
        }
    }

    /// Retrieves all goals in stored order.
    #[tracing::instrument(skip(self))]
    pub async fn get_goals(&self) -> Result<Vec<Goal>, GoalServiceError> {
        Ok(self.store.get_goals().await?)
    }

    /// Retrieves a single goal by its ID.
    #[tracing::instrument(skip(self))]
    pub async fn get_goal(&self, id: u32) -> Result<Goal, GoalServiceError> {
        self.store
            .get_goals()
            .await?
            .into_iter()
            .find(|goal| goal.id() == id)
            .ok_or(GoalServiceError::NotFound(id))
    }

    /// Adds a goal with status `notStarted`.
    ///
    /// # Arguments
    ///
    /// * `title` - The title of the goal. A blank title is replaced by the
    ///   placeholder title.
    ///
    /// # Returns
    ///
    /// A `Result` containing the created `Goal` if successful, or an error otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn add_goal(&self, title: String) -> Result<Goal, GoalServiceError> {
        let title = if title.trim().is_empty() {
            self.placeholder_title.clone()
        } else {
            title
        };

        let _guard = self.begin_write().await;
        let mut goals = self.store.get_goals().await?;
        let id = next_id(&goals)?;
        let goal = Goal::new(id, title, GoalStatus::NotStarted);
        goals.push(goal.clone());
        self.store.save_goals(&goals).await?;

        tracing::info!(id, "Added goal");
        Ok(goal)
    }

    /// Merges the fields present in `patch` into the goal with the given ID.
    ///
    /// # Arguments
    ///
    /// * `id` - The ID of the goal to update.
    /// * `patch` - The fields to overwrite.
    ///
    /// # Returns
    ///
    /// A `Result` containing the updated `Goal` if successful, or an error otherwise.
    #[tracing::instrument(skip(self))]
    pub async fn update_goal(&self, id: u32, patch: GoalPatch) -> Result<Goal, GoalServiceError> {
        if patch.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            return Err(GoalServiceError::EmptyTitle);
        }

        let _guard = self.begin_write().await;
        let mut goals = self.store.get_goals().await?;
        let goal = goals
            .iter_mut()
            .find(|goal| goal.id() == id)
            .ok_or(GoalServiceError::NotFound(id))?;
        goal.apply(patch);
        let updated = goal.clone();
        self.store.save_goals(&goals).await?;

        tracing::info!(id, "Updated goal");
        Ok(updated)
    }

    /// Removes the goal with the given ID. Deleting an unknown ID is not an error.
    #[tracing::instrument(skip(self))]
    pub async fn delete_goal(&self, id: u32) -> Result<(), GoalServiceError> {
        let _guard = self.begin_write().await;
        let mut goals = self.store.get_goals().await?;
        let before = goals.len();
        goals.retain(|goal| goal.id() != id);
        self.store.save_goals(&goals).await?;

        if goals.len() == before {
            tracing::info!(id, "No goal to delete");
        } else {
            tracing::info!(id, "Deleted goal");
        }
        Ok(())
    }

    /// Counts goals per status.
    #[tracing::instrument(skip(self))]
    pub async fn statistics(&self) -> Result<GoalStatistics, GoalServiceError> {
        let goals = self.store.get_goals().await?;
        Ok(GoalStatistics::from_goals(&goals))
    }
}

fn next_id(goals: &[Goal]) -> Result<u32, GoalServiceError> {
    match goals.iter().map(Goal::id).max() {
        None => Ok(1),
        Some(max) => max
            .checked_add(1)
            .ok_or(GoalServiceError::IdSpaceExhausted(max)),
    }
}
