use crate::goal::Goal;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while reading or writing the persisted goal document.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access goal file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Goal file '{path}' is not a valid goals document: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to serialize goals: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Whole-collection persistence for goals.
///
/// Implementations always read and write the complete list; there is no
/// partial update at this layer.
#[async_trait]
pub trait GoalStore: Send + Sync {
    /// Returns every stored goal in stored order.
    async fn get_goals(&self) -> Result<Vec<Goal>, StoreError>;

    /// Replaces the stored collection with `goals`.
    async fn save_goals(&self, goals: &[Goal]) -> Result<(), StoreError>;
}

#[derive(Deserialize)]
struct GoalDocument {
    goals: Vec<Goal>,
}

#[derive(Serialize)]
struct GoalDocumentRef<'a> {
    goals: &'a [Goal],
}

/// Stores goals as a single `{ "goals": [...] }` JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creates an empty goals document if the file does not exist yet.
    /// An existing file is never modified.
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn initialize(&self) -> Result<(), StoreError> {
        let exists = tokio::fs::try_exists(&self.path)
            .await
            .map_err(|source| self.io_error(source))?;
        if exists {
            return Ok(());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| StoreError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
        self.save_goals(&[]).await?;
        tracing::info!("Created empty goal file");
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    async fn write_and_replace(
        &self,
        temp_path: &Path,
        contents: String,
    ) -> Result<(), StoreError> {
        tokio::fs::write(temp_path, contents)
            .await
            .map_err(|source| StoreError::Io {
                path: temp_path.to_path_buf(),
                source,
            })?;
        tokio::fs::rename(temp_path, &self.path)
            .await
            .map_err(|source| self.io_error(source))
    }

    /// Unique sibling of the target file, so concurrent writers never share one.
    fn temp_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("goals");
        self.path
            .with_file_name(format!(".{}.{}.tmp", file_name, uuid::Uuid::new_v4()))
    }
}

#[async_trait]
impl GoalStore for JsonFileStore {
    #[tracing::instrument(skip(self))]
    async fn get_goals(&self) -> Result<Vec<Goal>, StoreError> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| self.io_error(source))?;
        let document: GoalDocument =
            serde_json::from_str(&contents).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;
        tracing::debug!(
            path = %self.path.display(),
            count = document.goals.len(),
            "Loaded goals"
        );
        Ok(document.goals)
    }

    #[tracing::instrument(skip(self, goals))]
    async fn save_goals(&self, goals: &[Goal]) -> Result<(), StoreError> {
        let contents = serde_json::to_string_pretty(&GoalDocumentRef { goals })
            .map_err(StoreError::Serialize)?;

        // Write next to the target and rename over it so readers only ever
        // see a complete document.
        let temp_path = self.temp_path();
        if let Err(err) = self.write_and_replace(&temp_path, contents).await {
            // A failed write can leave a partial temp file; it never becomes the document.
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(err);
        }

        tracing::debug!(path = %self.path.display(), count = goals.len(), "Saved goals");
        Ok(())
    }
}
