use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use thiserror::Error;

/// Progress of a goal. Exactly one status applies at a time.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GoalStatus {
    Completed,
    InProgress,
    Canceled,
    #[default]
    NotStarted,
}

impl GoalStatus {
    /// Every status, in display order.
    pub const ALL: [GoalStatus; 4] = [
        GoalStatus::Completed,
        GoalStatus::InProgress,
        GoalStatus::Canceled,
        GoalStatus::NotStarted,
    ];

    /// Returns the wire name used in the JSON document and in requests.
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Completed => "completed",
            GoalStatus::InProgress => "inProgress",
            GoalStatus::Canceled => "canceled",
            GoalStatus::NotStarted => "notStarted",
        }
    }

    /// Returns the human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            GoalStatus::Completed => "Completed",
            GoalStatus::InProgress => "In progress",
            GoalStatus::Canceled => "Canceled",
            GoalStatus::NotStarted => "Not started",
        }
    }
}

impl Display for GoalStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown goal status '{0}'")]
pub struct ParseStatusError(pub String);

impl FromStr for GoalStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GoalStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseStatusError(s.to_string()))
    }
}

/// A single tracked objective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "GoalRecord")]
pub struct Goal {
    id: u32,
    title: String,
    status: GoalStatus,
}

impl Goal {
    pub fn new(id: u32, title: String, status: GoalStatus) -> Self {
        Self { id, title, status }
    }

    /// Returns the ID of the goal.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Returns the title of the goal.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the status of the goal.
    pub fn status(&self) -> GoalStatus {
        self.status
    }

    /// Overwrites the fields present in `patch`, leaving the others untouched.
    pub fn apply(&mut self, patch: GoalPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

/// On-disk shape of a goal. Older documents carry three boolean flags
/// instead of `status`; those are folded into a single status on read.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoalRecord {
    id: u32,
    title: String,
    #[serde(default)]
    status: Option<GoalStatus>,
    #[serde(default)]
    completed: bool,
    #[serde(default)]
    in_progress: bool,
    #[serde(default)]
    canceled: bool,
}

impl From<GoalRecord> for Goal {
    fn from(record: GoalRecord) -> Self {
        let status = record.status.unwrap_or(if record.completed {
            GoalStatus::Completed
        } else if record.canceled {
            GoalStatus::Canceled
        } else if record.in_progress {
            GoalStatus::InProgress
        } else {
            GoalStatus::NotStarted
        });
        Goal::new(record.id, record.title, status)
    }
}

/// Partial update of a goal. `None` fields are left as they are.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GoalPatch {
    pub title: Option<String>,
    pub status: Option<GoalStatus>,
}

impl GoalPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_status(mut self, status: GoalStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Returns true when the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.status.is_none()
    }
}
