use crate::goal::{Goal, GoalStatus};
use serde::Serialize;

/// Number of goals per status.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GoalStatistics {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub canceled: usize,
    pub not_started: usize,
}

impl GoalStatistics {
    /// Counts the goals of each status in a single pass.
    pub fn from_goals(goals: &[Goal]) -> Self {
        goals.iter().fold(Self::default(), |mut stats, goal| {
            stats.total += 1;
            *stats.count_mut(goal.status()) += 1;
            stats
        })
    }

    /// Returns the number of goals with the given status.
    pub fn count(&self, status: GoalStatus) -> usize {
        match status {
            GoalStatus::Completed => self.completed,
            GoalStatus::InProgress => self.in_progress,
            GoalStatus::Canceled => self.canceled,
            GoalStatus::NotStarted => self.not_started,
        }
    }

    fn count_mut(&mut self, status: GoalStatus) -> &mut usize {
        match status {
            GoalStatus::Completed => &mut self.completed,
            GoalStatus::InProgress => &mut self.in_progress,
            GoalStatus::Canceled => &mut self.canceled,
            GoalStatus::NotStarted => &mut self.not_started,
        }
    }
}
