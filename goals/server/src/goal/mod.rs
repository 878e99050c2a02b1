use goals_core::{Goal, GoalService, GoalStatus, JsonFileStore};
use std::sync::Arc;

pub mod action;
pub mod api;
pub mod web;

/// State shared by every goal handler.
#[derive(Clone)]
pub struct GoalState {
    pub service: Arc<GoalService<JsonFileStore>>,
}

impl GoalState {
    pub fn new(service: GoalService<JsonFileStore>) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// One radio option of the status picker.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusChoice {
    pub value: &'static str,
    pub label: &'static str,
    pub checked: bool,
}

/// A goal prepared for the list and editor templates.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalRow {
    pub id: u32,
    pub title: String,
    pub status_label: &'static str,
    pub status_class: &'static str,
    pub choices: Vec<StatusChoice>,
}

impl From<Goal> for GoalRow {
    fn from(goal: Goal) -> Self {
        let status = goal.status();
        Self {
            id: goal.id(),
            title: goal.title().to_string(),
            status_label: status.label(),
            status_class: status_css_class(status),
            choices: GoalStatus::ALL
                .into_iter()
                .map(|choice| StatusChoice {
                    value: choice.as_str(),
                    label: choice.label(),
                    checked: choice == status,
                })
                .collect(),
        }
    }
}

fn status_css_class(status: GoalStatus) -> &'static str {
    match status {
        GoalStatus::Completed => "status-completed",
        GoalStatus::InProgress => "status-in-progress",
        GoalStatus::Canceled => "status-canceled",
        GoalStatus::NotStarted => "status-not-started",
    }
}
