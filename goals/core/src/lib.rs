//! Goal model, file-backed goal store and the CRUD service built on it.
pub mod goal;
pub mod service;
pub mod statistics;
pub mod store;

pub use goal::{Goal, GoalPatch, GoalStatus, ParseStatusError};
pub use service::{GoalService, GoalServiceError};
pub use statistics::GoalStatistics;
pub use store::{GoalStore, JsonFileStore, StoreError};
