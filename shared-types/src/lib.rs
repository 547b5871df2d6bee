use serde::{Deserialize, Serialize};
use ts_rs::TS;

pub mod clickup;
pub mod dashboard;
pub mod lenient;

pub use clickup::{
    Assignee, ContainerRef, Folder, FoldersPage, StatusType, Task, TaskStatus, TasksPage,
};
pub use dashboard::{
    AssigneeOpenStat, DashboardResponse, DashboardStats, ProjectCounters, ProjectSummary,
    TaskSummary, UserSummary,
};

/// Error response for API endpoints
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
