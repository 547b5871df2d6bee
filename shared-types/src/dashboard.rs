use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::clickup::Assignee;

/// Headline counters shown on the dashboard cards
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub unassigned: u32,
    pub in_progress: u32,
    pub completed: u32,
    pub completed_this_week: u32,
    pub total_tasks: u32,
    pub active_projects: u32,
}

/// Per-project task tallies
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProjectCounters {
    pub todo: u32,
    pub in_progress: u32,
    pub completed: u32,
    pub completed_this_week: u32,
    pub due_this_week: u32,
}

/// Progress rollup for one project
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProjectSummary {
    pub id: String,
    pub name: String,
    /// Completed share of classified tasks, 0-100.
    pub progress: u8,
    pub counters: ProjectCounters,
}

/// A user as shown in task tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UserSummary {
    pub id: String,
    pub username: Option<String>,
    pub email: Option<String>,
}

impl From<&Assignee> for UserSummary {
    fn from(assignee: &Assignee) -> Self {
        Self {
            id: assignee.id.clone(),
            username: assignee.username.clone(),
            email: assignee.email.clone(),
        }
    }
}

/// Reduced task row used by the recent and review tables
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TaskSummary {
    pub id: String,
    pub name: String,
    /// Raw status label as configured in ClickUp.
    pub status: String,
    pub assignees: Vec<UserSummary>,
    pub due_date: Option<String>,
    pub project_name: String,
}

/// Number of open tasks credited to one assignee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssigneeOpenStat {
    pub id: String,
    pub username: Option<String>,
    pub email: Option<String>,
    pub count: u32,
}

/// Response body of `GET /api/tasks`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub projects: Vec<ProjectSummary>,
    pub tasks: Vec<TaskSummary>,
    pub review_tasks: Vec<TaskSummary>,
    pub open_tasks_by_assignee: Vec<AssigneeOpenStat>,
}
