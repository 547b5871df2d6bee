use shared_types::{StatusType, Task, TaskStatus};

const COMPLETED_MARKERS: &[&str] = &["complete"];
const IN_PROGRESS_MARKERS: &[&str] = &["progress", "in progress", "doing", "active"];
const IN_REVIEW_MARKERS: &[&str] = &["review"];
const TODO_MARKERS: &[&str] = &["todo", "to do", "open", "new", "backlog"];

/// Primary bucket a task falls into on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskCategory {
    Completed,
    InProgress,
    InReview,
    Todo,
    Unclassified,
}

/// Classify a status. The checks run in a fixed order and the first match
/// wins: completed, in progress, in review, todo.
pub fn classify(status: &TaskStatus) -> TaskCategory {
    let label = status.status.to_lowercase();
    let contains_any = |markers: &[&str]| markers.iter().any(|m| label.contains(m));

    if status.kind == Some(StatusType::Closed) || contains_any(COMPLETED_MARKERS) {
        TaskCategory::Completed
    } else if contains_any(IN_PROGRESS_MARKERS) {
        TaskCategory::InProgress
    } else if contains_any(IN_REVIEW_MARKERS) {
        TaskCategory::InReview
    } else if status.kind == Some(StatusType::Open) || contains_any(TODO_MARKERS) {
        TaskCategory::Todo
    } else {
        TaskCategory::Unclassified
    }
}

pub fn category_of(task: &Task) -> TaskCategory {
    classify(&task.status)
}

pub fn is_completed(task: &Task) -> bool {
    category_of(task) == TaskCategory::Completed
}

pub fn is_in_progress(task: &Task) -> bool {
    category_of(task) == TaskCategory::InProgress
}

pub fn is_in_review(task: &Task) -> bool {
    category_of(task) == TaskCategory::InReview
}

pub fn is_todo(task: &Task) -> bool {
    category_of(task) == TaskCategory::Todo
}

/// Any open task whose label mentions review, whatever else it says.
///
/// This is looser than [`TaskCategory::InReview`]: "Review In Progress" is
/// counted as in progress but still shows up in the review queue.
pub fn is_awaiting_review(task: &Task) -> bool {
    !is_completed(task) && mentions_any(&task.status.status, IN_REVIEW_MARKERS)
}

fn mentions_any(label: &str, markers: &[&str]) -> bool {
    let label = label.to_lowercase();
    markers.iter().any(|m| label.contains(m))
}

/// Only the direct assignee list counts; group assignees are ignored.
pub fn is_unassigned(task: &Task) -> bool {
    task.assignees.as_ref().map_or(true, |a| a.is_empty())
}
