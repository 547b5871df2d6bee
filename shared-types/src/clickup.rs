use serde::{Deserialize, Serialize};

use crate::lenient;

/// Category ClickUp attaches to every workflow status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusType {
    Open,
    Custom,
    Closed,
    Done,
    #[serde(other)]
    Other,
}

/// Status of a task: the free-text label plus its workflow type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskStatus {
    #[serde(default, deserialize_with = "lenient::string")]
    pub status: String,
    #[serde(default, rename = "type", deserialize_with = "lenient::or_none")]
    pub kind: Option<StatusType>,
}

impl TaskStatus {
    pub fn new(status: impl Into<String>, kind: StatusType) -> Self {
        Self {
            status: status.into(),
            kind: Some(kind),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Assignee {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub username: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub email: Option<String>,
}

/// Reference to a project, folder or list that contains a task.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerRef {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
}

impl ContainerRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A task as returned by `GET /team/{team_id}/task`.
///
/// Every field is optional on the wire. Missing or mistyped values fall back
/// to defaults here, and a record that is not an object at all is dropped by
/// [`TasksPage`], so one malformed record cannot fail the whole batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::value_or_default")]
    pub status: TaskStatus,
    /// Completion time, milliseconds since the epoch.
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub date_done: Option<String>,
    /// Due time, milliseconds since the epoch.
    #[serde(default, deserialize_with = "lenient::optional_string")]
    pub due_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::optional_items")]
    pub assignees: Option<Vec<Assignee>>,
    #[serde(default, deserialize_with = "lenient::optional_items")]
    pub group_assignees: Option<Vec<Assignee>>,
    #[serde(default, deserialize_with = "lenient::or_none")]
    pub project: Option<ContainerRef>,
    #[serde(default, deserialize_with = "lenient::or_none")]
    pub folder: Option<ContainerRef>,
    #[serde(default, deserialize_with = "lenient::or_none")]
    pub list: Option<ContainerRef>,
}

/// A folder from `GET /space/{space_id}/folder`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Folder {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::or_none")]
    pub hidden: Option<bool>,
    #[serde(default, deserialize_with = "lenient::or_none")]
    pub access: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TasksPage {
    #[serde(default, deserialize_with = "lenient::items")]
    pub tasks: Vec<Task>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FoldersPage {
    #[serde(default, deserialize_with = "lenient::items")]
    pub folders: Vec<Folder>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_deserialization_from_clickup_payload() {
        let json = r##"{
            "id": "86c1abc",
            "name": "Ship release notes",
            "status": {"status": "in progress", "type": "custom", "color": "#4194f6"},
            "date_done": null,
            "due_date": "1760918400000",
            "assignees": [{"id": 4411, "username": "Ada", "email": "ada@example.com"}],
            "group_assignees": [],
            "folder": {"id": "9012", "name": "Platform", "hidden": false, "access": true},
            "list": {"id": "9013", "name": "Sprint 4", "access": true}
        }"##;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, "86c1abc");
        assert_eq!(task.status.kind, Some(StatusType::Custom));
        assert!(task.date_done.is_none());
        assert_eq!(task.due_date.as_deref(), Some("1760918400000"));

        let assignees = task.assignees.unwrap();
        assert_eq!(assignees[0].id, "4411");
        assert_eq!(assignees[0].username.as_deref(), Some("Ada"));
        assert_eq!(task.folder.unwrap().name, "Platform");
        assert!(task.project.is_none());
    }

    #[test]
    fn test_sparse_task_uses_defaults() {
        let task: Task = serde_json::from_str(r#"{"status": null}"#).unwrap();
        assert_eq!(task.id, "");
        assert_eq!(task.status.status, "");
        assert!(task.status.kind.is_none());
        assert!(task.assignees.is_none());
    }

    #[test]
    fn test_unknown_status_type_maps_to_other() {
        let status: TaskStatus =
            serde_json::from_str(r#"{"status": "blocked", "type": "unstarted"}"#).unwrap();
        assert_eq!(status.kind, Some(StatusType::Other));
    }

    #[test]
    fn test_tasks_page_tolerates_missing_tasks() {
        let page: TasksPage = serde_json::from_str("{}").unwrap();
        assert!(page.tasks.is_empty());

        let page: TasksPage = serde_json::from_str(r#"{"tasks": null}"#).unwrap();
        assert!(page.tasks.is_empty());
    }

    #[test]
    fn test_mistyped_fields_fall_back_to_defaults() {
        let task: Task = serde_json::from_str(
            r#"{
                "id": "t9",
                "status": {"status": "open", "type": 7},
                "assignees": [null, {"id": 5, "username": "Ada"}],
                "group_assignees": "nobody",
                "project": 12,
                "list": "Sprint"
            }"#,
        )
        .unwrap();

        assert_eq!(task.status.status, "open");
        assert!(task.status.kind.is_none());
        let assignees = task.assignees.unwrap();
        assert_eq!(assignees.len(), 1);
        assert_eq!(assignees[0].id, "5");
        assert!(task.group_assignees.is_none());
        assert!(task.project.is_none());
        assert!(task.list.is_none());
    }

    #[test]
    fn test_status_as_plain_string_is_unset() {
        let task: Task = serde_json::from_str(r#"{"id": "t1", "status": "open"}"#).unwrap();
        assert_eq!(task.status, TaskStatus::default());
    }

    #[test]
    fn test_malformed_task_does_not_drop_the_batch() {
        let page: TasksPage = serde_json::from_str(
            r#"{"tasks": [
                {"id": "good", "name": "Fine", "status": {"status": "open", "type": "open"}},
                {"id": "bad", "assignees": [null], "list": "Sprint"},
                null,
                "garbage"
            ]}"#,
        )
        .unwrap();

        let ids: Vec<_> = page.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["good", "bad"]);
        assert_eq!(page.tasks[1].assignees, Some(vec![]));
    }

    #[test]
    fn test_tasks_not_an_array_is_empty() {
        let page: TasksPage = serde_json::from_str(r#"{"tasks": {"id": "t1"}}"#).unwrap();
        assert!(page.tasks.is_empty());
    }

    #[test]
    fn test_folder_visibility_flags_are_optional() {
        let page: FoldersPage = serde_json::from_str(
            r#"{"folders": [{"id": "1", "name": "Ops", "hidden": true}, {"id": 2, "name": "Web"}]}"#,
        )
        .unwrap();
        assert_eq!(page.folders[0].hidden, Some(true));
        assert_eq!(page.folders[1].id, "2");
        assert!(page.folders[1].access.is_none());
    }
}
