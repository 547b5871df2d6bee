use shared_types::{ContainerRef, Task};

pub const UNKNOWN_PROJECT_ID: &str = "unknown";
pub const UNKNOWN_PROJECT_NAME: &str = "Unknown Project";

/// Identity of the project a task rolls up into.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectRef {
    pub id: String,
    pub name: String,
}

impl ProjectRef {
    pub fn unknown() -> Self {
        Self {
            id: UNKNOWN_PROJECT_ID.to_string(),
            name: UNKNOWN_PROJECT_NAME.to_string(),
        }
    }
}

impl From<&ContainerRef> for ProjectRef {
    fn from(container: &ContainerRef) -> Self {
        Self {
            id: container.id.clone(),
            name: container.name.clone(),
        }
    }
}

/// Resolve the owning project: project, then folder, then list.
pub fn resolve(task: &Task) -> ProjectRef {
    task.project
        .as_ref()
        .or(task.folder.as_ref())
        .or(task.list.as_ref())
        .map(ProjectRef::from)
        .unwrap_or_else(ProjectRef::unknown)
}
