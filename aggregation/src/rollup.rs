use std::collections::HashMap;

use chrono::{DateTime, TimeZone};
use shared_types::{
    Assignee, AssigneeOpenStat, DashboardResponse, DashboardStats, Folder, ProjectCounters,
    ProjectSummary, Task, TaskSummary, UserSummary,
};
use tracing::{debug, trace};

use crate::classify::{self, TaskCategory};
use crate::project::{self, ProjectRef};
use crate::week::WeekWindow;

/// Rows shown in the recent tasks table, in upstream order.
pub const RECENT_TASK_LIMIT: usize = 50;

/// Turns one batch of ClickUp tasks into the dashboard payload.
///
/// The aggregator holds nothing but the week window it was built with, so a
/// single instance can be reused for any number of batches.
#[derive(Debug, Clone, Copy)]
pub struct DashboardAggregator {
    window: WeekWindow,
}

impl DashboardAggregator {
    pub fn new<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        Self::with_window(WeekWindow::containing(now))
    }

    pub fn with_window(window: WeekWindow) -> Self {
        Self { window }
    }

    pub fn aggregate(&self, tasks: &[Task], active_projects: u32) -> DashboardResponse {
        DashboardResponse {
            stats: self.dashboard_stats(tasks, active_projects),
            projects: self.project_summaries(tasks),
            tasks: recent_tasks(tasks),
            review_tasks: review_tasks(tasks),
            open_tasks_by_assignee: open_tasks_by_assignee(tasks),
        }
    }

    pub fn dashboard_stats(&self, tasks: &[Task], active_projects: u32) -> DashboardStats {
        let mut stats = DashboardStats {
            total_tasks: saturating_count(tasks.len()),
            active_projects,
            ..Default::default()
        };

        for task in tasks {
            if classify::is_unassigned(task) {
                stats.unassigned += 1;
            }
            match classify::category_of(task) {
                TaskCategory::Completed => {
                    stats.completed += 1;
                    if self.window.contains_timestamp(task.date_done.as_deref()) {
                        stats.completed_this_week += 1;
                    }
                }
                TaskCategory::InProgress => stats.in_progress += 1,
                TaskCategory::InReview | TaskCategory::Todo | TaskCategory::Unclassified => {}
            }
        }

        stats
    }

    /// One summary per resolved project, in order of first appearance.
    pub fn project_summaries(&self, tasks: &[Task]) -> Vec<ProjectSummary> {
        group_by_project(tasks)
            .into_iter()
            .map(|(project, members)| {
                let counters = self.project_counters(&members);
                let progress = progress(&counters);

                debug!(
                    "Project {} ({}): {} tasks, todo={} in_progress={} completed={} progress={}%",
                    project.name,
                    project.id,
                    members.len(),
                    counters.todo,
                    counters.in_progress,
                    counters.completed,
                    progress
                );

                ProjectSummary {
                    id: project.id,
                    name: project.name,
                    progress,
                    counters,
                }
            })
            .collect()
    }

    fn project_counters(&self, members: &[&Task]) -> ProjectCounters {
        let mut counters = ProjectCounters::default();

        for task in members {
            let category = classify::category_of(task);
            trace!(
                "Task {:?} status {:?} ({:?}) -> {:?}",
                task.name,
                task.status.status,
                task.status.kind,
                category
            );

            match category {
                TaskCategory::Completed => {
                    counters.completed += 1;
                    if self.window.contains_timestamp(task.date_done.as_deref()) {
                        counters.completed_this_week += 1;
                    }
                }
                TaskCategory::InProgress => counters.in_progress += 1,
                TaskCategory::Todo => counters.todo += 1,
                TaskCategory::InReview | TaskCategory::Unclassified => {}
            }

            if self.window.contains_timestamp(task.due_date.as_deref()) {
                counters.due_this_week += 1;
            }
        }

        counters
    }
}

/// Completed share of todo + in progress + completed, rounded to a whole
/// percent. Zero when nothing is classified.
pub fn progress(counters: &ProjectCounters) -> u8 {
    let total = counters.todo + counters.in_progress + counters.completed;
    if total == 0 {
        return 0;
    }

    let percent = (f64::from(counters.completed) / f64::from(total) * 100.0).round();
    percent.clamp(0.0, 100.0) as u8
}

/// Folders count as active unless explicitly hidden or access-denied.
pub fn is_active_folder(folder: &Folder) -> bool {
    folder.hidden != Some(true) && folder.access != Some(false)
}

pub fn count_active_projects(folders: &[Folder]) -> u32 {
    saturating_count(folders.iter().filter(|f| is_active_folder(f)).count())
}

pub fn recent_tasks(tasks: &[Task]) -> Vec<TaskSummary> {
    tasks.iter().take(RECENT_TASK_LIMIT).map(summarize).collect()
}

/// Open tasks whose status mentions review, including ones counted as in
/// progress.
pub fn review_tasks(tasks: &[Task]) -> Vec<TaskSummary> {
    tasks
        .iter()
        .filter(|task| classify::is_awaiting_review(task))
        .map(summarize)
        .collect()
}

/// Count of non-completed tasks per assignee, keyed by assignee id and kept
/// in order of first appearance.
pub fn open_tasks_by_assignee(tasks: &[Task]) -> Vec<AssigneeOpenStat> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut stats: Vec<AssigneeOpenStat> = Vec::new();

    for task in tasks.iter().filter(|task| !classify::is_completed(task)) {
        for assignee in merged_assignees(task) {
            match positions.get(&assignee.id) {
                Some(&pos) => stats[pos].count += 1,
                None => {
                    positions.insert(assignee.id.clone(), stats.len());
                    stats.push(AssigneeOpenStat {
                        id: assignee.id.clone(),
                        username: assignee.username.clone(),
                        email: assignee.email.clone(),
                        count: 1,
                    });
                }
            }
        }
    }

    stats
}

/// Direct and group assignees of one task, one entry per id. A later record
/// with the same id replaces the earlier one in place.
fn merged_assignees(task: &Task) -> Vec<&Assignee> {
    let mut merged: Vec<&Assignee> = Vec::new();

    let all = task
        .assignees
        .iter()
        .flatten()
        .chain(task.group_assignees.iter().flatten());

    for assignee in all {
        match merged.iter().position(|seen| seen.id == assignee.id) {
            Some(pos) => merged[pos] = assignee,
            None => merged.push(assignee),
        }
    }

    merged
}

fn group_by_project(tasks: &[Task]) -> Vec<(ProjectRef, Vec<&Task>)> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<(ProjectRef, Vec<&Task>)> = Vec::new();

    for task in tasks {
        let project = project::resolve(task);
        match positions.get(&project.id) {
            Some(&pos) => groups[pos].1.push(task),
            None => {
                positions.insert(project.id.clone(), groups.len());
                groups.push((project, vec![task]));
            }
        }
    }

    groups
}

fn summarize(task: &Task) -> TaskSummary {
    TaskSummary {
        id: task.id.clone(),
        name: task.name.clone(),
        status: task.status.status.clone(),
        assignees: task
            .assignees
            .iter()
            .flatten()
            .map(UserSummary::from)
            .collect(),
        due_date: task.due_date.clone().filter(|due| !due.is_empty()),
        project_name: project::resolve(task).name,
    }
}

fn saturating_count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}
