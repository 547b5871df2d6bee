//! Aggregation Crate
//!
//! Pure transforms from a batch of ClickUp tasks to the dashboard payload.
//! Nothing in here performs I/O or keeps state between calls.
//!
//! # Components
//!
//! - [`classify`]: maps a task status to exactly one [`TaskCategory`]
//! - [`project`]: resolves the project a task rolls up into
//! - [`week`]: the current Monday-to-Sunday window
//! - [`rollup`]: counters, progress, filtered views and the assignee histogram
//!
//! # Example
//!
//! ```rust,ignore
//! use aggregation::DashboardAggregator;
//!
//! let aggregator = DashboardAggregator::new(&chrono::Local::now());
//! let response = aggregator.aggregate(&page.tasks, active_projects);
//! ```

pub mod classify;
pub mod project;
pub mod rollup;
pub mod week;

pub use classify::{classify, TaskCategory};
pub use project::{resolve, ProjectRef};
pub use rollup::{count_active_projects, DashboardAggregator, RECENT_TASK_LIMIT};
pub use week::WeekWindow;
