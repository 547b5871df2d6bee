use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use aggregation::{count_active_projects, DashboardAggregator};
use chrono::Local;
use shared_types::ErrorResponse;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::config::{CredentialsError, CredentialsSource};
use crate::integrations::clickup::{ClickUpClient, ClickUpError};

#[derive(Clone)]
pub struct DashboardAppState {
    pub client: Arc<ClickUpClient>,
    pub credentials: CredentialsSource,
}

/// Failures surfaced by `GET /api/tasks`. Causes are logged, the caller only
/// ever sees the generic message.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Missing CLICKUP_API_KEY or CLICKUP_TEAM_ID environment variables")]
    Configuration(#[from] CredentialsError),
    #[error("Failed to fetch tasks from ClickUp")]
    Upstream(#[from] ClickUpError),
}

impl ResponseError for DashboardError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse::new(self.to_string()))
    }
}

pub async fn get_dashboard(
    state: web::Data<DashboardAppState>,
) -> Result<HttpResponse, DashboardError> {
    let credentials = state.credentials.load().map_err(|e| {
        error!("ClickUp credentials unavailable: {}", e);
        e
    })?;

    let tasks = state.client.fetch_tasks(&credentials).await.map_err(|e| {
        error!("Error fetching ClickUp tasks: {}", e);
        e
    })?;
    info!("Fetched {} tasks from ClickUp", tasks.len());

    let active_projects = match state.client.fetch_folders(&credentials).await {
        Ok(folders) => count_active_projects(&folders),
        Err(e) => {
            warn!("Failed to fetch ClickUp folders, reporting no active projects: {}", e);
            0
        }
    };

    let response = DashboardAggregator::new(&Local::now()).aggregate(&tasks, active_projects);

    info!(
        "Dashboard built: {} projects, {} review tasks, {} assignees with open tasks",
        response.projects.len(),
        response.review_tasks.len(),
        response.open_tasks_by_assignee.len()
    );

    Ok(HttpResponse::Ok().json(response))
}
