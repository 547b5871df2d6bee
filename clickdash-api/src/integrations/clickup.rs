use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use shared_types::{Folder, FoldersPage, Task, TasksPage};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::config::{ClickUpConfig, ClickUpCredentials};

#[derive(Debug, Error)]
pub enum ClickUpError {
    #[error("request to ClickUp failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("ClickUp API error: {status} {reason}")]
    Status { status: u16, reason: String },
    #[error("failed to decode ClickUp response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Read-only client for the two ClickUp listings the dashboard needs.
#[derive(Debug, Clone)]
pub struct ClickUpClient {
    client: reqwest::Client,
    base_url: String,
}

impl ClickUpClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClickUpError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ClickUpConfig) -> Result<Self, ClickUpError> {
        Self::new(&config.api_url, Duration::from_secs(config.timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// All tasks of the team, closed ones included.
    pub async fn fetch_tasks(
        &self,
        credentials: &ClickUpCredentials,
    ) -> Result<Vec<Task>, ClickUpError> {
        let url = format!("{}/team/{}/task", self.base_url, credentials.team_id);
        debug!("Fetching ClickUp tasks from {}", url);

        let response = self
            .client
            .get(&url)
            .query(&[("include_closed", "true")])
            .header(AUTHORIZATION, credentials.api_key.as_str())
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let page: TasksPage = decode(response).await?;
        Ok(page.tasks)
    }

    pub async fn fetch_folders(
        &self,
        credentials: &ClickUpCredentials,
    ) -> Result<Vec<Folder>, ClickUpError> {
        let url = format!("{}/space/{}/folder", self.base_url, credentials.space_id);
        debug!("Fetching ClickUp folders from {}", url);

        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, credentials.api_key.as_str())
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let page: FoldersPage = decode(response).await?;
        Ok(page.folders)
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClickUpError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ClickUpError::Status {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        });
    }

    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        matchers::{header, method, path, query_param},
        Mock, MockServer, ResponseTemplate,
    };

    fn credentials() -> ClickUpCredentials {
        ClickUpCredentials {
            api_key: "pk_test".to_string(),
            team_id: "9012".to_string(),
            space_id: "5566".to_string(),
        }
    }

    fn client_for(server: &MockServer) -> ClickUpClient {
        ClickUpClient::new(&format!("{}/", server.uri()), Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let client =
            ClickUpClient::new("https://api.clickup.com/api/v2/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url(), "https://api.clickup.com/api/v2");
    }

    #[tokio::test]
    async fn test_fetch_tasks_sends_key_and_includes_closed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/team/9012/task"))
            .and(query_param("include_closed", "true"))
            .and(header("Authorization", "pk_test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "tasks": [
                    {"id": "t1", "name": "One", "status": {"status": "open", "type": "open"}},
                    {"id": "t2", "name": "Two", "status": {"status": "closed", "type": "closed"}}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let tasks = client_for(&server).fetch_tasks(&credentials()).await.unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[1].id, "t2");
    }

    #[tokio::test]
    async fn test_fetch_tasks_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/team/9012/task"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "err": "Token invalid",
                "ECODE": "OAUTH_025"
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch_tasks(&credentials())
            .await
            .unwrap_err();
        assert!(matches!(err, ClickUpError::Status { status: 401, .. }));
        assert_eq!(err.to_string(), "ClickUp API error: 401 Unauthorized");
    }

    #[tokio::test]
    async fn test_fetch_tasks_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/team/9012/task"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .fetch_tasks(&credentials())
            .await
            .unwrap_err();
        assert!(matches!(err, ClickUpError::Decode(_)));
    }

    #[tokio::test]
    async fn test_fetch_folders_uses_space_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/space/5566/folder"))
            .and(header("Accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "folders": [
                    {"id": "f1", "name": "Platform", "hidden": false, "access": true},
                    {"id": "f2", "name": "Archive", "hidden": true}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let folders = client_for(&server)
            .fetch_folders(&credentials())
            .await
            .unwrap();
        assert_eq!(folders.len(), 2);
        assert_eq!(folders[1].hidden, Some(true));
    }
}
