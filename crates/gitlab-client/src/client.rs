//! GitLab HTTP client.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use tracing::{debug, info, warn};
use tracker_core::{CreatedIssue, IssueTracker, Phase, ProjectRef, TrackerError, TrackerIssue};

use crate::config::{GitLabConfig, PRIVATE_TOKEN_HEADER};
use crate::types::{NewIssue, NewNote};

/// Client for the GitLab issues API.
///
/// Cloning is cheap; clones share one connection pool.
#[derive(Clone)]
pub struct GitLabClient {
    http: Client,
    config: GitLabConfig,
}

impl GitLabClient {
    /// Build a client. Fails if the token or URL is missing.
    pub fn new(config: GitLabConfig) -> Result<Self, TrackerError> {
        if config.api_url.is_empty() {
            return Err(TrackerError::Configuration(
                "GitLab API URL is empty".to_string(),
            ));
        }
        if config.token.is_empty() {
            return Err(TrackerError::Configuration(
                "GitLab token is empty".to_string(),
            ));
        }

        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| TrackerError::Configuration(format!("HTTP client: {}", e)))?;

        info!(api_url = %config.api_url, "GitLab client configured");
        Ok(Self { http, config })
    }

    /// Send an authenticated request and reject non-2xx statuses.
    async fn send(&self, phase: Phase, request: RequestBuilder) -> Result<Response, TrackerError> {
        let response = request
            .header(PRIVATE_TOKEN_HEADER, &self.config.token)
            .send()
            .await
            .map_err(|e| TrackerError::Transport {
                phase,
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TrackerError::Status {
                phase,
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    async fn read_body(phase: Phase, response: Response) -> Result<String, TrackerError> {
        response.text().await.map_err(|e| TrackerError::Transport {
            phase,
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl IssueTracker for GitLabClient {
    async fn find_open_issues_by_title(
        &self,
        project: &ProjectRef,
        title: &str,
    ) -> Result<Vec<TrackerIssue>, TrackerError> {
        let url = self.config.search_url(project, title);
        debug!(%project, %title, "Searching open issues");

        let response = self.send(Phase::Lookup, self.http.get(&url)).await?;
        let body = Self::read_body(Phase::Lookup, response).await?;

        let issues: Vec<TrackerIssue> =
            serde_json::from_str(&body).map_err(|e| TrackerError::Decode {
                phase: Phase::Lookup,
                message: e.to_string(),
            })?;

        for issue in &issues {
            debug!(iid = issue.iid, title = %issue.title, "Search candidate");
        }
        Ok(issues)
    }

    async fn create_issue(
        &self,
        project: &ProjectRef,
        title: &str,
        description: &str,
    ) -> Result<CreatedIssue, TrackerError> {
        let url = self.config.issues_url(project);
        let request = self.http.post(&url).json(&NewIssue { title, description });

        let response = self.send(Phase::Create, request).await?;

        // The status already confirmed the issue exists; an unreadable body
        // only costs us the iid.
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!(%project, error = %e, "Issue created but response body unreadable");
                return Ok(CreatedIssue::Unconfirmed);
            }
        };
        match serde_json::from_str::<TrackerIssue>(&body) {
            Ok(issue) => Ok(CreatedIssue::Confirmed(issue)),
            Err(e) => {
                warn!(%project, error = %e, "Issue created but response could not be decoded");
                Ok(CreatedIssue::Unconfirmed)
            }
        }
    }

    async fn add_comment(
        &self,
        project: &ProjectRef,
        iid: u64,
        body: &str,
    ) -> Result<(), TrackerError> {
        let url = self.config.notes_url(project, iid);
        let request = self.http.post(&url).json(&NewNote { body });

        self.send(Phase::Comment, request).await?;
        Ok(())
    }

    fn name(&self) -> &str {
        "GitLab"
    }
}

impl std::fmt::Debug for GitLabClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitLabClient")
            .field("config", &self.config)
            .finish()
    }
}
