//! Configuration types for gitlab-client.

use std::fmt;
use std::time::Duration;

use tracker_core::ProjectRef;

/// Header GitLab reads personal/project access tokens from.
pub const PRIVATE_TOKEN_HEADER: &str = "PRIVATE-TOKEN";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration for connecting to a GitLab instance.
#[derive(Clone)]
pub struct GitLabConfig {
    /// API base URL including the version prefix (e.g., "https://gitlab.com/api/v4").
    pub api_url: String,
    /// Private token sent with every request.
    pub token: String,
    /// Timeout applied to each outbound request.
    pub timeout: Duration,
}

impl GitLabConfig {
    /// Create a new configuration with the given base URL and token.
    pub fn new(api_url: impl Into<String>, token: impl Into<String>) -> Self {
        let api_url = api_url.into().trim().trim_end_matches('/').to_string();
        Self {
            api_url,
            token: token.into().trim().to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Get the issues collection URL of a project.
    pub fn issues_url(&self, project: &ProjectRef) -> String {
        format!("{}/projects/{}/issues", self.api_url, project.url_segment())
    }

    /// Get the open-issue title search URL.
    pub fn search_url(&self, project: &ProjectRef, title: &str) -> String {
        format!(
            "{}?state=opened&search={}&in=title",
            self.issues_url(project),
            urlencoding::encode(title)
        )
    }

    /// Get the notes URL of an issue.
    pub fn notes_url(&self, project: &ProjectRef, iid: u64) -> String {
        format!("{}/{}/notes", self.issues_url(project), iid)
    }
}

impl fmt::Debug for GitLabConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GitLabConfig")
            .field("api_url", &self.api_url)
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(value: &str) -> ProjectRef {
        ProjectRef::parse(value).unwrap()
    }

    #[test]
    fn test_trailing_slash_stripped() {
        let config = GitLabConfig::new("https://gitlab.example.com/api/v4/", "t");
        assert_eq!(config.api_url, "https://gitlab.example.com/api/v4");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_search_url() {
        let config = GitLabConfig::new("https://gitlab.example.com/api/v4", "t");
        assert_eq!(
            config.search_url(&project("42"), "HighCPU - host1"),
            "https://gitlab.example.com/api/v4/projects/42/issues?state=opened&search=HighCPU%20-%20host1&in=title"
        );
    }

    #[test]
    fn test_notes_url_with_path_project() {
        let config = GitLabConfig::new("https://gitlab.example.com/api/v4", "t");
        assert_eq!(
            config.notes_url(&project("ops/alerts"), 7),
            "https://gitlab.example.com/api/v4/projects/ops%2Falerts/issues/7/notes"
        );
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = GitLabConfig::new("https://gitlab.example.com/api/v4", "glpat-secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("glpat-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
