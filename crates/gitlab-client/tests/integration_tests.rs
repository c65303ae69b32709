//! HTTP contract tests for gitlab-client against a mock GitLab server.

use std::time::Duration;

use gitlab_client::{GitLabClient, GitLabConfig};
use serde_json::json;
use tracker_core::{CreatedIssue, IssueTracker, Phase, ProjectRef, TrackerError};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "glpat-test-token";

fn client_for(server: &MockServer) -> GitLabClient {
    let config = GitLabConfig::new(server.uri(), TOKEN).with_timeout(Duration::from_secs(2));
    GitLabClient::new(config).unwrap()
}

fn project() -> ProjectRef {
    ProjectRef::parse("42").unwrap()
}

// ============================================================================
// Construction
// ============================================================================

mod config_tests {
    use super::*;

    #[test]
    fn test_missing_token_is_configuration_error() {
        let result = GitLabClient::new(GitLabConfig::new("https://gitlab.example.com/api/v4", "  "));
        assert!(matches!(result, Err(TrackerError::Configuration(_))));
    }

    #[test]
    fn test_missing_url_is_configuration_error() {
        let result = GitLabClient::new(GitLabConfig::new("", TOKEN));
        assert!(matches!(result, Err(TrackerError::Configuration(_))));
    }

    #[test]
    fn test_client_name() {
        let client =
            GitLabClient::new(GitLabConfig::new("https://gitlab.example.com/api/v4", TOKEN))
                .unwrap();
        assert_eq!(client.name(), "GitLab");
    }
}

// ============================================================================
// Lookup
// ============================================================================

mod lookup_tests {
    use super::*;

    #[tokio::test]
    async fn test_search_sends_filters_and_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/projects/42/issues"))
            .and(query_param("state", "opened"))
            .and(query_param("search", "HighCPU - host1"))
            .and(query_param("in", "title"))
            .and(header("PRIVATE-TOKEN", TOKEN))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 100, "iid": 3, "title": "HighCPU - host1", "state": "opened"},
                {"id": 101, "iid": 4, "title": "HighCPU - host10", "state": "opened"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let issues = client_for(&server)
            .find_open_issues_by_title(&project(), "HighCPU - host1")
            .await
            .unwrap();

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].iid, 3);
        assert_eq!(issues[1].title, "HighCPU - host10");
    }

    #[tokio::test]
    async fn test_search_non_success_is_lookup_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/projects/42/issues"))
            .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .find_open_issues_by_title(&project(), "Disk full")
            .await
            .unwrap_err();

        match err {
            TrackerError::Status { phase, status, body } => {
                assert_eq!(phase, Phase::Lookup);
                assert_eq!(status, 503);
                assert_eq!(body, "maintenance");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_search_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/projects/42/issues"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .find_open_issues_by_title(&project(), "Disk full")
            .await
            .unwrap_err();

        assert!(err.is_decode());
        assert_eq!(err.phase(), Some(Phase::Lookup));
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let config = GitLabConfig::new("http://127.0.0.1:1", TOKEN)
            .with_timeout(Duration::from_millis(500));
        let client = GitLabClient::new(config).unwrap();

        let err = client
            .find_open_issues_by_title(&project(), "Disk full")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            TrackerError::Transport {
                phase: Phase::Lookup,
                ..
            }
        ));
    }
}

// ============================================================================
// Mutations
// ============================================================================

mod mutation_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_posts_title_and_description() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/projects/42/issues"))
            .and(header("PRIVATE-TOKEN", TOKEN))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "title": "HighCPU - host1",
                "description": "CPU > 90%"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 900,
                "iid": 12,
                "title": "HighCPU - host1",
                "state": "opened",
                "web_url": "https://gitlab.example.com/ops/alerts/-/issues/12"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let created = client_for(&server)
            .create_issue(&project(), "HighCPU - host1", "CPU > 90%")
            .await
            .unwrap();

        assert_eq!(created.iid(), Some(12));
    }

    #[tokio::test]
    async fn test_create_with_unparseable_body_is_unconfirmed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/projects/42/issues"))
            .respond_with(ResponseTemplate::new(201).set_body_string("created"))
            .mount(&server)
            .await;

        let created = client_for(&server)
            .create_issue(&project(), "HighCPU - host1", "CPU > 90%")
            .await
            .unwrap();

        assert_eq!(created, CreatedIssue::Unconfirmed);
    }

    #[tokio::test]
    async fn test_create_rejected_is_create_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/projects/42/issues"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .create_issue(&project(), "HighCPU - host1", "CPU > 90%")
            .await
            .unwrap_err();

        assert_eq!(err.phase(), Some(Phase::Create));
        assert_eq!(err.status(), Some(500));
    }

    #[tokio::test]
    async fn test_comment_posts_note_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/projects/42/issues/12/notes"))
            .and(header("PRIVATE-TOKEN", TOKEN))
            .and(body_json(json!({"body": "Alert fired again"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1})))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .add_comment(&project(), 12, "Alert fired again")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_comment_rejected_is_comment_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/projects/42/issues/12/notes"))
            .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .add_comment(&project(), 12, "Alert fired again")
            .await
            .unwrap_err();

        assert_eq!(err.phase(), Some(Phase::Comment));
        assert_eq!(err.status(), Some(403));
    }
}
