//! GitLab issue tracker client.
//!
//! This crate provides a Rust client for the parts of the GitLab v4 REST API
//! the alert relay needs:
//!
//! - Searching a project's open issues by title
//! - Creating issues
//! - Adding notes (comments) to existing issues
//!
//! [`GitLabClient`] implements [`tracker_core::IssueTracker`], so it can be
//! handed directly to the upsert engine.
//!
//! # Example
//!
//! ```no_run
//! use gitlab_client::{GitLabClient, GitLabConfig};
//! use tracker_core::{IssueTracker, ProjectRef};
//!
//! # async fn example() -> Result<(), tracker_core::TrackerError> {
//! let config = GitLabConfig::new("https://gitlab.com/api/v4", "glpat-xxxx");
//! let client = GitLabClient::new(config)?;
//!
//! let project = ProjectRef::parse("ops/alerts").unwrap();
//! let issues = client.find_open_issues_by_title(&project, "HighCPU - host1").await?;
//! println!("{} candidate issues", issues.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod types;

pub use client::GitLabClient;
pub use config::{GitLabConfig, DEFAULT_TIMEOUT, PRIVATE_TOKEN_HEADER};
pub use types::{NewIssue, NewNote};

/// Crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
