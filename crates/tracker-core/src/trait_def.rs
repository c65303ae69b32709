//! The IssueTracker trait definition.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::TrackerError;
use crate::issue::{CreatedIssue, TrackerIssue};
use crate::project::ProjectRef;

/// Trait for issue tracker backends.
///
/// Implementations must be safe to share between concurrent requests.
/// None of the methods retry; a failed call is reported once.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// Search for open issues whose title contains `title`.
    ///
    /// The search is advisory: it may return partial or over-broad matches,
    /// so callers must re-check titles themselves.
    async fn find_open_issues_by_title(
        &self,
        project: &ProjectRef,
        title: &str,
    ) -> Result<Vec<TrackerIssue>, TrackerError>;

    /// Create a new issue.
    async fn create_issue(
        &self,
        project: &ProjectRef,
        title: &str,
        description: &str,
    ) -> Result<CreatedIssue, TrackerError>;

    /// Add a note to an existing issue.
    async fn add_comment(
        &self,
        project: &ProjectRef,
        iid: u64,
        body: &str,
    ) -> Result<(), TrackerError>;

    /// Get the name of this tracker (for logging/debugging).
    fn name(&self) -> &str;
}

#[async_trait]
impl<T: IssueTracker + ?Sized> IssueTracker for Arc<T> {
    async fn find_open_issues_by_title(
        &self,
        project: &ProjectRef,
        title: &str,
    ) -> Result<Vec<TrackerIssue>, TrackerError> {
        (**self).find_open_issues_by_title(project, title).await
    }

    async fn create_issue(
        &self,
        project: &ProjectRef,
        title: &str,
        description: &str,
    ) -> Result<CreatedIssue, TrackerError> {
        (**self).create_issue(project, title, description).await
    }

    async fn add_comment(
        &self,
        project: &ProjectRef,
        iid: u64,
        body: &str,
    ) -> Result<(), TrackerError> {
        (**self).add_comment(project, iid, body).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
