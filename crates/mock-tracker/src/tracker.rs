//! In-memory tracker implementation.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;
use tracker_core::{
    CreatedIssue, IssueState, IssueTracker, Phase, ProjectRef, TrackerError, TrackerIssue,
};

/// A call received by the mock, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerCall {
    Lookup {
        project: String,
        title: String,
    },
    Create {
        project: String,
        title: String,
        description: String,
    },
    Comment {
        project: String,
        iid: u64,
        body: String,
    },
}

#[derive(Default)]
struct State {
    issues: HashMap<ProjectRef, Vec<TrackerIssue>>,
    calls: Vec<TrackerCall>,
    create_failures: HashMap<String, u16>,
    lookup_failure: Option<u16>,
    comment_failure: Option<u16>,
    malformed_lookup: bool,
    unconfirmed_creates: bool,
}

/// An issue tracker that lives in memory.
///
/// Share it with the code under test through an `Arc` and keep a handle to
/// inspect [`calls`](Self::calls) afterwards.
#[derive(Default)]
pub struct MockTracker {
    state: Mutex<State>,
    latency: Option<Duration>,
}

impl MockTracker {
    /// Create an empty tracker with no latency.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty tracker that sleeps before answering every call.
    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency: Some(latency),
            ..Self::default()
        }
    }

    /// Insert an issue directly, bypassing call recording.
    pub fn seed_issue(&self, project: &ProjectRef, iid: u64, title: &str, state: IssueState) {
        self.lock()
            .issues
            .entry(project.clone())
            .or_default()
            .push(TrackerIssue {
                iid,
                title: title.to_string(),
                state,
                web_url: None,
            });
    }

    /// Reject create calls for this exact title with the given status.
    pub fn fail_create_for(&self, title: &str, status: u16) {
        self.lock()
            .create_failures
            .insert(title.to_string(), status);
    }

    /// Reject every lookup with the given status.
    pub fn fail_lookup_with(&self, status: u16) {
        self.lock().lookup_failure = Some(status);
    }

    /// Reject every comment with the given status.
    pub fn fail_comments_with(&self, status: u16) {
        self.lock().comment_failure = Some(status);
    }

    /// Answer lookups with a body that cannot be decoded.
    pub fn malformed_lookups(&self) {
        self.lock().malformed_lookup = true;
    }

    /// Accept creates without returning the created issue.
    pub fn unconfirmed_creates(&self) {
        self.lock().unconfirmed_creates = true;
    }

    /// All calls received so far.
    pub fn calls(&self) -> Vec<TrackerCall> {
        self.lock().calls.clone()
    }

    /// Number of create calls received, failed ones included.
    pub fn create_count(&self) -> usize {
        self.count(|call| matches!(call, TrackerCall::Create { .. }))
    }

    /// Number of comment calls received, failed ones included.
    pub fn comment_count(&self) -> usize {
        self.count(|call| matches!(call, TrackerCall::Comment { .. }))
    }

    /// Number of lookup calls received.
    pub fn lookup_count(&self) -> usize {
        self.count(|call| matches!(call, TrackerCall::Lookup { .. }))
    }

    /// Issues currently stored for a project.
    pub fn issues(&self, project: &ProjectRef) -> Vec<TrackerIssue> {
        self.lock()
            .issues
            .get(project)
            .cloned()
            .unwrap_or_default()
    }

    fn count(&self, predicate: impl Fn(&TrackerCall) -> bool) -> usize {
        self.lock().calls.iter().filter(|call| predicate(call)).count()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A panicking test thread must not hide the state from other assertions.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    async fn pause(&self) {
        if let Some(latency) = self.latency {
            sleep(latency).await;
        }
    }
}

fn rejected(phase: Phase, status: u16) -> TrackerError {
    TrackerError::Status {
        phase,
        status,
        body: format!("mock tracker rejected {}", phase),
    }
}

#[async_trait]
impl IssueTracker for MockTracker {
    async fn find_open_issues_by_title(
        &self,
        project: &ProjectRef,
        title: &str,
    ) -> Result<Vec<TrackerIssue>, TrackerError> {
        self.pause().await;

        let mut state = self.lock();
        state.calls.push(TrackerCall::Lookup {
            project: project.to_string(),
            title: title.to_string(),
        });

        if let Some(status) = state.lookup_failure {
            return Err(rejected(Phase::Lookup, status));
        }
        if state.malformed_lookup {
            return Err(TrackerError::Decode {
                phase: Phase::Lookup,
                message: "expected value at line 1 column 1".to_string(),
            });
        }

        let needle = title.trim().to_lowercase();
        let found = state
            .issues
            .get(project)
            .map(|issues| {
                issues
                    .iter()
                    .filter(|issue| issue.state.is_open())
                    .filter(|issue| issue.title.to_lowercase().contains(&needle))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(found)
    }

    async fn create_issue(
        &self,
        project: &ProjectRef,
        title: &str,
        description: &str,
    ) -> Result<CreatedIssue, TrackerError> {
        self.pause().await;

        let mut state = self.lock();
        state.calls.push(TrackerCall::Create {
            project: project.to_string(),
            title: title.to_string(),
            description: description.to_string(),
        });

        if let Some(status) = state.create_failures.get(title) {
            return Err(rejected(Phase::Create, *status));
        }

        let unconfirmed = state.unconfirmed_creates;
        let issues = state.issues.entry(project.clone()).or_default();
        let iid = issues.iter().map(|issue| issue.iid).max().unwrap_or(0) + 1;
        let issue = TrackerIssue::opened(iid, title);
        issues.push(issue.clone());

        if unconfirmed {
            Ok(CreatedIssue::Unconfirmed)
        } else {
            Ok(CreatedIssue::Confirmed(issue))
        }
    }

    async fn add_comment(
        &self,
        project: &ProjectRef,
        iid: u64,
        body: &str,
    ) -> Result<(), TrackerError> {
        self.pause().await;

        let mut state = self.lock();
        state.calls.push(TrackerCall::Comment {
            project: project.to_string(),
            iid,
            body: body.to_string(),
        });

        if let Some(status) = state.comment_failure {
            return Err(rejected(Phase::Comment, status));
        }

        let exists = state
            .issues
            .get(project)
            .is_some_and(|issues| issues.iter().any(|issue| issue.iid == iid));
        if !exists {
            return Err(rejected(Phase::Comment, 404));
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "MockTracker"
    }
}
