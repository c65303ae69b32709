//! The upsert engine.

use tracing::{debug, info, info_span, warn, Instrument};
use tracker_core::{CreatedIssue, IssueTracker, Phase, ProjectRef, RenderedContent, TrackerIssue};

use crate::error::UpsertError;
use crate::locks::KeyedLocks;
use crate::outcome::UpsertOutcome;

/// Engine settings, read once at startup.
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// Add the rendered comment to an existing open issue.
    pub comment_on_existing: bool,
    /// Project used when the alert does not name one.
    pub default_project: Option<ProjectRef>,
}

/// Creates issues for new alerts and comments on (or skips) known ones.
///
/// Safe to share between concurrent requests. Upserts for the same
/// `(project, title)` run one at a time; unrelated keys run in parallel.
pub struct UpsertEngine<T: IssueTracker> {
    tracker: T,
    config: EngineConfig,
    locks: KeyedLocks,
}

impl<T: IssueTracker> UpsertEngine<T> {
    /// Create an engine over a tracker.
    pub fn new(tracker: T, config: EngineConfig) -> Self {
        Self {
            tracker,
            config,
            locks: KeyedLocks::new(),
        }
    }

    /// Resolve the project for one upsert, falling back to the default.
    pub fn resolve_project(&self, project: Option<ProjectRef>) -> Result<ProjectRef, UpsertError> {
        project
            .or_else(|| self.config.default_project.clone())
            .ok_or_else(|| {
                UpsertError::MissingConfiguration(
                    "no project in alert labels and no default project configured".to_string(),
                )
            })
    }

    /// Create an issue titled `title`, or handle the open issue that already has it.
    ///
    /// No tracker call is made for an empty title or an unresolved project.
    /// Errors are never retried here.
    pub async fn upsert(
        &self,
        title: &str,
        content: &RenderedContent,
        project: Option<ProjectRef>,
    ) -> Result<UpsertOutcome, UpsertError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(UpsertError::InvalidTitle);
        }
        let project = self.resolve_project(project)?;

        let span = info_span!("upsert", %project, %title, tracker = self.tracker.name());
        self.upsert_locked(&project, title, content)
            .instrument(span)
            .await
    }

    async fn upsert_locked(
        &self,
        project: &ProjectRef,
        title: &str,
        content: &RenderedContent,
    ) -> Result<UpsertOutcome, UpsertError> {
        // Held from lookup until the mutation returns.
        let _guard = self.locks.acquire(project, title).await;

        let candidates = self
            .tracker
            .find_open_issues_by_title(project, title)
            .await
            .map_err(UpsertError::lookup)?;
        debug!(candidates = candidates.len(), "Lookup returned");

        match select_existing(&candidates, title) {
            Some(existing) => self.handle_existing(project, existing, content).await,
            None => self.create(project, title, content).await,
        }
    }

    async fn handle_existing(
        &self,
        project: &ProjectRef,
        existing: &TrackerIssue,
        content: &RenderedContent,
    ) -> Result<UpsertOutcome, UpsertError> {
        let iid = existing.iid;
        if !self.config.comment_on_existing {
            info!(iid, "Issue already open");
            return Ok(UpsertOutcome::AlreadyExists { iid });
        }

        self.tracker
            .add_comment(project, iid, &content.comment)
            .await
            .map_err(|e| UpsertError::mutation(Phase::Comment, e))?;
        info!(iid, "Commented on open issue");
        Ok(UpsertOutcome::Commented { iid })
    }

    async fn create(
        &self,
        project: &ProjectRef,
        title: &str,
        content: &RenderedContent,
    ) -> Result<UpsertOutcome, UpsertError> {
        let created = self
            .tracker
            .create_issue(project, title, &content.description)
            .await
            .map_err(|e| UpsertError::mutation(Phase::Create, e))?;

        match created {
            CreatedIssue::Confirmed(issue) => {
                info!(iid = issue.iid, "Issue created");
                Ok(UpsertOutcome::Created { iid: issue.iid })
            }
            CreatedIssue::Unconfirmed => {
                warn!("Issue created but tracker did not return it");
                Ok(UpsertOutcome::CreatedUnconfirmed)
            }
        }
    }
}

/// Pick the canonical existing issue among search results.
///
/// Only open issues whose trimmed title equals the trimmed `title` count;
/// the lowest `iid` wins because the tracker guarantees no ordering.
pub fn select_existing<'a>(candidates: &'a [TrackerIssue], title: &str) -> Option<&'a TrackerIssue> {
    candidates
        .iter()
        .filter(|issue| issue.state.is_open())
        .filter(|issue| issue.title_matches(title))
        .min_by_key(|issue| issue.iid)
}
