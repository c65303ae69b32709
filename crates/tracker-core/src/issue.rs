//! Issue types as seen by a tracker.

use serde::{Deserialize, Serialize};

/// Lifecycle state of a tracker issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueState {
    Opened,
    Closed,
    /// Any state this crate does not know about (e.g. `locked`).
    #[serde(other)]
    Other,
}

impl IssueState {
    /// Returns true if the issue still counts as open for deduplication.
    pub fn is_open(&self) -> bool {
        matches!(self, IssueState::Opened)
    }
}

/// An issue owned by the remote tracker.
///
/// Only the fields the relay reads are decoded; everything else in the
/// tracker's response is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerIssue {
    /// Project-scoped issue number.
    pub iid: u64,
    /// Issue title as stored by the tracker.
    pub title: String,
    /// Current state.
    pub state: IssueState,
    /// Browser URL, when the tracker reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_url: Option<String>,
}

impl TrackerIssue {
    /// Create an open issue.
    pub fn opened(iid: u64, title: impl Into<String>) -> Self {
        Self {
            iid,
            title: title.into(),
            state: IssueState::Opened,
            web_url: None,
        }
    }

    /// Returns true if this issue's trimmed title equals the trimmed `title`.
    pub fn title_matches(&self, title: &str) -> bool {
        self.title.trim() == title.trim()
    }
}

/// Result of a successful create call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreatedIssue {
    /// The tracker returned the new issue.
    Confirmed(TrackerIssue),
    /// The tracker accepted the request but its body could not be decoded.
    Unconfirmed,
}

impl CreatedIssue {
    /// Issue number of the created issue, if known.
    pub fn iid(&self) -> Option<u64> {
        match self {
            CreatedIssue::Confirmed(issue) => Some(issue.iid),
            CreatedIssue::Unconfirmed => None,
        }
    }
}
