//! Upsert outcomes.

use std::fmt;

/// What an upsert did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// A new issue was created.
    Created { iid: u64 },
    /// A new issue was created but the tracker's response did not say which.
    CreatedUnconfirmed,
    /// A matching open issue exists and commenting is disabled.
    AlreadyExists { iid: u64 },
    /// A matching open issue exists and a comment was added to it.
    Commented { iid: u64 },
}

impl UpsertOutcome {
    /// Issue the outcome refers to, if known.
    pub fn iid(&self) -> Option<u64> {
        match self {
            UpsertOutcome::Created { iid }
            | UpsertOutcome::AlreadyExists { iid }
            | UpsertOutcome::Commented { iid } => Some(*iid),
            UpsertOutcome::CreatedUnconfirmed => None,
        }
    }

    /// Returns true if a new issue was created.
    pub fn is_created(&self) -> bool {
        matches!(
            self,
            UpsertOutcome::Created { .. } | UpsertOutcome::CreatedUnconfirmed
        )
    }
}

impl fmt::Display for UpsertOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpsertOutcome::Created { iid } => write!(f, "created #{}", iid),
            UpsertOutcome::CreatedUnconfirmed => f.write_str("created (iid unknown)"),
            UpsertOutcome::AlreadyExists { iid } => write!(f, "already open as #{}", iid),
            UpsertOutcome::Commented { iid } => write!(f, "commented on #{}", iid),
        }
    }
}
