//! Error types for the upsert engine.

use thiserror::Error;
use tracker_core::{Phase, TrackerError};

/// Errors that can occur while upserting one alert.
#[derive(Debug, Error)]
pub enum UpsertError {
    /// The title is empty after trimming.
    #[error("Issue title is empty")]
    InvalidTitle,

    /// No project was given and no default is configured.
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    /// The search for existing issues failed; nothing was changed.
    #[error("Issue lookup failed: {0}")]
    LookupFailed(#[source] TrackerError),

    /// The search answered but its body could not be decoded.
    #[error("Issue lookup returned an unreadable response: {0}")]
    Decode(#[source] TrackerError),

    /// Creating the issue or adding the comment failed.
    #[error("Issue {phase} failed: {source}")]
    MutationFailed {
        phase: Phase,
        #[source]
        source: TrackerError,
    },
}

impl UpsertError {
    /// Map an error from the lookup call.
    pub(crate) fn lookup(err: TrackerError) -> Self {
        if err.is_decode() {
            UpsertError::Decode(err)
        } else {
            UpsertError::LookupFailed(err)
        }
    }

    /// Map an error from a create or comment call.
    pub(crate) fn mutation(phase: Phase, source: TrackerError) -> Self {
        UpsertError::MutationFailed { phase, source }
    }

    /// Returns true if the input itself was unusable.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, UpsertError::InvalidTitle)
    }
}
