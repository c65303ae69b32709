//! Error types for tracker operations.

use std::fmt;

use thiserror::Error;

/// The tracker call an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Searching for open issues.
    Lookup,
    /// Creating a new issue.
    Create,
    /// Adding a note to an existing issue.
    Comment,
}

impl Phase {
    /// Lowercase name used in logs and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Lookup => "lookup",
            Phase::Create => "create",
            Phase::Comment => "comment",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur when talking to an issue tracker.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// The request never produced a response (connect, TLS, timeout).
    #[error("{phase} request failed: {message}")]
    Transport { phase: Phase, message: String },

    /// The tracker answered with a non-2xx status.
    #[error("{phase} rejected with HTTP {status}: {body}")]
    Status {
        phase: Phase,
        status: u16,
        body: String,
    },

    /// The response body could not be decoded.
    #[error("{phase} response could not be decoded: {message}")]
    Decode { phase: Phase, message: String },

    /// Invalid or missing configuration.
    #[error("Invalid configuration: {0}")]
    Configuration(String),
}

impl TrackerError {
    /// The phase this error belongs to, if it came from a tracker call.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            TrackerError::Transport { phase, .. }
            | TrackerError::Status { phase, .. }
            | TrackerError::Decode { phase, .. } => Some(*phase),
            TrackerError::Configuration(_) => None,
        }
    }

    /// HTTP status of a rejected request.
    pub fn status(&self) -> Option<u16> {
        match self {
            TrackerError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the response body was the problem, not the request.
    pub fn is_decode(&self) -> bool {
        matches!(self, TrackerError::Decode { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::Lookup.to_string(), "lookup");
        assert_eq!(Phase::Create.to_string(), "create");
        assert_eq!(Phase::Comment.to_string(), "comment");
    }

    #[test]
    fn test_status_error_message() {
        let err = TrackerError::Status {
            phase: Phase::Create,
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "create rejected with HTTP 500: boom");
        assert_eq!(err.phase(), Some(Phase::Create));
        assert_eq!(err.status(), Some(500));
        assert!(!err.is_decode());
    }

    #[test]
    fn test_configuration_has_no_phase() {
        let err = TrackerError::Configuration("GITLAB_TOKEN is empty".to_string());
        assert_eq!(err.phase(), None);
        assert_eq!(err.status(), None);
    }
}
