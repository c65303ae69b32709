//! Mock issue tracker for testing alert processing.
//!
//! This crate provides [`MockTracker`], an in-memory implementation of the
//! `IssueTracker` trait that:
//! - keeps issues per project and hands out increasing iids
//! - searches like a real tracker would (fuzzy substring, open issues only)
//! - records every call so tests can assert on exactly what was sent
//! - can be told to fail specific calls or to add latency
//!
//! # Example
//!
//! ```rust
//! use mock_tracker::{IssueTracker, MockTracker, ProjectRef};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mock_tracker::TrackerError> {
//!     let tracker = MockTracker::new();
//!     let project = ProjectRef::parse("42").unwrap();
//!
//!     tracker.create_issue(&project, "Disk full - host1", "df says 100%").await?;
//!
//!     let found = tracker.find_open_issues_by_title(&project, "Disk").await?;
//!     assert_eq!(found.len(), 1);
//!     assert_eq!(tracker.create_count(), 1);
//!     Ok(())
//! }
//! ```

mod tracker;

// Re-export tracker-core types for convenience
pub use tracker_core::{
    async_trait, CreatedIssue, IssueState, IssueTracker, Phase, ProjectRef, TrackerError,
    TrackerIssue,
};

pub use tracker::{MockTracker, TrackerCall};
