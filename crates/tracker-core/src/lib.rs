//! Core trait and types for issue tracker implementations.
//!
//! This crate provides the shared interface between the upsert engine and
//! the concrete trackers it talks to. It defines:
//!
//! - [`IssueTracker`] - The trait that every tracker backend implements
//! - [`TrackerIssue`] / [`IssueState`] - The tracker's view of an issue
//! - [`ProjectRef`] - Which project a mutation targets
//! - [`RenderedContent`] - The text written to the tracker for one alert
//! - [`TrackerError`] - Error types for tracker operations, tagged by [`Phase`]
//!
//! # Example
//!
//! ```rust
//! use tracker_core::{
//!     async_trait, CreatedIssue, IssueTracker, ProjectRef, TrackerError, TrackerIssue,
//! };
//!
//! struct NullTracker;
//!
//! #[async_trait]
//! impl IssueTracker for NullTracker {
//!     async fn find_open_issues_by_title(
//!         &self,
//!         _project: &ProjectRef,
//!         _title: &str,
//!     ) -> Result<Vec<TrackerIssue>, TrackerError> {
//!         Ok(Vec::new())
//!     }
//!
//!     async fn create_issue(
//!         &self,
//!         _project: &ProjectRef,
//!         _title: &str,
//!         _description: &str,
//!     ) -> Result<CreatedIssue, TrackerError> {
//!         Ok(CreatedIssue::Unconfirmed)
//!     }
//!
//!     async fn add_comment(
//!         &self,
//!         _project: &ProjectRef,
//!         _iid: u64,
//!         _body: &str,
//!     ) -> Result<(), TrackerError> {
//!         Ok(())
//!     }
//!
//!     fn name(&self) -> &str {
//!         "NullTracker"
//!     }
//! }
//! ```

mod content;
mod error;
mod issue;
mod project;
mod trait_def;

pub use content::RenderedContent;
pub use error::{Phase, TrackerError};
pub use issue::{CreatedIssue, IssueState, TrackerIssue};
pub use project::ProjectRef;
pub use trait_def::IssueTracker;

// Re-export async_trait for convenience
pub use async_trait::async_trait;
