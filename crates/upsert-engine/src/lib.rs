//! Deduplication and idempotent issue upsert.
//!
//! [`UpsertEngine`] turns one rendered alert into at most one tracker
//! mutation while keeping a single open issue per `(project, title)`:
//!
//! 1. search the tracker for open issues matching the title
//! 2. keep only exact, trimmed title matches; the lowest `iid` wins
//! 3. comment on that issue (if enabled), or create a new one
//!
//! The tracker has no atomic create-if-absent, so the engine serializes
//! upserts for the same key inside this process with [`KeyedLocks`].
//! Separate processes, or separate relays, can still race.
//!
//! # Example
//!
//! ```rust
//! use mock_tracker::MockTracker;
//! use tracker_core::{ProjectRef, RenderedContent};
//! use upsert_engine::{EngineConfig, UpsertEngine, UpsertOutcome};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), upsert_engine::UpsertError> {
//! let config = EngineConfig {
//!     comment_on_existing: false,
//!     default_project: ProjectRef::parse("42"),
//! };
//! let engine = UpsertEngine::new(MockTracker::new(), config);
//!
//! let content = RenderedContent::new("HighCPU - host1", "CPU > 90%", "still firing");
//! let outcome = engine.upsert(&content.title, &content, None).await?;
//! assert_eq!(outcome, UpsertOutcome::Created { iid: 1 });
//!
//! let again = engine.upsert(&content.title, &content, None).await?;
//! assert_eq!(again, UpsertOutcome::AlreadyExists { iid: 1 });
//! # Ok(())
//! # }
//! ```

mod engine;
mod error;
mod locks;
mod outcome;

pub use engine::{select_existing, EngineConfig, UpsertEngine};
pub use error::UpsertError;
pub use locks::KeyedLocks;
pub use outcome::UpsertOutcome;
