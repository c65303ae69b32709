//! Alertmanager to GitLab issue relay.
//!
//! Receives Alertmanager webhook notifications on `POST /alert`, renders
//! each alert into issue text and hands it to the upsert engine, which
//! creates a GitLab issue or notes the repeat on the one already open.

pub mod config;
pub mod error;
pub mod ingest;
pub mod routes;
pub mod state;

pub use config::{Config, ConfigError, Grouping};
pub use error::RelayError;
pub use ingest::{IngestReport, Ingestor};
pub use state::AppState;

/// Build the router with its state attached.
pub fn app(state: AppState) -> axum::Router {
    routes::router().with_state(state)
}
