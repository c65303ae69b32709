//! Route handlers for the relay.

pub mod alert;
pub mod health;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // Alertmanager webhook; other methods get 405
        .route("/alert", post(alert::receive_alert))
        // Health check
        .route("/health", get(health::health))
}
