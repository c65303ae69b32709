//! Error types for the webhook endpoint.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors surfaced to the webhook caller.
///
/// Tracker failures are not in here: they are logged and the caller still
/// gets a 200 once the payload itself was acceptable.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The body was not a valid payload.
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    /// The payload decoded but produced nothing usable.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let message = match &self {
            RelayError::InvalidJson(err) => {
                tracing::warn!("Rejected webhook body: {}", err);
                "Invalid JSON".to_string()
            }
            RelayError::InvalidInput(msg) => {
                tracing::warn!("Rejected webhook payload: {}", msg);
                format!("Invalid input: {}", msg)
            }
        };

        (StatusCode::BAD_REQUEST, message).into_response()
    }
}

/// Result type for webhook handlers.
pub type Result<T> = std::result::Result<T, RelayError>;
