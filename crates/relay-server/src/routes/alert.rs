//! Alertmanager webhook route.

use alert_templates::AlertPayload;
use axum::body::Bytes;
use axum::extract::State;
use serde_json::Value;
use tracing::info;

use crate::error::{RelayError, Result};
use crate::state::AppState;

/// Acknowledgement returned once a payload has been processed.
pub const ACK: &str = "Alert received and processed";

/// Receive one webhook notification.
///
/// The body is decoded by hand so that every decode failure is a 400,
/// whatever the request's content type says.
pub async fn receive_alert(State(state): State<AppState>, body: Bytes) -> Result<&'static str> {
    let payload = decode_payload(&body)?;
    info!(
        alerts = payload.alerts.len(),
        status = %payload.status,
        receiver = %payload.receiver,
        "Webhook received"
    );

    let report = state.ingestor.ingest(&payload).await;
    info!(%report, "Webhook processed");

    if report.all_invalid() {
        return Err(RelayError::InvalidInput(
            "every alert rendered an empty title".to_string(),
        ));
    }
    Ok(ACK)
}

/// Decode a webhook body, accepting only a JSON object.
///
/// The derived payload deserializer would also take a JSON array and fill
/// every missing field with its default.
fn decode_payload(body: &[u8]) -> Result<AlertPayload> {
    let value: Value = serde_json::from_slice(body)?;
    if !value.is_object() {
        return Err(RelayError::InvalidInput(
            "payload must be a JSON object".to_string(),
        ));
    }
    Ok(serde_json::from_value(value)?)
}
