//! Alert Routes

use alert_payload::AlertPayload;
use axum::{body::Bytes, extract::State, Json};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::ReceiverError;
use crate::routes::prometheus::{ALERTS_RECEIVED, ALERTS_REJECTED};
use crate::AppState;

/// Fixed acknowledgment returned for every accepted payload
#[derive(Debug, Serialize)]
pub struct Ack {
    pub status: &'static str,
}

impl Ack {
    pub const OK: Ack = Ack { status: "ok" };
}

/// Receive an alert payload.
///
/// The body is parsed as JSON whatever the `Content-Type` says, rendered with
/// two-space indentation and written to the console sink.
pub async fn receive_alert(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Ack>, ReceiverError> {
    let payload = AlertPayload::from_slice(&body).map_err(|err| {
        metrics::counter!(ALERTS_REJECTED).increment(1);
        warn!(bytes = body.len(), error = %err, "Rejected alert payload");
        err
    })?;

    let rendered = payload.render();
    if let Err(err) = state.sink.emit(&rendered) {
        warn!(error = %err, "Failed to write alert payload to sink");
    }
    metrics::counter!(ALERTS_RECEIVED).increment(1);

    let summary = payload.summary();
    info!(
        kind = %summary.kind,
        entries = summary.entries,
        status = summary.status.as_deref(),
        alert_count = summary.alert_count,
        name = summary.name.as_deref(),
        bytes = rendered.len(),
        "Alert received"
    );

    Ok(Json(Ack::OK))
}
