//! Prometheus Metrics Route

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use std::sync::Arc;

use crate::AppState;

/// Accepted payloads
pub const ALERTS_RECEIVED: &str = "alerts_received_total";
/// Payloads refused as malformed
pub const ALERTS_REJECTED: &str = "alerts_rejected_total";

const CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// Install the global Prometheus recorder.
///
/// Can only succeed once per process.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    metrics::describe_counter!(ALERTS_RECEIVED, "Alert payloads accepted and logged");
    metrics::describe_counter!(ALERTS_REJECTED, "Alert payloads rejected as malformed");

    Ok(handle)
}

/// Render all recorded metrics in the Prometheus text format
pub async fn render_metrics(State(state): State<Arc<AppState>>) -> Response {
    match &state.metrics {
        Some(handle) => ([(header::CONTENT_TYPE, CONTENT_TYPE)], handle.render()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
