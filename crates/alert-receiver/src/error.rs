//! Receiver Error Types

use alert_payload::PayloadError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Request-level errors surfaced to the HTTP client
#[derive(Debug, Error)]
pub enum ReceiverError {
    /// Request body is not valid JSON
    #[error(transparent)]
    MalformedPayload(#[from] PayloadError),
}

/// JSON body returned alongside an error status
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub error: String,
}

impl ReceiverError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ReceiverError::MalformedPayload(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ReceiverError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            status: "error",
            error: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

/// Errors while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A value was read but is not usable
    #[error("invalid configuration value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Errors that stop the server
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to install metrics recorder: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}
