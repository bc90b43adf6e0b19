//! Payload Error Types

use thiserror::Error;

/// Errors while reading an alert payload
#[derive(Debug, Error)]
pub enum PayloadError {
    /// Body is not syntactically valid JSON
    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),
}
