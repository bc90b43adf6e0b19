//! Alert Payload Implementation

use serde_json::Value;

use crate::error::PayloadError;
use crate::summary::PayloadSummary;

/// Deepest array/object nesting accepted by [`AlertPayload::from_slice`].
///
/// Matches serde_json's recursion limit. Parsing, rendering and dropping a
/// payload all recurse once per level.
pub const MAX_NESTING_DEPTH: usize = 127;

/// A schema-less alert document as received from a webhook sender.
///
/// Any JSON value is accepted: objects, arrays and bare scalars, nested up
/// to [`MAX_NESTING_DEPTH`] levels. The payload lives for a single request and is never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertPayload {
    value: Value,
}

impl AlertPayload {
    /// Parse a raw request body.
    ///
    /// Fails with [`PayloadError::Malformed`] when the bytes are not a single
    /// well-formed JSON document. An empty body is malformed, and so is one
    /// nested deeper than [`MAX_NESTING_DEPTH`] arrays/objects.
    ///
    /// Numbers keep their literal text, so integers wider than 64 bits and
    /// decimals render exactly as they were posted.
    pub fn from_slice(body: &[u8]) -> Result<Self, PayloadError> {
        let value = serde_json::from_slice(body)?;
        Ok(Self { value })
    }

    /// Render as indented, human-readable JSON (two-space indent).
    pub fn render(&self) -> String {
        format!("{:#}", self.value)
    }

    /// Structured description used for log fields
    pub fn summary(&self) -> PayloadSummary {
        PayloadSummary::of(&self.value)
    }

    /// Borrow the underlying value
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Consume the payload and return the underlying value
    pub fn into_inner(self) -> Value {
        self.value
    }
}

impl From<Value> for AlertPayload {
    fn from(value: Value) -> Self {
        Self { value }
    }
}
