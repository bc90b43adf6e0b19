//! Payload Summaries
//!
//! Derives a handful of descriptive fields from a payload for structured
//! logging. Nothing here rejects a payload: unknown shapes simply produce
//! empty fields.

use serde_json::Value;
use std::fmt;

/// Keys checked, in order, for a human-readable alert name
const NAME_KEYS: [&str; 3] = ["alert", "alertname", "title"];

/// Top-level JSON type of a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadKind {
    Object,
    Array,
    String,
    Number,
    Bool,
    Null,
}

impl PayloadKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PayloadKind::Object => "object",
            PayloadKind::Array => "array",
            PayloadKind::String => "string",
            PayloadKind::Number => "number",
            PayloadKind::Bool => "bool",
            PayloadKind::Null => "null",
        }
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptive fields of an alert payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadSummary {
    /// Top-level JSON type
    pub kind: PayloadKind,
    /// Top-level keys (object) or elements (array)
    pub entries: usize,
    /// Top-level `status` string, e.g. `firing` / `resolved`
    pub status: Option<String>,
    /// Length of a top-level `alerts` array (Alertmanager, Grafana)
    pub alert_count: Option<usize>,
    /// Best-effort alert name
    pub name: Option<String>,
}

impl PayloadSummary {
    /// Summarize a JSON value
    pub fn of(value: &Value) -> Self {
        let (kind, entries) = match value {
            Value::Object(map) => (PayloadKind::Object, map.len()),
            Value::Array(items) => (PayloadKind::Array, items.len()),
            Value::String(_) => (PayloadKind::String, 0),
            Value::Number(_) => (PayloadKind::Number, 0),
            Value::Bool(_) => (PayloadKind::Bool, 0),
            Value::Null => (PayloadKind::Null, 0),
        };

        let status = value
            .get("status")
            .and_then(Value::as_str)
            .map(str::to_owned);
        let alert_count = value.get("alerts").and_then(Value::as_array).map(Vec::len);

        Self {
            kind,
            entries,
            status,
            alert_count,
            name: alert_name(value),
        }
    }
}

fn alert_name(value: &Value) -> Option<String> {
    NAME_KEYS
        .iter()
        .find_map(|key| value.get(*key).and_then(Value::as_str))
        .or_else(|| value.pointer("/commonLabels/alertname").and_then(Value::as_str))
        .map(str::to_owned)
}
