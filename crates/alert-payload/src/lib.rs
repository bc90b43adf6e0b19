//! Alert Payloads
//!
//! Parsing, pretty rendering and summarizing of schema-less alert payloads,
//! plus the console sinks the renderings are written to.

mod error;
mod payload;
mod sink;
mod summary;

pub use error::PayloadError;
pub use payload::{AlertPayload, MAX_NESTING_DEPTH};
pub use sink::{AlertSink, MemorySink, StdoutSink};
pub use summary::{PayloadKind, PayloadSummary};
