//! Console Sinks
//!
//! Destinations for rendered payloads. The receiver writes each rendering
//! as one unit so concurrent requests never interleave inside a payload.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};
use tracing::trace;

/// Destination for rendered alert payloads
pub trait AlertSink: Send + Sync {
    /// Write one rendered payload
    fn emit(&self, rendered: &str) -> io::Result<()>;
}

/// Writes renderings to the process's standard output
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl AlertSink for StdoutSink {
    fn emit(&self, rendered: &str) -> io::Result<()> {
        let mut line = String::with_capacity(rendered.len() + 1);
        line.push_str(rendered);
        line.push('\n');

        let mut stdout = io::stdout().lock();
        stdout.write_all(line.as_bytes())?;
        stdout.flush()?;

        trace!(bytes = line.len(), "Payload written to stdout");
        Ok(())
    }
}

/// Keeps renderings in memory, one entry per emitted payload
#[derive(Debug, Default)]
pub struct MemorySink {
    entries: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything emitted so far
    pub fn entries(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of emitted payloads
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing has been emitted yet
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl AlertSink for MemorySink {
    fn emit(&self, rendered: &str) -> io::Result<()> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(rendered.to_owned());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_memory_sink_records_in_order() {
        let sink = MemorySink::new();
        assert!(sink.is_empty());

        sink.emit("{\n  \"a\": 1\n}").unwrap();
        sink.emit("[]").unwrap();

        assert_eq!(sink.len(), 2);
        assert_eq!(sink.entries(), vec!["{\n  \"a\": 1\n}".to_string(), "[]".to_string()]);
    }

    #[test]
    fn test_memory_sink_concurrent_writers() {
        let sink = Arc::new(MemorySink::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let sink = Arc::clone(&sink);
                thread::spawn(move || sink.emit(&format!("payload-{i}")).unwrap())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let mut entries = sink.entries();
        entries.sort();
        let expected: Vec<String> = (0..8).map(|i| format!("payload-{i}")).collect();
        assert_eq!(entries, expected);
    }

    #[test]
    fn test_stdout_sink_accepts_writes() {
        assert!(StdoutSink.emit("{}").is_ok());
    }
}
