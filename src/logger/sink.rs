//! Sinks receiving fully interpolated log lines

use std::sync::{Arc, Mutex};

use super::severity::Severity;

/// Destination for interpolated lines.
///
/// Implementations write the line as given; interpolation has already
/// happened by the time `write` is called.
pub trait LogSink: Send + Sync {
    fn write(&self, severity: Severity, line: &str);
}

impl<S: LogSink + ?Sized> LogSink for Arc<S> {
    fn write(&self, severity: Severity, line: &str) {
        (**self).write(severity, line)
    }
}

/// Forwards lines to `tracing` events
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn write(&self, severity: Severity, line: &str) {
        let level = severity.tracing_level();
        if level == tracing::Level::ERROR {
            tracing::error!(severity = %severity, "{}", line);
        } else if level == tracing::Level::WARN {
            tracing::warn!(severity = %severity, "{}", line);
        } else if level == tracing::Level::INFO {
            tracing::info!(severity = %severity, "{}", line);
        } else {
            tracing::debug!(severity = %severity, "{}", line);
        }
    }
}

/// Keeps lines in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<(Severity, String)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything written so far
    pub fn lines(&self) -> Vec<(Severity, String)> {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn len(&self) -> usize {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

impl LogSink for MemorySink {
    fn write(&self, severity: Severity, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((severity, line.to_string()));
    }
}
