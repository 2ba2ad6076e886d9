//! Severity levels accepted by the message logger

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Severity of a log line, most severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// System is unusable
    Emergency,
    /// Action must be taken immediately
    Alert,
    /// Critical conditions
    Critical,
    /// Runtime errors
    Error,
    /// Exceptional occurrences that are not errors
    Warning,
    /// Normal but significant events
    Notice,
    /// Interesting events
    Info,
    /// Detailed debug information
    Debug,
}

impl Severity {
    pub const ALL: [Severity; 8] = [
        Severity::Emergency,
        Severity::Alert,
        Severity::Critical,
        Severity::Error,
        Severity::Warning,
        Severity::Notice,
        Severity::Info,
        Severity::Debug,
    ];

    /// Label prefixed to interpolated lines
    pub const fn as_str(self) -> &'static str {
        match self {
            Severity::Emergency => "emergency",
            Severity::Alert => "alert",
            Severity::Critical => "critical",
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Notice => "notice",
            Severity::Info => "info",
            Severity::Debug => "debug",
        }
    }

    /// Closest `tracing` level
    pub fn tracing_level(self) -> tracing::Level {
        match self {
            Severity::Emergency | Severity::Alert | Severity::Critical | Severity::Error => {
                tracing::Level::ERROR
            }
            Severity::Warning => tracing::Level::WARN,
            Severity::Notice | Severity::Info => tracing::Level::INFO,
            Severity::Debug => tracing::Level::DEBUG,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        Severity::ALL
            .into_iter()
            .find(|severity| severity.as_str() == lower)
            .ok_or_else(|| format!("unknown severity: {}", s))
    }
}
