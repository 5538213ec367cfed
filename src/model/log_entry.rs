//! Log entries stored in per-source buffers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// MIME type used for checkpoint marker entries.
pub const CHECKPOINT_MIME: &str = "application/vnd.sourcelog.checkpoint";

/// Severity of a log entry.
///
/// Ordered from least to most severe. `Unset` is for entries that carry no
/// severity (e.g. rich output); it sorts last and always passes level
/// thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Diagnostic detail.
    Debug,
    /// Routine information.
    Info,
    /// Something unexpected but recoverable.
    Warning,
    /// A failure.
    Error,
    /// No severity attached.
    Unset,
}

impl LogLevel {
    /// Lowercase name used in config files and rendering.
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
            LogLevel::Unset => "unset",
        }
    }

    /// Whether an entry of this level passes a buffer whose threshold is `threshold`.
    pub fn passes(self, threshold: LogLevel) -> bool {
        self == LogLevel::Unset || threshold == LogLevel::Unset || self >= threshold
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown level name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown log level '{0}'")]
pub struct UnknownLevel(pub String);

impl FromStr for LogLevel {
    type Err = UnknownLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warning),
            "error" => Ok(LogLevel::Error),
            "unset" => Ok(LogLevel::Unset),
            _ => Err(UnknownLevel(s.to_string())),
        }
    }
}

impl From<tracing::Level> for LogLevel {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::ERROR => LogLevel::Error,
            tracing::Level::WARN => LogLevel::Warning,
            tracing::Level::INFO => LogLevel::Info,
            // DEBUG and TRACE
            _ => LogLevel::Debug,
        }
    }
}

/// How an entry's payload is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// Shown verbatim.
    PlainText,
    /// Handed to a content renderer keyed by MIME type.
    RenderedMime,
}

/// Entry body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Payload {
    /// Plain text message.
    Text(String),
    /// Structured content for a content renderer.
    Mime {
        /// MIME type selecting the renderer, e.g. `text/markdown`.
        mime_type: String,
        /// Raw content in that MIME type.
        data: String,
    },
}

/// One immutable log record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// When the entry was created.
    pub timestamp: DateTime<Utc>,
    /// Severity.
    pub level: LogLevel,
    /// Body.
    pub payload: Payload,
}

impl LogEntry {
    /// Plain text entry stamped with the current time.
    pub fn text(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            payload: Payload::Text(message.into()),
        }
    }

    /// Rendered-MIME entry stamped with the current time.
    pub fn mime(level: LogLevel, mime_type: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            payload: Payload::Mime {
                mime_type: mime_type.into(),
                data: data.into(),
            },
        }
    }

    /// Timestamp marker appended by the "add checkpoint" command.
    pub fn checkpoint(at: DateTime<Utc>) -> Self {
        Self {
            timestamp: at,
            level: LogLevel::Unset,
            payload: Payload::Mime {
                mime_type: CHECKPOINT_MIME.to_string(),
                data: at.to_rfc3339(),
            },
        }
    }

    /// Replace the timestamp (useful for deterministic tests and replays).
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Display category of the payload.
    pub fn content_kind(&self) -> ContentKind {
        match self.payload {
            Payload::Text(_) => ContentKind::PlainText,
            Payload::Mime { .. } => ContentKind::RenderedMime,
        }
    }

    /// Plain text body, if this is a text entry.
    pub fn as_text(&self) -> Option<&str> {
        match &self.payload {
            Payload::Text(text) => Some(text),
            Payload::Mime { .. } => None,
        }
    }
}
