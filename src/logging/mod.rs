//! Tracing subscriber initialization and source routing.
//!
//! Diagnostics are written to a file instead of being captured in-app.
//! Users can monitor them via `tail -f` in a separate terminal.
//!
//! Events that carry a `source` field are additionally turned into
//! [`LogEntry`] values by [`SourceLogLayer`] and shipped over a channel, so
//! producers can log into per-source buffers with ordinary tracing macros:
//!
//! ```ignore
//! tracing::info!(source = "notebook.ipynb", "kernel restarted");
//! ```

use crate::model::{LogEntry, LogLevel, SourceId, SourceKey};
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use thiserror::Error;
use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

#[cfg(test)]
#[path = "logging_tests.rs"]
mod tests;

/// Field naming the source an event belongs to.
pub const SOURCE_FIELD: &str = "source";

/// Field carrying a MIME type; the message becomes the MIME data.
pub const MIME_FIELD: &str = "mime";

/// Entries buffered between producers and the UI before new ones are dropped.
pub const SOURCED_CHANNEL_CAPACITY: usize = 4096;

/// Error type for logging initialization failures.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Failed to create log directory
    #[error("Failed to create log directory at {path:?}: {source}")]
    DirectoryCreation {
        /// The directory path that failed to be created
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Invalid log file path (no filename component)
    #[error("Invalid log file path: {0:?}")]
    InvalidPath(PathBuf),

    /// Log path has no parent directory
    #[error("Log path has no parent directory: {0:?}")]
    NoParentDirectory(PathBuf),

    /// Tracing subscriber already initialized
    #[error("Tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// An entry captured from tracing, tagged with its source.
#[derive(Debug, Clone, PartialEq)]
pub struct SourcedEntry {
    /// Source named by the event's `source` field. An empty name maps to the
    /// null source.
    pub source: SourceKey,
    /// Captured entry.
    pub entry: LogEntry,
}

/// Tracing layer that forwards sourced events over a channel.
///
/// Events without a `source` field are ignored. The crate's own diagnostics
/// name sources in a `log_source` field so they never loop back in.
///
/// The channel is bounded: when the UI falls behind, new entries are dropped
/// instead of piling up. Send failures (full, or receiver dropped) are
/// swallowed so logging never blocks or breaks the caller.
#[derive(Debug)]
pub struct SourceLogLayer {
    sender: mpsc::SyncSender<SourcedEntry>,
}

impl SourceLogLayer {
    /// Create a layer that sends captured entries to `sender`.
    pub fn new(sender: mpsc::SyncSender<SourcedEntry>) -> Self {
        Self { sender }
    }
}

/// Bounded channel for a [`SourceLogLayer`], holding
/// [`SOURCED_CHANNEL_CAPACITY`] entries.
pub fn sourced_channel() -> (mpsc::SyncSender<SourcedEntry>, mpsc::Receiver<SourcedEntry>) {
    mpsc::sync_channel(SOURCED_CHANNEL_CAPACITY)
}

impl<S> Layer<S> for SourceLogLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = SourcedVisitor::default();
        event.record(&mut visitor);

        let Some(source) = visitor.source else {
            return;
        };

        let level = LogLevel::from(*event.metadata().level());
        let entry = match visitor.mime {
            Some(mime_type) => LogEntry::mime(level, mime_type, visitor.message),
            None => LogEntry::text(level, visitor.message),
        };
        let source = if source.is_empty() {
            None
        } else {
            Some(SourceId::new(source))
        };

        // try_send so a stalled UI never blocks the producer
        let _ = self.sender.try_send(SourcedEntry { source, entry });
    }
}

#[derive(Default)]
struct SourcedVisitor {
    source: Option<String>,
    mime: Option<String>,
    message: String,
}

impl Visit for SourcedVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            SOURCE_FIELD => self.source = Some(value.to_string()),
            MIME_FIELD => self.mime = Some(value.to_string()),
            "message" => self.message = value.to_string(),
            _ => {}
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let rendered = format!("{:?}", value);
        match field.name() {
            SOURCE_FIELD => self.source = Some(unquote(rendered)),
            MIME_FIELD => self.mime = Some(unquote(rendered)),
            "message" => self.message = rendered,
            _ => {}
        }
    }
}

fn unquote(rendered: String) -> String {
    if rendered.len() >= 2 && rendered.starts_with('"') && rendered.ends_with('"') {
        rendered[1..rendered.len() - 1].to_string()
    } else {
        rendered
    }
}

/// Initialize the tracing subscriber with file-based logging.
///
/// Logs are written to a file for users to monitor with `tail -f`.
/// Respects RUST_LOG environment variable, defaults to "info" level.
///
/// Creates the log directory if it doesn't exist.
///
/// # Errors
///
/// Returns `Err(LoggingError)` if the subscriber was already initialized or
/// directory creation failed.
pub fn init(log_path: &Path) -> Result<(), LoggingError> {
    init_with_sources(log_path, None)
}

/// Like [`init`], additionally installing a [`SourceLogLayer`].
///
/// The RUST_LOG filter only applies to the file output; the source layer
/// sees every sourced event.
///
/// # Errors
///
/// Same as [`init`].
pub fn init_with_sources(
    log_path: &Path,
    source_layer: Option<SourceLogLayer>,
) -> Result<(), LoggingError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::EnvFilter;

    // Create log directory if it doesn't exist
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent).map_err(|source| LoggingError::DirectoryCreation {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let file_name = log_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| LoggingError::InvalidPath(log_path.to_path_buf()))?;

    let directory = log_path
        .parent()
        .ok_or_else(|| LoggingError::NoParentDirectory(log_path.to_path_buf()))?;

    let file_appender = tracing_appender::rolling::never(directory, file_name);

    // Respect RUST_LOG, default to "info"
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false) // No ANSI colors in log files
        .with_filter(env_filter);

    tracing_subscriber::registry()
        .with(file_layer)
        .with(source_layer)
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}
