//! Domain model types (pure).
//!
//! All types in this module are plain data with no knowledge of buffers,
//! subscriptions or rendering.

pub mod error;
pub mod identifiers;
pub mod key_action;
pub mod log_entry;

// Re-export for convenience
pub use error::LogError;
pub use identifiers::{key_label, SourceId, SourceKey, WidgetId};
pub use key_action::KeyAction;
pub use log_entry::{ContentKind, LogEntry, LogLevel, Payload, UnknownLevel, CHECKPOINT_MIME};
