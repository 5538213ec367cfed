//! Log core state machines (pure).
//!
//! All state transitions are plain method calls testable without a TUI.

pub mod display;
pub mod log_buffer;
pub mod registry;
pub mod status;

// Re-export for convenience
pub use display::{DisplayCoordinator, DisplayEvent};
pub use log_buffer::{LogBuffer, LogRange};
pub use registry::{
    Logger, LoggerRegistry, MutationEvent, MutationKind, Subscription, SubscriptionFilter,
    DEFAULT_MAX_LENGTH,
};
pub use status::{SourceStatus, StatusIndicator, FLASH_TICKS};
