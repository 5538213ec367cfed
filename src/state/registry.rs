//! Logger registry: one bounded buffer per source, plus change notification.
//!
//! Buffers are created lazily on first access and are never removed, so
//! memory is bounded by distinct sources × `max_length`, not by message
//! volume. Every mutation is announced to subscribers as a [`MutationEvent`],
//! individually and in mutation order.

use super::log_buffer::LogBuffer;
use crate::model::error::checked_capacity;
use crate::model::{key_label, LogEntry, LogError, LogLevel, SourceKey};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::{Rc, Weak};
use tracing::debug;

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;

/// Capacity used until settings say otherwise.
pub const DEFAULT_MAX_LENGTH: usize = 1000;

/// What changed in a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    /// An entry was appended (possibly evicting the oldest one).
    Append,
    /// The buffer was emptied.
    Clear,
    /// A capacity change evicted entries.
    Truncate,
}

/// Notification sent after every buffer mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationEvent {
    /// Source whose buffer changed.
    pub source: SourceKey,
    /// Buffer version after the change.
    pub version: u64,
    /// Kind of change.
    pub kind: MutationKind,
}

/// Which mutations a subscription receives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubscriptionFilter {
    /// Every source.
    All,
    /// One source only.
    Source(SourceKey),
}

impl SubscriptionFilter {
    fn matches(&self, source: &SourceKey) -> bool {
        match self {
            SubscriptionFilter::All => true,
            SubscriptionFilter::Source(wanted) => wanted == source,
        }
    }
}

type EventQueue = RefCell<VecDeque<MutationEvent>>;

/// Receiving end of a registry subscription.
///
/// Events queue up until drained. Dropping the subscription unsubscribes it;
/// the registry notices on its next emission.
#[derive(Debug)]
pub struct Subscription {
    filter: SubscriptionFilter,
    queue: Rc<EventQueue>,
}

impl Subscription {
    /// Filter this subscription was created with.
    pub fn filter(&self) -> &SubscriptionFilter {
        &self.filter
    }

    /// Take every queued event, oldest first.
    pub fn drain(&self) -> Vec<MutationEvent> {
        self.queue.borrow_mut().drain(..).collect()
    }

    /// Whether any event is waiting.
    pub fn has_pending(&self) -> bool {
        !self.queue.borrow().is_empty()
    }
}

#[derive(Debug)]
struct Listener {
    filter: SubscriptionFilter,
    queue: Weak<EventQueue>,
}

/// Owns every source's buffer and announces their mutations.
#[derive(Debug)]
pub struct LoggerRegistry {
    buffers: HashMap<SourceKey, LogBuffer>,
    /// Order in which sources were first seen
    order: Vec<SourceKey>,
    max_length: usize,
    default_level: LogLevel,
    listeners: Vec<Listener>,
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LENGTH)
    }
}

impl LoggerRegistry {
    /// Create an empty registry whose buffers hold at most `max_length` entries.
    pub fn new(max_length: usize) -> Self {
        Self {
            buffers: HashMap::new(),
            order: Vec::new(),
            max_length,
            default_level: LogLevel::Debug,
            listeners: Vec::new(),
        }
    }

    /// Handle to the buffer for `source`, creating it at the current
    /// `max_length` if this is the first access.
    ///
    /// Equal keys always address the same buffer: a mutation made through one
    /// handle is visible through every later one.
    pub fn get_logger(&mut self, source: SourceKey) -> Logger<'_> {
        self.ensure(&source);
        Logger {
            registry: self,
            source,
        }
    }

    /// Read-only access to an existing buffer.
    pub fn buffer(&self, source: &SourceKey) -> Option<&LogBuffer> {
        self.buffers.get(source)
    }

    /// Every source seen so far, in first-access order.
    pub fn sources(&self) -> &[SourceKey] {
        &self.order
    }

    /// Shared capacity applied to every buffer.
    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Change the shared capacity for existing and future buffers.
    ///
    /// Existing buffers longer than `max_length` are truncated oldest-first;
    /// each truncation is announced as a [`MutationKind::Truncate`] event.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::InvalidArgument`] if `max_length` is negative. No
    /// buffer is touched in that case.
    pub fn set_max_length(&mut self, max_length: i64) -> Result<(), LogError> {
        let capacity = checked_capacity(max_length)?;
        self.max_length = capacity;
        debug!(max_length = capacity, "Applying shared log capacity");

        let mut events = Vec::new();
        for source in &self.order {
            if let Some(buffer) = self.buffers.get_mut(source) {
                if buffer.set_capacity(max_length)? > 0 {
                    events.push(MutationEvent {
                        source: source.clone(),
                        version: buffer.version(),
                        kind: MutationKind::Truncate,
                    });
                }
            }
        }
        for event in events {
            self.emit(event);
        }
        Ok(())
    }

    /// Level threshold given to buffers created from now on.
    pub fn set_default_level(&mut self, level: LogLevel) {
        self.default_level = level;
    }

    /// Append `entry` to `source`'s log. See [`Logger::append`].
    pub fn log(&mut self, source: SourceKey, entry: LogEntry) -> Option<u64> {
        self.get_logger(source).append(entry)
    }

    /// Clear `source`'s log. See [`Logger::clear`].
    pub fn clear(&mut self, source: SourceKey) -> u64 {
        self.get_logger(source).clear()
    }

    /// Subscribe to mutation events.
    pub fn subscribe(&mut self, filter: SubscriptionFilter) -> Subscription {
        let queue = Rc::new(RefCell::new(VecDeque::new()));
        self.listeners.push(Listener {
            filter: filter.clone(),
            queue: Rc::downgrade(&queue),
        });
        Subscription { filter, queue }
    }

    /// Number of live subscriptions. Dropped subscriptions are pruned first.
    pub fn listener_count(&mut self) -> usize {
        self.listeners.retain(|l| l.queue.strong_count() > 0);
        self.listeners.len()
    }

    fn ensure(&mut self, source: &SourceKey) -> &mut LogBuffer {
        if !self.buffers.contains_key(source) {
            debug!(log_source = key_label(source), capacity = self.max_length, "Created log buffer");
            self.order.push(source.clone());
        }
        let (capacity, level) = (self.max_length, self.default_level);
        self.buffers.entry(source.clone()).or_insert_with(|| {
            let mut buffer = LogBuffer::new(capacity);
            buffer.set_level(level);
            buffer
        })
    }

    fn emit(&mut self, event: MutationEvent) {
        self.listeners.retain(|listener| match listener.queue.upgrade() {
            Some(queue) => {
                if listener.filter.matches(&event.source) {
                    queue.borrow_mut().push_back(event.clone());
                }
                true
            }
            None => false,
        });
    }
}

/// Mutable handle to one source's buffer.
///
/// All mutations go through the handle so the registry can announce them.
pub struct Logger<'r> {
    registry: &'r mut LoggerRegistry,
    source: SourceKey,
}

impl Logger<'_> {
    /// Source this handle addresses.
    pub fn source(&self) -> &SourceKey {
        &self.source
    }

    /// The underlying buffer.
    pub fn buffer(&self) -> &LogBuffer {
        &self.registry.buffers[&self.source]
    }

    fn buffer_mut(&mut self) -> &mut LogBuffer {
        self.registry.ensure(&self.source)
    }

    /// Append an entry and announce it.
    ///
    /// Returns the new version, or `None` when the entry was below the
    /// buffer's level threshold and nothing changed.
    pub fn append(&mut self, entry: LogEntry) -> Option<u64> {
        let buffer = self.buffer_mut();
        if !buffer.accepts(&entry) {
            return None;
        }
        let version = buffer.append(entry);
        self.announce(version, MutationKind::Append);
        Some(version)
    }

    /// Empty the buffer and announce it. Returns the new version.
    pub fn clear(&mut self) -> u64 {
        let version = self.buffer_mut().clear();
        self.announce(version, MutationKind::Clear);
        version
    }

    /// Change this buffer's level threshold.
    pub fn set_level(&mut self, level: LogLevel) {
        debug!(log_source = key_label(&self.source), %level, "Log level changed");
        self.buffer_mut().set_level(level);
    }

    fn announce(&mut self, version: u64, kind: MutationKind) {
        let event = MutationEvent {
            source: self.source.clone(),
            version,
            kind,
        };
        self.registry.emit(event);
    }
}
