//! Bounded, versioned log buffer for a single source.
//!
//! Provides a ring buffer of entries with FIFO eviction and a monotonic
//! version that changes on every observable mutation.

use crate::model::error::checked_capacity;
use crate::model::{LogEntry, LogError, LogLevel};
use std::collections::vec_deque;
use std::collections::VecDeque;

#[cfg(test)]
#[path = "log_buffer_tests.rs"]
mod tests;

/// Lazy, restartable view over a range of buffered entries.
///
/// Cloning the iterator restarts the walk from the same position; reading
/// never mutates the buffer.
pub type LogRange<'a> = vec_deque::Iter<'a, LogEntry>;

/// Ordered entries for one source, capped at `capacity`.
///
/// The buffer is owned by the registry; callers only ever see it through
/// shared references or the registry's `Logger` handle.
#[derive(Debug)]
pub struct LogBuffer {
    /// Ring buffer of entries (oldest at front, newest at back)
    entries: VecDeque<LogEntry>,
    /// Maximum entries to retain
    capacity: usize,
    /// Bumped on append, clear, and capacity-induced eviction
    version: u64,
    /// Entries below this level are rejected by the registry
    level: LogLevel,
}

impl LogBuffer {
    /// Create an empty buffer with the given capacity.
    ///
    /// The initial version is 0 and the level threshold is `Debug`, which
    /// admits every entry.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
            version: 0,
            level: LogLevel::Debug,
        }
    }

    /// Append an entry, evicting the oldest one first if the buffer is full.
    ///
    /// Eviction and insertion happen in the same call, so no caller can see
    /// the buffer over capacity. With a capacity of zero the entry is dropped
    /// but the version still advances.
    ///
    /// Returns the new version.
    pub fn append(&mut self, entry: LogEntry) -> u64 {
        if self.capacity > 0 {
            while self.entries.len() >= self.capacity {
                self.entries.pop_front();
            }
            self.entries.push_back(entry);
        }
        self.version += 1;
        self.version
    }

    /// Remove every entry. Capacity is unchanged.
    ///
    /// Returns the new version, which is always strictly greater than the
    /// version before the call.
    pub fn clear(&mut self) -> u64 {
        self.entries.clear();
        self.version += 1;
        self.version
    }

    /// Change the capacity, evicting oldest entries until the buffer fits.
    ///
    /// # Errors
    ///
    /// Returns [`LogError::InvalidArgument`] if `capacity` is negative; the
    /// buffer is left untouched in that case.
    ///
    /// # Returns
    ///
    /// Number of entries evicted. The version advances once if that number is
    /// non-zero, and not at all otherwise.
    pub fn set_capacity(&mut self, capacity: i64) -> Result<usize, LogError> {
        let capacity = checked_capacity(capacity)?;
        self.capacity = capacity;

        let excess = self.entries.len().saturating_sub(capacity);
        if excess > 0 {
            self.entries.drain(..excess);
            self.version += 1;
        }
        Ok(excess)
    }

    /// Lazy view over entries `[from, to)`, clamped to the current length.
    ///
    /// An inverted or out-of-range request yields an empty view.
    pub fn read(&self, from: usize, to: usize) -> LogRange<'_> {
        let to = to.min(self.entries.len());
        let from = from.min(to);
        self.entries.range(from..to)
    }

    /// Lazy view over every entry, oldest first.
    pub fn iter(&self) -> LogRange<'_> {
        self.entries.iter()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the buffer holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries retained.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current version.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Current level threshold.
    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Change the level threshold. Stored entries are not touched.
    pub fn set_level(&mut self, level: LogLevel) {
        self.level = level;
    }

    /// Whether `entry` passes the level threshold.
    pub fn accepts(&self, entry: &LogEntry) -> bool {
        entry.level.passes(self.level)
    }
}
