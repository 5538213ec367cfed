//! Status indicator state: unseen activity across every source.
//!
//! Listens to all registry mutations. A mutation of a source that is not on
//! screen marks that source dirty and, when flashing is enabled, starts one
//! flash. `SourceDisplayed` acknowledgements from the display coordinator
//! clear the dirty flag again.

use super::registry::{LoggerRegistry, MutationKind, Subscription, SubscriptionFilter};
use crate::model::{SourceId, SourceKey};
use std::collections::HashMap;
use tracing::trace;

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;

/// Timer ticks one flash lasts. Even, so the blink ends in the "off" phase.
pub const FLASH_TICKS: u8 = 4;

/// Per-source unseen bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceStatus {
    /// Mutations happened since the source was last displayed.
    pub dirty: bool,
    /// Number of unacknowledged mutations.
    pub unseen: usize,
    /// Latest version observed.
    pub version: u64,
}

/// Aggregated unseen state plus the flash animation.
#[derive(Debug)]
pub struct StatusIndicator {
    subscription: Subscription,
    flash_enabled: bool,
    sources: HashMap<SourceKey, SourceStatus>,
    flash_count: u64,
    flash_ticks: u8,
}

impl StatusIndicator {
    /// Subscribe to every mutation in `registry`.
    pub fn new(registry: &mut LoggerRegistry, flash_enabled: bool) -> Self {
        Self {
            subscription: registry.subscribe(SubscriptionFilter::All),
            flash_enabled,
            sources: HashMap::new(),
            flash_count: 0,
            flash_ticks: 0,
        }
    }

    /// Apply pending mutations.
    ///
    /// `visible` is the source bound to the viewer, but only when that viewer
    /// is on screen; its mutations are already seen and are skipped.
    pub fn process(&mut self, visible: Option<&SourceId>) {
        for event in self.subscription.drain() {
            let status = self.sources.entry(event.source.clone()).or_default();
            status.version = event.version;

            let on_screen = visible.is_some() && event.source.as_ref() == visible;
            if on_screen || event.kind == MutationKind::Truncate {
                continue;
            }

            status.dirty = true;
            status.unseen += 1;
            if self.flash_enabled {
                self.flash_count += 1;
                self.flash_ticks = FLASH_TICKS;
                trace!(log_source = ?event.source, version = event.version, "Flashing status indicator");
            }
        }
    }

    /// Mark `source` as displayed up to `version`.
    ///
    /// Clears the dirty flag unconditionally, even if newer mutations were
    /// recorded in between.
    pub fn acknowledge(&mut self, source: &SourceId, version: u64) {
        let status = self.sources.entry(Some(source.clone())).or_default();
        status.dirty = false;
        status.unseen = 0;
        status.version = status.version.max(version);
    }

    /// Enable or disable flashing. Disabling stops a flash in progress.
    pub fn set_flash_enabled(&mut self, enabled: bool) {
        self.flash_enabled = enabled;
        if !enabled {
            self.flash_ticks = 0;
        }
    }

    /// Whether new activity flashes the indicator.
    pub fn flash_enabled(&self) -> bool {
        self.flash_enabled
    }

    /// Advance the flash animation by one timer tick.
    ///
    /// Returns `true` if a flash was in progress (the indicator needs a redraw).
    pub fn tick(&mut self) -> bool {
        if self.flash_ticks == 0 {
            return false;
        }
        self.flash_ticks -= 1;
        true
    }

    /// Whether a flash animation is running.
    pub fn is_flashing(&self) -> bool {
        self.flash_ticks > 0
    }

    /// Current blink phase of a running flash.
    pub fn blink_on(&self) -> bool {
        self.flash_ticks % 2 == 0 && self.flash_ticks > 0
    }

    /// Total flashes triggered so far.
    pub fn flash_count(&self) -> u64 {
        self.flash_count
    }

    /// Whether `source` has unseen mutations.
    pub fn is_dirty(&self, source: &SourceKey) -> bool {
        self.sources.get(source).is_some_and(|s| s.dirty)
    }

    /// Bookkeeping for `source`, if it has ever been seen.
    pub fn source_status(&self, source: &SourceKey) -> Option<SourceStatus> {
        self.sources.get(source).copied()
    }

    /// Number of dirty sources.
    pub fn dirty_count(&self) -> usize {
        self.sources.values().filter(|s| s.dirty).count()
    }

    /// Unseen mutations summed over every source.
    pub fn unseen_total(&self) -> usize {
        self.sources.values().map(|s| s.unseen).sum()
    }
}
