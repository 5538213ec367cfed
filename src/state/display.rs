//! Display coordinator: binds the single visible viewer to one source.
//!
//! The coordinator is a two-state machine, `Unbound` or `Bound(source)`. While
//! bound it holds a subscription to that source only, keeps a rendered copy
//! of the source's buffer, and reports which version the user has actually
//! seen through [`DisplayEvent::SourceDisplayed`].

use super::registry::{LoggerRegistry, MutationEvent, Subscription, SubscriptionFilter};
use crate::model::SourceId;
use crate::view::renderer::{render_entry, ContentRenderer};
use ratatui::text::Line;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::debug;

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;

/// Notifications emitted by the coordinator for the host and status indicator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayEvent {
    /// The bound source changed (`None` means unbound). Hosts use this to
    /// refresh source-dependent commands.
    SourceChanged(Option<SourceId>),
    /// Entries of `source` up to `version` are now on screen.
    SourceDisplayed {
        /// Displayed source.
        source: SourceId,
        /// Buffer version that was rendered.
        version: u64,
    },
}

struct Binding {
    source: SourceId,
    subscription: Subscription,
}

/// Drives the one log viewer.
pub struct DisplayCoordinator {
    binding: Option<Binding>,
    /// Last version announced as displayed, per source; survives rebinding
    last_displayed: HashMap<SourceId, u64>,
    renderer: Rc<dyn ContentRenderer>,
    rendered: Vec<Line<'static>>,
    render_count: u64,
    visible: bool,
    events: Vec<DisplayEvent>,
}

impl std::fmt::Debug for DisplayCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DisplayCoordinator")
            .field("current", &self.current_source())
            .field("last_displayed", &self.last_displayed)
            .field("rendered_lines", &self.rendered.len())
            .field("render_count", &self.render_count)
            .field("visible", &self.visible)
            .finish()
    }
}

impl DisplayCoordinator {
    /// Create an unbound, hidden coordinator.
    pub fn new(renderer: Rc<dyn ContentRenderer>) -> Self {
        Self {
            binding: None,
            last_displayed: HashMap::new(),
            renderer,
            rendered: Vec::new(),
            render_count: 0,
            visible: false,
            events: Vec::new(),
        }
    }

    /// Currently bound source, if any.
    pub fn current_source(&self) -> Option<&SourceId> {
        self.binding.as_ref().map(|b| &b.source)
    }

    /// Bind the viewer to `source`, or unbind it with `None`.
    ///
    /// Rebinding to the current source does nothing and returns `false`.
    /// Otherwise the old subscription is dropped, the new source is
    /// subscribed, the view is fully re-rendered, and
    /// [`DisplayEvent::SourceChanged`] is emitted.
    pub fn set_source(&mut self, registry: &mut LoggerRegistry, source: Option<SourceId>) -> bool {
        if self.current_source() == source.as_ref() {
            return false;
        }
        debug!(
            from = ?self.current_source(),
            to = ?source,
            "Switching displayed source"
        );

        // Drop the old subscription before subscribing anew
        self.binding = None;

        match source.clone() {
            Some(source) => {
                let key = Some(source.clone());
                registry.get_logger(key.clone());
                let subscription = registry.subscribe(SubscriptionFilter::Source(key));
                self.binding = Some(Binding {
                    source,
                    subscription,
                });
                self.rerender(registry);
            }
            None => {
                self.rendered.clear();
                self.render_count += 1;
            }
        }

        self.events.push(DisplayEvent::SourceChanged(source));
        self.announce_displayed(registry);
        true
    }

    /// Process pending mutations of the bound source.
    ///
    /// Each mutation triggers a full re-render followed, if the viewer is
    /// visible, by a [`DisplayEvent::SourceDisplayed`] for that mutation's
    /// version.
    pub fn poll(&mut self, registry: &LoggerRegistry) {
        let pending: Vec<MutationEvent> = match &self.binding {
            Some(binding) => binding.subscription.drain(),
            None => return,
        };
        for event in pending {
            self.rerender(registry);
            if self.visible {
                self.mark_displayed(event.version);
            }
        }
    }

    /// Record whether the viewer is on screen.
    ///
    /// Becoming visible acknowledges the bound source's current version.
    pub fn set_visible(&mut self, registry: &LoggerRegistry, visible: bool) {
        let became_visible = visible && !self.visible;
        self.visible = visible;
        if became_visible {
            self.announce_displayed(registry);
        }
    }

    /// Whether the viewer is on screen.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Last version announced as displayed for `source`.
    pub fn last_displayed(&self, source: &SourceId) -> Option<u64> {
        self.last_displayed.get(source).copied()
    }

    /// Rendered lines for the bound source, oldest entry first.
    pub fn lines(&self) -> &[Line<'static>] {
        &self.rendered
    }

    /// Number of full renders performed so far.
    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    /// Take emitted events, oldest first.
    pub fn drain_events(&mut self) -> Vec<DisplayEvent> {
        std::mem::take(&mut self.events)
    }

    fn rerender(&mut self, registry: &LoggerRegistry) {
        self.rendered.clear();
        if let Some(binding) = &self.binding {
            if let Some(buffer) = registry.buffer(&Some(binding.source.clone())) {
                for entry in buffer.iter() {
                    self.rendered
                        .extend(render_entry(entry, self.renderer.as_ref()));
                }
            }
        }
        self.render_count += 1;
    }

    fn announce_displayed(&mut self, registry: &LoggerRegistry) {
        if !self.visible {
            return;
        }
        let version = self
            .binding
            .as_ref()
            .and_then(|b| registry.buffer(&Some(b.source.clone())))
            .map(|buffer| buffer.version());
        if let Some(version) = version {
            self.mark_displayed(version);
        }
    }

    fn mark_displayed(&mut self, version: u64) {
        if let Some(binding) = &self.binding {
            self.last_displayed.insert(binding.source.clone(), version);
            self.events.push(DisplayEvent::SourceDisplayed {
                source: binding.source.clone(),
                version,
            });
        }
    }
}
