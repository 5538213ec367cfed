//! The workbench context: one explicitly constructed owner of the log core.
//!
//! A [`Workbench`] owns the registry, the status indicator and the (at most
//! one) display coordinator, and wires them together. Every mutating call
//! dispatches pending mutation events before returning, so listeners never
//! observe a half-applied step.
//!
//! Startup has two phases. [`Workbench::new`] builds everything with default
//! settings and the core is immediately usable. [`Workbench::ready`] applies
//! loaded settings and starts following focus; focus changes delivered
//! before that do not bind the viewer.

use crate::commands::{Command, CommandOutcome};
use crate::config::{ConfigError, Settings};
use crate::host::{is_viewer, Placement, Shell, SourceContext};
use crate::model::{LogEntry, LogLevel, SourceId, SourceKey};
use crate::state::{
    DisplayCoordinator, DisplayEvent, LoggerRegistry, StatusIndicator, DEFAULT_MAX_LENGTH,
};
use crate::view::renderer::{ContentRenderer, MimeRenderer};
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use tracing::{debug, info, warn};

#[cfg(test)]
#[path = "workbench_tests.rs"]
mod tests;

/// Layout-restoration namespace of the viewer panel.
pub const LAYOUT_NAMESPACE: &str = "logconsole";

/// What the host persists to reopen the viewer in a later session.
///
/// Reconstruction takes no arguments: the viewer is reopened unbound and
/// picks up the focused source once the workbench is ready.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutRecord {
    /// Always [`LAYOUT_NAMESPACE`].
    pub namespace: String,
}

impl Default for LayoutRecord {
    fn default() -> Self {
        Self {
            namespace: LAYOUT_NAMESPACE.to_string(),
        }
    }
}

/// Notifications for the host UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    /// The viewer's bound source changed; source-dependent commands may have
    /// changed their enabled state.
    SourceChanged(Option<SourceId>),
    /// The viewer panel was created.
    ViewerOpened,
    /// The viewer panel was disposed.
    ViewerClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Constructed,
    Ready,
}

/// Context object owning the registry, the status indicator and the viewer.
pub struct Workbench {
    registry: LoggerRegistry,
    status: StatusIndicator,
    viewer: Option<DisplayCoordinator>,
    renderer: Rc<dyn ContentRenderer>,
    sources: Box<dyn SourceContext>,
    settings: Settings,
    settings_error: Option<ConfigError>,
    phase: Phase,
    host_events: Vec<HostEvent>,
}

impl std::fmt::Debug for Workbench {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workbench")
            .field("registry", &self.registry)
            .field("status", &self.status)
            .field("viewer", &self.viewer)
            .field("settings", &self.settings)
            .field("settings_error", &self.settings_error)
            .field("phase", &self.phase)
            .finish()
    }
}

impl Workbench {
    /// Phase one: construct the core with default settings.
    pub fn new(sources: impl SourceContext + 'static) -> Self {
        let settings = Settings::default();
        let mut registry = LoggerRegistry::new(DEFAULT_MAX_LENGTH);
        registry.set_default_level(settings.level);
        let status = StatusIndicator::new(&mut registry, settings.flash);

        Self {
            registry,
            status,
            viewer: None,
            renderer: Rc::new(MimeRenderer),
            sources: Box::new(sources),
            settings,
            settings_error: None,
            phase: Phase::Constructed,
            host_events: Vec::new(),
        }
    }

    /// Use `renderer` for MIME content in viewers opened from now on.
    pub fn with_renderer(mut self, renderer: Rc<dyn ContentRenderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// Phase two: apply the loaded settings and start following focus.
    ///
    /// A viewer restored before this point is bound to the focused source.
    pub fn ready(&mut self, shell: &dyn Shell, settings: Result<Settings, ConfigError>) {
        self.apply_settings(settings);
        self.phase = Phase::Ready;
        info!(sources = self.registry.sources().len(), "Workbench ready");
        self.focus_changed(shell);
    }

    /// Whether [`Workbench::ready`] has run.
    pub fn is_ready(&self) -> bool {
        self.phase == Phase::Ready
    }

    /// Apply settings from the settings store.
    ///
    /// On `Err` the failure is logged and recorded and the previous values
    /// stay in effect.
    pub fn apply_settings(&mut self, loaded: Result<Settings, ConfigError>) {
        let settings = match loaded {
            Ok(settings) => settings,
            Err(e) => {
                warn!(error = %e, "Failed to load settings, keeping previous values");
                self.settings_error = Some(e);
                return;
            }
        };

        let max_length = i64::try_from(settings.max_log_entries).unwrap_or(i64::MAX);
        if let Err(e) = self.registry.set_max_length(max_length) {
            warn!(error = %e, "Rejected max_log_entries");
        }
        self.registry.set_default_level(settings.level);
        self.status.set_flash_enabled(settings.flash);
        self.settings = settings;
        self.settings_error = None;
        debug!(?settings, "Applied settings");

        self.dispatch();
    }

    /// Settings currently in effect.
    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Most recent settings-load failure, cleared by the next successful load.
    pub fn settings_error(&self) -> Option<&ConfigError> {
        self.settings_error.as_ref()
    }

    // ===== Logging =====

    /// Append `entry` to `source`'s log. Returns the new version, or `None`
    /// if the entry was below the source's level threshold.
    pub fn log(&mut self, source: SourceKey, entry: LogEntry) -> Option<u64> {
        let version = self.registry.log(source, entry);
        self.dispatch();
        version
    }

    /// Clear `source`'s log. Returns the new version.
    pub fn clear(&mut self, source: SourceKey) -> u64 {
        let version = self.registry.clear(source);
        self.dispatch();
        version
    }

    /// Set the level threshold of `source`'s log.
    pub fn set_level(&mut self, source: SourceKey, level: LogLevel) {
        self.registry.get_logger(source).set_level(level);
    }

    // ===== Focus and viewer =====

    /// React to a focus change in the shell.
    ///
    /// Focusing the viewer itself keeps its source. Focusing any other widget
    /// binds the viewer to that widget's source, or unbinds it if the widget
    /// has none. Ignored until the workbench is ready.
    pub fn focus_changed(&mut self, shell: &dyn Shell) {
        if self.phase != Phase::Ready {
            debug!("Focus change before ready, not binding");
            return;
        }

        let focused = shell.focused_widget();
        let visible = shell.is_viewer_visible();
        if let Some(viewer) = self.viewer.as_mut() {
            // Hide before rebinding so a hidden viewer never acknowledges
            // the new source; show after so it acknowledges the new one.
            if !visible {
                viewer.set_visible(&self.registry, false);
            }
            if !focused.as_ref().is_some_and(is_viewer) {
                let source = focused.as_ref().and_then(|w| self.sources.source_of(w));
                viewer.set_source(&mut self.registry, source);
            }
            viewer.set_visible(&self.registry, visible);
        }
        self.dispatch();
    }

    /// Re-read viewer visibility from the shell, e.g. after it was shown or
    /// hidden without a focus change.
    pub fn sync_visibility(&mut self, shell: &dyn Shell) {
        if let Some(viewer) = self.viewer.as_mut() {
            viewer.set_visible(&self.registry, shell.is_viewer_visible());
        }
        self.dispatch();
    }

    /// Open the viewer next to the focused widget, or close it if open.
    pub fn open_viewer(&mut self, shell: &mut dyn Shell) {
        if self.viewer.is_some() {
            self.close_viewer(shell);
            return;
        }

        let anchor = shell.focused_widget().filter(|w| !is_viewer(w));
        let source = anchor.as_ref().and_then(|w| self.sources.source_of(w));
        info!(?anchor, log_source = ?source, "Opening log viewer");

        shell.insert_viewer(Placement {
            anchor,
            mode: self.settings.placement,
        });
        shell.activate_viewer();

        let mut viewer = DisplayCoordinator::new(Rc::clone(&self.renderer));
        if self.phase == Phase::Ready {
            viewer.set_source(&mut self.registry, source);
        }
        viewer.set_visible(&self.registry, shell.is_viewer_visible());
        self.viewer = Some(viewer);
        self.host_events.push(HostEvent::ViewerOpened);
        self.dispatch();
    }

    /// Close the viewer panel if it is open.
    pub fn close_viewer(&mut self, shell: &mut dyn Shell) {
        if self.viewer.is_none() {
            return;
        }
        shell.close_viewer();
        self.viewer_disposed();
    }

    /// The viewer panel was disposed by the shell.
    ///
    /// Drops the coordinator and its subscription; buffers keep accumulating.
    pub fn viewer_disposed(&mut self) {
        if let Some(viewer) = self.viewer.take() {
            debug!(log_source = ?viewer.current_source(), "Log viewer disposed");
            self.host_events.push(HostEvent::ViewerClosed);
            self.host_events.push(HostEvent::SourceChanged(None));
        }
    }

    /// Status indicator clicked: open a viewer, or bring the open one to front.
    pub fn click_status(&mut self, shell: &mut dyn Shell) {
        if self.viewer.is_none() {
            self.open_viewer(shell);
            return;
        }
        shell.activate_viewer();
        self.sync_visibility(shell);
    }

    // ===== Layout restoration =====

    /// Record for the host's layout store, while a viewer is open.
    pub fn layout_record(&self) -> Option<LayoutRecord> {
        self.viewer.as_ref().map(|_| LayoutRecord::default())
    }

    /// Reopen the viewer with no explicit source.
    ///
    /// The viewer is inserted without an anchor and left unbound until the
    /// workbench is ready, at which point it follows focus.
    pub fn restore(&mut self, shell: &mut dyn Shell) {
        if self.viewer.is_some() {
            return;
        }
        info!("Restoring log viewer");
        shell.insert_viewer(Placement {
            anchor: None,
            mode: self.settings.placement,
        });
        self.viewer = Some(DisplayCoordinator::new(Rc::clone(&self.renderer)));
        self.host_events.push(HostEvent::ViewerOpened);
        self.focus_changed(shell);
    }

    /// Restore from a persisted record. Records of other namespaces are
    /// ignored and `false` is returned.
    pub fn restore_from(&mut self, shell: &mut dyn Shell, record: &LayoutRecord) -> bool {
        if record.namespace != LAYOUT_NAMESPACE {
            debug!(namespace = %record.namespace, "Ignoring foreign layout record");
            return false;
        }
        self.restore(shell);
        true
    }

    // ===== Commands =====

    /// Whether `command` can run right now.
    pub fn is_enabled(&self, command: Command) -> bool {
        if command.requires_source() {
            self.displayed_source().is_some()
        } else {
            true
        }
    }

    /// Run `command`. Disabled commands do nothing.
    pub fn execute(&mut self, command: Command, shell: &mut dyn Shell) -> CommandOutcome {
        if !self.is_enabled(command) {
            debug!(command = command.id(), "Command disabled");
            return CommandOutcome::Disabled;
        }

        match command {
            Command::OpenViewer => self.open_viewer(shell),
            Command::AddCheckpoint => {
                let source = self.displayed_source().cloned();
                self.log(source, LogEntry::checkpoint(chrono::Utc::now()));
            }
            Command::ClearLog => {
                let source = self.displayed_source().cloned();
                self.clear(source);
            }
        }
        CommandOutcome::Executed
    }

    // ===== Animation and accessors =====

    /// Advance the status flash animation. Returns `true` if a redraw is due.
    pub fn tick(&mut self) -> bool {
        self.status.tick()
    }

    /// The registry.
    pub fn registry(&self) -> &LoggerRegistry {
        &self.registry
    }

    /// The status indicator.
    pub fn status(&self) -> &StatusIndicator {
        &self.status
    }

    /// The open viewer, if any.
    pub fn viewer(&self) -> Option<&DisplayCoordinator> {
        self.viewer.as_ref()
    }

    /// Source the open viewer is bound to.
    pub fn displayed_source(&self) -> Option<&SourceId> {
        self.viewer.as_ref().and_then(|v| v.current_source())
    }

    /// Take pending host notifications, oldest first.
    pub fn drain_host_events(&mut self) -> Vec<HostEvent> {
        std::mem::take(&mut self.host_events)
    }

    fn dispatch(&mut self) {
        if let Some(viewer) = self.viewer.as_mut() {
            viewer.poll(&self.registry);
            for event in viewer.drain_events() {
                match event {
                    DisplayEvent::SourceDisplayed { source, version } => {
                        self.status.acknowledge(&source, version);
                    }
                    DisplayEvent::SourceChanged(source) => {
                        self.host_events.push(HostEvent::SourceChanged(source));
                    }
                }
            }
        }

        let visible = self
            .viewer
            .as_ref()
            .filter(|v| v.is_visible())
            .and_then(|v| v.current_source());
        self.status.process(visible);
    }
}
