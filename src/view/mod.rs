//! TUI rendering and terminal management (impure shell)

mod layout;
pub mod log_view;
pub mod renderer;
pub mod status_indicator;
pub mod tabs;

pub use layout::{build_keyboard_hints, render_layout};
pub use log_view::LogView;
pub use renderer::{render_entry, ContentRenderer, MimeRenderer};
pub use status_indicator::StatusIndicatorView;

use crate::config::keybindings::KeyBindings;
use crate::config::{ConfigError, Settings};
use crate::host::Shell;
use crate::layout_store;
use crate::logging::SourcedEntry;
use crate::model::KeyAction;
use crate::shell::{document_source, DocumentShell};
use crate::workbench::{HostEvent, Workbench};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

/// Re-reads settings on demand (the `r` key).
pub type SettingsLoader = Box<dyn Fn() -> Result<Settings, ConfigError>>;

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    workbench: Workbench,
    shell: DocumentShell,
    key_bindings: KeyBindings,
    /// Entries produced through tracing, drained on every timer tick
    sourced: Option<mpsc::Receiver<SourcedEntry>>,
    reload: SettingsLoader,
    /// Lines scrolled up in the viewer (0 = newest)
    scroll_offset: usize,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen
    pub fn new(
        workbench: Workbench,
        shell: DocumentShell,
        sourced: Option<mpsc::Receiver<SourcedEntry>>,
        reload: SettingsLoader,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self::with_terminal(
            terminal, workbench, shell, sourced, reload,
        ))
    }

    /// Run the main event loop
    ///
    /// Returns when user quits (q or Ctrl+C).
    /// Event-driven: redraws on user input, new log entries, or while the
    /// status indicator is flashing.
    pub fn run(&mut self) -> Result<(), TuiError> {
        // Timer interval for status indicator blink and producer draining
        const TIMER_INTERVAL: Duration = Duration::from_millis(250);

        // Initial render - ensures screen has content immediately
        self.draw()?;

        loop {
            if event::poll(TIMER_INTERVAL)? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key) {
                            return Ok(()); // User quit
                        }
                        self.draw()?;
                    }
                    Event::Resize(_, _) => self.draw()?,
                    _ => {}
                }
                continue;
            }

            // Timer elapsed - drain producers and advance the flash
            let received = self.drain_sourced();
            let flashing = self.workbench.tick();
            if received > 0 || flashing {
                self.draw()?;
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Build the app on an existing terminal.
    pub fn with_terminal(
        terminal: Terminal<B>,
        workbench: Workbench,
        shell: DocumentShell,
        sourced: Option<mpsc::Receiver<SourcedEntry>>,
        reload: SettingsLoader,
    ) -> Self {
        Self {
            terminal,
            workbench,
            shell,
            key_bindings: KeyBindings::default(),
            sourced,
            reload,
            scroll_offset: 0,
        }
    }

    /// The workbench driven by this app.
    pub fn workbench(&self) -> &Workbench {
        &self.workbench
    }

    /// The shell driven by this app.
    pub fn shell(&self) -> &DocumentShell {
        &self.shell
    }

    /// The terminal, for inspecting the last drawn frame.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Ctrl+C always quits, even if rebound
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }

        let Some(action) = self.key_bindings.get(key) else {
            return false;
        };
        debug!(?action, "Key action");

        if let Some(command) = action.command() {
            let outcome = self.workbench.execute(command, &mut self.shell);
            debug!(command = command.id(), ?outcome, "Command executed");
        }

        match action {
            KeyAction::NextDocument => {
                self.shell.focus_next();
                self.workbench.focus_changed(&self.shell);
            }
            KeyAction::PrevDocument => {
                self.shell.focus_prev();
                self.workbench.focus_changed(&self.shell);
            }
            KeyAction::FocusViewer => {
                self.shell.activate_viewer();
                self.workbench.focus_changed(&self.shell);
            }
            KeyAction::ClickStatus => self.workbench.click_status(&mut self.shell),
            KeyAction::ScrollUp => {
                let max = self
                    .workbench
                    .viewer()
                    .map_or(0, |v| v.lines().len().saturating_sub(1));
                self.scroll_offset = (self.scroll_offset + 1).min(max);
            }
            KeyAction::ScrollDown => self.scroll_offset = self.scroll_offset.saturating_sub(1),
            KeyAction::ScrollToLatest => self.scroll_offset = 0,
            KeyAction::ReloadSettings => {
                info!("Reloading settings");
                self.workbench.apply_settings((self.reload)());
            }
            KeyAction::Quit => return true,
            KeyAction::ToggleViewer | KeyAction::AddCheckpoint | KeyAction::ClearLog => {}
        }

        self.handle_host_events();
        false
    }

    /// Move entries produced through tracing into the workbench.
    ///
    /// Returns how many entries were received.
    pub fn drain_sourced(&mut self) -> usize {
        let Some(receiver) = &self.sourced else {
            return 0;
        };
        let entries: Vec<SourcedEntry> = receiver.try_iter().collect();
        let count = entries.len();
        for SourcedEntry { source, entry } in entries {
            self.workbench.log(source, entry);
        }
        count
    }

    /// Render the current frame
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let workbench = &self.workbench;
        let shell = &self.shell;
        let scroll_offset = self.scroll_offset;
        self.terminal.draw(|frame| {
            layout::render_layout(frame, workbench, shell, scroll_offset);
        })?;
        Ok(())
    }

    fn handle_host_events(&mut self) {
        for event in self.workbench.drain_host_events() {
            match event {
                HostEvent::SourceChanged(source) => {
                    debug!(log_source = ?source, "Viewer source changed");
                    self.scroll_offset = 0;
                }
                HostEvent::ViewerOpened | HostEvent::ViewerClosed => self.scroll_offset = 0,
            }
        }
    }

    /// Consume the app, returning the workbench for layout persistence.
    pub fn into_workbench(self) -> Workbench {
        self.workbench
    }
}

/// Startup options for [`run`].
pub struct ViewOptions {
    /// Document tabs, one per source.
    pub documents: Vec<String>,
    /// Settings loaded at startup.
    pub settings: Result<Settings, ConfigError>,
    /// Loader used when the user asks for a reload.
    pub reload: SettingsLoader,
    /// Receiver side of the tracing source layer.
    pub sourced: Option<mpsc::Receiver<SourcedEntry>>,
    /// Where the viewer layout is persisted; `None` disables restoration.
    pub layout_path: Option<PathBuf>,
}

/// Initialize and run the TUI application
///
/// This is the main entry point for the TUI. It performs the two-phase
/// workbench startup, restores the viewer layout, runs the event loop, and
/// ensures terminal cleanup on exit.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run(options: ViewOptions) -> Result<(), TuiError> {
    let ViewOptions {
        documents,
        settings,
        reload,
        sourced,
        layout_path,
    } = options;

    let mut shell = DocumentShell::with_documents(documents.iter().map(String::as_str));
    let mut workbench = Workbench::new(document_source);

    if let Some(record) = layout_path.as_deref().and_then(layout_store::load_layout) {
        workbench.restore_from(&mut shell, &record);
    }
    workbench.ready(&shell, settings);
    workbench.sync_visibility(&shell);

    let mut app = TuiApp::new(workbench, shell, sourced, reload)?;

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    if let Some(path) = layout_path {
        let workbench = app.into_workbench();
        if let Err(e) = layout_store::save_layout(&path, workbench.layout_record().as_ref()) {
            warn!(path = %path.display(), error = %e, "Failed to save layout");
        }
    }

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
