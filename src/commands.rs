//! Commands the host exposes in menus and key bindings.

/// A log command. Each is enable-gated independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// Open the viewer, or close it if already open.
    OpenViewer,
    /// Append a timestamp marker to the displayed source's log.
    AddCheckpoint,
    /// Clear the displayed source's log.
    ClearLog,
}

impl Command {
    /// Every command, in menu order.
    pub const ALL: [Command; 3] = [Command::OpenViewer, Command::AddCheckpoint, Command::ClearLog];

    /// Stable identifier.
    pub fn id(self) -> &'static str {
        match self {
            Command::OpenViewer => "logconsole:open",
            Command::AddCheckpoint => "logconsole:add-checkpoint",
            Command::ClearLog => "logconsole:clear",
        }
    }

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            Command::OpenViewer => "Show Log Console",
            Command::AddCheckpoint => "Add Checkpoint",
            Command::ClearLog => "Clear Log",
        }
    }

    /// Look a command up by its identifier.
    pub fn from_id(id: &str) -> Option<Command> {
        Command::ALL.into_iter().find(|c| c.id() == id)
    }

    /// Whether the command needs a bound source to run.
    pub fn requires_source(self) -> bool {
        !matches!(self, Command::OpenViewer)
    }
}

/// Result of executing a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The command ran.
    Executed,
    /// The command was disabled and did nothing.
    Disabled,
}
