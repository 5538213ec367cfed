//! Domain-level keyboard actions independent of key bindings.

use crate::commands::Command;

/// Actions the terminal workbench can perform.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Focus the next document tab. Default: Tab/]
    NextDocument,
    /// Focus the previous document tab. Default: Shift+Tab/[
    PrevDocument,
    /// Move focus into the viewer panel. Default: v
    FocusViewer,

    /// Toggle the viewer panel. Default: l
    ToggleViewer,
    /// Append a checkpoint to the displayed log. Default: m
    AddCheckpoint,
    /// Clear the displayed log. Default: c
    ClearLog,
    /// Activate the status bar indicator. Default: s
    ClickStatus,

    /// Scroll the viewer up by one line. Default: k/↑
    ScrollUp,
    /// Scroll the viewer down by one line. Default: j/↓
    ScrollDown,
    /// Jump to the newest entry. Default: G/End
    ScrollToLatest,

    /// Re-read the configuration file. Default: r
    ReloadSettings,
    /// Quit. Default: q/Ctrl+c
    Quit,
}

impl KeyAction {
    /// Command this action triggers, for actions that map onto one.
    pub fn command(self) -> Option<Command> {
        match self {
            KeyAction::ToggleViewer => Some(Command::OpenViewer),
            KeyAction::AddCheckpoint => Some(Command::AddCheckpoint),
            KeyAction::ClearLog => Some(Command::ClearLog),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_actions_map_to_commands() {
        assert_eq!(KeyAction::ToggleViewer.command(), Some(Command::OpenViewer));
        assert_eq!(KeyAction::AddCheckpoint.command(), Some(Command::AddCheckpoint));
        assert_eq!(KeyAction::ClearLog.command(), Some(Command::ClearLog));
    }

    #[test]
    fn navigation_actions_have_no_command() {
        assert_eq!(KeyAction::NextDocument.command(), None);
        assert_eq!(KeyAction::ScrollUp.command(), None);
        assert_eq!(KeyAction::Quit.command(), None);
    }
}
