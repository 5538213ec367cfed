//! Keyboard bindings configuration.

use crate::model::key_action::KeyAction;
use crossterm::event::KeyEvent;
use std::collections::HashMap;

/// Maps keyboard events to domain actions.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&key).copied()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        use crossterm::event::{KeyCode, KeyModifiers};

        let mut bindings = HashMap::new();
        let mut bind = |code: KeyCode, modifiers: KeyModifiers, action: KeyAction| {
            bindings.insert(KeyEvent::new(code, modifiers), action);
        };

        // Document focus
        bind(KeyCode::Tab, KeyModifiers::NONE, KeyAction::NextDocument);
        bind(KeyCode::Char(']'), KeyModifiers::NONE, KeyAction::NextDocument);
        bind(KeyCode::BackTab, KeyModifiers::SHIFT, KeyAction::PrevDocument);
        bind(KeyCode::Char('['), KeyModifiers::NONE, KeyAction::PrevDocument);
        bind(KeyCode::Char('v'), KeyModifiers::NONE, KeyAction::FocusViewer);

        // Log commands
        bind(KeyCode::Char('l'), KeyModifiers::NONE, KeyAction::ToggleViewer);
        bind(KeyCode::Char('m'), KeyModifiers::NONE, KeyAction::AddCheckpoint);
        bind(KeyCode::Char('c'), KeyModifiers::NONE, KeyAction::ClearLog);
        bind(KeyCode::Char('s'), KeyModifiers::NONE, KeyAction::ClickStatus);

        // Scrolling
        bind(KeyCode::Char('k'), KeyModifiers::NONE, KeyAction::ScrollUp);
        bind(KeyCode::Up, KeyModifiers::NONE, KeyAction::ScrollUp);
        bind(KeyCode::Char('j'), KeyModifiers::NONE, KeyAction::ScrollDown);
        bind(KeyCode::Down, KeyModifiers::NONE, KeyAction::ScrollDown);
        bind(KeyCode::Char('G'), KeyModifiers::SHIFT, KeyAction::ScrollToLatest);
        bind(KeyCode::End, KeyModifiers::NONE, KeyAction::ScrollToLatest);

        // Application
        bind(KeyCode::Char('r'), KeyModifiers::NONE, KeyAction::ReloadSettings);
        bind(KeyCode::Char('q'), KeyModifiers::NONE, KeyAction::Quit);
        bind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit);

        Self { bindings }
    }
}
