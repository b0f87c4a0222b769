//! Event handling for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Key action that can be performed in the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    // Navigation
    MoveUp,
    MoveDown,
    JumpToTop,
    JumpToBottom,
    PageUp,
    PageDown,

    // Tree operations
    /// Expand the node under the cursor and list its candidates.
    Expand,
    /// Collapse the node under the cursor, or move to its parent.
    Collapse,

    // Selection
    /// Toggle choice of the candidate under the cursor (Space).
    ToggleChoice,
    /// Choose every candidate (multiselect only).
    ChooseAll,
    /// Drop the current choice.
    ClearChoice,

    // Panes
    SwitchPane,

    // UI toggles
    ToggleHelp,
    ToggleTheme,

    // Dialog outcome
    /// Enter: expand in the tree pane, submit in the select pane.
    Activate,
    Submit,
    Cancel,

    // No action
    None,
}

impl KeyAction {
    /// Convert a key event to an action.
    pub fn from_key_event(event: KeyEvent) -> Self {
        match (event.code, event.modifiers) {
            // Cancel - closing the dialog without a result
            (KeyCode::Char('q'), KeyModifiers::NONE) => KeyAction::Cancel,
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::Cancel,
            (KeyCode::Esc, _) => KeyAction::Cancel,

            // Navigation - vim style
            (KeyCode::Char('j'), KeyModifiers::NONE) => KeyAction::MoveDown,
            (KeyCode::Char('k'), KeyModifiers::NONE) => KeyAction::MoveUp,
            (KeyCode::Char('h'), KeyModifiers::NONE) => KeyAction::Collapse,
            (KeyCode::Char('l'), KeyModifiers::NONE) => KeyAction::Expand,

            // Navigation - arrow keys
            (KeyCode::Down, _) => KeyAction::MoveDown,
            (KeyCode::Up, _) => KeyAction::MoveUp,
            (KeyCode::Left, _) => KeyAction::Collapse,
            (KeyCode::Right, _) => KeyAction::Expand,

            // Jump
            (KeyCode::Char('g'), KeyModifiers::NONE) => KeyAction::JumpToTop,
            (KeyCode::Char('G'), KeyModifiers::SHIFT) => KeyAction::JumpToBottom,
            (KeyCode::Home, _) => KeyAction::JumpToTop,
            (KeyCode::End, _) => KeyAction::JumpToBottom,

            // Page navigation
            (KeyCode::PageUp, _) => KeyAction::PageUp,
            (KeyCode::PageDown, _) => KeyAction::PageDown,
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => KeyAction::PageUp,
            (KeyCode::Char('d'), KeyModifiers::CONTROL) => KeyAction::PageDown,

            // Selection
            (KeyCode::Char(' '), KeyModifiers::NONE) => KeyAction::ToggleChoice,
            (KeyCode::Char('a'), KeyModifiers::NONE) => KeyAction::ChooseAll,
            (KeyCode::Char('x'), KeyModifiers::NONE) => KeyAction::ClearChoice,

            // Panes
            (KeyCode::Tab, KeyModifiers::NONE) => KeyAction::SwitchPane,
            (KeyCode::BackTab, _) => KeyAction::SwitchPane,

            // UI toggles
            (KeyCode::Char('?'), KeyModifiers::NONE) => KeyAction::ToggleHelp,
            (KeyCode::Char('?'), KeyModifiers::SHIFT) => KeyAction::ToggleHelp,
            (KeyCode::Char('t'), KeyModifiers::NONE) => KeyAction::ToggleTheme,

            // Outcome
            (KeyCode::Enter, _) => KeyAction::Activate,
            (KeyCode::Char('s'), KeyModifiers::NONE) => KeyAction::Submit,

            _ => KeyAction::None,
        }
    }
}

/// A section of key bindings for the help display.
pub struct HelpSection {
    pub title: &'static str,
    pub bindings: Vec<KeyBinding>,
}

/// Key binding for display in help.
pub struct KeyBinding {
    pub keys: &'static str,
    pub description: &'static str,
}

/// Get all key bindings organized by section for help display.
pub fn get_help_sections() -> Vec<HelpSection> {
    vec![
        HelpSection {
            title: "Browse",
            bindings: vec![
                KeyBinding { keys: "j/k ↑/↓", description: "Move up/down" },
                KeyBinding { keys: "l → Enter", description: "Expand and list" },
                KeyBinding { keys: "h ←", description: "Collapse / go to parent" },
                KeyBinding { keys: "g/G", description: "Jump to top/bottom" },
                KeyBinding { keys: "Ctrl-u/d", description: "Page up/down" },
            ],
        },
        HelpSection {
            title: "Select",
            bindings: vec![
                KeyBinding { keys: "Space", description: "Toggle choice" },
                KeyBinding { keys: "a", description: "Choose all" },
                KeyBinding { keys: "x", description: "Clear choice" },
                KeyBinding { keys: "Enter", description: "Submit" },
            ],
        },
        HelpSection {
            title: "Dialog",
            bindings: vec![
                KeyBinding { keys: "Tab", description: "Switch pane" },
                KeyBinding { keys: "s", description: "Submit" },
                KeyBinding { keys: "Esc/q", description: "Cancel" },
                KeyBinding { keys: "t", description: "Toggle dark/light theme" },
                KeyBinding { keys: "?", description: "Show this help" },
            ],
        },
    ]
}
