use crate::domain::SelectionCommand;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Represents the result of handling a key event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    /// Finish and deliver the checked files
    Commit,
    /// Flip the focused row
    Toggle,
    /// Check every row
    CheckAll,
    /// Uncheck every row
    UncheckAll,
    /// Flip every row
    InvertAll,
    /// Move focus down
    Next,
    /// Move focus up
    Previous,
    /// Focus the first row
    First,
    /// Focus the last row
    Last,
    /// Show help overlay
    Help,
    /// Quit without output
    Quit,
    /// No action
    None,
}

impl KeyAction {
    /// Selection command for actions that change which rows are checked
    pub fn selection_command(&self, focus: usize) -> Option<SelectionCommand> {
        match self {
            KeyAction::Toggle => Some(SelectionCommand::ToggleAt(focus)),
            KeyAction::CheckAll => Some(SelectionCommand::CheckAll),
            KeyAction::UncheckAll => Some(SelectionCommand::UncheckAll),
            KeyAction::InvertAll => Some(SelectionCommand::InvertAll),
            _ => None,
        }
    }
}

/// Maps keyboard events to actions
pub fn handle_key_event(key: KeyEvent) -> KeyAction {
    // Shift is already folded into the character for letters and '?'
    let modifiers = key.modifiers.difference(KeyModifiers::SHIFT);

    match (key.code, modifiers) {
        // Quit: q, Q, Esc or Ctrl+C
        (KeyCode::Char('q'), KeyModifiers::NONE) => KeyAction::Quit,
        (KeyCode::Char('Q'), KeyModifiers::NONE) => KeyAction::Quit,
        (KeyCode::Esc, KeyModifiers::NONE) => KeyAction::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::Quit,

        (KeyCode::Enter, KeyModifiers::NONE) => KeyAction::Commit,
        (KeyCode::Char(' '), KeyModifiers::NONE) => KeyAction::Toggle,

        // Bulk selection
        (KeyCode::Char('c'), KeyModifiers::NONE) => KeyAction::CheckAll,
        (KeyCode::Char('s'), KeyModifiers::NONE) => KeyAction::UncheckAll,
        (KeyCode::Char('t'), KeyModifiers::NONE) => KeyAction::InvertAll,

        // Navigation
        (KeyCode::Down, KeyModifiers::NONE) => KeyAction::Next,
        (KeyCode::Up, KeyModifiers::NONE) => KeyAction::Previous,
        (KeyCode::Char('j'), KeyModifiers::NONE) => KeyAction::Next,
        (KeyCode::Char('k'), KeyModifiers::NONE) => KeyAction::Previous,
        (KeyCode::Home, KeyModifiers::NONE) => KeyAction::First,
        (KeyCode::End, KeyModifiers::NONE) => KeyAction::Last,
        (KeyCode::Char('g'), KeyModifiers::NONE) => KeyAction::First,
        (KeyCode::Char('G'), KeyModifiers::NONE) => KeyAction::Last,

        // Help: ? or h
        (KeyCode::Char('?'), KeyModifiers::NONE) => KeyAction::Help,
        (KeyCode::Char('h'), KeyModifiers::NONE) => KeyAction::Help,

        _ => KeyAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_quit() {
        assert_eq!(handle_key_event(key(KeyCode::Char('q'))), KeyAction::Quit);
        assert_eq!(handle_key_event(key(KeyCode::Esc)), KeyAction::Quit);

        let upper = KeyEvent::new(KeyCode::Char('Q'), KeyModifiers::SHIFT);
        assert_eq!(handle_key_event(upper), KeyAction::Quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn test_key_commit_and_toggle() {
        assert_eq!(handle_key_event(key(KeyCode::Enter)), KeyAction::Commit);
        assert_eq!(handle_key_event(key(KeyCode::Char(' '))), KeyAction::Toggle);
    }

    #[test]
    fn test_key_bulk_selection() {
        assert_eq!(handle_key_event(key(KeyCode::Char('c'))), KeyAction::CheckAll);
        assert_eq!(handle_key_event(key(KeyCode::Char('s'))), KeyAction::UncheckAll);
        assert_eq!(handle_key_event(key(KeyCode::Char('t'))), KeyAction::InvertAll);
    }

    #[test]
    fn test_key_navigation() {
        assert_eq!(handle_key_event(key(KeyCode::Down)), KeyAction::Next);
        assert_eq!(handle_key_event(key(KeyCode::Up)), KeyAction::Previous);
        assert_eq!(handle_key_event(key(KeyCode::Char('j'))), KeyAction::Next);
        assert_eq!(handle_key_event(key(KeyCode::Char('k'))), KeyAction::Previous);
        assert_eq!(handle_key_event(key(KeyCode::Home)), KeyAction::First);
        assert_eq!(handle_key_event(key(KeyCode::End)), KeyAction::Last);

        let shift_g = KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT);
        assert_eq!(handle_key_event(shift_g), KeyAction::Last);
    }

    #[test]
    fn test_key_help() {
        assert_eq!(handle_key_event(key(KeyCode::Char('?'))), KeyAction::Help);
        assert_eq!(handle_key_event(key(KeyCode::Char('h'))), KeyAction::Help);

        let shifted = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
        assert_eq!(handle_key_event(shifted), KeyAction::Help);
    }

    #[test]
    fn test_key_none() {
        assert_eq!(handle_key_event(key(KeyCode::Char('x'))), KeyAction::None);

        let alt_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::ALT);
        assert_eq!(handle_key_event(alt_c), KeyAction::None);
    }

    #[test]
    fn test_selection_commands() {
        assert_eq!(
            KeyAction::Toggle.selection_command(3),
            Some(SelectionCommand::ToggleAt(3))
        );
        assert_eq!(
            KeyAction::CheckAll.selection_command(0),
            Some(SelectionCommand::CheckAll)
        );
        assert_eq!(KeyAction::Commit.selection_command(0), None);
        assert_eq!(KeyAction::Next.selection_command(0), None);
    }
}
