//! Keymap
//!
//! Key bindings mapped to actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Actions that can be triggered by key presses
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Secret entry
    EnterSecret,
    SubmitSecret(String),

    // Clipboard
    CopyCode,

    // View
    ShowHelp,
    Back,

    // Application
    Clear,
    Quit,

    // Text input
    InsertChar(char),
    DeleteChar,
    DeleteCharForward,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    ClearLine,
    Submit,
    Cancel,

    // No action
    None,
}

/// Map key event to action in normal mode
pub fn normal_mode_action(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Char('l'), KeyModifiers::CONTROL) => Action::Clear,

        (KeyCode::Char('i') | KeyCode::Char('s'), _) => Action::EnterSecret,
        (KeyCode::Char('y') | KeyCode::Char('c') | KeyCode::Enter, _) => Action::CopyCode,
        (KeyCode::Char('?'), _) => Action::ShowHelp,
        (KeyCode::Char('q') | KeyCode::Esc, _) => Action::Quit,

        _ => Action::None,
    }
}

/// Map key event to action in text input modes
pub fn text_input_action(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Cancel,
        (KeyCode::Enter, _) => Action::Submit,
        (KeyCode::Backspace, _) => Action::DeleteChar,
        (KeyCode::Delete, _) => Action::DeleteCharForward,
        (KeyCode::Left, _) => Action::CursorLeft,
        (KeyCode::Right, _) => Action::CursorRight,
        (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => Action::CursorHome,
        (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => Action::CursorEnd,
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => Action::ClearLine,
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => Action::InsertChar(c),
        _ => Action::None,
    }
}

/// Map key event to action in help mode
pub fn help_action(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Action::Back,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn key_ctrl(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::CONTROL)
    }

    #[test]
    fn test_normal_bindings() {
        assert_eq!(normal_mode_action(key(KeyCode::Char('i'))), Action::EnterSecret);
        assert_eq!(normal_mode_action(key(KeyCode::Char('y'))), Action::CopyCode);
        assert_eq!(normal_mode_action(key(KeyCode::Enter)), Action::CopyCode);
        assert_eq!(normal_mode_action(key(KeyCode::Char('?'))), Action::ShowHelp);
        assert_eq!(normal_mode_action(key(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(normal_mode_action(key(KeyCode::Char('z'))), Action::None);
    }

    #[test]
    fn test_ctrl_c_quits_but_c_copies() {
        assert_eq!(normal_mode_action(key_ctrl(KeyCode::Char('c'))), Action::Quit);
        assert_eq!(normal_mode_action(key(KeyCode::Char('c'))), Action::CopyCode);
    }

    #[test]
    fn test_text_input() {
        assert_eq!(text_input_action(key(KeyCode::Char('a'))), Action::InsertChar('a'));
        assert_eq!(text_input_action(key(KeyCode::Backspace)), Action::DeleteChar);
        assert_eq!(text_input_action(key(KeyCode::Enter)), Action::Submit);
        assert_eq!(text_input_action(key(KeyCode::Esc)), Action::Cancel);
    }

    #[test]
    fn test_ctrl_shortcuts() {
        assert_eq!(text_input_action(key_ctrl(KeyCode::Char('a'))), Action::CursorHome);
        assert_eq!(text_input_action(key_ctrl(KeyCode::Char('e'))), Action::CursorEnd);
        assert_eq!(text_input_action(key_ctrl(KeyCode::Char('u'))), Action::ClearLine);
    }

    #[test]
    fn test_help_action() {
        assert_eq!(help_action(key(KeyCode::Esc)), Action::Back);
        assert_eq!(help_action(key(KeyCode::Char('?'))), Action::Back);
        assert_eq!(help_action(key(KeyCode::Char('j'))), Action::None);
    }
}
