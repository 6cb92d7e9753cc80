use crossterm::event::{KeyEvent, KeyEventKind};

use crate::input::keymap::{help_action, normal_mode_action, text_input_action, Action};
use crate::input::InputMode;
use crate::schedule::Clock;
use crate::totp::TotpPrimitive;

use super::App;

impl<P: TotpPrimitive, C: Clock> App<P, C> {
    /// Returns `true` when the application should exit
    pub fn handle_key_event(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }

        let action = self.resolve_action(key);
        self.execute_action(action)
    }

    fn resolve_action(&mut self, key: KeyEvent) -> Action {
        match self.mode_state.mode {
            InputMode::Normal => normal_mode_action(key),
            InputMode::Insert => self.handle_text_input(text_input_action(key)),
            InputMode::Help => help_action(key),
        }
    }

    fn handle_text_input(&mut self, action: Action) -> Action {
        match action {
            Action::InsertChar(c) => { self.mode_state.insert_char(c); Action::None }
            Action::DeleteChar => { self.mode_state.delete_char(); Action::None }
            Action::DeleteCharForward => { self.mode_state.delete_char_forward(); Action::None }
            Action::CursorLeft => { self.mode_state.cursor_left(); Action::None }
            Action::CursorRight => { self.mode_state.cursor_right(); Action::None }
            Action::CursorHome => { self.mode_state.cursor_home(); Action::None }
            Action::CursorEnd => { self.mode_state.cursor_end(); Action::None }
            Action::ClearLine => { self.mode_state.clear_buffer(); Action::None }
            Action::Submit => Action::SubmitSecret(self.mode_state.take_buffer()),
            Action::Cancel => { self.mode_state.to_normal(); Action::None }
            _ => action,
        }
    }
}
