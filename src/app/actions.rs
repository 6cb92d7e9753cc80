use zeroize::Zeroize;

use crate::input::keymap::Action;
use crate::schedule::Clock;
use crate::totp::TotpPrimitive;

use super::App;

impl<P: TotpPrimitive, C: Clock> App<P, C> {
    /// Returns `true` when the application should exit
    pub fn execute_action(&mut self, action: Action) -> bool {
        match action {
            Action::EnterSecret => self.mode_state.to_insert(),
            Action::SubmitSecret(mut raw) => {
                self.submit_secret(&raw);
                raw.zeroize();
            }

            Action::CopyCode => self.copy_code(),

            Action::ShowHelp => self.mode_state.to_help(),
            Action::Back => self.mode_state.to_normal(),

            Action::Clear => self.message = None,
            Action::Quit => {
                self.should_quit = true;
                return true;
            }

            _ => {}
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    use crate::app::{App, AppConfig, MemoryClipboard};
    use crate::input::InputMode;
    use crate::schedule::clock::ManualClock;
    use crate::schedule::{CountdownScheduler, Phase};
    use crate::store::MemorySecretStore;
    use crate::totp::{Rfc6238, TotpEngine};

    fn app() -> App<Rfc6238, ManualClock> {
        let config = AppConfig::default();
        let scheduler = CountdownScheduler::new(
            TotpEngine::default(),
            ManualClock::at_millis(1_700_000_010_000),
            config.tick_interval,
        );
        App::new(
            config,
            scheduler,
            Box::new(MemorySecretStore::default()),
            Box::new(MemoryClipboard::default()),
        )
    }

    fn press(app: &mut App<Rfc6238, ManualClock>, code: KeyCode) -> bool {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut App<Rfc6238, ManualClock>, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_typing_and_submitting_secret() {
        let mut app = app();
        press(&mut app, KeyCode::Char('i'));
        assert_eq!(app.mode_state.mode, InputMode::Insert);

        type_text(&mut app, "JBSWY3DPEHPK3PXP");
        assert!(app.scheduler.token().is_none());

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode_state.mode, InputMode::Normal);
        assert_eq!(app.mode_state.get_buffer(), "");
        assert_eq!(app.scheduler.phase(), Phase::Running);
    }

    #[test]
    fn test_cancel_entry_keeps_state() {
        let mut app = app();
        press(&mut app, KeyCode::Char('i'));
        type_text(&mut app, "JBSW");
        press(&mut app, KeyCode::Esc);

        assert_eq!(app.mode_state.mode, InputMode::Normal);
        assert_eq!(app.scheduler.phase(), Phase::Idle);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_q_in_insert_mode_is_text() {
        let mut app = app();
        press(&mut app, KeyCode::Char('i'));
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.mode_state.get_buffer(), "q");
    }

    #[test]
    fn test_help_and_quit() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert_eq!(app.mode_state.mode, InputMode::Help);

        assert!(!press(&mut app, KeyCode::Esc));
        assert_eq!(app.mode_state.mode, InputMode::Normal);

        assert!(press(&mut app, KeyCode::Char('q')));
        assert!(app.should_quit);
    }
}
