//! Renderer
//!
//! Main rendering logic for the application.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    Frame,
};

use super::components::{HelpBar, HelpScreen, MessageType, SecretDialog, StatusLine, TokenPanel};
use crate::input::InputMode;
use crate::schedule::CountdownState;

/// Everything the screen shows, borrowed from the app for one frame
pub struct UiState<'a> {
    pub mode: InputMode,
    pub masked_secret: Option<String>,
    pub code: Option<&'a str>,
    pub countdown: Option<CountdownState>,
    pub input: &'a str,
    pub cursor: usize,
    pub message: Option<(&'a str, MessageType)>,
}

pub struct Renderer;

impl Renderer {
    pub fn render(frame: &mut Frame, state: &UiState) {
        let size = frame.area();
        let chunks = create_main_layout(size);

        render_content(frame, chunks[0], state);
        render_status_line(frame, chunks[1], state);
        render_help_bar(frame, chunks[2], state.mode);
        render_overlays(frame, size, state);
    }
}

fn create_main_layout(size: Rect) -> std::rc::Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(size)
}

fn render_content(frame: &mut Frame, area: Rect, state: &UiState) {
    let panel = TokenPanel::new(state.masked_secret.as_deref(), state.code, state.countdown);
    frame.render_widget(panel, area);
}

fn render_status_line(frame: &mut Frame, area: Rect, state: &UiState) {
    let info = if state.code.is_some() { "RUNNING" } else { "IDLE" };
    let mut status = StatusLine::new(state.mode).info(info);

    if let Some((msg, msg_type)) = state.message {
        status = status.message(msg, msg_type);
    }

    frame.render_widget(status, area);
}

fn render_help_bar(frame: &mut Frame, area: Rect, mode: InputMode) {
    frame.render_widget(HelpBar::for_mode(mode), area);
}

fn render_overlays(frame: &mut Frame, area: Rect, state: &UiState) {
    match state.mode {
        InputMode::Insert => frame.render_widget(SecretDialog::new(state.input, state.cursor), area),
        InputMode::Help => frame.render_widget(HelpScreen, area),
        InputMode::Normal => {}
    }
}

#[cfg(test)]
mod tests {
    use ratatui::{backend::TestBackend, Terminal};

    use super::*;

    fn draw(state: &UiState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).unwrap();
        terminal.draw(|frame| Renderer::render(frame, state)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn idle() -> UiState<'static> {
        UiState {
            mode: InputMode::Normal,
            masked_secret: None,
            code: None,
            countdown: None,
            input: "",
            cursor: 0,
            message: None,
        }
    }

    #[test]
    fn test_idle_screen() {
        let text = draw(&idle());
        assert!(text.contains("TOTP Generator"));
        assert!(text.contains("------"));
        assert!(text.contains("IDLE"));
    }

    #[test]
    fn test_running_screen_with_toast() {
        let state = UiState {
            masked_secret: Some("JBSWY3****3PXP".to_string()),
            code: Some("123456"),
            countdown: Some(CountdownState { remaining_ms: 1_500, fraction_elapsed: 0.95 }),
            message: Some(("Copied to clipboard!", MessageType::Success)),
            ..idle()
        };

        let text = draw(&state);
        assert!(text.contains("123 456"));
        assert!(text.contains("1 second"));
        assert!(text.contains("Copied to clipboard!"));
        assert!(text.contains("RUNNING"));
    }

    #[test]
    fn test_secret_dialog_overlay() {
        let state = UiState {
            mode: InputMode::Insert,
            input: "abc",
            cursor: 3,
            ..idle()
        };

        let text = draw(&state);
        assert!(text.contains("Secret Key"));
        assert!(text.contains("***"));
        assert!(!text.contains("abc"));
    }
}
