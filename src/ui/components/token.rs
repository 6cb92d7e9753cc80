//! Token Panel
//!
//! The current code, the masked secret and the countdown gauge.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Gauge, Paragraph, Widget},
};

use super::popup::centered_rect_fixed;
use crate::schedule::CountdownState;

const PANEL_WIDTH: u16 = 40;
const PANEL_HEIGHT: u16 = 11;
const BLANK_CODE: &str = "------";
const WARN_SECS: u64 = 5;

/// Split even-length codes in half for readability
pub fn format_code(code: &str) -> String {
    let len = code.chars().count();
    if len < 6 || len % 2 != 0 {
        return code.to_string();
    }

    let (head, tail) = code.split_at(len / 2);
    format!("{} {}", head, tail)
}

pub struct TokenPanel<'a> {
    masked_secret: Option<&'a str>,
    code: Option<&'a str>,
    countdown: Option<CountdownState>,
}

impl<'a> TokenPanel<'a> {
    pub fn new(
        masked_secret: Option<&'a str>,
        code: Option<&'a str>,
        countdown: Option<CountdownState>,
    ) -> Self {
        Self { masked_secret, code, countdown }
    }
}

impl Widget for TokenPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let panel = centered_rect_fixed(PANEL_WIDTH, PANEL_HEIGHT, area);

        let block = Block::default()
            .title(Line::from(" TOTP Generator ").centered())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Magenta));

        let inner = block.inner(panel);
        block.render(panel, buf);

        let row = |offset: u16| Rect::new(inner.x, inner.y + offset, inner.width, 1);
        let fits = |offset: u16| offset < inner.height;

        if fits(1) {
            let secret = self.masked_secret.unwrap_or("(none)");
            Paragraph::new(format!("Secret: {}", secret))
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .render(row(1), buf);
        }

        if fits(3) {
            let code = self.code.map_or_else(|| BLANK_CODE.to_string(), format_code);
            Paragraph::new(code)
                .style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center)
                .render(row(3), buf);
        }

        let Some(countdown) = self.countdown else {
            if fits(5) {
                Paragraph::new("Press i to enter a secret")
                    .style(Style::default().fg(Color::DarkGray))
                    .alignment(Alignment::Center)
                    .render(row(5), buf);
            }
            return;
        };

        let color = if countdown.remaining_secs() <= WARN_SECS { Color::Red } else { Color::Green };

        if fits(5) {
            Paragraph::new(countdown.label())
                .style(Style::default().fg(color))
                .alignment(Alignment::Center)
                .render(row(5), buf);
        }

        if fits(6) {
            let gauge_area = Rect::new(inner.x + 2, inner.y + 6, inner.width.saturating_sub(4), 1);
            Gauge::default()
                .gauge_style(Style::default().fg(color).bg(Color::DarkGray))
                .ratio(countdown.fraction_remaining().clamp(0.0, 1.0))
                .label("")
                .render(gauge_area, buf);
        }

        if fits(8) {
            Paragraph::new("y to copy")
                .style(Style::default().fg(Color::DarkGray))
                .alignment(Alignment::Center)
                .render(row(8), buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(panel: TokenPanel) -> String {
        let area = Rect::new(0, 0, 50, 14);
        let mut buf = Buffer::empty(area);
        panel.render(area, &mut buf);
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_format_code() {
        assert_eq!(format_code("123456"), "123 456");
        assert_eq!(format_code("12345678"), "1234 5678");
        assert_eq!(format_code("1234567"), "1234567");
        assert_eq!(format_code("1234"), "1234");
    }

    #[test]
    fn test_idle_panel_is_blank() {
        let text = render(TokenPanel::new(None, None, None));
        assert!(text.contains("------"));
        assert!(text.contains("Secret: (none)"));
        assert!(!text.contains("seconds"));
    }

    #[test]
    fn test_running_panel() {
        let countdown = CountdownState { remaining_ms: 12_400, fraction_elapsed: 0.587 };
        let text = render(TokenPanel::new(Some("JBSWY3****3PXP"), Some("492039"), Some(countdown)));

        assert!(text.contains("492 039"));
        assert!(text.contains("12 seconds"));
        assert!(text.contains("Secret: JBSWY3****3PXP"));
    }
}
