//! Popup Components
//!
//! Secret entry dialog and help overlay.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Widget},
};

/// Fixed size centered rectangle
pub fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}

/// Text input field
pub struct InputField<'a> {
    label: &'a str,
    value: &'a str,
    cursor: usize,
    masked: bool,
}

impl<'a> InputField<'a> {
    pub fn new(label: &'a str, value: &'a str, cursor: usize) -> Self {
        Self {
            label,
            value,
            cursor,
            masked: false,
        }
    }

    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }
}

impl Widget for InputField<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut input_y = area.y;
        if !self.label.is_empty() {
            buf.set_string(area.x, area.y, self.label, Style::default().fg(Color::Cyan));
            input_y += 1;
        }

        let input_x = area.x;
        let input_width = area.width;

        for x in input_x..input_x + input_width {
            if let Some(cell) = buf.cell_mut((x, input_y)) {
                cell.set_bg(Color::DarkGray);
            }
        }

        let len = self.value.chars().count();
        let display_value: String = if self.masked {
            "*".repeat(len)
        } else {
            self.value.to_string()
        };

        // Keep the cursor visible when the value is wider than the field
        let visible = input_width.saturating_sub(1) as usize;
        let offset = self.cursor.saturating_sub(visible);
        let shown: String = display_value.chars().skip(offset).collect();
        buf.set_stringn(
            input_x,
            input_y,
            &shown,
            input_width as usize,
            Style::default().fg(Color::White),
        );

        let cursor_x = input_x + (self.cursor - offset) as u16;
        if cursor_x < input_x + input_width {
            if let Some(cell) = buf.cell_mut((cursor_x, input_y)) {
                cell.set_style(Style::default().bg(Color::White).fg(Color::Black));
            }
        }
    }
}

/// Masked secret entry dialog
pub struct SecretDialog<'a> {
    value: &'a str,
    cursor: usize,
}

impl<'a> SecretDialog<'a> {
    pub fn new(value: &'a str, cursor: usize) -> Self {
        Self { value, cursor }
    }
}

impl Widget for SecretDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let popup_area = centered_rect_fixed(50, 6, area);

        Clear.render(popup_area, buf);

        let block = Block::default()
            .title(" Secret Key ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Magenta))
            .style(Style::default().bg(Color::Black));

        let inner = block.inner(popup_area);
        block.render(popup_area, buf);

        buf.set_string(
            inner.x,
            inner.y,
            "Enter your secret key or otpauth:// URI:",
            Style::default().fg(Color::White),
        );

        let input_rect = Rect::new(inner.x, inner.y + 1, inner.width, 1);
        InputField::new("", self.value, self.cursor)
            .masked()
            .render(input_rect, buf);

        let hint = Line::from(vec![
            Span::styled("[Enter]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" Submit  "),
            Span::styled("[Esc]", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(" Cancel"),
        ]);
        buf.set_line(inner.x, inner.y + 3, &hint, inner.width);
    }
}

fn help_bindings() -> &'static [(&'static str, &'static str)] {
    &[
        ("i / s", "Enter a new secret"),
        ("y / c / Enter", "Copy code to clipboard"),
        ("C-l", "Clear status message"),
        ("?", "Toggle this help"),
        ("q / Esc / C-c", "Quit"),
    ]
}

/// Help screen widget
pub struct HelpScreen;

impl Widget for HelpScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bindings = help_bindings();
        let popup = centered_rect_fixed(46, bindings.len() as u16 + 4, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(" Help ")
            .title_bottom(Line::from(" q close ").centered())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Yellow))
            .style(Style::default().bg(Color::Black));

        let inner = block.inner(popup);
        block.render(popup, buf);

        for (i, (keys, desc)) in bindings.iter().enumerate() {
            let y = inner.y + 1 + i as u16;
            if y >= inner.y + inner.height {
                break;
            }
            let line = Line::from(vec![
                Span::styled(
                    format!("{:<16}", keys),
                    Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
                ),
                Span::styled(*desc, Style::default().fg(Color::Gray)),
            ]);
            buf.set_line(inner.x + 1, y, &line, inner.width.saturating_sub(1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn test_centered_rect_fixed() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_rect_fixed(50, 6, area), Rect::new(25, 17, 50, 6));

        let small = Rect::new(0, 0, 20, 4);
        assert_eq!(centered_rect_fixed(50, 6, small), Rect::new(0, 0, 20, 4));
    }

    #[test]
    fn test_secret_dialog_masks_input() {
        let area = Rect::new(0, 0, 60, 10);
        let mut buf = Buffer::empty(area);
        SecretDialog::new("JBSWY3DP", 8).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("********"));
        assert!(!text.contains("JBSWY3DP"));
    }

    #[test]
    fn test_long_input_scrolls() {
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);
        InputField::new("", "abcdefghijklmno", 15).render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.starts_with("ghijklmno"));
    }

    #[test]
    fn test_help_lists_bindings() {
        let area = Rect::new(0, 0, 60, 20);
        let mut buf = Buffer::empty(area);
        HelpScreen.render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Copy code to clipboard"));
    }
}
