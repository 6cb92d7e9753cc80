//! Input Modes
//!
//! Modal editing state for the secret entry field.

use zeroize::Zeroize;

/// Input mode enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Watching the code
    Normal,
    /// Typing a new secret
    Insert,
    /// Help screen
    Help,
}

impl InputMode {
    /// Get mode indicator for status line
    pub fn indicator(&self) -> &'static str {
        match self {
            Self::Normal => "NORMAL",
            Self::Insert => "SECRET",
            Self::Help => "HELP",
        }
    }
}

/// Mode state with associated data
#[derive(Debug, Clone)]
pub struct ModeState {
    /// Current mode
    pub mode: InputMode,
    /// Text buffer for input modes
    pub buffer: String,
    /// Cursor position in buffer, counted in characters
    pub cursor: usize,
}

impl Default for ModeState {
    fn default() -> Self {
        Self {
            mode: InputMode::Normal,
            buffer: String::new(),
            cursor: 0,
        }
    }
}

impl ModeState {
    /// Create new mode state
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch to a new mode, wiping whatever was typed
    pub fn set_mode(&mut self, mode: InputMode) {
        self.mode = mode;
        self.clear_buffer();
    }

    /// Switch to normal mode
    pub fn to_normal(&mut self) {
        self.set_mode(InputMode::Normal);
    }

    /// Switch to insert mode
    pub fn to_insert(&mut self) {
        self.set_mode(InputMode::Insert);
    }

    /// Switch to help mode
    pub fn to_help(&mut self) {
        self.set_mode(InputMode::Help);
    }

    fn char_len(&self) -> usize {
        self.buffer.chars().count()
    }

    fn byte_index(&self, cursor: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(cursor)
            .map_or(self.buffer.len(), |(i, _)| i)
    }

    /// Insert character at cursor
    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.buffer.insert(at, c);
        self.cursor += 1;
    }

    /// Delete character before cursor (backspace)
    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.buffer.remove(at);
        }
    }

    /// Delete character at cursor (delete key)
    pub fn delete_char_forward(&mut self) {
        if self.cursor < self.char_len() {
            let at = self.byte_index(self.cursor);
            self.buffer.remove(at);
        }
    }

    /// Move cursor left
    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor right
    pub fn cursor_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    /// Move cursor to start
    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    /// Move cursor to end
    pub fn cursor_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Clear buffer
    pub fn clear_buffer(&mut self) {
        self.buffer.zeroize();
        self.cursor = 0;
    }

    /// Get buffer contents
    pub fn get_buffer(&self) -> &str {
        &self.buffer
    }

    /// Take the buffer and return to normal mode
    pub fn take_buffer(&mut self) -> String {
        let buffer = std::mem::take(&mut self.buffer);
        self.to_normal();
        buffer
    }
}
