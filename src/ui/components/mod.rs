//! UI Components
//!
//! TUI widgets for the code panel, popups and status line.

pub mod popup;
pub mod statusline;
pub mod token;

// Re-exports
pub use popup::{HelpScreen, SecretDialog};
pub use statusline::{HelpBar, MessageType, StatusLine};
pub use token::TokenPanel;
