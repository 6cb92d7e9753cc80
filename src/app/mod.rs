//! Application State
//!
//! Ties the countdown scheduler to persistence, the clipboard and the UI.
//! Every mutation happens on the event loop thread, one step at a time.

mod actions;
mod clipboard;
mod config;
mod input;

use std::time::{Duration, Instant};

use ratatui::Frame;
use tracing::{info, warn};

use crate::input::ModeState;
use crate::schedule::{Clock, CountdownScheduler, SystemClock, TickOutcome};
use crate::store::SecretStore;
use crate::totp::{Rfc6238, Secret, TotpPrimitive};
use crate::ui::components::MessageType;
use crate::ui::renderer::{Renderer, UiState};

use clipboard::ClipboardSink;

pub use clipboard::SystemClipboard;
pub use config::AppConfig;

#[cfg(test)]
pub use clipboard::MemoryClipboard;

/// Transient status-line notification
#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub kind: MessageType,
    pub shown_at: Instant,
    pub duration: Duration,
}

impl Message {
    pub fn is_expired(&self) -> bool {
        self.shown_at.elapsed() > self.duration
    }
}

pub struct App<P = Rfc6238, C = SystemClock> {
    pub config: AppConfig,
    pub scheduler: CountdownScheduler<P, C>,
    store: Box<dyn SecretStore>,
    clipboard: Box<dyn ClipboardSink>,
    pub mode_state: ModeState,
    pub message: Option<Message>,
    pub should_quit: bool,
}

impl<P: TotpPrimitive, C: Clock> App<P, C> {
    pub fn new(
        config: AppConfig,
        scheduler: CountdownScheduler<P, C>,
        store: Box<dyn SecretStore>,
        clipboard: Box<dyn ClipboardSink>,
    ) -> Self {
        Self {
            config,
            scheduler,
            store,
            clipboard,
            mode_state: ModeState::new(),
            message: None,
            should_quit: false,
        }
    }

    /// Seed the countdown from the saved secret, if any
    pub fn restore(&mut self) {
        let secret = match self.store.load() {
            Ok(Some(secret)) => secret,
            Ok(None) => {
                info!("no saved secret");
                return;
            }
            Err(e) => {
                warn!(error = %e, "could not load saved secret");
                self.set_message(&e.to_string(), MessageType::Warning);
                return;
            }
        };

        info!(secret = %secret.masked(), "restoring saved secret");
        if let Err(e) = self.scheduler.start(secret) {
            self.set_message(&e.to_string(), MessageType::Error);
        }
    }

    /// Handle a secret typed by the user.
    ///
    /// An empty submission stops the countdown without generating. A
    /// rejected secret leaves the current countdown running.
    pub fn submit_secret(&mut self, raw: &str) {
        let Some(secret) = Secret::parse(raw) else {
            self.scheduler.reset();
            self.set_message("Secret cannot be empty", MessageType::Warning);
            return;
        };

        if let Err(e) = self.scheduler.start(secret.clone()) {
            self.set_message(&e.to_string(), MessageType::Error);
            return;
        }

        match self.store.save(&secret) {
            Ok(()) => self.set_toast("Secret saved", MessageType::Success),
            Err(e) => {
                warn!(error = %e, "could not save secret");
                self.set_message(&e.to_string(), MessageType::Warning);
            }
        }
    }

    /// Fire the countdown timer if it is due
    pub fn tick(&mut self) {
        if let Some(TickOutcome::Failed(e)) = self.scheduler.poll() {
            self.set_message(&e.to_string(), MessageType::Error);
        }
    }

    pub fn copy_code(&mut self) {
        let Some(code) = self.scheduler.token().map(|t| t.code.clone()) else {
            self.set_message("No code to copy", MessageType::Warning);
            return;
        };

        match self.clipboard.copy(&code) {
            Ok(()) => self.set_toast("Copied to clipboard!", MessageType::Success),
            Err(e) => {
                warn!(error = %e, "copy failed");
                self.set_message(&e.to_string(), MessageType::Error);
            }
        }
    }

    /// How long the event loop may wait for input before it must tick
    pub fn poll_timeout(&self) -> Duration {
        self.scheduler
            .time_until_next_tick()
            .unwrap_or(self.config.tick_interval)
    }

    pub fn render(&mut self, frame: &mut Frame) {
        self.check_message_expiry();

        let session = self.scheduler.session();
        let state = UiState {
            mode: self.mode_state.mode,
            masked_secret: session.map(|s| s.secret.masked()),
            code: session.map(|s| s.token.code.as_str()),
            countdown: session.map(|s| s.countdown),
            input: self.mode_state.get_buffer(),
            cursor: self.mode_state.cursor,
            message: self.message.as_ref().map(|m| (m.text.as_str(), m.kind)),
        };

        Renderer::render(frame, &state);
    }

    fn check_message_expiry(&mut self) {
        if self.message.as_ref().is_some_and(Message::is_expired) {
            self.message = None;
        }
    }

    /// Status-line message shown for the configured message duration
    pub fn set_message(&mut self, msg: &str, msg_type: MessageType) {
        let duration = self.config.message_duration;
        self.show(msg, msg_type, duration);
    }

    /// Short confirmation shown for the toast duration
    pub fn set_toast(&mut self, msg: &str, msg_type: MessageType) {
        let duration = self.config.toast_duration;
        self.show(msg, msg_type, duration);
    }

    fn show(&mut self, msg: &str, msg_type: MessageType, duration: Duration) {
        self.message = Some(Message {
            text: msg.to_string(),
            kind: msg_type,
            shown_at: Instant::now(),
            duration,
        });
    }
}
