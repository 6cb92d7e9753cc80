//! totp-tui - Terminal TOTP Generator
//!
//! Shows the current one-time code for a stored secret with a live countdown.

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod app;
mod input;
mod schedule;
mod store;
mod totp;
mod ui;

use app::{App, AppConfig, SystemClipboard};
use schedule::{CountdownScheduler, SystemClock};
use store::FileSecretStore;
use totp::TotpEngine;

type Tui = Terminal<CrosstermBackend<io::Stdout>>;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = AppConfig::default().with_args(&args);

    init_tracing(&config.log_path);

    let store = FileSecretStore::new(config.store_path.clone());
    info!(store = %store.path().display(), "starting");
    let clipboard = SystemClipboard::new(config.clipboard_timeout);
    let scheduler = CountdownScheduler::new(TotpEngine::default(), SystemClock, config.tick_interval);

    let mut app = App::new(config, scheduler, Box::new(store), Box::new(clipboard));
    app.restore();

    // Setup terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal even when the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        error!(error = %e, "event loop failed");
    }
    info!("exiting");
    result
}

/// Log to a file only, the terminal belongs to the UI
fn init_tracing(log_path: &Path) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match open_log(log_path) {
        Ok(file) => {
            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(Arc::new(file))
                .with_ansi(false);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(file_layer)
                .init();
        }
        Err(e) => {
            eprintln!("Failed to create log file at {}: {e}", log_path.display());
        }
    }
}

fn open_log(log_path: &Path) -> io::Result<File> {
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    File::create(log_path)
}

fn run_app(terminal: &mut Tui, app: &mut App) -> anyhow::Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(app.poll_timeout())? {
            if let Event::Key(key) = event::read()? {
                if app.handle_key_event(key) {
                    break;
                }
            }
        }

        app.tick();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_open_log_creates_parent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cache").join("totp-tui.log");

        assert!(open_log(&path).is_ok());
        assert!(path.exists());
    }

    #[test]
    fn test_open_log_reports_blocked_parent() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("cache");
        std::fs::write(&blocker, "").unwrap();

        let result = open_log(&blocker.join("totp-tui").join("totp-tui.log"));
        assert!(result.is_err());
    }
}
