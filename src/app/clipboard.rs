use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use thiserror::Error;
use tracing::debug;
use zeroize::Zeroize;

pub static CLIPBOARD_COPY_ID: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),
}

pub type ClipboardResult<T> = Result<T, ClipboardError>;

pub trait ClipboardSink {
    fn copy(&mut self, text: &str) -> ClipboardResult<()>;
}

/// System clipboard, cleared again after `clear_after` unless something
/// newer was copied in the meantime
pub struct SystemClipboard {
    clear_after: Duration,
}

impl SystemClipboard {
    pub fn new(clear_after: Duration) -> Self {
        Self { clear_after }
    }
}

impl ClipboardSink for SystemClipboard {
    fn copy(&mut self, text: &str) -> ClipboardResult<()> {
        let copy_id = CLIPBOARD_COPY_ID.fetch_add(1, Ordering::SeqCst) + 1;
        set_text(text)?;

        let timeout = self.clear_after;
        std::thread::spawn(move || clear_later(timeout, copy_id));
        Ok(())
    }
}

fn clear_later(timeout: Duration, copy_id: u64) {
    std::thread::sleep(timeout);

    if CLIPBOARD_COPY_ID.load(Ordering::SeqCst) != copy_id {
        return;
    }

    debug!("clearing clipboard");
    clear_clipboard();
}

#[cfg(target_os = "linux")]
fn is_wayland() -> bool {
    std::env::var("WAYLAND_DISPLAY").is_ok()
}

#[cfg(target_os = "linux")]
fn set_text(text: &str) -> ClipboardResult<()> {
    let mut text = text.to_string();
    let result = if is_wayland() {
        pipe_to("wl-copy", &[], &text)
    } else {
        pipe_to("xclip", &["-selection", "clipboard"], &text)
    };
    text.zeroize();
    result
}

#[cfg(target_os = "linux")]
fn pipe_to(program: &str, args: &[&str], text: &str) -> ClipboardResult<()> {
    use std::io::Write;
    use std::process::{Command, Stdio};

    let unavailable = |e: std::io::Error| ClipboardError::Unavailable(format!("{}: {}", program, e));

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(unavailable)?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes()).map_err(unavailable)?;
    }

    let status = child.wait().map_err(unavailable)?;
    if !status.success() {
        return Err(ClipboardError::Unavailable(format!("{} exited with {}", program, status)));
    }
    Ok(())
}

#[cfg(target_os = "linux")]
fn clear_clipboard() {
    use std::process::{Command, Stdio};

    if is_wayland() {
        let _ = Command::new("wl-copy").arg("--clear").output();
    } else {
        let _ = Command::new("xclip")
            .args(["-selection", "clipboard"])
            .stdin(Stdio::piped())
            .output();
    }
}

#[cfg(not(target_os = "linux"))]
fn set_text(text: &str) -> ClipboardResult<()> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
    clipboard
        .set_text(text)
        .map_err(|e| ClipboardError::Unavailable(e.to_string()))
}

#[cfg(not(target_os = "linux"))]
fn clear_clipboard() {
    if let Ok(mut clipboard) = arboard::Clipboard::new() {
        let _ = clipboard.clear();
    }
}

/// Records copies in memory. Clones share state.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    pub contents: std::rc::Rc<std::cell::RefCell<Option<String>>>,
    pub fail: std::rc::Rc<std::cell::Cell<bool>>,
}

#[cfg(test)]
impl ClipboardSink for MemoryClipboard {
    fn copy(&mut self, text: &str) -> ClipboardResult<()> {
        if self.fail.get() {
            return Err(ClipboardError::Unavailable("no display".to_string()));
        }
        *self.contents.borrow_mut() = Some(text.to_string());
        Ok(())
    }
}
