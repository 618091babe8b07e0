//! Clipboard backends the copy command writes to.
//
//! `SystemClipboard` wraps the `arboard` crate so callers never touch
//! platform clipboard APIs directly. `MemoryClipboard` keeps the contents in
//! process, for headless runs and tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard backend error: {0}")]
    Backend(#[from] arboard::Error),
    #[error("clipboard is empty")]
    Empty,
    #[error("clipboard state is poisoned")]
    Poisoned,
}

/// How long a one-shot copy keeps serving the selection on Linux so a
/// clipboard manager can take ownership before the process exits.
pub const HANDOFF_WINDOW: Duration = Duration::from_millis(250);

pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;

    fn get_text(&mut self) -> Result<String, ClipboardError>;
}

impl<T: Clipboard + ?Sized> Clipboard for &mut T {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        (**self).set_text(text)
    }

    fn get_text(&mut self) -> Result<String, ClipboardError> {
        (**self).get_text()
    }
}

impl<T: Clipboard + ?Sized> Clipboard for Box<T> {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        (**self).set_text(text)
    }

    fn get_text(&mut self) -> Result<String, ClipboardError> {
        (**self).get_text()
    }
}

/// The desktop clipboard.
///
/// The `arboard` handle is created on first use and kept afterwards; on
/// Linux the copied contents are only served while that handle lives.
/// A persistent clipboard blocks each write for a short hand-off window
/// instead, so the text survives a process that exits right after copying.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
    hold: Option<Duration>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clipboard for short-lived processes; see [`HANDOFF_WINDOW`].
    pub fn persistent(hold: Duration) -> Self {
        Self {
            inner: None,
            hold: Some(hold),
        }
    }

    /// Hand-off window applied to each write, if any.
    pub fn hold(&self) -> Option<Duration> {
        self.hold
    }

    /// Try to create a clipboard instance to detect availability.
    pub fn available() -> bool {
        arboard::Clipboard::new().is_ok()
    }

    fn handle(&mut self) -> Result<&mut arboard::Clipboard, ClipboardError> {
        let cb = match self.inner.take() {
            Some(cb) => cb,
            None => arboard::Clipboard::new()?,
        };
        Ok(self.inner.insert(cb))
    }
}

impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemClipboard")
            .field("initialized", &self.inner.is_some())
            .field("hold", &self.hold)
            .finish()
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let hold = self.hold;
        let clipboard = self.handle()?;

        #[cfg(target_os = "linux")]
        {
            use arboard::SetExtLinux;
            use std::time::Instant;

            if let Some(hold) = hold {
                return clipboard
                    .set()
                    .wait_until(Instant::now() + hold)
                    .text(text.to_owned())
                    .map_err(ClipboardError::from);
            }
        }

        #[cfg(not(target_os = "linux"))]
        let _ = hold;

        clipboard
            .set_text(text.to_owned())
            .map_err(ClipboardError::from)
    }

    fn get_text(&mut self) -> Result<String, ClipboardError> {
        self.handle()?.get_text().map_err(ClipboardError::from)
    }
}

/// In-process clipboard. Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Arc<Mutex<Option<String>>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current contents without going through the `Clipboard` trait.
    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|c| c.clone())
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut contents = self.contents.lock().map_err(|_| ClipboardError::Poisoned)?;
        *contents = Some(text.to_owned());
        Ok(())
    }

    fn get_text(&mut self) -> Result<String, ClipboardError> {
        self.contents().ok_or(ClipboardError::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_clipboard_shares_contents_between_clones() {
        let mut a = MemoryClipboard::new();
        let b = a.clone();
        assert!(matches!(a.get_text(), Err(ClipboardError::Empty)));
        a.set_text("hello").unwrap();
        assert_eq!(b.contents().as_deref(), Some("hello"));
    }

    #[test]
    fn poisoned_memory_clipboard_rejects_writes() {
        let mut clipboard = MemoryClipboard::new();
        let shared = clipboard.contents.clone();
        let _ = std::thread::spawn(move || {
            let _guard = shared.lock().unwrap();
            panic!("writer died holding the lock");
        })
        .join();

        assert!(matches!(
            clipboard.set_text("lost"),
            Err(ClipboardError::Poisoned)
        ));
        assert!(clipboard.contents().is_none());
    }

    #[test]
    fn persistent_system_clipboard_keeps_hold_window() {
        // Construction never touches the platform clipboard.
        let one_shot = SystemClipboard::persistent(HANDOFF_WINDOW);
        assert_eq!(one_shot.hold(), Some(HANDOFF_WINDOW));
        assert!(format!("{one_shot:?}").contains("initialized: false"));
        assert_eq!(SystemClipboard::new().hold(), None);
    }

    #[test]
    fn boxed_clipboard_delegates() {
        let shared = MemoryClipboard::new();
        let mut boxed: Box<dyn Clipboard> = Box::new(shared.clone());
        boxed.set_text("boxed").unwrap();
        assert_eq!(boxed.get_text().unwrap(), "boxed");
        assert_eq!(shared.contents().as_deref(), Some("boxed"));
    }
}
