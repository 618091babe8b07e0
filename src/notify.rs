//! Completion notices and the sinks that show them.

use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;
use std::sync::{Arc, Mutex};

/// Message shown after a copy when the real outcome is not reported.
pub const SUCCESS_MESSAGE: &str = "The text is successfully copied !";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Failure,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub element_id: String,
    pub message: String,
}

impl Notice {
    pub fn success(element_id: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            element_id: element_id.into(),
            message: SUCCESS_MESSAGE.to_string(),
        }
    }

    pub fn failure(element_id: impl Into<String>, reason: &str) -> Self {
        Self {
            kind: NoticeKind::Failure,
            element_id: element_id.into(),
            message: format!("Copy failed: {reason}"),
        }
    }

    pub fn is_success(&self) -> bool {
        self.kind == NoticeKind::Success
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// How the notice after a copy relates to the clipboard result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NotifyMode {
    /// Always announce success, whatever the clipboard did.
    #[default]
    Always,
    /// Announce success or failure according to the clipboard result.
    Outcome,
}

impl FromStr for NotifyMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "always" => Ok(NotifyMode::Always),
            "outcome" => Ok(NotifyMode::Outcome),
            other => Err(format!("unknown notify mode '{other}' (expected always|outcome)")),
        }
    }
}

pub trait Notifier {
    fn notify(&mut self, notice: &Notice);
}

impl<T: Notifier + ?Sized> Notifier for &mut T {
    fn notify(&mut self, notice: &Notice) {
        (**self).notify(notice)
    }
}

impl<T: Notifier + ?Sized> Notifier for Box<T> {
    fn notify(&mut self, notice: &Notice) {
        (**self).notify(notice)
    }
}

/// Writes each notice as one line.
#[derive(Debug)]
pub struct StderrNotifier<W: Write = io::Stderr> {
    out: W,
}

impl StderrNotifier {
    pub fn new() -> Self {
        Self { out: io::stderr() }
    }
}

impl Default for StderrNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> StderrNotifier<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Notifier for StderrNotifier<W> {
    fn notify(&mut self, notice: &Notice) {
        let _ = writeln!(self.out, "{notice}");
        let _ = self.out.flush();
    }
}

/// Collects notices for later display. Clones share the same queue.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every notice recorded so far.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|n| n.clone())
            .unwrap_or_default()
    }

    /// Remove and return recorded notices, oldest first.
    pub fn take(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|mut n| std::mem::take(&mut *n))
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, notice: &Notice) {
        if let Ok(mut notices) = self.notices.lock() {
            notices.push(notice.clone());
        }
    }
}
