//! Copy an element's text to the clipboard through the page selection.

use thiserror::Error;

use crate::clipboard::Clipboard;
use crate::document::Document;
use crate::notify::{Notice, Notifier, NotifyMode};
use crate::selection::{Selection, SelectionGuard, SelectionRange};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CopyError {
    #[error("element not found: {0}")]
    ElementNotFound(String),
}

/// What the clipboard actually did with the selected text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied { chars: usize },
    Rejected { reason: String },
}

impl CopyOutcome {
    pub fn is_copied(&self) -> bool {
        matches!(self, CopyOutcome::Copied { .. })
    }
}

/// The document and its current selection.
#[derive(Debug, Clone, Default)]
pub struct Page {
    document: Document,
    selection: Selection,
}

impl Page {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            selection: Selection::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    /// Borrow the document and the selection at the same time.
    pub fn split_mut(&mut self) -> (&Document, &mut Selection) {
        (&self.document, &mut self.selection)
    }
}

#[derive(Debug)]
pub struct ClipboardCopier<C, N> {
    clipboard: C,
    notifier: N,
    mode: NotifyMode,
}

impl<C: Clipboard, N: Notifier> ClipboardCopier<C, N> {
    pub fn new(clipboard: C, notifier: N) -> Self {
        Self {
            clipboard,
            notifier,
            mode: NotifyMode::default(),
        }
    }

    pub fn with_mode(mut self, mode: NotifyMode) -> Self {
        self.mode = mode;
        self
    }

    /// Copy the text content of `element_id` to the clipboard.
    ///
    /// The page selection is replaced by a range over the element for the
    /// duration of the copy and is empty again when this returns. Exactly
    /// one notice is emitted once the element resolves; in
    /// `NotifyMode::Always` it announces success even when the clipboard
    /// rejected the write. The returned outcome always reflects what the
    /// clipboard did.
    ///
    /// Fails with `CopyError::ElementNotFound` before touching the selection,
    /// the clipboard, or the notifier.
    pub fn copy_element_to_clipboard(
        &mut self,
        page: &mut Page,
        element_id: &str,
    ) -> Result<CopyOutcome, CopyError> {
        let (document, selection) = page.split_mut();
        let element = document
            .get_element_by_id(element_id)
            .ok_or_else(|| CopyError::ElementNotFound(element_id.to_string()))?;
        tracing::debug!(element = element_id, kind = element.kind().label(), "resolved element");

        let range = SelectionRange::select_node(element);
        let result = {
            let guard = SelectionGuard::acquire(selection, range);
            let text = guard.to_text(document);
            tracing::debug!(element = element_id, chars = text.chars().count(), "selection set");
            self.clipboard
                .set_text(&text)
                .map(|()| text.chars().count())
        };
        tracing::debug!(element = element_id, "selection cleared");

        let outcome = match result {
            Ok(chars) => {
                tracing::info!(element = element_id, chars, "copied element to clipboard");
                CopyOutcome::Copied { chars }
            }
            Err(err) => {
                tracing::warn!(element = element_id, error = %err, "clipboard rejected copy");
                CopyOutcome::Rejected {
                    reason: err.to_string(),
                }
            }
        };

        let notice = match (&outcome, self.mode) {
            (CopyOutcome::Rejected { reason }, NotifyMode::Outcome) => {
                Notice::failure(element_id, reason)
            }
            _ => Notice::success(element_id),
        };
        self.notifier.notify(&notice);
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::{ClipboardError, MemoryClipboard};
    use crate::document::{Element, ElementKind};
    use crate::notify::{NoticeKind, RecordingNotifier, SUCCESS_MESSAGE};

    /// Clipboard that refuses every write, like a host without copy support.
    struct DeniedClipboard;

    impl Clipboard for DeniedClipboard {
        fn set_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
            Err(ClipboardError::Empty)
        }

        fn get_text(&mut self) -> Result<String, ClipboardError> {
            Err(ClipboardError::Empty)
        }
    }

    fn page() -> Page {
        Page::new(Document::new(vec![
            Element::new("token", ElementKind::CodeBlock { lang: None }, "abc-123"),
            Element::new("note", ElementKind::Paragraph, "hello world"),
        ]))
    }

    #[test]
    fn copies_text_and_clears_selection() {
        let clipboard = MemoryClipboard::new();
        let notices = RecordingNotifier::new();
        let mut copier = ClipboardCopier::new(clipboard.clone(), notices.clone());
        let mut page = page();

        let outcome = copier.copy_element_to_clipboard(&mut page, "token").unwrap();

        assert_eq!(outcome, CopyOutcome::Copied { chars: 7 });
        assert_eq!(clipboard.contents().as_deref(), Some("abc-123"));
        assert!(page.selection().is_empty());
        let recorded = notices.notices();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].message, SUCCESS_MESSAGE);
    }

    #[test]
    fn preexisting_selection_does_not_leak_into_copy() {
        let clipboard = MemoryClipboard::new();
        let mut copier = ClipboardCopier::new(clipboard.clone(), RecordingNotifier::new());
        let mut page = page();
        page.selection_mut()
            .add_range(SelectionRange::new("note", 0, 5));

        copier.copy_element_to_clipboard(&mut page, "token").unwrap();

        assert_eq!(clipboard.contents().as_deref(), Some("abc-123"));
        assert!(page.selection().is_empty());
    }

    #[test]
    fn missing_element_has_no_side_effects() {
        let clipboard = MemoryClipboard::new();
        let notices = RecordingNotifier::new();
        let mut copier = ClipboardCopier::new(clipboard.clone(), notices.clone());
        let mut page = page();
        page.selection_mut()
            .add_range(SelectionRange::new("note", 0, 5));

        let err = copier
            .copy_element_to_clipboard(&mut page, "nope")
            .unwrap_err();

        assert_eq!(err, CopyError::ElementNotFound("nope".into()));
        assert_eq!(err.to_string(), "element not found: nope");
        assert!(clipboard.contents().is_none());
        assert!(notices.notices().is_empty());
        assert_eq!(page.selection().range_count(), 1);
    }

    #[test]
    fn always_mode_announces_success_when_clipboard_denies() {
        let notices = RecordingNotifier::new();
        let mut copier = ClipboardCopier::new(DeniedClipboard, notices.clone());
        let mut page = page();

        let outcome = copier.copy_element_to_clipboard(&mut page, "note").unwrap();

        assert!(!outcome.is_copied());
        let recorded = notices.notices();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].kind, NoticeKind::Success);
        assert!(page.selection().is_empty());
    }

    #[test]
    fn outcome_mode_reports_denied_copy() {
        let notices = RecordingNotifier::new();
        let mut copier =
            ClipboardCopier::new(DeniedClipboard, notices.clone()).with_mode(NotifyMode::Outcome);
        let mut page = page();

        let outcome = copier.copy_element_to_clipboard(&mut page, "note").unwrap();

        assert_eq!(
            outcome,
            CopyOutcome::Rejected {
                reason: "clipboard is empty".into()
            }
        );
        let recorded = notices.notices();
        assert_eq!(recorded.len(), 1);
        assert_eq!(recorded[0].kind, NoticeKind::Failure);
        assert_eq!(recorded[0].element_id, "note");
    }

    #[test]
    fn sequential_copies_keep_latest() {
        let clipboard = MemoryClipboard::new();
        let mut copier = ClipboardCopier::new(clipboard.clone(), RecordingNotifier::new());
        let mut page = page();

        copier.copy_element_to_clipboard(&mut page, "token").unwrap();
        copier.copy_element_to_clipboard(&mut page, "note").unwrap();
        assert_eq!(clipboard.contents().as_deref(), Some("hello world"));

        copier.copy_element_to_clipboard(&mut page, "note").unwrap();
        assert_eq!(clipboard.contents().as_deref(), Some("hello world"));
    }
}
