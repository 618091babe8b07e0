//! One-shot commands run without the interactive UI.

use std::io::{self, Write};

use crate::clipboard::Clipboard;
use crate::copier::{ClipboardCopier, CopyError, CopyOutcome, Page};
use crate::document::Document;
use crate::notify::{Notifier, NotifyMode};
use crate::ui::preview_line;

const PREVIEW_WIDTH: usize = 60;

/// Write one `id<TAB>kind<TAB>preview` line per element, in document order.
pub fn list_elements<W: Write>(document: &Document, out: &mut W) -> io::Result<()> {
    for (_, element) in document.elements() {
        writeln!(
            out,
            "{}\t{}\t{}",
            element.id(),
            element.kind().label(),
            preview_line(&element.text_content(), PREVIEW_WIDTH)
        )?;
    }
    out.flush()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyStatus {
    Copied,
    Rejected(String),
    NotFound(String),
}

impl CopyStatus {
    /// Process exit code. A rejected copy only fails the process when the
    /// notice mode reports real outcomes.
    pub fn exit_code(&self, mode: NotifyMode) -> u8 {
        match (self, mode) {
            (CopyStatus::Copied, _) => 0,
            (CopyStatus::Rejected(_), NotifyMode::Always) => 0,
            (CopyStatus::Rejected(_), NotifyMode::Outcome) => 1,
            (CopyStatus::NotFound(_), _) => 2,
        }
    }
}

/// Copy a single element and report how it went.
pub fn copy_once<C, N>(
    document: Document,
    element_id: &str,
    clipboard: C,
    notifier: N,
    mode: NotifyMode,
) -> CopyStatus
where
    C: Clipboard,
    N: Notifier,
{
    let mut page = Page::new(document);
    let mut copier = ClipboardCopier::new(clipboard, notifier).with_mode(mode);
    match copier.copy_element_to_clipboard(&mut page, element_id) {
        Ok(CopyOutcome::Copied { .. }) => CopyStatus::Copied,
        Ok(CopyOutcome::Rejected { reason }) => CopyStatus::Rejected(reason),
        Err(CopyError::ElementNotFound(id)) => CopyStatus::NotFound(id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::notify::StderrNotifier;

    #[test]
    fn list_prints_tab_separated_rows() {
        let doc = Document::from_markdown("# Setup\n\nRun   the\ninstaller.\n");
        let mut out = Vec::new();
        list_elements(&doc, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "setup\tsection\tSetup Run the installer.");
        assert_eq!(lines[1], "setup-title\theading\tSetup");
        assert_eq!(lines[2], "p-1\tparagraph\tRun the installer.");
    }

    #[test]
    fn copy_once_reports_status_and_notice() {
        let clipboard = MemoryClipboard::new();
        let mut out = Vec::new();
        let status = copy_once(
            Document::from_markdown("```#cmd\nmake\n```\n"),
            "cmd",
            clipboard.clone(),
            StderrNotifier::with_writer(&mut out),
            NotifyMode::Always,
        );
        assert_eq!(status, CopyStatus::Copied);
        assert_eq!(status.exit_code(NotifyMode::Always), 0);
        assert_eq!(clipboard.contents().as_deref(), Some("make"));
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "The text is successfully copied !\n"
        );
    }

    #[test]
    fn exit_codes() {
        assert_eq!(CopyStatus::NotFound("x".into()).exit_code(NotifyMode::Always), 2);
        let rejected = CopyStatus::Rejected("denied".into());
        assert_eq!(rejected.exit_code(NotifyMode::Always), 0);
        assert_eq!(rejected.exit_code(NotifyMode::Outcome), 1);
    }
}
