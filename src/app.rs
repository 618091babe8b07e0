//! Interactive host: element list, preview pane, id prompt and the modal
//! notice raised after every copy.

use std::io;
use std::time::Duration;

use crossterm::event::Event;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;

use crate::clipboard::Clipboard;
use crate::components::{
    Component, ElementListComponent, ElementPreviewComponent, ElementRow, IdPromptComponent,
    NoticeOverlayComponent, StatusBar,
};
use crate::copier::{ClipboardCopier, CopyOutcome, Page};
use crate::document::Document;
use crate::drivers::{InputDriver, OutputDriver};
use crate::event_loop::{ControlFlow, EventLoop};
use crate::keybindings::{Action, KeyBindings};
use crate::notify::{NotifyMode, RecordingNotifier};
use crate::ui::UiFrame;

pub struct App<C> {
    page: Page,
    copier: ClipboardCopier<C, RecordingNotifier>,
    notices: RecordingNotifier,
    keys: KeyBindings,
    list: ElementListComponent,
    preview: ElementPreviewComponent,
    prompt: IdPromptComponent,
    notice: NoticeOverlayComponent,
    status: StatusBar,
}

impl<C: Clipboard> App<C> {
    pub fn new(document: Document, clipboard: C, mode: NotifyMode) -> Self {
        let notices = RecordingNotifier::new();
        let copier = ClipboardCopier::new(clipboard, notices.clone()).with_mode(mode);
        let keys = KeyBindings::default();
        let mut list = ElementListComponent::new("Elements");
        list.set_rows(ElementRow::from_document(&document));
        let mut status = StatusBar::new();
        status.set_style(
            Style::default()
                .fg(crate::theme::panel_fg())
                .bg(crate::theme::panel_bg()),
        );
        status.set_right(format!(
            "{}  {}  {}",
            keys.hint(Action::Copy, "copy"),
            keys.hint(Action::OpenPrompt, "by id"),
            keys.hint(Action::Quit, "quit"),
        ));
        if document.is_empty() {
            status.set_left("document has no elements");
        }
        let mut app = Self {
            page: Page::new(document),
            copier,
            notices,
            keys,
            list,
            preview: ElementPreviewComponent::new(),
            prompt: IdPromptComponent::new(),
            notice: NoticeOverlayComponent::new(),
            status,
        };
        app.sync_preview();
        app
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn notice(&self) -> &NoticeOverlayComponent {
        &self.notice
    }

    pub fn list(&self) -> &ElementListComponent {
        &self.list
    }

    pub fn status(&self) -> &StatusBar {
        &self.status
    }

    /// Route one input event. The notice dialog sees events first and keeps
    /// them while it is open; then the id prompt; then app-level keys; then
    /// the list.
    pub fn handle_event(&mut self, event: &Event) -> ControlFlow {
        if self.notice.handle_event(event) {
            return ControlFlow::Continue;
        }
        if self.prompt.handle_event(event) {
            if let Some(id) = self.prompt.take_submitted() {
                self.copy(&id);
            }
            return ControlFlow::Continue;
        }
        if let Event::Key(key) = event {
            if self.keys.matches(Action::Quit, key) {
                return ControlFlow::Quit;
            }
            if self.keys.matches(Action::Copy, key) {
                if let Some(id) = self.list.selected_id().map(str::to_string) {
                    self.copy(&id);
                }
                return ControlFlow::Continue;
            }
            if self.keys.matches(Action::OpenPrompt, key) {
                self.prompt.open();
                return ControlFlow::Continue;
            }
        }
        if self.list.handle_event(event) {
            self.sync_preview();
        }
        ControlFlow::Continue
    }

    fn copy(&mut self, id: &str) {
        match self.copier.copy_element_to_clipboard(&mut self.page, id) {
            Ok(CopyOutcome::Copied { chars }) => {
                self.status.set_left(format!("copied {chars} chars from #{id}"));
            }
            Ok(CopyOutcome::Rejected { reason }) => {
                self.status.set_left_styled(
                    format!("clipboard rejected #{id}: {reason}"),
                    Style::default().fg(crate::theme::failure_fg()),
                );
            }
            Err(err) => {
                self.status.set_left_styled(
                    err.to_string(),
                    Style::default().fg(crate::theme::failure_fg()),
                );
            }
        }
        if let Some(notice) = self.notices.take().pop() {
            self.notice.open(notice);
        }
    }

    fn sync_preview(&mut self) {
        let id = self.list.selected_id();
        let text = id
            .and_then(|id| self.page.document().get_element_by_id(id))
            .map(|element| element.text_content())
            .unwrap_or_default();
        self.preview.set_element(id, text);
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>) {
        let area = frame.area();
        if area.width == 0 || area.height == 0 {
            return;
        }
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(area);
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(rows[0]);

        let modal = self.notice.visible();
        self.list.render(frame, panes[0], !modal && !self.prompt.active());
        self.preview.render(frame, panes[1], false);
        if self.prompt.active() {
            self.prompt.render(frame, rows[1], true);
        } else {
            self.status.render(frame, rows[1], false);
        }
        self.notice.render(frame, area, true);
    }
}

/// Run the interactive UI until the user quits.
pub fn run<C, I, O>(app: &mut App<C>, input: I, output: &mut O, poll: Duration) -> io::Result<()>
where
    C: Clipboard,
    I: InputDriver,
    O: OutputDriver,
{
    output.enter()?;
    let mut event_loop = EventLoop::new(input, poll);
    let result = event_loop.run(|_, event| match event {
        None => {
            output.draw(|mut frame| app.render(&mut frame))?;
            Ok(ControlFlow::Continue)
        }
        Some(event) => Ok(app.handle_event(&event)),
    });
    output.exit()?;
    result
}
