use crossterm::event::Event;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Paragraph, Wrap};

use crate::components::{Component, DialogOverlayComponent};
use crate::keybindings::{Action, KeyBindings};
use crate::notify::{Notice, NoticeKind};
use crate::ui::{UiFrame, safe_set_string};

const OK_BUTTON: &str = "[ OK ]";

/// Modal acknowledgement of a copy.
///
/// While visible it consumes every input event, so nothing behind it reacts
/// until the user dismisses it.
#[derive(Debug)]
pub struct NoticeOverlayComponent {
    dialog: DialogOverlayComponent,
    notice: Option<Notice>,
    keys: KeyBindings,
}

impl Component for NoticeOverlayComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _focused: bool) {
        let Some(notice) = &self.notice else {
            return;
        };
        if area.width == 0 || area.height == 0 {
            return;
        }
        self.dialog.render(frame, area, true);
        let rect = self.dialog.rect_for(area);
        if rect.width < 3 || rect.height < 4 {
            return;
        }
        let content = Rect {
            x: rect.x.saturating_add(2),
            y: rect.y.saturating_add(1),
            width: rect.width.saturating_sub(4),
            height: rect.height.saturating_sub(2),
        };
        if content.width == 0 || content.height < 2 {
            return;
        }
        let accent = match notice.kind {
            NoticeKind::Success => crate::theme::success_fg(),
            NoticeKind::Failure => crate::theme::failure_fg(),
        };
        let body = format!("{}\n\n#{}", notice.message, notice.element_id);
        let body_rect = Rect {
            height: content.height.saturating_sub(1),
            ..content
        };
        let paragraph = Paragraph::new(body)
            .alignment(Alignment::Center)
            .style(Style::default().fg(accent))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, body_rect);

        let button_y = content.y.saturating_add(content.height.saturating_sub(1));
        let button_x = content
            .x
            .saturating_add(content.width.saturating_sub(OK_BUTTON.len() as u16) / 2);
        let button_style = Style::default()
            .fg(crate::theme::dialog_button_fg())
            .bg(crate::theme::dialog_button_bg())
            .add_modifier(Modifier::BOLD);
        let buffer = frame.buffer_mut();
        let bounds = area.intersection(buffer.area);
        safe_set_string(buffer, bounds, button_x, button_y, OK_BUTTON, button_style);
    }

    fn handle_event(&mut self, event: &Event) -> bool {
        if self.notice.is_none() {
            return false;
        }
        if let Event::Key(key) = event
            && self.keys.matches(Action::Dismiss, key)
        {
            self.close();
        }
        true
    }
}

impl NoticeOverlayComponent {
    pub fn new() -> Self {
        let mut dialog = DialogOverlayComponent::new();
        dialog.set_size(50, 8);
        dialog.set_dim_backdrop(true);
        dialog.set_bg(crate::theme::dialog_bg());
        Self {
            dialog,
            notice: None,
            keys: KeyBindings::default(),
        }
    }

    pub fn open(&mut self, notice: Notice) {
        let (title, border) = match notice.kind {
            NoticeKind::Success => ("Copied", crate::theme::success_fg()),
            NoticeKind::Failure => ("Copy failed", crate::theme::failure_fg()),
        };
        self.dialog.set_title(title);
        self.dialog.set_border(border);
        self.dialog.set_visible(true);
        self.notice = Some(notice);
    }

    pub fn close(&mut self) {
        self.dialog.set_visible(false);
        self.notice = None;
    }

    pub fn visible(&self) -> bool {
        self.notice.is_some()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }
}

impl Default for NoticeOverlayComponent {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::buffer::Buffer;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn hidden_overlay_passes_events_through() {
        let mut o = NoticeOverlayComponent::new();
        assert!(!o.handle_event(&key(KeyCode::Down)));
    }

    #[test]
    fn visible_overlay_swallows_until_dismissed() {
        let mut o = NoticeOverlayComponent::new();
        o.open(Notice::success("install"));
        assert!(o.handle_event(&key(KeyCode::Down)));
        assert!(o.handle_event(&key(KeyCode::Char('q'))));
        assert!(o.visible());
        assert!(o.handle_event(&key(KeyCode::Enter)));
        assert!(!o.visible());
    }

    #[test]
    fn renders_message_and_button() {
        let mut o = NoticeOverlayComponent::new();
        o.open(Notice::failure("install", "denied"));
        let area = Rect::new(0, 0, 60, 12);
        let mut buf = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buf);
        o.render(&mut frame, area, true);
        let text: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|pos| buf[pos].symbol().to_string())
            .collect();
        assert!(text.contains("Copy failed: denied"));
        assert!(text.contains(OK_BUTTON));
    }
}
