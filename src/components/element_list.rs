use crossterm::event::Event;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use crate::document::Document;
use crate::keybindings::{Action, KeyBindings};
use crate::ui::{UiFrame, preview_line};

const PAGE_STEP: isize = 5;

/// Display data for one element of the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementRow {
    pub id: String,
    pub depth: usize,
    pub kind: &'static str,
    pub preview: String,
}

impl ElementRow {
    pub fn from_document(document: &Document) -> Vec<ElementRow> {
        document
            .elements()
            .into_iter()
            .map(|(depth, element)| ElementRow {
                id: element.id().to_string(),
                depth,
                kind: element.kind().label(),
                preview: element.text_content(),
            })
            .collect()
    }
}

pub struct ElementListComponent {
    rows: Vec<ElementRow>,
    selected: usize,
    offset: usize,
    title: String,
    keys: KeyBindings,
}

impl ElementListComponent {
    pub fn new<T: Into<String>>(title: T) -> Self {
        Self {
            rows: Vec::new(),
            selected: 0,
            offset: 0,
            title: title.into(),
            keys: KeyBindings::default(),
        }
    }

    pub fn set_rows(&mut self, rows: Vec<ElementRow>) {
        self.rows = rows;
        if self.selected >= self.rows.len() {
            self.selected = self.rows.len().saturating_sub(1);
        }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.rows.get(self.selected).map(|row| row.id.as_str())
    }

    pub fn move_selection(&mut self, delta: isize) {
        if self.rows.is_empty() {
            self.selected = 0;
            return;
        }
        if delta.is_negative() {
            self.selected = self.selected.saturating_sub(delta.unsigned_abs());
        } else {
            self.selected = (self.selected + delta as usize).min(self.rows.len() - 1);
        }
    }

    fn keep_selected_in_view(&mut self, view: usize) {
        if view == 0 || self.rows.is_empty() {
            self.offset = 0;
            return;
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + view {
            self.offset = self.selected + 1 - view;
        }
    }

    fn row_line(row: &ElementRow, width: usize) -> Line<'static> {
        let indent = "  ".repeat(row.depth);
        let head = format!("{indent}{} ", row.id);
        let kind = format!("{} ", row.kind);
        let used = head.chars().count() + kind.chars().count();
        let preview = preview_line(&row.preview, width.saturating_sub(used));
        Line::from(vec![
            Span::styled(head, Style::default().fg(crate::theme::list_id_fg())),
            Span::styled(kind, Style::default().fg(crate::theme::list_kind_fg())),
            Span::raw(preview),
        ])
    }
}

impl super::Component for ElementListComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, focused: bool) {
        let block = if focused {
            Block::default()
                .borders(Borders::ALL)
                .title(self.title.as_str())
                .border_style(Style::default().fg(crate::theme::accent()))
        } else {
            Block::default()
                .borders(Borders::ALL)
                .title(self.title.as_str())
        };
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let view = inner.height as usize;
        self.keep_selected_in_view(view);

        let width = inner.width as usize;
        let items = self
            .rows
            .iter()
            .skip(self.offset)
            .take(view)
            .map(|row| ListItem::new(Self::row_line(row, width)))
            .collect::<Vec<_>>();

        let mut state = ListState::default();
        if !self.rows.is_empty() && self.selected >= self.offset {
            state.select(Some(self.selected - self.offset));
        }

        let list =
            List::new(items).highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_stateful_widget(list, inner, &mut state);
    }

    fn handle_event(&mut self, event: &Event) -> bool {
        let Event::Key(key) = event else {
            return false;
        };
        let step = if self.keys.matches(Action::MoveUp, key) {
            -1
        } else if self.keys.matches(Action::MoveDown, key) {
            1
        } else if self.keys.matches(Action::PageUp, key) {
            -PAGE_STEP
        } else if self.keys.matches(Action::PageDown, key) {
            PAGE_STEP
        } else if self.keys.matches(Action::Home, key) {
            self.selected = 0;
            return true;
        } else if self.keys.matches(Action::End, key) {
            self.selected = self.rows.len().saturating_sub(1);
            return true;
        } else {
            return false;
        };
        self.move_selection(step);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Component;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key_event(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn list_with(n: usize) -> ElementListComponent {
        let mut list = ElementListComponent::new("t");
        list.set_rows(
            (0..n)
                .map(|i| ElementRow {
                    id: format!("p-{}", i + 1),
                    depth: 0,
                    kind: "paragraph",
                    preview: String::new(),
                })
                .collect(),
        );
        list
    }

    #[test]
    fn selection_moves_with_keys() {
        let mut list = list_with(3);
        assert!(list.handle_event(&key_event(KeyCode::Down)));
        assert_eq!(list.selected_id(), Some("p-2"));
        assert!(list.handle_event(&key_event(KeyCode::Char('k'))));
        assert_eq!(list.selected(), 0);
        assert!(!list.handle_event(&key_event(KeyCode::Char('x'))));
    }

    #[test]
    fn home_end_and_page_keys() {
        let mut list = list_with(20);
        list.handle_event(&key_event(KeyCode::End));
        assert_eq!(list.selected(), 19);
        list.handle_event(&key_event(KeyCode::Home));
        assert_eq!(list.selected(), 0);
        list.handle_event(&key_event(KeyCode::PageDown));
        assert_eq!(list.selected(), 5);
        list.handle_event(&key_event(KeyCode::PageUp));
        assert_eq!(list.selected(), 0);
    }

    #[test]
    fn shrinking_rows_clamps_selection() {
        let mut list = list_with(4);
        list.move_selection(3);
        list.set_rows(Vec::new());
        assert_eq!(list.selected(), 0);
        assert_eq!(list.selected_id(), None);
    }

    #[test]
    fn rows_follow_document_order() {
        let doc = Document::from_markdown("# Intro\n\nhello\n");
        let rows = ElementRow::from_document(&doc);
        let ids: Vec<&str> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["intro", "intro-title", "p-1"]);
        assert_eq!(rows[0].kind, "section");
        assert_eq!(rows[2].depth, 1);
    }
}
