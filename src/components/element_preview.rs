use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::ui::UiFrame;

/// Full text content of the highlighted element, exactly as it would be copied.
#[derive(Debug, Default)]
pub struct ElementPreviewComponent {
    element_id: Option<String>,
    text: String,
}

impl ElementPreviewComponent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_element(&mut self, id: Option<&str>, text: String) {
        self.element_id = id.map(str::to_string);
        self.text = text;
    }
}

impl super::Component for ElementPreviewComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _focused: bool) {
        let title = match &self.element_id {
            Some(id) => format!("#{id}"),
            None => "(no element)".to_string(),
        };
        let block = Block::default().borders(Borders::ALL).title(title);
        let paragraph = Paragraph::new(self.text.as_str())
            .style(Style::default().fg(crate::theme::panel_fg()))
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}
