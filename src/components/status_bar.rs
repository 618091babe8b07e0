use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::ui::{UiFrame, safe_set_string, truncate_to_width};

/// One-line bar with left-aligned message and right-aligned key hints.
pub struct StatusBar {
    left: String,
    right: String,
    style: Style,
    left_style: Option<Style>,
}

impl StatusBar {
    pub fn new() -> Self {
        Self {
            left: String::new(),
            right: String::new(),
            style: Style::default(),
            left_style: None,
        }
    }

    pub fn set_left<T: Into<String>>(&mut self, value: T) {
        self.left = value.into();
        self.left_style = None;
    }

    /// Set the left message with its own style (e.g. an error color).
    pub fn set_left_styled<T: Into<String>>(&mut self, value: T, style: Style) {
        self.left = value.into();
        self.left_style = Some(style);
    }

    pub fn left(&self) -> &str {
        &self.left
    }

    pub fn set_right<T: Into<String>>(&mut self, value: T) {
        self.right = value.into();
    }

    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl super::Component for StatusBar {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _focused: bool) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let y = area.y;
        let x = area.x;
        let width = area.width as usize;
        let buffer = frame.buffer_mut();
        let bounds = area.intersection(buffer.area);
        if bounds.width == 0 || bounds.height == 0 {
            return;
        }

        let blank = " ".repeat(width);
        safe_set_string(buffer, bounds, x, y, &blank, self.style);

        let left = truncate_to_width(&self.left, width);
        let left_style = self.left_style.map_or(self.style, |s| self.style.patch(s));
        safe_set_string(buffer, bounds, x, y, &left, left_style);

        if !self.right.is_empty() {
            let right = truncate_to_width(&self.right, width);
            let right_width = right.chars().count();
            let left_width = left.chars().count();
            if right_width + left_width < width {
                let start_x = x.saturating_add((width - right_width) as u16);
                safe_set_string(buffer, bounds, start_x, y, &right, self.style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Component;
    use ratatui::buffer::Buffer;

    fn rendered(bar: &mut StatusBar, width: u16) -> String {
        let area = Rect::new(0, 0, width, 1);
        let mut buf = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buf);
        bar.render(&mut frame, area, false);
        (0..width).map(|x| buf[(x, 0)].symbol().to_string()).collect()
    }

    #[test]
    fn left_and_right_are_placed_at_edges() {
        let mut s = StatusBar::new();
        s.set_left("ok");
        s.set_right("q quit");
        assert_eq!(rendered(&mut s, 12), "ok    q quit");
    }

    #[test]
    fn right_is_dropped_when_it_would_overlap() {
        let mut s = StatusBar::default();
        s.set_left("element not found: nope");
        s.set_right("q quit");
        assert_eq!(rendered(&mut s, 10), "element no");
    }
}
