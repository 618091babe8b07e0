use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::ui::UiFrame;

/// Centered bordered box drawn over the rest of the UI.
#[derive(Debug, Clone)]
pub struct DialogOverlayComponent {
    title: String,
    visible: bool,
    width: u16,
    height: u16,
    bg: Color,
    border: Color,
    dim_backdrop: bool,
}

impl DialogOverlayComponent {
    pub fn new() -> Self {
        Self {
            title: "Dialog".to_string(),
            visible: false,
            width: 70,
            height: 9,
            bg: Color::Black,
            border: Color::White,
            dim_backdrop: false,
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_size(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    pub fn set_bg(&mut self, bg: Color) {
        self.bg = bg;
    }

    pub fn set_border(&mut self, border: Color) {
        self.border = border;
    }

    pub fn set_dim_backdrop(&mut self, dim: bool) {
        self.dim_backdrop = dim;
    }

    /// Clamp dialog size to the available area to avoid drawing outside the buffer
    /// when the terminal is smaller than the preferred minimums.
    pub fn rect_for(&self, area: Rect) -> Rect {
        let mut width = area.width.min(self.width).max(1);
        let mut height = area.height.min(self.height).max(1);
        if area.width >= 24 {
            width = width.max(24);
        }
        if area.height >= 5 {
            height = height.max(5);
        }
        let x = area.x.saturating_add(area.width.saturating_sub(width) / 2);
        let y = area
            .y
            .saturating_add(area.height.saturating_sub(height) / 2);
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn render_backdrop(&self, frame: &mut UiFrame<'_>, area: Rect) {
        if !self.dim_backdrop {
            return;
        }
        let buffer = frame.buffer_mut();
        let bounds = area.intersection(buffer.area);
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        for y in bounds.y..bounds.y.saturating_add(bounds.height) {
            for x in bounds.x..bounds.x.saturating_add(bounds.width) {
                if let Some(cell) = buffer.cell_mut((x, y)) {
                    cell.set_style(dim_style);
                }
            }
        }
    }
}

impl Default for DialogOverlayComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl super::Component for DialogOverlayComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _focused: bool) {
        if !self.visible || area.width == 0 || area.height == 0 {
            return;
        }
        self.render_backdrop(frame, area);
        let rect = self.rect_for(area);
        frame.render_widget(Clear, rect);
        let block = Block::default()
            .title(self.title.as_str())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.border));
        let background = Paragraph::new("")
            .style(Style::default().bg(self.bg))
            .block(block);
        frame.render_widget(background, rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_for_clamps_sizes() {
        let dlg = DialogOverlayComponent::new();
        // tiny area smaller than min width/height
        let area = Rect {
            x: 0,
            y: 0,
            width: 10,
            height: 2,
        };
        let r = dlg.rect_for(area);
        assert!(r.width >= 1);
        assert!(r.height >= 1);
        assert!(r.width <= 10 && r.height <= 2);

        // larger area should enforce minimum preferred
        let area2 = Rect {
            x: 0,
            y: 0,
            width: 80,
            height: 10,
        };
        let r2 = dlg.rect_for(area2);
        assert!(r2.width >= 24);
        assert!(r2.height >= 5);
        assert_eq!(r2.x, (80 - r2.width) / 2);
    }
}
