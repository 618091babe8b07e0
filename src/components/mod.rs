use crossterm::event::Event;
use ratatui::layout::Rect;

use crate::ui::UiFrame;

pub mod dialog_overlay;
pub mod element_list;
pub mod element_preview;
pub mod id_prompt;
pub mod notice_overlay;
pub mod status_bar;

pub use dialog_overlay::DialogOverlayComponent;
pub use element_list::{ElementListComponent, ElementRow};
pub use element_preview::ElementPreviewComponent;
pub use id_prompt::IdPromptComponent;
pub use notice_overlay::NoticeOverlayComponent;
pub use status_bar::StatusBar;

pub trait Component {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, focused: bool);

    fn handle_event(&mut self, _event: &Event) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DummyComp;
    impl Component for DummyComp {
        fn render(&mut self, _frame: &mut UiFrame<'_>, _area: Rect, _focused: bool) {}
    }

    #[test]
    fn default_handle_event_returns_false() {
        let mut d = DummyComp;
        assert!(!d.handle_event(&Event::Key(crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Char('a'),
            crossterm::event::KeyModifiers::NONE
        ))));
    }
}
