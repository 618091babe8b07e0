use crossterm::event::{Event, KeyCode, KeyModifiers};
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::keybindings::{Action, KeyBindings};
use crate::ui::{UiFrame, safe_set_string};

const PROMPT: &str = "copy id: ";

/// Single-line input for typing an element id.
#[derive(Debug)]
pub struct IdPromptComponent {
    active: bool,
    input: String,
    submitted: Option<String>,
    keys: KeyBindings,
}

impl IdPromptComponent {
    pub fn new() -> Self {
        Self {
            active: false,
            input: String::new(),
            submitted: None,
            keys: KeyBindings::default(),
        }
    }

    pub fn open(&mut self) {
        self.active = true;
        self.input.clear();
    }

    pub fn active(&self) -> bool {
        self.active
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// The id entered with the last submit, if not yet taken.
    pub fn take_submitted(&mut self) -> Option<String> {
        self.submitted.take()
    }
}

impl Default for IdPromptComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl super::Component for IdPromptComponent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _focused: bool) {
        if !self.active || area.width == 0 || area.height == 0 {
            return;
        }
        let buffer = frame.buffer_mut();
        let bounds = area.intersection(buffer.area);
        let blank = " ".repeat(area.width as usize);
        let style = Style::default()
            .fg(crate::theme::dialog_fg())
            .bg(crate::theme::dialog_bg());
        safe_set_string(buffer, bounds, area.x, area.y, &blank, style);
        let line = format!("{PROMPT}{}_", self.input);
        safe_set_string(buffer, bounds, area.x, area.y, &line, style);
    }

    fn handle_event(&mut self, event: &Event) -> bool {
        if !self.active {
            return false;
        }
        let Event::Key(key) = event else {
            return false;
        };
        if self.keys.matches(Action::PromptSubmit, key) {
            self.active = false;
            let id = self.input.trim();
            if !id.is_empty() {
                self.submitted = Some(id.to_string());
            }
            return true;
        }
        if self.keys.matches(Action::PromptCancel, key) {
            self.active = false;
            self.input.clear();
            return true;
        }
        match key.code {
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c)
                if key.modifiers == KeyModifiers::NONE || key.modifiers == KeyModifiers::SHIFT =>
            {
                self.input.push(c);
            }
            _ => {}
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Component;
    use crossterm::event::KeyEvent;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_str(prompt: &mut IdPromptComponent, s: &str) {
        for c in s.chars() {
            prompt.handle_event(&key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn inactive_prompt_ignores_keys() {
        let mut p = IdPromptComponent::new();
        assert!(!p.handle_event(&key(KeyCode::Char('a'))));
    }

    #[test]
    fn submit_yields_trimmed_id() {
        let mut p = IdPromptComponent::new();
        p.open();
        type_str(&mut p, "installx");
        p.handle_event(&key(KeyCode::Backspace));
        assert_eq!(p.input(), "install");
        assert!(p.handle_event(&key(KeyCode::Enter)));
        assert!(!p.active());
        assert_eq!(p.take_submitted().as_deref(), Some("install"));
        assert_eq!(p.take_submitted(), None);
    }

    #[test]
    fn cancel_discards_input() {
        let mut p = IdPromptComponent::new();
        p.open();
        type_str(&mut p, "abc");
        p.handle_event(&key(KeyCode::Esc));
        assert!(!p.active());
        assert_eq!(p.input(), "");
        assert_eq!(p.take_submitted(), None);
    }
}
