use std::collections::HashMap;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    // Element list navigation
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    Home,
    End,
    // Copy the highlighted element
    Copy,
    // Id prompt
    OpenPrompt,
    PromptSubmit,
    PromptCancel,
    // Notice dialog
    Dismiss,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.code == self.code && key.modifiers == self.mods
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.mods.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            parts.push("Shift".to_string());
        }
        if self.mods.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        let code = match self.code {
            KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
            KeyCode::PageUp => "PageUp".to_string(),
            KeyCode::PageDown => "PageDown".to_string(),
            _ => format!("{:?}", self.code),
        };
        parts.push(code);
        parts.join("+")
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Key combos per action. Several actions share keys (Enter copies in the
/// list, submits in the prompt, dismisses a notice), so callers ask about
/// the action that applies to the current mode rather than reverse-mapping.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    map: HashMap<Action, Vec<KeyCombo>>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        use Action::*;
        let none = KeyModifiers::NONE;
        let mut kb = Self::new();
        kb.add(Quit, KeyCombo::new(KeyCode::Char('q'), KeyModifiers::CONTROL));
        kb.add(Quit, KeyCombo::new(KeyCode::Char('q'), none));
        kb.add(MoveUp, KeyCombo::new(KeyCode::Up, none));
        kb.add(MoveUp, KeyCombo::new(KeyCode::Char('k'), none));
        kb.add(MoveDown, KeyCombo::new(KeyCode::Down, none));
        kb.add(MoveDown, KeyCombo::new(KeyCode::Char('j'), none));
        kb.add(PageUp, KeyCombo::new(KeyCode::PageUp, none));
        kb.add(PageDown, KeyCombo::new(KeyCode::PageDown, none));
        kb.add(Home, KeyCombo::new(KeyCode::Home, none));
        kb.add(End, KeyCombo::new(KeyCode::End, none));
        kb.add(Copy, KeyCombo::new(KeyCode::Enter, none));
        kb.add(Copy, KeyCombo::new(KeyCode::Char('c'), none));
        kb.add(OpenPrompt, KeyCombo::new(KeyCode::Char('/'), none));
        kb.add(PromptSubmit, KeyCombo::new(KeyCode::Enter, none));
        kb.add(PromptCancel, KeyCombo::new(KeyCode::Esc, none));
        kb.add(Dismiss, KeyCombo::new(KeyCode::Enter, none));
        kb.add(Dismiss, KeyCombo::new(KeyCode::Esc, none));
        kb.add(Dismiss, KeyCombo::new(KeyCode::Char(' '), none));
        kb
    }
}

impl KeyBindings {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn add(&mut self, action: Action, combo: KeyCombo) {
        self.map.entry(action).or_default().push(combo);
    }

    pub fn matches(&self, action: Action, key: &KeyEvent) -> bool {
        if let Some(list) = self.map.get(&action) {
            list.iter().any(|c| c.matches(key))
        } else {
            false
        }
    }

    /// Return the display strings for all combos mapped to `action`.
    pub fn combos_for(&self, action: Action) -> Vec<String> {
        self.map
            .get(&action)
            .map(|list| list.iter().map(|c| c.display()).collect())
            .unwrap_or_default()
    }

    /// One-line key hint such as `Enter/C copy`.
    pub fn hint(&self, action: Action, label: &str) -> String {
        format!("{} {}", self.combos_for(action).join("/"), label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_quit() {
        let kb = KeyBindings::default();
        let ev = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(kb.matches(Action::Quit, &ev));
    }

    #[test]
    fn enter_is_shared_between_modes() {
        let kb = KeyBindings::default();
        let enter = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert!(kb.matches(Action::Copy, &enter));
        assert!(kb.matches(Action::PromptSubmit, &enter));
        assert!(kb.matches(Action::Dismiss, &enter));
        assert!(!kb.matches(Action::Quit, &enter));
    }

    #[test]
    fn hint_lists_every_combo() {
        let kb = KeyBindings::default();
        assert_eq!(kb.hint(Action::Copy, "copy"), "Enter/C copy");
        assert_eq!(kb.combos_for(Action::OpenPrompt), vec!["/".to_string()]);
        assert_eq!(
            KeyCombo::new(KeyCode::Char('q'), KeyModifiers::CONTROL).to_string(),
            "Ctrl+Q"
        );
    }
}
