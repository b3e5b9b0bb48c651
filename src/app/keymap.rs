use super::action::Action;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeyConfig {
    pub profile: String,
    pub custom: Option<HashMap<String, String>>,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            profile: "vim".to_string(),
            custom: None,
        }
    }
}

#[derive(Debug)]
pub struct KeyMap {
    // Bindings for Normal mode. EditBlock routes raw keys to the text area
    // (and the palette ahead of it), so it has no table here.
    pub normal: HashMap<KeyEvent, Action>,
}

impl KeyMap {
    #[must_use]
    pub fn from_config(_config: &KeyConfig) -> Self {
        // Only the default "vim" profile exists for now; the profile field
        // is read so configs stay forward-compatible.
        let mut normal = HashMap::new();

        normal.insert(key('q'), Action::Quit);
        normal.insert(key('j'), Action::SelectNextBlock);
        normal.insert(key(KeyCode::Down), Action::SelectNextBlock);
        normal.insert(key('k'), Action::SelectPrevBlock);
        normal.insert(key(KeyCode::Up), Action::SelectPrevBlock);
        normal.insert(key(KeyCode::Enter), Action::EditBlock);
        normal.insert(key('e'), Action::EditBlock);
        normal.insert(key('d'), Action::DeleteBlock);
        normal.insert(key('J'), Action::MoveBlockDown);
        normal.insert(key('K'), Action::MoveBlockUp);
        normal.insert(key('n'), Action::InsertTextBlockBelow);
        normal.insert(key('s'), Action::SaveTemplate);
        normal.insert(key('x'), Action::ExportHtml);
        normal.insert(key('?'), Action::ToggleHelp);
        normal.insert(key(KeyCode::Esc), Action::CancelMode);

        Self { normal }
    }

    #[must_use]
    pub fn get_action(&self, event: KeyEvent) -> Option<Action> {
        self.normal.get(&event).cloned()
    }
}

enum KeyInput {
    Char(char),
    Code(KeyCode),
}

impl From<char> for KeyInput {
    fn from(c: char) -> Self {
        KeyInput::Char(c)
    }
}

impl From<KeyCode> for KeyInput {
    fn from(code: KeyCode) -> Self {
        KeyInput::Code(code)
    }
}

fn key(input: impl Into<KeyInput>) -> KeyEvent {
    let code = match input.into() {
        KeyInput::Char(c) => KeyCode::Char(c),
        KeyInput::Code(c) => c,
    };
    // Uppercase characters arrive with the SHIFT modifier set.
    let modifiers = match code {
        KeyCode::Char(c) if c.is_uppercase() => KeyModifiers::SHIFT,
        _ => KeyModifiers::empty(),
    };
    KeyEvent::new(code, modifiers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_binds_core_actions() {
        let map = KeyMap::from_config(&KeyConfig::default());
        assert_eq!(
            map.get_action(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::empty())),
            Some(Action::Quit)
        );
        assert_eq!(
            map.get_action(KeyEvent::new(KeyCode::Char('J'), KeyModifiers::SHIFT)),
            Some(Action::MoveBlockDown)
        );
        assert_eq!(
            map.get_action(KeyEvent::new(KeyCode::Char('z'), KeyModifiers::empty())),
            None
        );
    }
}
