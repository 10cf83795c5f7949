//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    // Request list
    SelectPrev,
    SelectNext,
    SendRequest,

    // Response panel
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    FollowTail,

    // Focus
    ToggleFocus,
    Focus(Panel),

    // System
    Quit,
}

/// Panel holding keyboard focus
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Panel {
    #[default]
    List,
    Response,
}

impl Panel {
    pub fn toggle(self) -> Panel {
        match self {
            Panel::List => Panel::Response,
            Panel::Response => Panel::List,
        }
    }
}

/// Convert a key event to a UiEvent based on the focused panel
pub fn key_to_ui_event(key: KeyEvent, focus: Panel) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(UiEvent::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Tab | KeyCode::BackTab => Some(UiEvent::ToggleFocus),
        KeyCode::Left => Some(UiEvent::Focus(Panel::List)),
        KeyCode::Right => Some(UiEvent::Focus(Panel::Response)),
        KeyCode::Enter | KeyCode::Char('s') => Some(UiEvent::SendRequest),
        KeyCode::Up | KeyCode::Char('k') => Some(match focus {
            Panel::List => UiEvent::SelectPrev,
            Panel::Response => UiEvent::ScrollUp,
        }),
        KeyCode::Down | KeyCode::Char('j') => Some(match focus {
            Panel::List => UiEvent::SelectNext,
            Panel::Response => UiEvent::ScrollDown,
        }),
        KeyCode::PageUp => Some(UiEvent::PageUp),
        KeyCode::PageDown => Some(UiEvent::PageDown),
        KeyCode::End => Some(UiEvent::FollowTail),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrows_depend_on_focus() {
        assert_eq!(key_to_ui_event(press(KeyCode::Down), Panel::List), Some(UiEvent::SelectNext));
        assert_eq!(key_to_ui_event(press(KeyCode::Down), Panel::Response), Some(UiEvent::ScrollDown));
        assert_eq!(key_to_ui_event(press(KeyCode::Up), Panel::Response), Some(UiEvent::ScrollUp));
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(key_to_ui_event(press(KeyCode::Esc), Panel::List), Some(UiEvent::Quit));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_to_ui_event(ctrl_c, Panel::Response), Some(UiEvent::Quit));
    }

    #[test]
    fn test_enter_sends() {
        assert_eq!(key_to_ui_event(press(KeyCode::Enter), Panel::List), Some(UiEvent::SendRequest));
    }

    #[test]
    fn test_release_is_ignored() {
        let mut key = press(KeyCode::Enter);
        key.kind = KeyEventKind::Release;
        assert_eq!(key_to_ui_event(key, Panel::List), None);
    }
}
