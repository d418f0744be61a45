//! Input Module - crossterm events to playground actions.
//!
//! # Key map
//!
//! | Key                    | Action                          |
//! |------------------------|---------------------------------|
//! | Tab / Down             | focus next                      |
//! | Shift+Tab / Up         | focus previous                  |
//! | Left / Right           | step the focused control        |
//! | Enter                  | commit text, press button       |
//! | Space                  | toggle checkbox, press button   |
//! | printable characters   | type into a text control        |
//! | Ctrl+N / Ctrl+D        | add / remove flex item          |
//! | Ctrl+R                 | reset the page                  |
//! | F2                     | switch page                     |
//! | F3                     | flip the system color scheme    |
//! | Esc / Ctrl+C / Ctrl+Q  | quit                            |

use std::time::Duration;

use crossterm::event::{
    poll, read, Event as CrosstermEvent, KeyCode, KeyEvent as CrosstermKeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent as CrosstermMouseEvent, MouseEventKind,
};

// =============================================================================
// ACTION
// =============================================================================

/// What the user asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    FocusNext,
    FocusPrevious,
    /// Move a select/range/number control one step.
    Step { forward: bool },
    /// Enter: commit a text field or press a button.
    Submit,
    /// Type a character (Space included; checkboxes and buttons treat it as a press).
    Type(char),
    Backspace,
    /// Left click at a cell.
    Click { x: u16, y: u16 },
    Resize { width: u16, height: u16 },
    AddItem,
    RemoveItem,
    Reset,
    SwitchPage,
    ToggleColorScheme,
}

// =============================================================================
// CONVERSION
// =============================================================================

/// Convert a crossterm key event. Releases and unmapped keys yield `None`.
pub fn convert_key_event(event: CrosstermKeyEvent) -> Option<Action> {
    if event.kind == KeyEventKind::Release {
        return None;
    }

    if event.modifiers.contains(KeyModifiers::CONTROL) {
        return match event.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('n') => Some(Action::AddItem),
            KeyCode::Char('d') => Some(Action::RemoveItem),
            KeyCode::Char('r') => Some(Action::Reset),
            _ => None,
        };
    }

    match event.code {
        KeyCode::Esc => Some(Action::Quit),
        KeyCode::Tab | KeyCode::Down => Some(Action::FocusNext),
        KeyCode::BackTab | KeyCode::Up => Some(Action::FocusPrevious),
        KeyCode::Left => Some(Action::Step { forward: false }),
        KeyCode::Right => Some(Action::Step { forward: true }),
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::F(2) => Some(Action::SwitchPage),
        KeyCode::F(3) => Some(Action::ToggleColorScheme),
        KeyCode::Char(c) if !c.is_control() => Some(Action::Type(c)),
        _ => None,
    }
}

/// Convert a crossterm mouse event. Only left-button presses matter.
pub fn convert_mouse_event(event: CrosstermMouseEvent) -> Option<Action> {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(Action::Click {
            x: event.column,
            y: event.row,
        }),
        _ => None,
    }
}

pub fn convert_event(event: CrosstermEvent) -> Option<Action> {
    match event {
        CrosstermEvent::Key(key) => convert_key_event(key),
        CrosstermEvent::Mouse(mouse) => convert_mouse_event(mouse),
        CrosstermEvent::Resize(width, height) => Some(Action::Resize { width, height }),
        _ => None,
    }
}

// =============================================================================
// EVENT POLLING
// =============================================================================

/// Poll for an action with timeout. `Ok(None)` when nothing relevant arrived.
pub fn poll_action(timeout: Duration) -> std::io::Result<Option<Action>> {
    if poll(timeout)? {
        Ok(convert_event(read()?))
    } else {
        Ok(None)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> CrosstermKeyEvent {
        CrosstermKeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(convert_key_event(key(KeyCode::Tab, KeyModifiers::NONE)), Some(Action::FocusNext));
        assert_eq!(
            convert_key_event(key(KeyCode::BackTab, KeyModifiers::SHIFT)),
            Some(Action::FocusPrevious)
        );
        assert_eq!(
            convert_key_event(key(KeyCode::Left, KeyModifiers::NONE)),
            Some(Action::Step { forward: false })
        );
    }

    #[test]
    fn test_control_shortcuts() {
        assert_eq!(convert_key_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL)), Some(Action::Quit));
        assert_eq!(convert_key_event(key(KeyCode::Char('n'), KeyModifiers::CONTROL)), Some(Action::AddItem));
        assert_eq!(convert_key_event(key(KeyCode::Char('x'), KeyModifiers::CONTROL)), None);
    }

    #[test]
    fn test_typing() {
        assert_eq!(convert_key_event(key(KeyCode::Char('5'), KeyModifiers::NONE)), Some(Action::Type('5')));
        assert_eq!(convert_key_event(key(KeyCode::Char('%'), KeyModifiers::SHIFT)), Some(Action::Type('%')));
        assert_eq!(convert_key_event(key(KeyCode::Char(' '), KeyModifiers::NONE)), Some(Action::Type(' ')));
    }

    #[test]
    fn test_key_release_ignored() {
        let mut event = key(KeyCode::Enter, KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        assert_eq!(convert_key_event(event), None);
    }

    #[test]
    fn test_mouse_click() {
        let event = CrosstermMouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 10,
            row: 5,
            modifiers: KeyModifiers::empty(),
        };
        assert_eq!(convert_mouse_event(event), Some(Action::Click { x: 10, y: 5 }));

        let scroll = CrosstermMouseEvent {
            kind: MouseEventKind::ScrollDown,
            ..event
        };
        assert_eq!(convert_mouse_event(scroll), None);
    }

    #[test]
    fn test_resize() {
        assert_eq!(
            convert_event(CrosstermEvent::Resize(100, 30)),
            Some(Action::Resize { width: 100, height: 30 })
        );
    }
}
