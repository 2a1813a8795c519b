//! Key bindings (normal and vim-style) and mouse clicks.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Action from a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    Select,
    Pause,
    Restart,
    Menu,
    Quit,
    None,
}

/// Map key event to an action. Supports both normal (arrows, enter) and vim (hjkl, x).
pub fn key_to_action(key: KeyEvent) -> Action {
    let KeyEvent { code, modifiers, .. } = key;
    let no_mod = modifiers.is_empty() || modifiers == KeyModifiers::SHIFT;
    if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
        return Action::Quit;
    }
    if !no_mod {
        return Action::None;
    }
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
        KeyCode::Char('p') => Action::Pause,
        KeyCode::Char('r') | KeyCode::Char('R') => Action::Restart,
        KeyCode::Char('m') | KeyCode::Char('M') => Action::Menu,
        KeyCode::Up | KeyCode::Char('k') => Action::Up,
        KeyCode::Down | KeyCode::Char('j') => Action::Down,
        KeyCode::Left | KeyCode::Char('h') => Action::Left,
        KeyCode::Right | KeyCode::Char('l') => Action::Right,
        KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('x') => Action::Select,
        _ => Action::None,
    }
}

/// Terminal cell of a left click, if this event is one.
pub fn mouse_click(ev: MouseEvent) -> Option<(u16, u16)> {
    match ev.kind {
        MouseEventKind::Down(MouseButton::Left) => Some((ev.column, ev.row)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventKind;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new_with_kind(code, modifiers, KeyEventKind::Press)
    }

    #[test]
    fn arrows_and_vim_keys_agree() {
        let none = KeyModifiers::NONE;
        assert_eq!(key_to_action(press(KeyCode::Up, none)), Action::Up);
        assert_eq!(key_to_action(press(KeyCode::Char('k'), none)), Action::Up);
        assert_eq!(key_to_action(press(KeyCode::Left, none)), Action::Left);
        assert_eq!(key_to_action(press(KeyCode::Char('h'), none)), Action::Left);
        assert_eq!(key_to_action(press(KeyCode::Enter, none)), Action::Select);
        assert_eq!(key_to_action(press(KeyCode::Char('x'), none)), Action::Select);
    }

    #[test]
    fn modifiers_filter_keys() {
        assert_eq!(
            key_to_action(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
        assert_eq!(
            key_to_action(press(KeyCode::Char('h'), KeyModifiers::ALT)),
            Action::None
        );
        assert_eq!(
            key_to_action(press(KeyCode::Char('R'), KeyModifiers::SHIFT)),
            Action::Restart
        );
    }

    #[test]
    fn only_left_press_is_a_click() {
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 12,
            row: 4,
            modifiers: KeyModifiers::NONE,
        };
        assert_eq!(mouse_click(click), Some((12, 4)));
        let drag = MouseEvent {
            kind: MouseEventKind::Drag(MouseButton::Left),
            ..click
        };
        assert_eq!(mouse_click(drag), None);
    }
}
