use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::state::UiMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Quit,
    Up,
    Down,
    Select,
    Close,
    OpenPalette,
    OpenMenu,
    Refresh,
    TypeChar(char),
    Backspace,
    Confirm,
    Cancel,
    /// Unreserved key forwarded to the shortcut table lookup.
    Chord(char),
}

pub fn key_to_action(key: KeyEvent, mode: UiMode) -> Option<AppAction> {
    // Ctrl-C always quits, whatever is on screen.
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(AppAction::Quit);
    }

    match mode {
        UiMode::Board => board_bindings(key),
        UiMode::Palette => palette_bindings(key),
        UiMode::ContextMenu => menu_bindings(key),
        UiMode::Confirm => confirm_bindings(key),
    }
}

fn board_bindings(key: KeyEvent) -> Option<AppAction> {
    if key.code == KeyCode::Char('k') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(AppAction::OpenPalette);
    }

    match key.code {
        KeyCode::Char('q') => Some(AppAction::Quit),
        KeyCode::Char('j') | KeyCode::Down => Some(AppAction::Down),
        KeyCode::Char('k') | KeyCode::Up => Some(AppAction::Up),
        KeyCode::Char('m') | KeyCode::Enter => Some(AppAction::OpenMenu),
        KeyCode::Char('r') => Some(AppAction::Refresh),
        // Everything else that looks like a chord goes through the
        // catalog's shortcut table.
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(AppAction::Chord(c))
        }
        _ => None,
    }
}

fn palette_bindings(key: KeyEvent) -> Option<AppAction> {
    match key.code {
        KeyCode::Esc => Some(AppAction::Close),
        KeyCode::Enter => Some(AppAction::Select),
        KeyCode::Down => Some(AppAction::Down),
        KeyCode::Up => Some(AppAction::Up),
        KeyCode::Backspace => Some(AppAction::Backspace),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(AppAction::TypeChar(c))
        }
        _ => None,
    }
}

fn menu_bindings(key: KeyEvent) -> Option<AppAction> {
    match key.code {
        KeyCode::Esc => Some(AppAction::Close),
        KeyCode::Enter => Some(AppAction::Select),
        KeyCode::Char('j') | KeyCode::Down => Some(AppAction::Down),
        KeyCode::Char('k') | KeyCode::Up => Some(AppAction::Up),
        _ => None,
    }
}

fn confirm_bindings(key: KeyEvent) -> Option<AppAction> {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => Some(AppAction::Confirm),
        KeyCode::Char('n') | KeyCode::Esc => Some(AppAction::Cancel),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_ctrl_c_quits_in_every_mode() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        for mode in [
            UiMode::Board,
            UiMode::Palette,
            UiMode::ContextMenu,
            UiMode::Confirm,
        ] {
            assert_eq!(key_to_action(ctrl_c, mode), Some(AppAction::Quit));
        }
    }

    #[test]
    fn test_board_forwards_unreserved_chars_as_chords() {
        assert_eq!(
            key_to_action(key(KeyCode::Char('p')), UiMode::Board),
            Some(AppAction::Chord('p'))
        );
        // Reserved navigation keys never reach the chord table.
        assert_eq!(
            key_to_action(key(KeyCode::Char('j')), UiMode::Board),
            Some(AppAction::Down)
        );
    }

    #[test]
    fn test_palette_typing_beats_chords() {
        assert_eq!(
            key_to_action(key(KeyCode::Char('p')), UiMode::Palette),
            Some(AppAction::TypeChar('p'))
        );
        assert_eq!(
            key_to_action(key(KeyCode::Char('q')), UiMode::Palette),
            Some(AppAction::TypeChar('q'))
        );
    }

    #[test]
    fn test_confirm_mode_accepts_only_yes_no() {
        assert_eq!(
            key_to_action(key(KeyCode::Char('y')), UiMode::Confirm),
            Some(AppAction::Confirm)
        );
        assert_eq!(
            key_to_action(key(KeyCode::Esc), UiMode::Confirm),
            Some(AppAction::Cancel)
        );
        assert_eq!(key_to_action(key(KeyCode::Char('x')), UiMode::Confirm), None);
    }
}
