//! Key handling: maps key events to semantic actions

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Lines moved per PageUp/PageDown when the viewport is unknown
pub const DEFAULT_PAGE: usize = 10;

/// User action derived from a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    InsertChar(char),
    DeleteChar,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    /// Enter: send the input line, or dismiss an overlay
    Submit,
    /// Esc: close an overlay, otherwise cancel in-flight requests
    Cancel,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    ScrollBottom,
    Quit,
    None,
}

/// Map a key event to an action.
///
/// While an overlay (notification or help) is open only dismissal and
/// quitting are possible.
pub fn handle_key_event(key: KeyEvent, overlay_open: bool) -> KeyAction {
    if key.kind == KeyEventKind::Release {
        return KeyAction::None;
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) | (KeyCode::Char('d'), KeyModifiers::CONTROL) => {
            KeyAction::Quit
        }
        (KeyCode::Esc, _) => KeyAction::Cancel,
        (KeyCode::Enter, _) => KeyAction::Submit,
        _ if overlay_open => KeyAction::None,

        (KeyCode::PageUp, _) => KeyAction::PageUp,
        (KeyCode::PageDown, _) => KeyAction::PageDown,
        (KeyCode::Up, _) => KeyAction::ScrollUp,
        (KeyCode::Down, _) => KeyAction::ScrollDown,
        (KeyCode::End, KeyModifiers::CONTROL) => KeyAction::ScrollBottom,

        (KeyCode::Backspace, _) => KeyAction::DeleteChar,
        (KeyCode::Left, _) => KeyAction::CursorLeft,
        (KeyCode::Right, _) => KeyAction::CursorRight,
        (KeyCode::Home, _) => KeyAction::CursorHome,
        (KeyCode::End, _) => KeyAction::CursorEnd,
        (KeyCode::Char(c), m) if !m.contains(KeyModifiers::CONTROL) => KeyAction::InsertChar(c),
        _ => KeyAction::None,
    }
}
