//! Keymap
//!
//! Vim-style key bindings mapped to widget actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Actions understood by the table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableAction {
    // Navigation
    MoveUp,
    MoveDown,
    MoveToTop,
    MoveToBottom,
    PageUp,
    PageDown,
    PrevColumn,
    NextColumn,

    // Sorting
    ToggleSort,

    // Selection
    ToggleSelect,
    ToggleAll,
    ClearSelection,

    None,
}

/// Actions understood by an input field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAction {
    InsertChar(char),
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    Clear,
    ToggleReveal,
    None,
}

/// Actions handled by the application before any widget sees the key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalAction {
    FocusNext,
    FocusPrev,
    Remount,
    Quit,
    None,
}

/// Map key event to action while the table has focus
pub fn table_action(key: KeyEvent) -> TableAction {
    match (key.code, key.modifiers) {
        (KeyCode::Char('j') | KeyCode::Down, _) => TableAction::MoveDown,
        (KeyCode::Char('k') | KeyCode::Up, _) => TableAction::MoveUp,
        (KeyCode::Char('g') | KeyCode::Home, _) => TableAction::MoveToTop,
        (KeyCode::Char('G') | KeyCode::End, _) => TableAction::MoveToBottom,
        (KeyCode::Char('d'), KeyModifiers::CONTROL) | (KeyCode::PageDown, _) => TableAction::PageDown,
        (KeyCode::Char('u'), KeyModifiers::CONTROL) | (KeyCode::PageUp, _) => TableAction::PageUp,
        (KeyCode::Char('h') | KeyCode::Left, _) => TableAction::PrevColumn,
        (KeyCode::Char('l') | KeyCode::Right, _) => TableAction::NextColumn,
        (KeyCode::Char('s') | KeyCode::Enter, _) => TableAction::ToggleSort,
        (KeyCode::Char(' ') | KeyCode::Char('x'), _) => TableAction::ToggleSelect,
        (KeyCode::Char('a'), _) => TableAction::ToggleAll,
        (KeyCode::Esc, _) => TableAction::ClearSelection,
        _ => TableAction::None,
    }
}

/// Map key event to action while an input field has focus
pub fn field_action(key: KeyEvent) -> FieldAction {
    match (key.code, key.modifiers) {
        (KeyCode::Backspace, _) => FieldAction::Backspace,
        (KeyCode::Delete, _) => FieldAction::Delete,
        (KeyCode::Left, _) => FieldAction::CursorLeft,
        (KeyCode::Right, _) => FieldAction::CursorRight,
        (KeyCode::Home, _) | (KeyCode::Char('a'), KeyModifiers::CONTROL) => FieldAction::CursorHome,
        (KeyCode::End, _) | (KeyCode::Char('e'), KeyModifiers::CONTROL) => FieldAction::CursorEnd,
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => FieldAction::Clear,
        (KeyCode::Char('s'), KeyModifiers::CONTROL) => FieldAction::ToggleReveal,
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => FieldAction::InsertChar(c),
        _ => FieldAction::None,
    }
}

/// Map key event to an application action.
///
/// `typing` is true while an input field has focus, so plain letters are
/// left for the field.
pub fn global_action(key: KeyEvent, typing: bool) -> GlobalAction {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => GlobalAction::Quit,
        (KeyCode::Tab, _) => GlobalAction::FocusNext,
        (KeyCode::BackTab, _) => GlobalAction::FocusPrev,
        (KeyCode::Char('r'), KeyModifiers::CONTROL) => GlobalAction::Remount,
        (KeyCode::Char('q'), KeyModifiers::NONE) if !typing => GlobalAction::Quit,
        _ => GlobalAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn key_ctrl(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::CONTROL)
    }

    #[test]
    fn test_table_navigation() {
        assert_eq!(table_action(key(KeyCode::Char('j'))), TableAction::MoveDown);
        assert_eq!(table_action(key(KeyCode::Up)), TableAction::MoveUp);
        assert_eq!(table_action(key(KeyCode::Char('G'))), TableAction::MoveToBottom);
        assert_eq!(table_action(key_ctrl(KeyCode::Char('d'))), TableAction::PageDown);
    }

    #[test]
    fn test_table_sort_and_select() {
        assert_eq!(table_action(key(KeyCode::Char('s'))), TableAction::ToggleSort);
        assert_eq!(table_action(key(KeyCode::Enter)), TableAction::ToggleSort);
        assert_eq!(table_action(key(KeyCode::Char(' '))), TableAction::ToggleSelect);
        assert_eq!(table_action(key(KeyCode::Char('a'))), TableAction::ToggleAll);
        assert_eq!(table_action(key(KeyCode::Esc)), TableAction::ClearSelection);
    }

    #[test]
    fn test_field_input() {
        assert_eq!(field_action(key(KeyCode::Char('a'))), FieldAction::InsertChar('a'));
        assert_eq!(field_action(key(KeyCode::Backspace)), FieldAction::Backspace);
        assert_eq!(field_action(key_ctrl(KeyCode::Char('a'))), FieldAction::CursorHome);
        assert_eq!(field_action(key_ctrl(KeyCode::Char('u'))), FieldAction::Clear);
        assert_eq!(field_action(key_ctrl(KeyCode::Char('s'))), FieldAction::ToggleReveal);
    }

    #[test]
    fn test_global_quit_only_outside_fields() {
        assert_eq!(global_action(key(KeyCode::Char('q')), false), GlobalAction::Quit);
        assert_eq!(global_action(key(KeyCode::Char('q')), true), GlobalAction::None);
        assert_eq!(global_action(key_ctrl(KeyCode::Char('c')), true), GlobalAction::Quit);
        assert_eq!(global_action(key(KeyCode::Tab), true), GlobalAction::FocusNext);
    }
}
