use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Represents the result of handling a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Quit the application
    Quit,
    Up,
    Down,
    /// Previous page on the PDF route, pan in the gallery
    Left,
    /// Next page on the PDF route, pan in the gallery
    Right,
    /// Open the focused document
    Open,
    /// Close the viewer or leave the PDF route
    Back,
    /// Prompt for a file to import
    Import,
    Delete,
    Share,
    /// Save a copy to the export directory
    Export,
    /// Escalate an inline image to the gallery
    Zoom,
    ZoomIn,
    ZoomOut,
    /// Play media or hand a document to its external application
    Launch,
    /// Toggle help overlay
    Help,
    /// Confirm deletion
    ConfirmDelete,
    /// Cancel deletion
    CancelDelete,
    /// No action
    None,
}

/// Maps keyboard events to actions
pub fn handle_key_event(key: KeyEvent) -> KeyAction {
    match (key.code, key.modifiers) {
        // Quit: q or Ctrl+C
        (KeyCode::Char('q'), KeyModifiers::NONE) => KeyAction::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => KeyAction::Quit,

        (KeyCode::Esc, _) => KeyAction::Back,
        (KeyCode::Backspace, KeyModifiers::NONE) => KeyAction::Back,

        // Navigation: arrows or vim keys
        (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::NONE) => KeyAction::Up,
        (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::NONE) => KeyAction::Down,
        (KeyCode::Left, _) | (KeyCode::Char('h'), KeyModifiers::NONE) => KeyAction::Left,
        (KeyCode::Right, _) | (KeyCode::Char('l'), KeyModifiers::NONE) => KeyAction::Right,
        (KeyCode::Enter, _) => KeyAction::Open,

        // Document actions
        (KeyCode::Char('a'), KeyModifiers::NONE) => KeyAction::Import,
        (KeyCode::Char('d'), KeyModifiers::NONE) => KeyAction::Delete,
        (KeyCode::Delete, _) => KeyAction::Delete,
        (KeyCode::Char('s'), KeyModifiers::NONE) => KeyAction::Share,
        (KeyCode::Char('x'), KeyModifiers::NONE) => KeyAction::Export,
        (KeyCode::Char('o'), KeyModifiers::NONE) => KeyAction::Launch,
        (KeyCode::Char('p'), KeyModifiers::NONE) => KeyAction::Launch,

        // Gallery
        (KeyCode::Char('z'), KeyModifiers::NONE) => KeyAction::Zoom,
        (KeyCode::Char('+'), _) | (KeyCode::Char('='), KeyModifiers::NONE) => KeyAction::ZoomIn,
        (KeyCode::Char('-'), KeyModifiers::NONE) => KeyAction::ZoomOut,

        // Help: ? (some terminals report it with Shift)
        (KeyCode::Char('?'), _) => KeyAction::Help,

        _ => KeyAction::None,
    }
}

/// Maps keyboard events to confirmation actions
/// Used while the delete confirmation is shown
pub fn handle_confirm_input(key: KeyEvent) -> KeyAction {
    match (key.code, key.modifiers) {
        // Confirm: y or Enter
        (KeyCode::Char('y'), KeyModifiers::NONE) => KeyAction::ConfirmDelete,
        (KeyCode::Char('Y'), _) => KeyAction::ConfirmDelete,
        (KeyCode::Enter, KeyModifiers::NONE) => KeyAction::ConfirmDelete,

        // Cancel: n or Esc
        (KeyCode::Char('n'), KeyModifiers::NONE) => KeyAction::CancelDelete,
        (KeyCode::Char('N'), _) => KeyAction::CancelDelete,
        (KeyCode::Esc, KeyModifiers::NONE) => KeyAction::CancelDelete,

        _ => KeyAction::None,
    }
}

/// Editing actions for the import path prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAction {
    Insert(char),
    Backspace,
    Submit,
    Cancel,
    None,
}

pub fn handle_prompt_input(key: KeyEvent) -> PromptAction {
    match (key.code, key.modifiers) {
        (KeyCode::Enter, _) => PromptAction::Submit,
        (KeyCode::Esc, _) => PromptAction::Cancel,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => PromptAction::Cancel,
        (KeyCode::Backspace, _) => PromptAction::Backspace,
        (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
            PromptAction::Insert(c)
        }
        _ => PromptAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_quit() {
        assert_eq!(handle_key_event(key(KeyCode::Char('q'))), KeyAction::Quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key_event(ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn test_key_back() {
        assert_eq!(handle_key_event(key(KeyCode::Esc)), KeyAction::Back);
        assert_eq!(handle_key_event(key(KeyCode::Backspace)), KeyAction::Back);
    }

    #[test]
    fn test_key_navigation() {
        assert_eq!(handle_key_event(key(KeyCode::Down)), KeyAction::Down);
        assert_eq!(handle_key_event(key(KeyCode::Char('j'))), KeyAction::Down);
        assert_eq!(handle_key_event(key(KeyCode::Up)), KeyAction::Up);
        assert_eq!(handle_key_event(key(KeyCode::Char('k'))), KeyAction::Up);
        assert_eq!(handle_key_event(key(KeyCode::Left)), KeyAction::Left);
        assert_eq!(handle_key_event(key(KeyCode::Right)), KeyAction::Right);
        assert_eq!(handle_key_event(key(KeyCode::Enter)), KeyAction::Open);
    }

    #[test]
    fn test_key_document_actions() {
        assert_eq!(handle_key_event(key(KeyCode::Char('a'))), KeyAction::Import);
        assert_eq!(handle_key_event(key(KeyCode::Char('d'))), KeyAction::Delete);
        assert_eq!(handle_key_event(key(KeyCode::Delete)), KeyAction::Delete);
        assert_eq!(handle_key_event(key(KeyCode::Char('s'))), KeyAction::Share);
        assert_eq!(handle_key_event(key(KeyCode::Char('x'))), KeyAction::Export);
        assert_eq!(handle_key_event(key(KeyCode::Char('o'))), KeyAction::Launch);
    }

    #[test]
    fn test_key_gallery() {
        assert_eq!(handle_key_event(key(KeyCode::Char('z'))), KeyAction::Zoom);
        assert_eq!(handle_key_event(key(KeyCode::Char('+'))), KeyAction::ZoomIn);
        assert_eq!(handle_key_event(key(KeyCode::Char('-'))), KeyAction::ZoomOut);
    }

    #[test]
    fn test_key_help() {
        assert_eq!(handle_key_event(key(KeyCode::Char('?'))), KeyAction::Help);
    }

    #[test]
    fn test_key_none() {
        assert_eq!(handle_key_event(key(KeyCode::Char('w'))), KeyAction::None);
    }

    #[test]
    fn test_confirm_delete_keys() {
        assert_eq!(handle_confirm_input(key(KeyCode::Char('y'))), KeyAction::ConfirmDelete);
        assert_eq!(handle_confirm_input(key(KeyCode::Enter)), KeyAction::ConfirmDelete);
        assert_eq!(handle_confirm_input(key(KeyCode::Char('n'))), KeyAction::CancelDelete);
        assert_eq!(handle_confirm_input(key(KeyCode::Esc)), KeyAction::CancelDelete);
        assert_eq!(handle_confirm_input(key(KeyCode::Char('q'))), KeyAction::None);
    }

    #[test]
    fn test_prompt_input() {
        assert_eq!(
            handle_prompt_input(key(KeyCode::Char('/'))),
            PromptAction::Insert('/')
        );
        let upper = KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT);
        assert_eq!(handle_prompt_input(upper), PromptAction::Insert('A'));
        assert_eq!(handle_prompt_input(key(KeyCode::Backspace)), PromptAction::Backspace);
        assert_eq!(handle_prompt_input(key(KeyCode::Enter)), PromptAction::Submit);
        assert_eq!(handle_prompt_input(key(KeyCode::Esc)), PromptAction::Cancel);
    }
}
