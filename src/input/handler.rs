use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks the watch loop to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Start from idle, or toggle pause on a running snake
    StartPause,
    Reset,
    /// Shorten the tick interval
    Faster,
    /// Lengthen the tick interval
    Slower,
    /// Next even grid size up
    Grow,
    /// Next even grid size down
    Shrink,
    TogglePath,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Char(' ') => KeyAction::StartPause,
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::Reset,

            // Speed
            KeyCode::Char('+') | KeyCode::Char('=') => KeyAction::Faster,
            KeyCode::Char('-') | KeyCode::Char('_') => KeyAction::Slower,

            // Grid size
            KeyCode::Char(']') => KeyAction::Grow,
            KeyCode::Char('[') => KeyAction::Shrink,

            KeyCode::Char('p') | KeyCode::Char('P') => KeyAction::TogglePath,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}
