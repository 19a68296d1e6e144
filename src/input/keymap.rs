use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::command::Command;

/// Host-level bindings. Keys without a binding belong to the guess input.
pub fn map_key_to_command(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => Some(Command::Quit),
            KeyCode::Char('r') => Some(Command::NewRound),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Tab => Some(Command::FocusInput),
        _ => None,
    }
}
