use crossterm::event::{Event, KeyEventKind, MouseButton, MouseEventKind};

use super::events::InputAction;
use super::keymap::map_key_to_command;

pub fn classify_event(event: Event) -> InputAction {
    match event {
        Event::Key(key) if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
            match map_key_to_command(key) {
                Some(command) => InputAction::Command(command),
                None => InputAction::Key(key),
            }
        }
        Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) => {
            InputAction::PointerDown {
                column: mouse.column,
                row: mouse.row,
            }
        }
        Event::FocusGained => InputAction::FocusGained,
        Event::Paste(text) => InputAction::Paste(text),
        Event::Resize(_, _) => InputAction::Resize,
        _ => InputAction::Ignored,
    }
}
