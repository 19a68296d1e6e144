use crossterm::event::KeyEvent;

use crate::command::Command;

/// A terminal event, sorted by who handles it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAction {
    Command(Command),
    Key(KeyEvent),
    PointerDown { column: u16, row: u16 },
    FocusGained,
    Paste(String),
    Resize,
    Ignored,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputEventOutcome {
    pub command: Option<Command>,
    pub redraw: bool,
}
