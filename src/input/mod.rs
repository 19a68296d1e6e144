mod events;
mod handler;
mod keymap;

pub use events::{InputAction, InputEventOutcome};
pub use handler::classify_event;
pub use keymap::map_key_to_command;
