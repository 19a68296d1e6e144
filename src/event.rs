use crossterm::event::Event;

use crate::command::Command;
use crate::error::AppResult;
use crate::territory::Territory;

#[derive(Debug)]
pub(crate) enum DomainEvent {
    Input(Event),
    InputError(String),
    Command(Command),
    TerritoriesLoaded(AppResult<Vec<Territory>>),
    DebounceElapsed,
}
