mod core;
mod event_bus;
mod event_loop;
mod state;
pub(crate) mod terminal_session;


pub use core::App;
pub use state::{AppState, RoundState, StatusState, TerritoryStatus};
