mod chrome;
mod layout;
mod overlay;

use ratatui::Frame;

use crate::app::AppState;
use crate::guess::{GuessHitAreas, GuessView};

pub use chrome::{draw_guesses, draw_status, draw_title};
pub use layout::{FIELD_HEIGHT, UiLayout, split_layout};
pub use overlay::draw_guess_input;

/// Draws the whole screen. The dropdown goes last so it covers the guess rows.
pub fn draw_app(frame: &mut Frame<'_>, app: &AppState, view: &GuessView) -> GuessHitAreas {
    let layout = split_layout(frame.area());
    draw_title(frame, layout.title, app);
    draw_guesses(frame, layout.body, &app.round);
    draw_status(frame, layout.status, app);
    draw_guess_input(frame, layout.field, layout.body, view)
}
