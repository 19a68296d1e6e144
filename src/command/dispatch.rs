use crate::app::AppState;
use crate::guess::GuessInput;

use super::types::{Command, CommandOutcome};

pub fn dispatch(app: &mut AppState, cmd: Command, input: &mut GuessInput) -> CommandOutcome {
    let action_id = cmd.action_id();
    app.status.last_action_id = Some(action_id);

    match cmd {
        Command::RecordGuess { value } => record_guess(app, value, input),
        Command::NewRound => {
            app.round.start_next();
            input.set_disabled(false);
            input.focus();
            app.status.message = format!("round {} started", app.round.number);
            tracing::info!(round = app.round.number, "new round");
            CommandOutcome::Applied
        }
        Command::FocusInput => {
            if input.is_disabled() {
                app.status.message = "round over, press ctrl-r for a new round".to_string();
                return CommandOutcome::Noop;
            }
            if input.is_focused() {
                return CommandOutcome::Noop;
            }
            input.focus();
            CommandOutcome::Applied
        }
        Command::Quit => CommandOutcome::QuitRequested,
    }
}

fn record_guess(app: &mut AppState, value: String, input: &mut GuessInput) -> CommandOutcome {
    if app.round.is_over() {
        input.set_disabled(true);
        app.status.message = "round over, guess ignored".to_string();
        return CommandOutcome::Noop;
    }

    app.round.guesses.push(value);
    let made = app.round.guesses.len();
    let max = app.round.max_guesses;
    tracing::info!(made, max, "guess recorded");

    if app.round.is_over() {
        input.set_disabled(true);
        app.status.message = format!("round over after {made} guesses, press ctrl-r to play again");
    } else {
        app.status.message = format!("guess {made}/{max} recorded");
    }
    CommandOutcome::Applied
}
