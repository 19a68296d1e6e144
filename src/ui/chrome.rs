use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::app::{AppState, RoundState, TerritoryStatus};

pub fn draw_title(frame: &mut Frame<'_>, area: Rect, app: &AppState) {
    let round = &app.round;
    let text = if round.is_over() {
        format!("Round {} | over | Ctrl-R for a new round", round.number)
    } else {
        format!(
            "Round {} | {} of {} guesses left",
            round.number,
            round.remaining(),
            round.max_guesses
        )
    };
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::White)),
        area,
    );
}

/// One row per guess slot, filled slots first.
pub fn draw_guesses(frame: &mut Frame<'_>, area: Rect, round: &RoundState) {
    if area.height == 0 {
        return;
    }

    let lines: Vec<Line<'_>> = (0..round.max_guesses)
        .take(area.height as usize)
        .map(|slot| match round.guesses.get(slot) {
            Some(guess) => Line::from(vec![
                Span::styled(
                    format!(" {}. ", slot + 1),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(guess.as_str()),
            ]),
            None => Line::from(Span::styled(
                format!(" {}. ...", slot + 1),
                Style::default().fg(Color::DarkGray),
            )),
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

pub fn draw_status(frame: &mut Frame<'_>, area: Rect, app: &AppState) {
    let source = match app.territories {
        TerritoryStatus::Loading => "loading territories".to_string(),
        TerritoryStatus::Loaded { count } => format!("{count} territories"),
        TerritoryStatus::Fallback { count } => format!("{count} built-in territories"),
    };
    let command_id = app
        .status
        .last_action_id
        .map(|id| id.as_str())
        .unwrap_or("-");
    let message = if app.status.message.is_empty() {
        "-"
    } else {
        app.status.message.as_str()
    };

    let status = Paragraph::new(format!("{source} | {command_id} | {message}"))
        .style(Style::default().fg(Color::Gray))
        .wrap(Wrap { trim: true });
    frame.render_widget(status, area);
}
