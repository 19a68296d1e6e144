use ratatui::layout::{Constraint, Direction, Layout, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiLayout {
    pub title: Rect,
    pub field: Rect,
    /// Guess rows. The suggestion dropdown is drawn over this region.
    pub body: Rect,
    pub status: Rect,
}

pub const FIELD_HEIGHT: u16 = 3;
const MAX_COLUMN_WIDTH: u16 = 64;

pub fn split_layout(area: Rect) -> UiLayout {
    let column = centered_column(area, MAX_COLUMN_WIDTH);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(column);

    UiLayout {
        title: chunks[0],
        field: chunks[1],
        body: chunks[2],
        status: chunks[3],
    }
}

pub(crate) fn centered_column(area: Rect, max_width: u16) -> Rect {
    let width = max_width.max(1).min(area.width);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    Rect::new(x, area.y, width, area.height)
}
