use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::guess::{GuessHitAreas, GuessView};

const MAX_LIST_ROWS: u16 = 8;

/// Draws the guess field and, when open, the suggestion dropdown below it.
///
/// `below` is the space the dropdown may cover. Returns the regions the
/// widget needs for pointer hit-testing.
pub fn draw_guess_input(
    frame: &mut Frame<'_>,
    field: Rect,
    below: Rect,
    view: &GuessView,
) -> GuessHitAreas {
    let mut hit = GuessHitAreas::default();
    if field.width == 0 || field.height == 0 {
        return hit;
    }

    let border_color = if view.disabled {
        Color::DarkGray
    } else if view.focused {
        Color::White
    } else {
        Color::Gray
    };
    let block = Block::default()
        .title(" Guess ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(field);
    frame.render_widget(block, field);
    hit.field = Some(field);

    if inner.width > 0 && inner.height > 0 {
        let line = build_input_line(view, inner.width as usize);
        frame.render_widget(Paragraph::new(line), Rect::new(inner.x, inner.y, inner.width, 1));
    }

    if view.items.is_empty() || below.width == 0 || below.height < 3 {
        return hit;
    }

    let wanted = u16::try_from(view.items.len())
        .unwrap_or(u16::MAX)
        .min(MAX_LIST_ROWS)
        .saturating_add(2);
    let popup = Rect::new(field.x, below.y, field.width, wanted.min(below.height));
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);
    hit.list = Some(popup);

    let max_items = inner.height as usize;
    if inner.width == 0 || max_items == 0 {
        return hit;
    }

    let start_idx = scroll_start(view.items.len(), view.highlight, max_items);
    let mut lines = Vec::new();
    for item in view.items.iter().skip(start_idx).take(max_items) {
        let mut spans = Vec::new();
        if item.highlighted {
            spans.push(Span::styled(" ┃ ", Style::default().fg(Color::White)));
        } else {
            spans.push(Span::raw("   "));
        }
        spans.push(Span::raw(item.label.clone()));

        let mut used = 3 + item.label.width();
        if let Some(detail) = &item.detail {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                detail.clone(),
                Style::default().fg(Color::DarkGray),
            ));
            used += 2 + detail.width();
        }

        let line_style = if item.highlighted {
            Style::default().bg(Color::Rgb(45, 45, 50))
        } else {
            Style::default()
        };
        spans.push(Span::raw(
            " ".repeat((inner.width as usize).saturating_sub(used)),
        ));
        lines.push(Line::from(spans).style(line_style));
    }

    let rows = u16::try_from(lines.len()).unwrap_or(inner.height);
    frame.render_widget(Paragraph::new(lines), inner);
    hit.items = Some(Rect::new(inner.x, inner.y, inner.width, rows));
    hit.list_offset = start_idx;
    hit
}

/// First visible row, keeping the highlighted suggestion near the middle.
fn scroll_start(len: usize, highlight: Option<usize>, max_items: usize) -> usize {
    let Some(selected) = highlight else {
        return 0;
    };
    let selected = selected.min(len.saturating_sub(1));
    if len <= max_items || selected < max_items / 2 {
        0
    } else if selected >= len - max_items / 2 {
        len.saturating_sub(max_items)
    } else {
        selected.saturating_sub(max_items / 2)
    }
}

fn build_input_line(view: &GuessView, width: usize) -> Line<'static> {
    let prefix_spans = vec![
        Span::raw(" ".to_string()),
        Span::styled("> ".to_string(), Style::default().fg(Color::White)),
    ];
    let prefix_width = 3;
    let max_text_width = width.saturating_sub(prefix_width);

    if view.input.is_empty() {
        let mut spans = prefix_spans;
        let mut placeholder = view.placeholder.chars();
        if view.focused {
            let first = placeholder.next().unwrap_or(' ');
            spans.push(Span::styled(
                first.to_string(),
                Style::default().fg(Color::DarkGray).reversed(),
            ));
        }
        let rest: String = placeholder
            .take(max_text_width.saturating_sub(usize::from(view.focused)))
            .collect();
        spans.push(Span::styled(rest, Style::default().fg(Color::DarkGray)));
        return Line::from(spans);
    }

    let chars: Vec<char> = view.input.chars().collect();
    let char_count = chars.len();
    let cursor = view.cursor.min(char_count);

    let mut start = 0usize;
    if max_text_width > 0 {
        if cursor >= max_text_width {
            start = cursor.saturating_sub(max_text_width.saturating_sub(1));
        }
        start = start.min(char_count);
    } else {
        start = char_count;
    }

    let text_width = max_text_width.max(1);
    let end = (start + text_width).min(char_count);
    let mut visible: Vec<char> = chars[start..end].to_vec();
    if visible.len() < text_width {
        visible.extend(std::iter::repeat_n(' ', text_width - visible.len()));
    }

    let caret_idx = view
        .focused
        .then(|| cursor.saturating_sub(start).min(text_width.saturating_sub(1)));

    let text_style = if view.disabled {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };
    let mut spans = prefix_spans;
    for (idx, ch) in visible.into_iter().enumerate() {
        if Some(idx) == caret_idx {
            spans.push(Span::styled(ch.to_string(), text_style.reversed()));
        } else {
            spans.push(Span::styled(ch.to_string(), text_style));
        }
    }
    Line::from(spans)
}
