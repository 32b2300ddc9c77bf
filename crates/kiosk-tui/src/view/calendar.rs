use chrono::Datelike;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::{SpanRow, centered_rect};
use crate::app::{App, Hit};
use crate::model::calendar::CalendarState;

const CELL_WIDTH: u16 = 4;

/// Month grid popup. Days with captures are underlined; future days are dimmed.
pub fn render(f: &mut Frame, app: &mut App) {
    let area = f.area();
    let weeks = app.calendar.weeks();
    let popup = centered_rect(7 * CELL_WIDTH + 2, weeks.len() as u16 + 5, area);
    let theme = &app.theme;
    let inner = Rect {
        x: popup.x + 1,
        y: popup.y + 1,
        width: popup.width.saturating_sub(2),
        height: popup.height.saturating_sub(2),
    };

    let mut lines = vec![
        Line::from(Span::styled(
            format!(" < {} > ", app.calendar.month.format("%B %Y")),
            Style::default().fg(theme.active).add_modifier(Modifier::BOLD),
        )),
        Line::from(
            ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"]
                .iter()
                .map(|d| Span::styled(format!(" {d} "), Style::default().fg(theme.dim)))
                .collect::<Vec<_>>(),
        ),
    ];

    let mut hits = Vec::new();
    for (w, week) in weeks.iter().enumerate() {
        let y = inner.y + 2 + w as u16;
        let mut row = SpanRow::new(Rect::new(inner.x, y, inner.width, 1));
        for day in week {
            let Some(day) = *day else {
                row.push("    ", Style::default());
                continue;
            };
            let selectable = CalendarState::is_selectable(day, app.today);
            let mut style = if selectable {
                Style::default().fg(theme.text)
            } else {
                Style::default().fg(theme.dim).add_modifier(Modifier::DIM)
            };
            if app.gallery.has_data_on(day) {
                style = style.fg(theme.has_data).add_modifier(Modifier::UNDERLINED);
            }
            if day == app.gallery.day() {
                style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
            }
            if day == app.calendar.cursor {
                style = style.bg(theme.highlight_bg).fg(theme.active);
            }
            if let Some(rect) = row.push(format!(" {:>2} ", day.day()), style)
                && selectable
            {
                hits.push((rect, Hit::Day(day)));
            }
        }
        lines.push(row.into_line());
    }
    lines.push(Line::from(Span::styled(
        " Enter pick  Esc close",
        Style::default().fg(theme.dim),
    )));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.active))
            .title(" Date "),
    );
    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);

    app.hits.clear();
    app.hits.extend(hits);
    app.last_popup_area = Some(popup);
}
