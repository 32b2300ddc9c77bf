use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use super::SpanRow;
use crate::app::{App, Hit};

/// Rows the sources bar needs at the given terminal width.
pub fn height(app: &App, width: u16) -> u16 {
    let narrow = width < crate::app::NARROW_WIDTH;
    match (narrow, app.show_sources) {
        (false, _) => chip_rows(app, width),
        (true, false) => 1,
        (true, true) => 1 + chip_rows(app, width),
    }
}

fn chip_label(n: usize, source: &str) -> String {
    if n < 9 {
        format!(" {} {} ", n + 1, source)
    } else {
        format!(" {source} ")
    }
}

fn chip_rows(app: &App, width: u16) -> u16 {
    let mut rows = 1u16;
    let mut used = 0usize;
    for (n, source) in app.gallery.timeline().sources().enumerate() {
        let w = chip_label(n, source).chars().count() + 1;
        if used + w > width as usize && used > 0 {
            rows += 1;
            used = 0;
        }
        used += w;
    }
    rows
}

/// Source chips, wrapped over as many lines as they need. Narrow terminals
/// put them behind a "Show sources" toggle.
pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
    if area.height == 0 {
        return;
    }
    let theme = &app.theme;
    let mut hits = Vec::new();
    let mut lines: Vec<Line> = Vec::new();
    let mut chips_area = area;

    if app.is_narrow() {
        let mut row = SpanRow::new(Rect { height: 1, ..area });
        let label = if app.show_sources {
            " \u{25be} Hide sources [s] "
        } else {
            " \u{25b8} Show sources [s] "
        };
        if let Some(rect) = row.push(label, Style::default().fg(theme.active)) {
            hits.push((rect, Hit::SourcesToggle));
        }
        lines.push(row.into_line());
        if !app.show_sources {
            f.render_widget(Paragraph::new(lines), area);
            app.hits.extend(hits);
            return;
        }
        chips_area = Rect {
            y: area.y + 1,
            height: area.height.saturating_sub(1),
            ..area
        };
    }

    let timeline = app.gallery.timeline();
    if timeline.is_empty() {
        let mut row = SpanRow::new(Rect { height: 1, ..chips_area });
        row.push(" no sources loaded ", Style::default().fg(theme.dim));
        lines.push(row.into_line());
    } else {
        let mut y = chips_area.y;
        let mut row = SpanRow::new(Rect::new(chips_area.x, y, chips_area.width, 1));
        for (n, source) in timeline.sources().enumerate() {
            let label = chip_label(n, source);
            let style = theme.chip_style(app.gallery.visibility().is_visible(source));
            let rect = match row.push(label.clone(), style) {
                Some(rect) => Some(rect),
                None => {
                    lines.push(std::mem::replace(
                        &mut row,
                        SpanRow::new(Rect::new(chips_area.x, y + 1, chips_area.width, 1)),
                    )
                    .into_line());
                    y += 1;
                    row.push(label, style)
                }
            };
            if let Some(rect) = rect {
                hits.push((rect, Hit::SourceChip(source.to_string())));
            }
            row.push(" ", Style::default());
        }
        lines.push(row.into_line());
    }

    f.render_widget(Paragraph::new(lines), area);
    app.hits.extend(hits);
}
