use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use kiosk_core::{ImageView, Readiness, Side};

use super::{SpanRow, local_time, truncate};
use crate::app::{App, Hit};

/// Full-screen side-by-side comparison.
pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
    f.render_widget(Clear, area);
    app.hits.clear();

    let narrow = app.is_narrow();
    let controls = app.gallery.comparison().show_controls();
    let [title_area, body_area] =
        Layout::vertical([Constraint::Length(2), Constraint::Min(3)]).areas(area);
    render_title(f, app, title_area);

    if narrow {
        let [tabs_area, panel_area, sheet_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(if controls { 10 } else { 0 }),
        ])
        .areas(body_area);
        render_tabs(f, app, tabs_area);
        let side = app.gallery.comparison().active_side();
        render_slot(f, app, side, panel_area);
        if controls {
            render_controls(f, app, sheet_area);
        }
    } else {
        let [panels_area, sidebar_area] = Layout::horizontal([
            Constraint::Min(40),
            Constraint::Length(if controls { 34 } else { 0 }),
        ])
        .areas(body_area);
        let [left_area, right_area] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(panels_area);
        render_slot(f, app, Side::Left, left_area);
        render_slot(f, app, Side::Right, right_area);
        if controls {
            render_controls(f, app, sidebar_area);
        }
    }
}

fn render_title(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let status = match app.gallery.comparison().readiness(&app.resolver) {
        Readiness::Ready { .. } => Span::styled(" both sides ready ", Style::default().fg(theme.accent)),
        Readiness::NotReady => Span::styled(
            " pick a site and time on both sides ",
            Style::default().fg(theme.warning),
        ),
    };
    let lines = vec![
        Line::from(vec![
            Span::styled(" VERSUS ", theme.header_style()),
            Span::raw(" "),
            Span::styled(
                app.gallery.day().format("%a %d %b %Y").to_string(),
                Style::default().fg(theme.text),
            ),
            Span::raw("  "),
            status,
        ]),
        Line::from(""),
    ];
    f.render_widget(Paragraph::new(lines), area);
}

fn render_tabs(f: &mut Frame, app: &mut App, area: Rect) {
    let active = app.gallery.comparison().active_side();
    let mut row = SpanRow::new(area);
    let mut hits = Vec::new();
    for side in [Side::Left, Side::Right] {
        let label = format!(" {} ", side.label());
        if let Some(rect) = row.push(label, app.theme.chip_style(side == active)) {
            hits.push((rect, Hit::SideTab(side)));
        }
        row.push(" ", Style::default());
    }
    f.render_widget(Paragraph::new(row.into_line()), area);
    app.hits.extend(hits);
}

fn render_slot(f: &mut Frame, app: &App, side: Side, area: Rect) {
    let theme = &app.theme;
    let comparison = app.gallery.comparison();
    let slot = comparison.slot(side);
    let is_active = comparison.active_side() == side;

    let title = match slot.site() {
        Some(site) => format!(" {}: {} ", side.label(), site),
        None => format!(" {} ", side.label()),
    };
    let border = if is_active { theme.active } else { theme.border };

    let mut lines = Vec::new();
    match (slot.site(), slot.record()) {
        (None, _) => lines.push(Line::from(Span::styled(
            "Select a site",
            Style::default().fg(theme.dim),
        ))),
        (Some(site), None) => lines.push(Line::from(Span::styled(
            format!("No captures for {site}"),
            Style::default().fg(theme.dim),
        ))),
        (Some(site), Some(record)) => {
            let group = app.gallery.timeline().group(site);
            let k = group.iter().position(|c| c.id == record.id).map_or(0, |i| i + 1);
            lines.push(Line::from(vec![
                Span::styled(
                    local_time(record),
                    Style::default().fg(theme.accent).add_modifier(Modifier::BOLD),
                ),
                Span::styled(format!("  {k} / {}", group.len()), Style::default().fg(theme.dim)),
            ]));
            lines.push(Line::from(""));
            lines.push(match comparison.image(side, &app.resolver) {
                ImageView::Image { url } => Line::from(Span::styled(
                    url,
                    Style::default()
                        .fg(theme.text)
                        .add_modifier(Modifier::UNDERLINED),
                )),
                ImageView::Missing => Line::from(Span::styled(
                    "NO SIGNAL",
                    Style::default().fg(theme.danger).add_modifier(Modifier::BOLD),
                )),
            });
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(title),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

/// Site list and time list for the active side.
fn render_controls(f: &mut Frame, app: &mut App, area: Rect) {
    let side = app.gallery.comparison().active_side();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.border_style())
        .title(format!(" Controls: {} ", side.label()));
    let inner = block.inner(area);
    f.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let theme = &app.theme;
    let timeline = app.gallery.timeline();
    let slot = app.gallery.comparison().slot(side);
    let mut hits = Vec::new();
    let mut lines = Vec::new();
    let mut y = inner.y;

    lines.push(Line::from(Span::styled(
        "Site  [ ]",
        Style::default().fg(theme.active).add_modifier(Modifier::BOLD),
    )));
    y += 1;
    for source in timeline.sources() {
        if y >= inner.bottom() {
            break;
        }
        let selected = slot.site() == Some(source);
        let mut row = SpanRow::new(Rect::new(inner.x, y, inner.width, 1));
        let label = truncate(source, inner.width.saturating_sub(3) as usize);
        let marker = if selected { "\u{25b8} " } else { "  " };
        if let Some(rect) = row.push(format!("{marker}{label}"), theme.chip_style(selected)) {
            hits.push((rect, Hit::Site { side, source: source.to_string() }));
        }
        lines.push(row.into_line());
        y += 1;
    }

    if let Some(site) = slot.site()
        && y + 2 <= inner.bottom()
    {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Time  \u{2190} \u{2192}",
            Style::default().fg(theme.active).add_modifier(Modifier::BOLD),
        )));
        y += 2;
        let mut row = SpanRow::new(Rect::new(inner.x, y, inner.width, 1));
        for record in timeline.group(site) {
            let style = theme.chip_style(slot.record().is_some_and(|r| r.id == record.id));
            let label = format!(" {} ", local_time(record));
            let rect = match row.push(label.clone(), style) {
                Some(rect) => Some(rect),
                None => {
                    // Wrap onto the next line while there is room.
                    y += 1;
                    if y >= inner.bottom() {
                        break;
                    }
                    let full = std::mem::replace(
                        &mut row,
                        SpanRow::new(Rect::new(inner.x, y, inner.width, 1)),
                    );
                    lines.push(full.into_line());
                    row.push(label, style)
                }
            };
            if let Some(rect) = rect {
                hits.push((rect, Hit::Record { side, id: record.id }));
            }
            row.push(" ", Style::default());
        }
        lines.push(row.into_line());
    }

    f.render_widget(Paragraph::new(lines), inner);
    app.hits.extend(hits);
}
