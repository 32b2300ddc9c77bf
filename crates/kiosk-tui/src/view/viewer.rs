use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use kiosk_core::ImageWidth;
use kiosk_core::image::image_view;

use super::{centered_rect, local_time};
use crate::app::{App, Hit};

const CLOSE_LABEL: &str = " [x] ";

/// Focused capture as a centered popup over the gallery.
pub fn render(f: &mut Frame, app: &mut App) {
    let Some(record) = app.gallery.viewer().focused().cloned() else {
        return;
    };
    let area = f.area();
    let popup = centered_rect(
        area.width.saturating_sub(4).min(96),
        area.height.saturating_sub(2).min(12),
        area,
    );
    let theme = &app.theme;
    let flat = app.gallery.flat();
    let cursor = app.gallery.viewer().cursor();

    let position = cursor
        .position(flat)
        .map(|(k, n)| format!("{k} / {n}"))
        .unwrap_or_else(|| "hidden source".to_string());
    let enabled = Style::default().fg(theme.active).add_modifier(Modifier::BOLD);
    let disabled = Style::default().fg(theme.dim).add_modifier(Modifier::DIM);
    let prev_style = if cursor.can_previous(flat) { enabled } else { disabled };
    let next_style = if cursor.can_next(flat) { enabled } else { disabled };

    let image_line = match image_view(&record, ImageWidth::Full, &app.resolver).url() {
        Some(url) => Line::from(Span::styled(
            url.to_string(),
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::UNDERLINED),
        )),
        None => Line::from(Span::styled(
            "NO SIGNAL",
            Style::default().fg(theme.danger).add_modifier(Modifier::BOLD),
        )),
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(
                record.source.clone(),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {}", local_time(&record)),
                Style::default().fg(theme.accent),
            ),
            Span::styled(format!("  {position}"), Style::default().fg(theme.dim)),
        ]),
        Line::from(""),
        image_line,
        Line::from(""),
        Line::from(vec![
            Span::styled("\u{25c0} prev", prev_style),
            Span::raw("      "),
            Span::styled("next \u{25b6}", next_style),
        ])
        .alignment(Alignment::Center),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.active))
        .title(" Capture ")
        .title(Line::from(CLOSE_LABEL).alignment(Alignment::Right));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);

    let close_width = CLOSE_LABEL.len() as u16;
    let close = Rect::new(
        (popup.x + popup.width).saturating_sub(close_width + 1),
        popup.y,
        close_width,
        1,
    );
    app.hits.clear();
    app.hits.push((close, Hit::CloseViewer));
    app.last_popup_area = Some(popup);
}
