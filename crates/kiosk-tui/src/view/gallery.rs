use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use kiosk_core::image::image_view;
use kiosk_core::{Capture, GalleryIssue, ImageResolver, ImageView, ImageWidth, LoadState};

use super::{SpanRow, local_time, spinner_char, truncate};
use crate::app::{App, Hit};
use crate::model::grid::GridCursor;

/// Each source takes a title line, a chip line and a spacer.
const ROW_HEIGHT: u16 = 3;

fn chip_label(capture: &Capture, preview: &ImageView) -> String {
    match preview {
        ImageView::Image { .. } => format!(" {} ", local_time(capture)),
        ImageView::Missing => format!(" {} NO SIGNAL ", local_time(capture)),
    }
}

/// Status text shown instead of rows, if any.
fn status_message(app: &App) -> Option<(String, Style)> {
    let theme = &app.theme;
    if let Some(GalleryIssue::DataUnavailable { reason }) = app.gallery.issue() {
        let color = match app.gallery.load_state() {
            LoadState::Failed(_) => theme.danger,
            _ => theme.dim,
        };
        return Some((reason, Style::default().fg(color)));
    }
    match app.gallery.load_state() {
        LoadState::Idle => Some((String::new(), Style::default())),
        LoadState::Loading => Some((
            format!("{} Syncing timestamps...", spinner_char(app.tick)),
            Style::default().fg(theme.spinner),
        )),
        LoadState::Loaded if app.gallery.flat().is_empty() => Some((
            "Toggle a source above to begin.".to_string(),
            Style::default().fg(theme.dim),
        )),
        LoadState::Loaded | LoadState::Failed(_) => None,
    }
}

/// First chip index to draw so that `col` stays on screen.
fn chip_window(
    group: &[Capture],
    col: usize,
    width: usize,
    resolver: &dyn ImageResolver,
) -> usize {
    let mut start = col.min(group.len().saturating_sub(1));
    let mut used = 0;
    while let Some(capture) = group.get(start) {
        let preview = image_view(capture, ImageWidth::Preview, resolver);
        used += chip_label(capture, &preview).chars().count() + 1;
        if used > width || start == 0 {
            break;
        }
        start -= 1;
    }
    if used > width && start < col { start + 1 } else { start }
}

/// Per-source rows of time chips.
pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
    if let Some((message, style)) = status_message(app) {
        let y = area.y + area.height / 3;
        let line_area = Rect::new(area.x, y.min(area.bottom().saturating_sub(1)), area.width, 1);
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(message, style))).alignment(Alignment::Center),
            line_area,
        );
        return;
    }

    let theme = &app.theme;
    let cursor = app.grid;
    let visible_rows = (area.height / ROW_HEIGHT).max(1) as usize;
    let offset = cursor.row.saturating_sub(visible_rows - 1);
    let mut hits = Vec::new();

    for (i, (source, group)) in app
        .gallery
        .visible_groups()
        .enumerate()
        .skip(offset)
        .take(visible_rows)
    {
        let y = area.y + ((i - offset) as u16) * ROW_HEIGHT;
        let is_cursor_row = i == cursor.row;

        let title_style = if is_cursor_row {
            Style::default().fg(theme.active).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD)
        };
        let mut title = SpanRow::new(Rect::new(area.x, y, area.width, 1));
        title.push(
            format!(" {} ", truncate(source, area.width.saturating_sub(10) as usize)),
            title_style,
        );
        title.push(
            format!("[{}]", group.len()),
            Style::default().fg(theme.chip_on_fg).bg(theme.chip_on_bg),
        );
        f.render_widget(Paragraph::new(title.into_line()), Rect::new(area.x, y, area.width, 1));

        let chip_y = y + 1;
        if chip_y >= area.bottom() {
            break;
        }
        let chip_area = Rect::new(area.x + 1, chip_y, area.width.saturating_sub(1), 1);
        let focus_col = if is_cursor_row { cursor.col } else { 0 };
        let start = chip_window(group, focus_col, chip_area.width as usize, &app.resolver);
        let mut chips = SpanRow::new(chip_area);
        let mut cursor_preview = None;
        for (col, capture) in group.iter().enumerate().skip(start) {
            let preview = image_view(capture, ImageWidth::Preview, &app.resolver);
            let mut style = if preview.has_image() {
                Style::default().fg(theme.text)
            } else {
                Style::default().fg(theme.dim).add_modifier(Modifier::ITALIC)
            };
            if is_cursor_row && col == cursor.col {
                style = theme.highlight_style().fg(theme.active);
                cursor_preview = preview.url().map(str::to_string);
            }
            match chips.push(chip_label(capture, &preview), style) {
                Some(rect) => hits.push((rect, Hit::Cell(GridCursor { row: i, col }))),
                None => break,
            }
            chips.push(" ", Style::default());
        }
        f.render_widget(Paragraph::new(chips.into_line()), chip_area);

        // The spacer under the cursor row carries the thumbnail URL.
        let preview_y = y + 2;
        if let Some(url) = cursor_preview
            && preview_y < area.bottom()
        {
            let width = area.width.saturating_sub(2);
            f.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    truncate(&url, width as usize),
                    Style::default().fg(theme.dim),
                ))),
                Rect::new(area.x + 1, preview_y, width, 1),
            );
        }
    }

    app.hits.extend(hits);
}
