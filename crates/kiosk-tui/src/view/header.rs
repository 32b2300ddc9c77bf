use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Paragraph;

use kiosk_core::DeviceClass;

use super::SpanRow;
use crate::app::{App, Hit};

/// Title bar: name, versus button, device switch and the active date.
pub fn render(f: &mut Frame, app: &mut App, area: Rect) {
    let theme = &app.theme;
    let mut row = SpanRow::new(area);
    let mut hits = Vec::new();

    row.push(" KIOSK247 ", theme.header_style());
    row.push(" ", Style::default());

    if app.versus_available()
        && let Some(rect) = row.push(
            " \u{2694} Versus [v] ",
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
    {
        hits.push((rect, Hit::VersusButton));
        row.push(" ", Style::default());
    }

    let device = app.gallery.device();
    for class in [DeviceClass::Desktop, DeviceClass::Mobile] {
        let label = match class {
            DeviceClass::Desktop => " Desktop ",
            DeviceClass::Mobile => " Mobile ",
        };
        if let Some(rect) = row.push(label, theme.chip_style(class == device)) {
            hits.push((rect, Hit::DeviceToggle));
        }
    }
    row.push("  ", Style::default());

    let date = format!(" {} [c] ", app.gallery.day().format("%a %d %b %Y"));
    if let Some(rect) = row.push(date, Style::default().fg(theme.text).bg(theme.highlight_bg)) {
        hits.push((rect, Hit::DateButton));
    }

    f.render_widget(Paragraph::new(row.into_line()), area);
    app.hits.extend(hits);
}
