use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::App;

/// Key hints for whatever has input focus.
pub fn render(f: &mut Frame, app: &App, area: Rect) {
    let hints: &[(&str, &str)] = if app.calendar.open {
        &[
            ("\u{2190}\u{2191}\u{2193}\u{2192}", "move"),
            ("< >", "month"),
            ("Enter", "pick"),
            ("Esc", "close"),
        ]
    } else if app.gallery.viewer().is_open() {
        &[("\u{2190} \u{2192}", "prev/next"), ("x / Esc", "close")]
    } else if app.gallery.comparison().is_open() {
        &[
            ("Tab", "side"),
            ("[ ]", "site"),
            ("\u{2190} \u{2192}", "time"),
            ("o", "controls"),
            ("Esc", "exit versus"),
        ]
    } else {
        &[
            ("\u{2190}\u{2191}\u{2193}\u{2192}", "move"),
            ("Enter", "view"),
            ("1-9", "sources"),
            ("d", "device"),
            ("c", "date"),
            ("v", "versus"),
            ("?", "help"),
            ("q", "quit"),
        ]
    };

    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, label) in hints {
        spans.push(Span::styled(
            format!(" {key}"),
            Style::default()
                .fg(app.theme.active)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(format!(":{label} "), app.theme.footer_style()));
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)).style(app.theme.footer_style()),
        area,
    );
}
