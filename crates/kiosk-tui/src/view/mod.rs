pub mod calendar;
pub mod footer;
pub mod gallery;
pub mod header;
pub mod help;
pub mod quit_confirm;
pub mod sources;
pub mod versus;
pub mod viewer;

use chrono::Local;
use ratatui::layout::{Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};

use kiosk_core::Capture;

/// Spinner frames for animated progress indication.
const SPINNER_FRAMES: &[char] = &[
    '\u{280B}', '\u{2819}', '\u{2839}', '\u{2838}', '\u{283C}', '\u{2834}', '\u{2826}', '\u{2827}',
    '\u{2807}', '\u{280F}',
];

/// Get the current spinner character based on a tick counter.
pub fn spinner_char(tick: usize) -> char {
    SPINNER_FRAMES[tick % SPINNER_FRAMES.len()]
}

/// Truncate a string to fit in `max_width` columns, appending "\u{2026}" if truncated.
pub fn truncate(s: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    if s.chars().count() <= max_width {
        return s.to_string();
    }
    let mut truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
    truncated.push('\u{2026}');
    truncated
}

/// Capture time as `HH:MM` in the viewer's local zone.
pub fn local_time(capture: &Capture) -> String {
    capture
        .captured_at
        .with_timezone(&Local)
        .format("%H:%M")
        .to_string()
}

/// Create a centered rectangle of the given width (columns) and height (rows).
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .split(area);
    Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .split(vertical[0])[0]
}

/// Lays spans out left to right on a single row and reports where each one
/// landed, so callers can register click targets.
pub struct SpanRow<'a> {
    spans: Vec<Span<'a>>,
    x: u16,
    y: u16,
    right: u16,
}

impl<'a> SpanRow<'a> {
    pub fn new(area: Rect) -> Self {
        Self {
            spans: Vec::new(),
            x: area.x,
            y: area.y,
            right: area.x.saturating_add(area.width),
        }
    }

    /// Append a span. Returns its rectangle, or `None` if it was cut off.
    pub fn push(&mut self, text: impl Into<String>, style: Style) -> Option<Rect> {
        let span = Span::styled(text.into(), style);
        let width = u16::try_from(span.width()).unwrap_or(u16::MAX);
        if self.x.saturating_add(width) > self.right {
            self.x = self.right;
            return None;
        }
        let rect = Rect::new(self.x, self.y, width, 1);
        self.x += width;
        self.spans.push(span);
        Some(rect)
    }

    pub fn into_line(self) -> Line<'a> {
        Line::from(self.spans)
    }
}
