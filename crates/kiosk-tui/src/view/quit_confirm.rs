use ratatui::Frame;
use ratatui::layout::Alignment;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::centered_rect;
use crate::theme::Theme;

pub fn render(f: &mut Frame, theme: &Theme) {
    let popup = centered_rect(34, 6, f.area());

    let bold = |color: Color| Style::default().fg(color).add_modifier(Modifier::BOLD);
    let body = vec![
        Line::default(),
        Line::styled("Close the gallery?", bold(theme.text)),
        Line::default(),
        Line::from(vec![
            Span::styled("[q]", bold(theme.danger)),
            Span::styled(" quit  ", Style::default().fg(theme.dim)),
            Span::styled("[Esc]", bold(theme.accent)),
            Span::styled(" keep browsing", Style::default().fg(theme.dim)),
        ]),
    ];

    let frame = Block::new()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.danger))
        .title(" Quit ");

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(body).alignment(Alignment::Center).block(frame),
        popup,
    );
}
