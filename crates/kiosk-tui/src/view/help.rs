use ratatui::Frame;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::centered_rect;
use crate::theme::Theme;

/// Render the help overlay as a centered popup.
pub fn render(f: &mut Frame, theme: &Theme) {
    let popup = centered_rect(60, 34, f.area());

    let lines = vec![
        Line::from(Span::styled(
            " Keyboard Shortcuts ",
            theme.header_style(),
        )),
        Line::from(""),
        section_header("Gallery", theme),
        key_line("\u{2190}\u{2191}\u{2193}\u{2192} / hjkl", "Move between captures", theme),
        key_line("Enter / click", "Open the capture", theme),
        key_line("1-9 / click", "Show or hide a source", theme),
        key_line("s", "Show sources (narrow layout)", theme),
        key_line("d", "Switch desktop / mobile", theme),
        key_line("c", "Pick a date", theme),
        key_line("r", "Reload the day", theme),
        Line::from(""),
        section_header("Viewer", theme),
        key_line("\u{2190} / \u{2192}", "Previous / next capture", theme),
        key_line("x / Esc", "Close", theme),
        key_line("click outside", "Close", theme),
        Line::from(""),
        section_header("Versus", theme),
        key_line("v", "Enter / leave versus mode", theme),
        key_line("Tab", "Switch side", theme),
        key_line("[ / ]", "Previous / next site", theme),
        key_line("\u{2190} / \u{2192}", "Earlier / later capture", theme),
        key_line("o", "Show / hide controls", theme),
        Line::from(""),
        section_header("Date picker", theme),
        key_line("\u{2190}\u{2191}\u{2193}\u{2192}", "Move by day / week", theme),
        key_line("< / >", "Previous / next month", theme),
        key_line("Enter", "Pick the day", theme),
        Line::from(""),
        section_header("Global", theme),
        key_line("?", "Toggle this help", theme),
        key_line("q", "Quit", theme),
        key_line("Ctrl+c", "Force quit", theme),
    ];

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.active))
                .title(" Help "),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup);
    f.render_widget(paragraph, popup);
}

fn section_header<'a>(title: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(Span::styled(
        format!("  {title}"),
        Style::default()
            .fg(theme.active)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
    ))
}

fn key_line<'a>(key: &'a str, desc: &'a str, theme: &Theme) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            format!("    {key:<22}"),
            Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
        ),
        Span::styled(desc, Style::default().fg(theme.dim)),
    ])
}
