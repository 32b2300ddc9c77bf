use ratatui::style::{Color, Modifier, Style};

/// Colors used across the gallery views.
pub struct Theme {
    pub accent: Color,
    pub danger: Color,
    pub warning: Color,
    /// Underline for date-picker days that have captures.
    pub has_data: Color,
    pub header_fg: Color,
    pub header_bg: Color,
    pub border: Color,
    pub text: Color,
    pub dim: Color,
    pub highlight_bg: Color,
    pub active: Color,
    pub chip_on_fg: Color,
    pub chip_on_bg: Color,
    pub spinner: Color,
    pub footer_fg: Color,
    pub footer_bg: Color,
}

const PHOSPHOR: Color = Color::Rgb(0, 210, 0);
const ELECTRIC: Color = Color::Rgb(60, 140, 255);
const NAVY: Color = Color::Rgb(30, 60, 120);
const SLATE: Color = Color::Rgb(120, 120, 140);

impl Theme {
    /// Green-on-black, the default.
    pub fn hacker() -> Self {
        Self {
            accent: PHOSPHOR,
            danger: Color::Red,
            warning: Color::Yellow,
            has_data: PHOSPHOR,
            header_fg: Color::Black,
            header_bg: PHOSPHOR,
            border: Color::DarkGray,
            text: Color::White,
            dim: Color::DarkGray,
            highlight_bg: Color::Rgb(30, 50, 30),
            active: Color::Cyan,
            chip_on_fg: Color::Black,
            chip_on_bg: PHOSPHOR,
            spinner: Color::Cyan,
            footer_fg: Color::DarkGray,
            footer_bg: Color::Reset,
        }
    }

    pub fn modern() -> Self {
        Self {
            accent: ELECTRIC,
            danger: Color::Rgb(255, 80, 80),
            warning: Color::Rgb(255, 200, 0),
            has_data: Color::Rgb(0, 200, 80),
            header_fg: Color::White,
            header_bg: NAVY,
            border: Color::Rgb(60, 60, 80),
            text: Color::White,
            dim: SLATE,
            highlight_bg: Color::Rgb(30, 40, 80),
            active: ELECTRIC,
            chip_on_fg: Color::White,
            chip_on_bg: NAVY,
            spinner: ELECTRIC,
            footer_fg: SLATE,
            footer_bg: Color::Reset,
        }
    }

    /// Look a theme up by name; unknown names fall back to `hacker`.
    pub fn by_name(name: &str) -> Self {
        match name {
            "modern" => Self::modern(),
            _ => Self::hacker(),
        }
    }

    pub fn header_style(&self) -> Style {
        Style::default()
            .fg(self.header_fg)
            .bg(self.header_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn highlight_style(&self) -> Style {
        Style::default()
            .bg(self.highlight_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    pub fn footer_style(&self) -> Style {
        Style::default().fg(self.footer_fg).bg(self.footer_bg)
    }

    /// Style of a toggle chip (source chips, device switch).
    pub fn chip_style(&self, on: bool) -> Style {
        if on {
            Style::default()
                .fg(self.chip_on_fg)
                .bg(self.chip_on_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.dim)
        }
    }
}
