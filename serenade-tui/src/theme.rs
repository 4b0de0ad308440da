//! Valentine theme for Serenade

use ratatui::style::{Color, Modifier, Style};

/// Confetti palette, uniform pick per particle
pub const CONFETTI_COLORS: [Color; 5] = [
    Color::Rgb(0xff, 0x8d, 0xb7),
    Color::Rgb(0xff, 0xb3, 0xd1),
    Color::Rgb(0xff, 0xd6, 0xe8),
    Color::Rgb(0xf4, 0xc6, 0xdf),
    Color::Rgb(0xff, 0xc2, 0xe2),
];

/// Theme configuration for the UI
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: &'static str,
    /// Primary foreground color (text, labels)
    pub fg: Color,
    /// Dimmed foreground (secondary text, idle bars)
    pub fg_dim: Color,
    /// Background color
    pub bg: Color,
    /// Highlight color (active lyric line, Yes button)
    pub highlight: Color,
    /// Accent color (live spectrum bars, progress)
    pub accent: Color,
    /// Danger color (the No button)
    pub danger: Color,
}

/// Default pink card theme
pub const VALENTINE: Theme = Theme {
    name: "VALENTINE",
    fg: Color::Rgb(0xff, 0xd6, 0xe8),
    fg_dim: Color::Rgb(0xa8, 0x6e, 0x88),
    bg: Color::Rgb(0x24, 0x0d, 0x18),
    highlight: Color::Rgb(0xff, 0x8d, 0xb7),
    accent: Color::Rgb(0xff, 0x8d, 0xb7),
    danger: Color::Rgb(0xc9, 0x5d, 0x7e),
};

impl Theme {
    /// Style for normal text
    pub fn normal(&self) -> Style {
        Style::default().fg(self.fg).bg(self.bg)
    }

    /// Style for dimmed text
    pub fn dim(&self) -> Style {
        Style::default().fg(self.fg_dim)
    }

    /// Style for borders
    pub fn border(&self) -> Style {
        Style::default().fg(self.fg_dim)
    }

    /// Style for panel titles
    pub fn title(&self) -> Style {
        Style::default().fg(self.highlight).add_modifier(Modifier::BOLD)
    }

    /// Solid tint for live spectrum bars
    pub fn spectrum_live(&self) -> Style {
        Style::default().fg(self.accent)
    }

    /// Translucent tint for the idle placeholder bars
    pub fn spectrum_idle(&self) -> Style {
        Style::default().fg(self.fg_dim).add_modifier(Modifier::DIM)
    }

    /// Style for the primary (first language) lyric line
    pub fn lyric_primary(&self) -> Style {
        Style::default().fg(self.fg).add_modifier(Modifier::BOLD)
    }

    /// Style for the secondary (second language) lyric line
    pub fn lyric_secondary(&self) -> Style {
        Style::default().fg(self.fg_dim)
    }

    /// Style for the Yes button
    pub fn yes_button(&self) -> Style {
        Style::default()
            .fg(self.bg)
            .bg(self.highlight)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for the evasive No button
    pub fn no_button(&self) -> Style {
        Style::default().fg(self.fg).bg(self.danger)
    }
}

impl Default for Theme {
    fn default() -> Self {
        VALENTINE.clone()
    }
}
