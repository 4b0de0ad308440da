//! Lyric line widget - two stacked bilingual lines

use crate::theme::Theme;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};
use serenade_lyrics::BilingualLine;

/// Centered display of the active lyric line
pub struct LyricWidget<'a> {
    line: &'a BilingualLine,
    theme: &'a Theme,
}

impl<'a> LyricWidget<'a> {
    pub fn new(line: &'a BilingualLine, theme: &'a Theme) -> Self {
        Self { line, theme }
    }

    fn centered_x(area: Rect, text: &str) -> u16 {
        let width = text.chars().count() as u16;
        area.x + area.width.saturating_sub(width) / 2
    }
}

impl Widget for LyricWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        if !self.line.primary.is_empty() {
            buf.set_string(
                Self::centered_x(area, &self.line.primary),
                area.y,
                &self.line.primary,
                self.theme.lyric_primary(),
            );
        }

        if area.height >= 2 && !self.line.secondary.is_empty() {
            buf.set_string(
                Self::centered_x(area, &self.line.secondary),
                area.y + 1,
                &self.line.secondary,
                self.theme.lyric_secondary(),
            );
        }
    }
}
