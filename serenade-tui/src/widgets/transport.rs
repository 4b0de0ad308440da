//! Transport widget - play state, progress, clock labels, volume

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Span,
    widgets::{Block, Borders, Widget},
};
use serenade_audio::{PlaybackState, PlayerSnapshot};

/// Format seconds as `m:ss`; non-finite or negative input renders `0:00`
pub fn format_clock(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return "0:00".to_string();
    }
    let minutes = (seconds / 60.0).floor() as u64;
    let rest = (seconds % 60.0).floor() as u64;
    format!("{}:{:02}", minutes, rest)
}

/// Player panel: status line, progress bar, volume
pub struct TransportWidget<'a> {
    snapshot: &'a PlayerSnapshot,
    theme: &'a Theme,
}

impl<'a> TransportWidget<'a> {
    pub fn new(snapshot: &'a PlayerSnapshot, theme: &'a Theme) -> Self {
        Self { snapshot, theme }
    }

    fn status_line(&self) -> (&'static str, &'static str) {
        match self.snapshot.playback {
            PlaybackState::Playing => ("⏸", "재생 중"),
            PlaybackState::Paused => ("▶", "일시정지"),
            PlaybackState::Stopped => ("▶", "정지"),
        }
    }
}

impl Widget for TransportWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border())
            .title(Span::styled(" PLAYER ", self.theme.title()));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < 20 || inner.height < 3 {
            return;
        }

        // Status + track name
        let (button, status) = self.status_line();
        let name = self
            .snapshot
            .track_name
            .as_deref()
            .unwrap_or("(no track)");
        let line = format!("{} {}  {}", button, status, name);
        buf.set_string(inner.x + 1, inner.y, line, self.theme.normal());

        // Progress bar with clock labels
        let current = format_clock(self.snapshot.position);
        let total = format_clock(self.snapshot.duration);
        let clocks = format!("{} / {}", current, total);

        let bar_width = inner.width.saturating_sub(clocks.chars().count() as u16 + 4);
        let ratio = if self.snapshot.duration > 0.0 {
            (self.snapshot.position / self.snapshot.duration).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let filled = (ratio * bar_width as f64) as u16;

        let mut bar = String::with_capacity(bar_width as usize * 3);
        for i in 0..bar_width {
            bar.push(if i < filled { '━' } else { '─' });
        }
        buf.set_string(inner.x + 1, inner.y + 1, &bar, self.theme.spectrum_live());
        buf.set_string(
            inner.x + 2 + bar_width,
            inner.y + 1,
            clocks,
            self.theme.dim(),
        );

        // Volume and key hints
        let volume_pct = (self.snapshot.volume * 100.0).round() as u16;
        let hints = format!(
            "VOL {:3}%  ·  space play/pause  ←/→ seek  ↑/↓ volume",
            volume_pct
        );
        buf.set_string(inner.x + 1, inner.y + 2, hints, self.theme.dim());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock_basic() {
        assert_eq!(format_clock(0.0), "0:00");
        assert_eq!(format_clock(5.2), "0:05");
        assert_eq!(format_clock(62.5), "1:02");
        assert_eq!(format_clock(600.0), "10:00");
    }

    #[test]
    fn test_format_clock_non_finite() {
        assert_eq!(format_clock(f64::NAN), "0:00");
        assert_eq!(format_clock(f64::INFINITY), "0:00");
        assert_eq!(format_clock(-3.0), "0:00");
    }
}
