//! Spectrum bars - idle placeholder and live frequency display
//!
//! Bar geometry is computed on a virtual pixel surface and projected onto
//! terminal cells with partial-block glyphs. The idle pattern is a pure
//! function of the surface dimensions; the live pattern is rebuilt every
//! frame from a freshly read frequency sample.

use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Span,
    widgets::{Block, Borders, Widget},
};
use serenade_analysis::FrequencySample;

/// Characters for vertical bar rendering (8 levels)
const BAR_CHARS: [char; 9] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

/// Bars in the idle placeholder pattern
pub const IDLE_BAR_COUNT: usize = 28;

/// Virtual pixels per cell when projecting bar geometry
const CELL_PX_X: f32 = 4.0;
const CELL_PX_Y: f32 = 8.0;

/// One bar's geometry on the virtual pixel surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

/// Idle pattern: 28 evenly spaced bars whose heights repeat a period-6
/// cycle of increasing magnitude
///
/// Deterministic: no time or sample input, so the same dimensions always
/// produce the same layout.
pub fn idle_bars(width: f32, _height: f32) -> Vec<Bar> {
    let bar_width = (width / IDLE_BAR_COUNT as f32) * 0.6;
    let mut x = 8.0;

    (0..IDLE_BAR_COUNT)
        .map(|i| {
            let bar = Bar {
                x,
                width: bar_width,
                height: 8.0 + (i % 6) as f32 * 4.0,
            };
            x += bar_width + 6.0;
            bar
        })
        .collect()
}

/// Live pattern: one bar per frequency bin, height proportional to the
/// bin magnitude scaled to the surface height minus a fixed margin
pub fn live_bars(sample: &FrequencySample, width: f32, height: f32) -> Vec<Bar> {
    let bar_width = (width / sample.bins.len() as f32) * 1.6;
    let mut x = 0.0;

    sample
        .bins
        .iter()
        .map(|&value| {
            let bar = Bar {
                x,
                width: bar_width,
                height: value as f32 / 255.0 * (height - 10.0),
            };
            x += bar_width + 2.0;
            bar
        })
        .collect()
}

/// Widget drawing either the idle or the live bar pattern
pub struct SpectrumWidget<'a> {
    sample: Option<&'a FrequencySample>,
    theme: &'a Theme,
}

impl<'a> SpectrumWidget<'a> {
    /// Decorative placeholder shown while nothing plays
    pub fn idle(theme: &'a Theme) -> Self {
        Self {
            sample: None,
            theme,
        }
    }

    /// Live display fed by this frame's sample
    pub fn live(sample: &'a FrequencySample, theme: &'a Theme) -> Self {
        Self {
            sample: Some(sample),
            theme,
        }
    }

    /// Bottom-to-top column glyphs for a bar fraction (0.0 - 1.0)
    fn render_bar(fraction: f32, height: u16) -> Vec<char> {
        let total_levels = (fraction.clamp(0.0, 1.0) * 8.0 * height as f32) as usize;
        let full_blocks = total_levels / 8;
        let partial = total_levels % 8;

        let mut bar = Vec::with_capacity(height as usize);
        for row in 0..height as usize {
            let glyph = if row < full_blocks {
                '█'
            } else if row == full_blocks && partial > 0 {
                BAR_CHARS[partial]
            } else {
                ' '
            };
            bar.push(glyph);
        }

        bar
    }
}

impl Widget for SpectrumWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border())
            .title(Span::styled(" WAVEFORM ", self.theme.title()));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height < 2 || inner.width < 4 {
            return;
        }

        let surface_w = inner.width as f32 * CELL_PX_X;
        let surface_h = inner.height as f32 * CELL_PX_Y;

        let (bars, style) = match self.sample {
            Some(sample) => (
                live_bars(sample, surface_w, surface_h),
                self.theme.spectrum_live(),
            ),
            None => (idle_bars(surface_w, surface_h), self.theme.spectrum_idle()),
        };

        for bar in bars {
            let col_start = (bar.x / CELL_PX_X) as u16;
            let col_end = (((bar.x + bar.width) / CELL_PX_X).ceil() as u16).max(col_start + 1);
            if col_start >= inner.width {
                continue;
            }

            let fraction = bar.height / surface_h;
            let column = Self::render_bar(fraction, inner.height);

            for col in col_start..col_end.min(inner.width) {
                for (row, &glyph) in column.iter().enumerate() {
                    if glyph == ' ' {
                        continue;
                    }
                    let y = inner.y + inner.height - 1 - row as u16;
                    buf[(inner.x + col, y)].set_char(glyph).set_style(style);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_bars_are_deterministic() {
        let first = idle_bars(320.0, 80.0);
        let second = idle_bars(320.0, 80.0);
        assert_eq!(first, second);
        assert_eq!(first.len(), IDLE_BAR_COUNT);
    }

    #[test]
    fn test_idle_bar_heights_cycle_with_period_six() {
        let bars = idle_bars(320.0, 80.0);
        assert_eq!(bars[0].height, 8.0);
        assert_eq!(bars[1].height, 12.0);
        assert_eq!(bars[5].height, 28.0);
        assert_eq!(bars[6].height, 8.0);
        assert_eq!(bars[12].height, 8.0);
    }

    #[test]
    fn test_idle_bars_advance_left_to_right() {
        let bars = idle_bars(320.0, 80.0);
        assert_eq!(bars[0].x, 8.0);
        assert!(bars.windows(2).all(|w| w[1].x > w[0].x));
    }

    #[test]
    fn test_live_bars_one_per_bin() {
        let sample = FrequencySample::default();
        let bars = live_bars(&sample, 320.0, 80.0);
        assert_eq!(bars.len(), sample.bins.len());
        assert!(bars.iter().all(|b| b.height == 0.0));
    }

    #[test]
    fn test_live_bar_height_scales_with_magnitude() {
        let mut sample = FrequencySample::default();
        sample.bins[0] = 255;
        sample.bins[1] = 51; // a fifth of full scale

        let bars = live_bars(&sample, 320.0, 80.0);
        assert_eq!(bars[0].height, 70.0); // height - 10 margin
        assert!((bars[1].height - 14.0).abs() < 1e-4);
    }
}
