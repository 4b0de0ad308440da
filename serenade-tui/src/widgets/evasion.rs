//! Evasive button placement - hop away from the pointer, stay in bounds
//!
//! Placement runs in a virtual pixel space (terminal cells are too coarse
//! for the hop distances), then projects back to cells. The button area is
//! re-measured before every decision, never cached.

use crate::theme::Theme;
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Span,
    widgets::{Block, Borders, Widget},
};
use std::f32::consts::TAU;

/// Virtual pixels per cell for evasion geometry (typical glyph metrics)
pub const EVADE_CELL_PX_X: f32 = 8.0;
pub const EVADE_CELL_PX_Y: f32 = 16.0;

pub const YES_LABEL: &str = "[ Yes ]";
pub const NO_LABEL: &str = "[ No ]";

/// A point in virtual pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// A size in virtual pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

/// Placement constants
#[derive(Debug, Clone, Copy)]
pub struct PlacerConfig {
    /// Inner padding kept between the target and the area edge
    pub padding: f32,
    /// Minimum hop distance, so the target visibly jumps
    pub min_hop: f32,
    /// Maximum hop distance
    pub max_hop: f32,
}

impl Default for PlacerConfig {
    fn default() -> Self {
        Self {
            padding: 12.0,
            min_hop: 70.0,
            max_hop: 140.0,
        }
    }
}

/// Compute a new top-left position for the target, offset from the
/// reference point by a random polar hop and clamped into the area
///
/// When either axis has no usable range the target is centered on both axes
/// instead, so a valid in-bounds position always exists; this function has
/// no failure mode.
pub fn place_away_from(
    reference: Point,
    target: Size,
    area: Size,
    config: PlacerConfig,
    rng: &mut impl Rng,
) -> Point {
    let angle = rng.random_range(0.0..TAU);
    let distance = rng.random_range(config.min_hop..config.max_hop);

    let mut next_x = reference.x + angle.cos() * distance - target.width / 2.0;
    let mut next_y = reference.y + angle.sin() * distance - target.height / 2.0;

    let max_x = area.width - target.width - config.padding;
    let max_y = area.height - target.height - config.padding;

    if max_x <= config.padding || max_y <= config.padding {
        next_x = (area.width - target.width) / 2.0;
        next_y = (area.height - target.height) / 2.0;
    } else {
        next_x = next_x.clamp(config.padding, max_x);
        next_y = next_y.clamp(config.padding, max_y);
    }

    Point {
        x: next_x,
        y: next_y,
    }
}

/// Screen rect of the Yes button within the area's inner rect
pub fn yes_button_rect(inner: Rect) -> Rect {
    let width = YES_LABEL.chars().count() as u16;
    let x = inner
        .x
        .saturating_add(inner.width / 2)
        .saturating_sub(width + 1);
    let y = inner.y + inner.height / 2;
    Rect::new(x, y.min(inner.bottom().saturating_sub(1)), width, 1)
}

/// Screen rect of the No button: its evaded cell position, or the default
/// slot beside the Yes button
pub fn no_button_rect(inner: Rect, placed: Option<(u16, u16)>) -> Rect {
    let width = NO_LABEL.chars().count() as u16;
    match placed {
        Some((col, row)) => {
            let col = col.min(inner.width.saturating_sub(width));
            let row = row.min(inner.height.saturating_sub(1));
            Rect::new(inner.x + col, inner.y + row, width, 1)
        }
        None => {
            let x = inner.x.saturating_add(inner.width / 2).saturating_add(2);
            let y = inner.y + inner.height / 2;
            Rect::new(x, y.min(inner.bottom().saturating_sub(1)), width, 1)
        }
    }
}

/// The question card with its two buttons
pub struct ButtonAreaWidget<'a> {
    theme: &'a Theme,
    question: &'a str,
    no_position: Option<(u16, u16)>,
}

impl<'a> ButtonAreaWidget<'a> {
    pub fn new(theme: &'a Theme, question: &'a str, no_position: Option<(u16, u16)>) -> Self {
        Self {
            theme,
            question,
            no_position,
        }
    }
}

impl Widget for ButtonAreaWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border())
            .title(Span::styled(" SERENADE ", self.theme.title()));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width < 10 || inner.height < 3 {
            return;
        }

        // Question, centered above the buttons
        let question_width = self.question.chars().count() as u16;
        if question_width <= inner.width {
            let qx = inner.x + (inner.width - question_width) / 2;
            let qy = inner.y + inner.height / 2 - 1;
            buf.set_string(qx, qy, self.question, self.theme.normal());
        }

        let yes = yes_button_rect(inner);
        buf.set_string(yes.x, yes.y, YES_LABEL, self.theme.yes_button());

        let no = no_button_rect(inner, self.no_position);
        buf.set_string(no.x, no.y, NO_LABEL, self.theme.no_button());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn area() -> Size {
        Size {
            width: 640.0,
            height: 480.0,
        }
    }

    fn target() -> Size {
        Size {
            width: 48.0,
            height: 16.0,
        }
    }

    #[test]
    fn test_placement_always_in_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        let config = PlacerConfig::default();

        for i in 0..1000 {
            let reference = Point {
                x: (i % 640) as f32,
                y: (i % 480) as f32,
            };
            let placed = place_away_from(reference, target(), area(), config, &mut rng);

            assert!(placed.x >= config.padding);
            assert!(placed.x <= area().width - target().width - config.padding);
            assert!(placed.y >= config.padding);
            assert!(placed.y <= area().height - target().height - config.padding);
        }
    }

    #[test]
    fn test_degenerate_area_centers_target() {
        let mut rng = StdRng::seed_from_u64(11);
        let tiny = Size {
            width: 60.0,
            height: 20.0,
        };
        let reference = Point { x: 30.0, y: 10.0 };

        for _ in 0..50 {
            let placed =
                place_away_from(reference, target(), tiny, PlacerConfig::default(), &mut rng);
            assert_eq!(placed.x, (tiny.width - target().width) / 2.0);
            assert_eq!(placed.y, (tiny.height - target().height) / 2.0);
        }
    }

    #[test]
    fn test_degenerate_single_axis_still_centers() {
        let mut rng = StdRng::seed_from_u64(5);
        // Wide but too short for any padded placement
        let flat = Size {
            width: 640.0,
            height: 30.0,
        };
        let placed = place_away_from(
            Point { x: 320.0, y: 15.0 },
            target(),
            flat,
            PlacerConfig::default(),
            &mut rng,
        );
        assert_eq!(placed.x, (flat.width - target().width) / 2.0);
        assert_eq!(placed.y, (flat.height - target().height) / 2.0);
    }

    #[test]
    fn test_button_rects_stay_inside_inner_area() {
        let inner = Rect::new(2, 2, 40, 10);
        let yes = yes_button_rect(inner);
        assert!(yes.x >= inner.x && yes.right() <= inner.right());

        let default_no = no_button_rect(inner, None);
        assert!(default_no.right() <= inner.right());

        let placed_no = no_button_rect(inner, Some((200, 200)));
        assert!(placed_no.right() <= inner.right());
        assert!(placed_no.bottom() <= inner.bottom());
    }
}
