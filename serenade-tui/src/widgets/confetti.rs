//! Confetti field - a fixed-population arena of falling particles
//!
//! The simulation runs in a virtual pixel space; the widget projects it onto
//! terminal cells. Particles are never destroyed: a piece leaving the bottom
//! edge is recycled above the top with its other attributes intact, giving a
//! visually continuous fall with no end.

use crate::theme::CONFETTI_COLORS;
use rand::Rng;
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget};
use std::f32::consts::TAU;

/// Particles in one celebration
pub const PARTICLE_COUNT: usize = 180;

/// Virtual pixels per terminal cell
const CELL_PX_X: f32 = 2.0;
const CELL_PX_Y: f32 = 4.0;

/// Margin below the bottom edge before a particle recycles
const RECYCLE_MARGIN: f32 = 20.0;

/// Glyphs for a rotated rectangle, by rotation quadrant
const PIECE_GLYPHS: [char; 4] = ['▬', '◆', '▮', '◆'];

/// Drawing bounds in simulation pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldBounds {
    pub width: f32,
    pub height: f32,
}

impl FieldBounds {
    /// Bounds covering a terminal area
    pub fn for_area(area: Rect) -> Self {
        Self {
            width: (area.width as f32 * CELL_PX_X).max(1.0),
            height: (area.height as f32 * CELL_PX_Y).max(1.0),
        }
    }
}

/// One confetti piece
#[derive(Debug, Clone, Copy)]
pub struct ConfettiParticle {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub fall_speed: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
    pub drift: f32,
    /// Index into the confetti palette
    pub color: usize,
}

/// The fixed-capacity particle arena, updated in place each frame
pub struct ParticleField {
    particles: Vec<ConfettiParticle>,
    bounds: FieldBounds,
}

impl ParticleField {
    /// Spawn a fresh randomized population above the visible area
    pub fn spawn(bounds: FieldBounds, rng: &mut impl Rng) -> Self {
        let particles = (0..PARTICLE_COUNT)
            .map(|_| ConfettiParticle {
                x: rng.random_range(0.0..bounds.width),
                y: rng.random_range(-bounds.height..0.0),
                size: rng.random_range(6.0..12.0),
                fall_speed: rng.random_range(2.0..5.0),
                rotation: rng.random_range(0.0..TAU),
                rotation_speed: rng.random_range(-0.1..0.1),
                drift: rng.random_range(-1.2..1.2),
                color: rng.random_range(0..CONFETTI_COLORS.len()),
            })
            .collect();

        Self { particles, bounds }
    }

    /// Track the drawing area across resizes
    pub fn set_bounds(&mut self, bounds: FieldBounds) {
        self.bounds = bounds;
    }

    pub fn bounds(&self) -> FieldBounds {
        self.bounds
    }

    pub fn particles(&self) -> &[ConfettiParticle] {
        &self.particles
    }

    /// One physics step: every particle falls, drifts, and spins
    ///
    /// Pieces past `height + 20` respawn at a random x with y in
    /// `[-200, -20]`, keeping size, speed, drift, and color.
    pub fn advance(&mut self, rng: &mut impl Rng) {
        for piece in &mut self.particles {
            piece.y += piece.fall_speed;
            piece.x += piece.drift;
            piece.rotation += piece.rotation_speed;

            if piece.y > self.bounds.height + RECYCLE_MARGIN {
                piece.y = rng.random_range(-200.0..-20.0);
                piece.x = rng.random_range(0.0..self.bounds.width);
            }
        }
    }
}

/// Overlay widget painting the field onto its area
///
/// Pieces carry their own palette color, so no theme is consulted.
pub struct ConfettiWidget<'a> {
    field: &'a ParticleField,
}

impl<'a> ConfettiWidget<'a> {
    pub fn new(field: &'a ParticleField) -> Self {
        Self { field }
    }
}

impl Widget for ConfettiWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for piece in self.field.particles() {
            if piece.x < 0.0 || piece.y < 0.0 {
                continue;
            }
            let col = (piece.x / CELL_PX_X) as u16;
            let row = (piece.y / CELL_PX_Y) as u16;
            if col >= area.width || row >= area.height {
                continue;
            }

            let quadrant = ((piece.rotation / (TAU / 4.0)).rem_euclid(4.0)) as usize % 4;
            let cell = &mut buf[(area.x + col, area.y + row)];
            cell.set_char(PIECE_GLYPHS[quadrant]);
            cell.set_fg(CONFETTI_COLORS[piece.color % CONFETTI_COLORS.len()]);
        }
    }
}
