//! UI widgets for Serenade

mod confetti;
mod evasion;
mod lyrics;
mod spectrum;
mod transport;

pub use confetti::{
    ConfettiParticle, ConfettiWidget, FieldBounds, ParticleField, PARTICLE_COUNT,
};
pub use evasion::{
    no_button_rect, place_away_from, yes_button_rect, ButtonAreaWidget, PlacerConfig, Point,
    Size, EVADE_CELL_PX_X, EVADE_CELL_PX_Y, NO_LABEL, YES_LABEL,
};
pub use lyrics::LyricWidget;
pub use spectrum::{idle_bars, live_bars, Bar, SpectrumWidget, IDLE_BAR_COUNT};
pub use transport::{format_clock, TransportWidget};
