//! Terminal UI for Serenade - theme, frame scheduling, widgets, card state

mod app;
mod scheduler;
mod theme;
pub mod widgets;

pub use app::{hit, AppState};
pub use scheduler::{FrameScheduler, LoopToken, RenderSlot};
pub use theme::{Theme, CONFETTI_COLORS, VALENTINE};
pub use widgets::{
    ButtonAreaWidget, ConfettiWidget, LyricWidget, SpectrumWidget, TransportWidget,
};
