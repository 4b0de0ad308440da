//! Audio engine for Serenade - playback, decoding, and channels
//!
//! This crate owns the playback clock: a single-track player advanced by the
//! audio callback, commanded over a crossbeam channel, reporting snapshots
//! the UI consumes as time-update notifications.

mod engine;
mod loader;
mod player;

pub use engine::{AudioCommand, AudioEngine, AudioEvent, EngineState};
pub use loader::{LoadError, LoadedTrack, TrackLoader};
pub use player::{PlaybackState, Player, PlayerSnapshot};
