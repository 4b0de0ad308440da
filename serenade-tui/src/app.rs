//! Card state and the per-frame driver
//!
//! Owns the pieces the event loop threads together: the latest player
//! snapshot, the lyric table and its diffing cursor, the confetti field,
//! the frame scheduler, and the last-known pointer that evasion and resize
//! both consume.

use crate::scheduler::{FrameScheduler, RenderSlot};
use crate::theme::Theme;
use crate::widgets::{
    no_button_rect, place_away_from, FieldBounds, ParticleField, PlacerConfig, Point, Size,
    EVADE_CELL_PX_X, EVADE_CELL_PX_Y, NO_LABEL,
};
use rand::Rng;
use ratatui::layout::Rect;
use serenade_audio::{AudioEvent, PlaybackState, PlayerSnapshot};
use serenade_lyrics::{BilingualLine, LyricCursor, LyricEntry};

/// Whether a screen cell lies inside a rect
pub fn hit(rect: Rect, pointer: (u16, u16)) -> bool {
    let (col, row) = pointer;
    col >= rect.x && col < rect.right() && row >= rect.y && row < rect.bottom()
}

/// Application state (Elm-ish: events mutate it, rendering reads it)
pub struct AppState {
    pub theme: Theme,
    pub player: PlayerSnapshot,
    pub lyrics: Vec<LyricEntry>,
    pub lyric_line: BilingualLine,
    cursor: LyricCursor,
    pub scheduler: FrameScheduler,
    /// At least one engine snapshot has arrived; until then `player` is
    /// only the default placeholder
    pub snapshot_received: bool,
    /// Celebration view active (buttons hidden, confetti falling)
    pub celebrated: bool,
    pub confetti: Option<ParticleField>,
    /// Last observed pointer position in screen cells
    pub pointer: (u16, u16),
    /// No-button placement in cells relative to the button area's inner rect
    pub no_position: Option<(u16, u16)>,
    pub frame_count: u64,
    pub should_quit: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            theme: Theme::default(),
            player: PlayerSnapshot::default(),
            lyrics: Vec::new(),
            lyric_line: BilingualLine::default(),
            cursor: LyricCursor::new(),
            scheduler: FrameScheduler::new(),
            snapshot_received: false,
            celebrated: false,
            confetti: None,
            pointer: (0, 0),
            no_position: None,
            frame_count: 0,
            should_quit: false,
        }
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    /// Install the lyric table and show its first line right away
    pub fn set_lyrics(&mut self, entries: Vec<LyricEntry>) {
        if let Some(first) = entries.first() {
            self.lyric_line = BilingualLine::split(&first.text);
        }
        self.lyrics = entries;
    }

    /// Apply an engine event
    ///
    /// Play/pause transitions drive the spectrum render loop; every state
    /// snapshot doubles as a time-update notification for the lyric cursor,
    /// which diffs before any visible rewrite.
    pub fn handle_audio_event(&mut self, event: AudioEvent) {
        match event {
            AudioEvent::State(snapshot) => {
                self.snapshot_received = true;
                let was_playing = self.player.playback == PlaybackState::Playing;
                self.player = *snapshot;
                let playing = self.player.playback == PlaybackState::Playing;

                if playing && !was_playing {
                    self.scheduler.start(RenderSlot::Spectrum);
                } else if !playing && was_playing {
                    self.scheduler.cancel(RenderSlot::Spectrum);
                }

                if let Some(index) = self.cursor.advance(&self.lyrics, self.player.position) {
                    self.lyric_line = BilingualLine::split(&self.lyrics[index].text);
                }
            }
            AudioEvent::TrackLoaded => {
                tracing::info!("track ready");
            }
            AudioEvent::Error(message) => {
                tracing::warn!("audio error: {}", message);
            }
        }
    }

    /// Whether the spectrum should render live this frame
    pub fn spectrum_live(&self) -> bool {
        self.scheduler.is_active(RenderSlot::Spectrum)
    }

    /// Trigger (or re-trigger) the celebration
    ///
    /// Always a restart: the old field is discarded, a fresh population is
    /// spawned, and the confetti loop is superseded.
    pub fn celebrate(&mut self, confetti_area: Rect, rng: &mut impl Rng) {
        self.celebrated = true;
        self.confetti = Some(ParticleField::spawn(
            FieldBounds::for_area(confetti_area),
            rng,
        ));
        self.scheduler.start(RenderSlot::Confetti);
    }

    /// Per-frame update: advance whichever render loops are live
    pub fn on_frame(&mut self, rng: &mut impl Rng) {
        self.frame_count = self.frame_count.wrapping_add(1);

        if self.scheduler.is_active(RenderSlot::Confetti) {
            if let Some(field) = &mut self.confetti {
                field.advance(rng);
            }
        }
    }

    /// Record the pointer; call on every motion event
    pub fn on_pointer(&mut self, col: u16, row: u16) {
        self.pointer = (col, row);
    }

    /// Viewport resized: rebuild confetti bounds and re-place the No button
    /// against the last-known pointer (resize events carry no pointer)
    pub fn on_resize(&mut self, confetti_area: Rect, button_inner: Rect, rng: &mut impl Rng) {
        if let Some(field) = &mut self.confetti {
            field.set_bounds(FieldBounds::for_area(confetti_area));
        }
        if !self.celebrated {
            self.evade(button_inner, rng);
        }
    }

    /// Hop the No button away from the last-known pointer
    ///
    /// The area is measured fresh on every call. Runs in virtual pixels and
    /// projects the result back to cells.
    pub fn evade(&mut self, button_inner: Rect, rng: &mut impl Rng) {
        let area = Size {
            width: button_inner.width as f32 * EVADE_CELL_PX_X,
            height: button_inner.height as f32 * EVADE_CELL_PX_Y,
        };
        let target = Size {
            width: NO_LABEL.chars().count() as f32 * EVADE_CELL_PX_X,
            height: EVADE_CELL_PX_Y,
        };
        let reference = Point {
            x: (self.pointer.0.saturating_sub(button_inner.x) as f32 + 0.5) * EVADE_CELL_PX_X,
            y: (self.pointer.1.saturating_sub(button_inner.y) as f32 + 0.5) * EVADE_CELL_PX_Y,
        };

        let placed = place_away_from(reference, target, area, PlacerConfig::default(), rng);

        let col = (placed.x / EVADE_CELL_PX_X).round() as u16;
        let row = (placed.y / EVADE_CELL_PX_Y).round() as u16;
        self.no_position = Some((col, row));
    }

    /// Current screen rect of the No button
    pub fn no_rect(&self, button_inner: Rect) -> Rect {
        no_button_rect(button_inner, self.no_position)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use serenade_lyrics::parse_lrc;

    fn snapshot(playback: PlaybackState, position: f64) -> AudioEvent {
        AudioEvent::State(Box::new(PlayerSnapshot {
            playback,
            position,
            duration: 100.0,
            ..PlayerSnapshot::default()
        }))
    }

    #[test]
    fn test_play_pause_transitions_drive_spectrum_loop() {
        let mut app = AppState::new();
        assert!(!app.spectrum_live());

        app.handle_audio_event(snapshot(PlaybackState::Playing, 1.0));
        assert!(app.spectrum_live());

        // Repeated playing snapshots are not transitions
        app.handle_audio_event(snapshot(PlaybackState::Playing, 2.0));
        assert!(app.spectrum_live());

        app.handle_audio_event(snapshot(PlaybackState::Paused, 2.0));
        assert!(!app.spectrum_live());
    }

    #[test]
    fn test_snapshot_received_only_after_state_event() {
        let mut app = AppState::new();
        assert!(!app.snapshot_received);

        app.handle_audio_event(AudioEvent::Error("no output device".into()));
        assert!(!app.snapshot_received);

        app.handle_audio_event(snapshot(PlaybackState::Stopped, 0.0));
        assert!(app.snapshot_received);
    }

    #[test]
    fn test_lyric_line_updates_only_on_index_change() {
        let mut app = AppState::new();
        app.set_lyrics(parse_lrc("[00:01]one || 하나\n[00:05]two || 둘"));

        // First line shown immediately after load
        assert_eq!(app.lyric_line.primary, "one");

        app.handle_audio_event(snapshot(PlaybackState::Playing, 1.2));
        assert_eq!(app.lyric_line.primary, "one");
        assert_eq!(app.lyric_line.secondary, "하나");

        app.handle_audio_event(snapshot(PlaybackState::Playing, 5.5));
        assert_eq!(app.lyric_line.primary, "two");
    }

    #[test]
    fn test_celebrate_restarts_confetti() {
        let mut app = AppState::new();
        let mut rng = StdRng::seed_from_u64(1);
        let area = Rect::new(0, 0, 80, 24);

        app.celebrate(area, &mut rng);
        assert!(app.celebrated);
        let first: Vec<f32> = app
            .confetti
            .as_ref()
            .unwrap()
            .particles()
            .iter()
            .map(|p| p.x)
            .collect();

        for _ in 0..50 {
            app.on_frame(&mut rng);
        }

        app.celebrate(area, &mut rng);
        let second: Vec<f32> = app
            .confetti
            .as_ref()
            .unwrap()
            .particles()
            .iter()
            .map(|p| p.x)
            .collect();
        assert_ne!(first, second);
        assert!(app
            .confetti
            .as_ref()
            .unwrap()
            .particles()
            .iter()
            .all(|p| p.y < 0.0));
    }

    #[test]
    fn test_evade_places_within_button_area() {
        let mut app = AppState::new();
        let mut rng = StdRng::seed_from_u64(2);
        let inner = Rect::new(1, 1, 60, 18);
        app.on_pointer(30, 9);

        for _ in 0..100 {
            app.evade(inner, &mut rng);
            let rect = app.no_rect(inner);
            assert!(rect.x >= inner.x);
            assert!(rect.right() <= inner.right());
            assert!(rect.bottom() <= inner.bottom());
        }
    }

    #[test]
    fn test_resize_replaces_button_with_last_pointer() {
        let mut app = AppState::new();
        let mut rng = StdRng::seed_from_u64(3);
        app.on_pointer(10, 5);

        app.on_resize(Rect::new(0, 0, 80, 24), Rect::new(1, 1, 40, 12), &mut rng);
        assert!(app.no_position.is_some());
    }

    #[test]
    fn test_hit() {
        let rect = Rect::new(5, 5, 10, 2);
        assert!(hit(rect, (5, 5)));
        assert!(hit(rect, (14, 6)));
        assert!(!hit(rect, (15, 5)));
        assert!(!hit(rect, (5, 7)));
    }
}
