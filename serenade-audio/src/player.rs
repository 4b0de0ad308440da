//! Single-track player - the playback clock behind the card

use serenade_analysis::{FrequencySample, SpectrumAnalyzer};
use std::sync::Arc;

/// Playback state for the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Complete player state for UI rendering
#[derive(Debug, Clone, Default)]
pub struct PlayerSnapshot {
    pub playback: PlaybackState,
    pub position: f64, // seconds
    pub duration: f64, // seconds
    pub volume: f32,   // 0.0 - 1.0
    pub track_name: Option<String>,
    /// Frequency magnitudes from the most recent processed buffer
    pub spectrum: FrequencySample,
}

/// A single audio player with volume and seek control
///
/// The position is the monotonic playback clock: it advances only while
/// playing, is bounded by the track duration, and can be seeked forward or
/// backward.
pub struct Player {
    /// Audio samples (interleaved stereo) - Arc to avoid copying through channels
    samples: Arc<Vec<f32>>,
    /// Sample rate of the loaded audio
    source_rate: u32,
    /// Sample rate of the output stream
    output_rate: u32,
    /// Current playback position in source samples (fractional)
    position: f64,
    state: PlaybackState,
    volume: f32,
    track_name: Option<String>,
    analyzer: SpectrumAnalyzer,
    current_spectrum: FrequencySample,
    /// Pre-allocated mono buffer for analysis (no allocation in process())
    analysis_buffer: Vec<f32>,
}

impl Player {
    /// Create a new empty player
    pub fn new(output_rate: u32) -> Self {
        Self {
            samples: Arc::new(Vec::new()),
            source_rate: output_rate,
            output_rate,
            position: 0.0,
            state: PlaybackState::Stopped,
            volume: 0.8,
            track_name: None,
            analyzer: SpectrumAnalyzer::new(),
            current_spectrum: FrequencySample::default(),
            analysis_buffer: Vec::with_capacity(4096),
        }
    }

    /// Load audio samples into the player
    pub fn load(&mut self, samples: Arc<Vec<f32>>, sample_rate: u32, name: Option<String>) {
        self.samples = samples;
        self.source_rate = sample_rate;
        self.position = 0.0;
        self.state = PlaybackState::Stopped;
        self.track_name = name;
        self.current_spectrum = FrequencySample::default();
    }

    /// Check if a track is loaded
    pub fn is_loaded(&self) -> bool {
        !self.samples.is_empty()
    }

    /// Start playback
    pub fn play(&mut self) {
        if self.is_loaded() {
            self.state = PlaybackState::Playing;
        }
    }

    /// Pause playback
    pub fn pause(&mut self) {
        self.state = PlaybackState::Paused;
    }

    /// Toggle play/pause
    pub fn toggle(&mut self) {
        match self.state {
            PlaybackState::Playing => self.pause(),
            PlaybackState::Paused | PlaybackState::Stopped => self.play(),
        }
    }

    /// Set playback position in seconds, clamped to the track
    pub fn seek(&mut self, position_secs: f64) {
        let max_pos = self.samples.len() as f64;
        self.position = (position_secs * self.source_rate as f64 * 2.0).clamp(0.0, max_pos);
    }

    /// Nudge position forward/backward by given seconds
    pub fn nudge(&mut self, delta_secs: f64) {
        self.seek(self.position_secs() + delta_secs);
    }

    /// Set volume (0.0 - 1.0)
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    /// Adjust volume by delta
    pub fn adjust_volume(&mut self, delta: f32) {
        self.set_volume(self.volume + delta);
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn playback(&self) -> PlaybackState {
        self.state
    }

    /// Track duration in seconds
    pub fn duration(&self) -> f64 {
        if self.source_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / (self.source_rate as f64 * 2.0) // stereo
    }

    /// Current position in seconds
    pub fn position_secs(&self) -> f64 {
        self.position / (self.source_rate as f64 * 2.0)
    }

    /// Get player state for UI
    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            playback: self.state,
            position: self.position_secs(),
            duration: self.duration(),
            volume: self.volume,
            track_name: self.track_name.clone(),
            spectrum: self.current_spectrum,
        }
    }

    /// Fill an interleaved stereo output buffer
    ///
    /// Paused or stopped players emit silence and the clock does not move.
    /// While playing, the position steps by the source/output rate ratio
    /// with linear interpolation, and the same frames feed the analyzer.
    pub fn process(&mut self, output: &mut [f32]) {
        if self.state != PlaybackState::Playing || self.samples.is_empty() {
            output.fill(0.0);
            return;
        }

        let sample_count = self.samples.len();
        let step = 2.0 * self.source_rate as f64 / self.output_rate as f64;

        self.analysis_buffer.clear();

        for frame in output.chunks_mut(2) {
            if self.state != PlaybackState::Playing {
                frame.fill(0.0);
                continue;
            }

            let pos = self.position as usize;

            if pos + 1 >= sample_count {
                // End of track
                self.state = PlaybackState::Stopped;
                self.position = 0.0;
                frame.fill(0.0);
                continue;
            }

            // Linear interpolation for non-integer positions
            let frac = self.position.fract() as f32;
            let pos_even = pos & !1; // Align to the left channel

            if pos_even + 3 < sample_count {
                let l0 = self.samples[pos_even];
                let r0 = self.samples[pos_even + 1];
                let l1 = self.samples[pos_even + 2];
                let r1 = self.samples[pos_even + 3];

                frame[0] = (l0 + frac * (l1 - l0)) * self.volume;
                frame[1] = (r0 + frac * (r1 - r0)) * self.volume;
            } else {
                frame[0] = self.samples[pos_even] * self.volume;
                frame[1] = self.samples[pos_even + 1] * self.volume;
            }

            self.analysis_buffer.push((frame[0] + frame[1]) * 0.5);

            self.position += step;
        }

        if !self.analysis_buffer.is_empty() {
            self.current_spectrum = self.analyzer.analyze(&self.analysis_buffer);
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new(48000)
    }
}
