//! Audio engine - command handling and UI channels

use crate::player::{Player, PlayerSnapshot};
use crossbeam_channel::{bounded, Receiver, Sender};
use std::sync::Arc;

/// Commands sent to the audio engine
#[derive(Debug, Clone)]
pub enum AudioCommand {
    /// Load a track (samples, sample_rate, name)
    /// Using Arc to avoid copying sample data through the channel
    Load(Arc<Vec<f32>>, u32, Option<String>),
    Play,
    Pause,
    Toggle,
    Seek(f64),
    Nudge(f64),
    SetVolume(f32),
    AdjustVolume(f32),
    Shutdown,
}

/// Events sent from the audio engine
#[derive(Debug, Clone)]
pub enum AudioEvent {
    /// Periodic state update for UI rendering; the UI treats these as its
    /// time-update notifications
    State(Box<PlayerSnapshot>),
    /// Track loaded successfully
    TrackLoaded,
    /// Error occurred
    Error(String),
}

/// Audio engine state (held in the audio thread)
pub struct EngineState {
    pub player: Player,
}

impl EngineState {
    pub fn new(output_rate: u32) -> Self {
        Self {
            player: Player::new(output_rate),
        }
    }

    /// Apply a command to the player
    pub fn handle_command(&mut self, cmd: AudioCommand) {
        match cmd {
            AudioCommand::Load(samples, sample_rate, name) => {
                tracing::info!(
                    "loading track {:?} ({} samples at {} Hz)",
                    name,
                    samples.len(),
                    sample_rate
                );
                self.player.load(samples, sample_rate, name);
            }
            AudioCommand::Play => self.player.play(),
            AudioCommand::Pause => self.player.pause(),
            AudioCommand::Toggle => self.player.toggle(),
            AudioCommand::Seek(secs) => self.player.seek(secs),
            AudioCommand::Nudge(delta) => self.player.nudge(delta),
            AudioCommand::SetVolume(volume) => self.player.set_volume(volume),
            AudioCommand::AdjustVolume(delta) => self.player.adjust_volume(delta),
            AudioCommand::Shutdown => {}
        }
    }

    /// Fill an output buffer (called from the audio callback)
    pub fn process(&mut self, output: &mut [f32]) {
        self.player.process(output);
    }

    /// Snapshot the player state for the UI
    pub fn snapshot(&self) -> AudioEvent {
        AudioEvent::State(Box::new(self.player.snapshot()))
    }
}

/// Handle for the UI thread to talk to the audio thread
pub struct AudioEngine {
    cmd_tx: Sender<AudioCommand>,
    pub event_rx: Receiver<AudioEvent>,
}

impl AudioEngine {
    /// Create the command and event channels
    #[allow(clippy::type_complexity)]
    pub fn create_channels() -> (
        Sender<AudioCommand>,
        Receiver<AudioCommand>,
        Sender<AudioEvent>,
        Receiver<AudioEvent>,
    ) {
        let (cmd_tx, cmd_rx) = bounded(64);
        let (evt_tx, evt_rx) = bounded(64);
        (cmd_tx, cmd_rx, evt_tx, evt_rx)
    }

    pub fn new(cmd_tx: Sender<AudioCommand>, event_rx: Receiver<AudioEvent>) -> Self {
        Self { cmd_tx, event_rx }
    }

    /// Send a command, dropping it if the audio thread is gone
    pub fn send(&self, cmd: AudioCommand) {
        let _ = self.cmd_tx.send(cmd);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlaybackState;

    #[test]
    fn test_commands_drive_player() {
        let mut state = EngineState::new(48000);
        state.handle_command(AudioCommand::Load(
            Arc::new(vec![0.0; 9600]),
            48000,
            Some("track".into()),
        ));
        state.handle_command(AudioCommand::Play);
        assert_eq!(state.player.playback(), PlaybackState::Playing);

        state.handle_command(AudioCommand::SetVolume(0.25));
        assert_eq!(state.player.volume(), 0.25);

        state.handle_command(AudioCommand::Pause);
        assert_eq!(state.player.playback(), PlaybackState::Paused);
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut state = EngineState::new(48000);
        state.handle_command(AudioCommand::Load(
            Arc::new(vec![0.0; 96000]),
            48000,
            None,
        ));
        state.handle_command(AudioCommand::Seek(0.5));

        match state.snapshot() {
            AudioEvent::State(snapshot) => {
                assert!((snapshot.position - 0.5).abs() < 1e-9);
                assert!((snapshot.duration - 1.0).abs() < 1e-9);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
