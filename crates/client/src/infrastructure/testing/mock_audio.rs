//! Mock audio channel recording every command issued to it

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::ports::outbound::{AudioChannelPort, AudioError};

/// One recorded channel command
#[derive(Debug, Clone, PartialEq)]
pub enum AudioCommand {
    Load(String),
    Play,
    Pause,
    SetVolume(f32),
    SetLooping(bool),
    Unlock,
}

#[derive(Default)]
struct State {
    commands: Vec<AudioCommand>,
    fail_play: bool,
    fail_unlock: bool,
    position: f64,
    duration: Option<f64>,
}

/// Mock `AudioChannelPort` for tests
#[derive(Clone, Default)]
pub struct MockAudioChannel {
    state: Arc<Mutex<State>>,
}

impl MockAudioChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> Vec<AudioCommand> {
        self.state.lock().expect("mock state").commands.clone()
    }

    /// Make subsequent `play` calls fail
    pub fn fail_play(&self) {
        self.state.lock().expect("mock state").fail_play = true;
    }

    /// Make subsequent `unlock` calls fail
    pub fn fail_unlock(&self) {
        self.state.lock().expect("mock state").fail_unlock = true;
    }

    pub fn set_position(&self, position: f64) {
        self.state.lock().expect("mock state").position = position;
    }

    pub fn set_duration(&self, duration: Option<f64>) {
        self.state.lock().expect("mock state").duration = duration;
    }
}

#[async_trait]
impl AudioChannelPort for MockAudioChannel {
    fn load(&self, url: &str) {
        self.state
            .lock()
            .expect("mock state")
            .commands
            .push(AudioCommand::Load(url.to_string()));
    }

    async fn play(&self) -> Result<(), AudioError> {
        let mut state = self.state.lock().expect("mock state");
        if state.fail_play {
            return Err(AudioError::Playback("rejected by mock".to_string()));
        }
        state.commands.push(AudioCommand::Play);
        Ok(())
    }

    fn pause(&self) {
        self.state
            .lock()
            .expect("mock state")
            .commands
            .push(AudioCommand::Pause);
    }

    fn set_volume(&self, volume: f32) {
        self.state
            .lock()
            .expect("mock state")
            .commands
            .push(AudioCommand::SetVolume(volume));
    }

    fn set_looping(&self, looping: bool) {
        self.state
            .lock()
            .expect("mock state")
            .commands
            .push(AudioCommand::SetLooping(looping));
    }

    async fn wait_until_ready(&self) {
        // mock sources are always buffered
    }

    async fn unlock(&self) -> Result<(), AudioError> {
        let mut state = self.state.lock().expect("mock state");
        if state.fail_unlock {
            return Err(AudioError::UnlockUnavailable);
        }
        state.commands.push(AudioCommand::Unlock);
        Ok(())
    }

    fn position(&self) -> f64 {
        self.state.lock().expect("mock state").position
    }

    fn duration(&self) -> Option<f64> {
        self.state.lock().expect("mock state").duration
    }
}
