//! Null audio channel for headless environments
//!
//! Keeps the orchestrator's state machine running where no playback device
//! exists; every command is accepted and logged at debug level.

use async_trait::async_trait;

use crate::ports::outbound::{AudioChannelPort, AudioError};

#[derive(Debug, Clone, Copy, Default)]
pub struct NullAudioChannel;

impl NullAudioChannel {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AudioChannelPort for NullAudioChannel {
    fn load(&self, url: &str) {
        tracing::debug!(%url, "null audio channel: load");
    }

    async fn play(&self) -> Result<(), AudioError> {
        Ok(())
    }

    fn pause(&self) {}

    fn set_volume(&self, _volume: f32) {}

    fn set_looping(&self, _looping: bool) {}

    async fn wait_until_ready(&self) {}

    async fn unlock(&self) -> Result<(), AudioError> {
        Err(AudioError::UnlockUnavailable)
    }

    fn position(&self) -> f64 {
        0.0
    }

    fn duration(&self) -> Option<f64> {
        None
    }
}
