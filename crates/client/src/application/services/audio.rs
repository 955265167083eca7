//! Audio orchestrator - narration and ambience playback state machine
//!
//! Two independent channels behind one unlock gate. The gate models
//! browser-style autoplay restrictions: until a user gesture or a successful
//! unlock primitive, playback attempts are suppressed entirely. Once open,
//! the gate stays open for the rest of the session.

use std::sync::Arc;
use std::time::Duration;

use crate::ports::outbound::AudioChannelPort;

/// Ceiling for the narration buffering wait; playback proceeds anyway after
/// this elapses.
pub const READY_WAIT: Duration = Duration::from_secs(2);

/// Narration channel state
#[derive(Debug, Clone, PartialEq)]
pub struct NarrationState {
    /// Latest known clip URL
    pub url: Option<String>,
    pub enabled: bool,
    pub is_playing: bool,
    pub position: f64,
    pub duration: Option<f64>,
}

/// Ambience channel state
#[derive(Debug, Clone, PartialEq)]
pub struct AmbienceState {
    pub url: Option<String>,
    pub enabled: bool,
    pub volume: f32,
}

/// Composite playback state exposed to rendering
#[derive(Debug, Clone, PartialEq)]
pub struct AudioPlaybackState {
    pub unlocked: bool,
    pub narration: NarrationState,
    pub ambience: AmbienceState,
}

impl Default for AudioPlaybackState {
    fn default() -> Self {
        Self {
            unlocked: false,
            narration: NarrationState {
                url: None,
                enabled: true,
                is_playing: false,
                position: 0.0,
                duration: None,
            },
            ambience: AmbienceState {
                url: None,
                enabled: false,
                volume: 0.5,
            },
        }
    }
}

pub struct AudioOrchestrator {
    narration: Arc<dyn AudioChannelPort>,
    ambience: Arc<dyn AudioChannelPort>,
    state: AudioPlaybackState,
    loaded_narration_url: Option<String>,
    loaded_ambience_url: Option<String>,
}

impl AudioOrchestrator {
    pub fn new(narration: Arc<dyn AudioChannelPort>, ambience: Arc<dyn AudioChannelPort>) -> Self {
        Self {
            narration,
            ambience,
            state: AudioPlaybackState::default(),
            loaded_narration_url: None,
            loaded_ambience_url: None,
        }
    }

    pub fn state(&self) -> &AudioPlaybackState {
        &self.state
    }

    /// A user gesture occurred; open the gate
    ///
    /// Monotonic: repeated calls are allowed, the gate never closes again.
    pub fn note_user_gesture(&mut self) {
        self.state.unlocked = true;
    }

    /// Run the environment's unlock primitive
    ///
    /// A failing primitive still opens the gate (best-effort assume-unlocked
    /// fallback), so an environment without one cannot leave the gate stuck.
    pub async fn unlock(&mut self) {
        if self.state.unlocked {
            return;
        }
        if let Err(error) = self.narration.unlock().await {
            tracing::debug!(%error, "unlock primitive failed, assuming unlocked");
        }
        self.state.unlocked = true;
    }

    /// A narration clip became ready
    ///
    /// The URL is retained as the latest known clip even while the gate is
    /// closed or the channel is disabled.
    pub async fn handle_clip_ready(&mut self, url: String) {
        self.state.narration.url = Some(url);
        if self.state.narration.enabled && self.state.unlocked {
            self.play_latest_clip().await;
        }
    }

    /// Enable/disable narration
    ///
    /// Disabling pauses without resetting position; enabling counts as an
    /// explicit gesture and resumes the last known clip if one exists.
    pub async fn set_narration_enabled(&mut self, enabled: bool) {
        self.state.narration.enabled = enabled;
        if enabled {
            self.state.unlocked = true;
            if self.state.narration.url.is_some() {
                self.play_latest_clip().await;
            }
        } else {
            self.narration.pause();
            self.state.narration.position = self.narration.position();
            self.state.narration.is_playing = false;
        }
    }

    /// An ambience track became ready
    pub async fn handle_ambience_ready(&mut self, url: String) {
        self.state.ambience.url = Some(url);
        if self.state.ambience.enabled && self.state.unlocked {
            self.start_ambience().await;
        }
    }

    /// Enable/disable ambience
    ///
    /// Disabling only pauses; the source is retained for quick resume.
    pub async fn set_ambience_enabled(&mut self, enabled: bool) {
        self.state.ambience.enabled = enabled;
        if enabled {
            self.state.unlocked = true;
            if self.state.ambience.url.is_some() {
                self.start_ambience().await;
            }
        } else {
            self.ambience.pause();
        }
    }

    /// Ambience volume in `[0, 1]`, applied immediately to the live channel
    pub fn set_ambience_volume(&mut self, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        self.state.ambience.volume = volume;
        self.ambience.set_volume(volume);
    }

    async fn play_latest_clip(&mut self) {
        let Some(url) = self.state.narration.url.clone() else {
            return;
        };
        // don't restart an identical in-flight clip
        if self.loaded_narration_url.as_deref() != Some(url.as_str()) {
            self.narration.load(&url);
            self.loaded_narration_url = Some(url);
        }
        if tokio::time::timeout(READY_WAIT, self.narration.wait_until_ready())
            .await
            .is_err()
        {
            tracing::debug!("narration buffering wait elapsed, playing anyway");
        }
        match self.narration.play().await {
            Ok(()) => {
                self.state.narration.is_playing = true;
                self.state.narration.duration = self.narration.duration();
            }
            Err(error) => {
                // swallowed; channel state unchanged, no automatic retry
                tracing::debug!(%error, "narration playback failed");
            }
        }
    }

    async fn start_ambience(&mut self) {
        let Some(url) = self.state.ambience.url.clone() else {
            return;
        };
        // a changed URL reloads and restarts; the same source resumes
        if self.loaded_ambience_url.as_deref() != Some(url.as_str()) {
            self.ambience.load(&url);
            self.loaded_ambience_url = Some(url);
        }
        self.ambience.set_looping(true);
        self.ambience.set_volume(self.state.ambience.volume);
        if let Err(error) = self.ambience.play().await {
            tracing::debug!(%error, "ambience playback failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::testing::{AudioCommand, MockAudioChannel};

    fn orchestrator() -> (AudioOrchestrator, Arc<MockAudioChannel>, Arc<MockAudioChannel>) {
        let narration = Arc::new(MockAudioChannel::new());
        let ambience = Arc::new(MockAudioChannel::new());
        let orchestrator = AudioOrchestrator::new(narration.clone(), ambience.clone());
        (orchestrator, narration, ambience)
    }

    #[tokio::test]
    async fn test_gate_suppresses_playback_until_unlocked() {
        let (mut orchestrator, narration, _) = orchestrator();

        orchestrator
            .handle_clip_ready("https://cdn/clip-1.wav".to_string())
            .await;
        assert!(narration.commands().is_empty());

        orchestrator.note_user_gesture();
        orchestrator
            .handle_clip_ready("https://cdn/clip-1.wav".to_string())
            .await;
        let commands = narration.commands();
        assert!(commands.contains(&AudioCommand::Load("https://cdn/clip-1.wav".to_string())));
        assert!(commands.contains(&AudioCommand::Play));
        assert!(orchestrator.state().narration.is_playing);
    }

    #[tokio::test]
    async fn test_unlock_failure_assumes_unlocked() {
        let (mut orchestrator, narration, _) = orchestrator();
        narration.fail_unlock();

        orchestrator.unlock().await;
        assert!(orchestrator.state().unlocked);
    }

    #[tokio::test]
    async fn test_same_url_does_not_reload() {
        let (mut orchestrator, narration, _) = orchestrator();
        orchestrator.note_user_gesture();

        orchestrator
            .handle_clip_ready("https://cdn/clip-1.wav".to_string())
            .await;
        orchestrator
            .handle_clip_ready("https://cdn/clip-1.wav".to_string())
            .await;

        let loads = narration
            .commands()
            .into_iter()
            .filter(|command| matches!(command, AudioCommand::Load(_)))
            .count();
        assert_eq!(loads, 1);
    }

    #[tokio::test]
    async fn test_narration_toggle_pauses_and_resumes() {
        let (mut orchestrator, narration, _) = orchestrator();
        orchestrator.note_user_gesture();
        orchestrator
            .handle_clip_ready("https://cdn/clip-1.wav".to_string())
            .await;

        orchestrator.set_narration_enabled(false).await;
        assert!(!orchestrator.state().narration.is_playing);
        assert!(narration.commands().contains(&AudioCommand::Pause));

        orchestrator.set_narration_enabled(true).await;
        assert!(orchestrator.state().narration.is_playing);
    }

    #[tokio::test]
    async fn test_playback_failure_leaves_state_unchanged() {
        let (mut orchestrator, narration, _) = orchestrator();
        orchestrator.note_user_gesture();
        narration.fail_play();

        orchestrator
            .handle_clip_ready("https://cdn/clip-1.wav".to_string())
            .await;
        assert!(!orchestrator.state().narration.is_playing);
    }

    #[tokio::test]
    async fn test_ambience_volume_applied_immediately() {
        let (mut orchestrator, _, ambience) = orchestrator();
        orchestrator.set_ambience_volume(1.7);
        assert_eq!(orchestrator.state().ambience.volume, 1.0);
        assert_eq!(ambience.commands(), vec![AudioCommand::SetVolume(1.0)]);
    }

    #[tokio::test]
    async fn test_ambience_url_switch_reloads_and_loops() {
        let (mut orchestrator, _, ambience) = orchestrator();
        orchestrator.set_ambience_enabled(true).await;
        orchestrator
            .handle_ambience_ready("https://cdn/forest.ogg".to_string())
            .await;
        orchestrator
            .handle_ambience_ready("https://cdn/cave.ogg".to_string())
            .await;

        let commands = ambience.commands();
        assert!(commands.contains(&AudioCommand::Load("https://cdn/forest.ogg".to_string())));
        assert!(commands.contains(&AudioCommand::Load("https://cdn/cave.ogg".to_string())));
        assert!(commands.contains(&AudioCommand::SetLooping(true)));
    }

    #[tokio::test]
    async fn test_ambience_disable_pauses_and_retains_source() {
        let (mut orchestrator, _, ambience) = orchestrator();
        orchestrator.set_ambience_enabled(true).await;
        orchestrator
            .handle_ambience_ready("https://cdn/forest.ogg".to_string())
            .await;

        orchestrator.set_ambience_enabled(false).await;
        assert!(ambience.commands().contains(&AudioCommand::Pause));
        assert_eq!(
            orchestrator.state().ambience.url.as_deref(),
            Some("https://cdn/forest.ogg")
        );

        // resume without reloading
        let loads_before = ambience
            .commands()
            .into_iter()
            .filter(|command| matches!(command, AudioCommand::Load(_)))
            .count();
        orchestrator.set_ambience_enabled(true).await;
        let loads_after = ambience
            .commands()
            .into_iter()
            .filter(|command| matches!(command, AudioCommand::Load(_)))
            .count();
        assert_eq!(loads_before, loads_after);
    }
}
