//! Audio Channel Port - one playable media channel
//!
//! The orchestrator owns two of these (narration and ambience). Adapters
//! wrap whatever playback primitive the host environment offers; in the
//! browser-shaped environment this is a media element subject to autoplay
//! restrictions, which is why `play` and `unlock` can be rejected.

use async_trait::async_trait;

/// Errors from playback operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum AudioError {
    #[error("playback rejected: {0}")]
    Playback(String),
    #[error("unlock primitive unavailable")]
    UnlockUnavailable,
}

/// A single media channel
#[async_trait]
pub trait AudioChannelPort: Send + Sync {
    /// Switch the channel's source URL (does not start playback)
    fn load(&self, url: &str);

    /// Start or resume playback of the loaded source
    async fn play(&self) -> Result<(), AudioError>;

    /// Pause playback without resetting position
    fn pause(&self);

    /// Set channel volume in `[0, 1]`, applied immediately
    fn set_volume(&self, volume: f32);

    /// Enable or disable looping of the loaded source
    fn set_looping(&self, looping: bool);

    /// Resolve once the loaded source is minimally buffered
    ///
    /// Callers bound this wait; it may never resolve for a stalled source.
    async fn wait_until_ready(&self);

    /// Run the environment's unlock primitive (e.g. a muted play attempt)
    async fn unlock(&self) -> Result<(), AudioError>;

    /// Current playback position in seconds
    fn position(&self) -> f64;

    /// Duration of the loaded source in seconds, when known
    fn duration(&self) -> Option<f64>;
}
