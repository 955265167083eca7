//! Game Connection Port - outbound port for the push channel
//!
//! Abstracts the WebSocket transport so the application layer can manage a
//! live session without depending on a concrete client implementation.

use async_trait::async_trait;

use loreline_protocol::{ClientMessage, ServerMessage};

/// Connection status of the active session
///
/// Single process-wide value per session, owned by the connection manager
/// and reset to `Connecting` on every (re)initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    /// Attempting to establish the initial connection
    Connecting,
    /// Connected and ready
    Connected,
    /// Connection lost, transport is retrying
    Reconnecting,
    /// Not connected and not retrying
    Disconnected,
}

impl ConnectionStatus {
    /// Returns true if currently connected
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionStatus::Connected)
    }

    /// Returns the status display text
    pub fn display_text(&self) -> &'static str {
        match self {
            ConnectionStatus::Connecting => "Connecting...",
            ConnectionStatus::Connected => "Connected",
            ConnectionStatus::Reconnecting => "Reconnecting...",
            ConnectionStatus::Disconnected => "Disconnected",
        }
    }
}

/// Transport-level lifecycle notification from the adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportEvent {
    /// A connection (initial or after a drop) was established
    Connected,
    /// The connection dropped; the adapter is retrying
    Reconnecting,
    /// The adapter gave up or was told to disconnect
    Disconnected,
}

/// Errors surfaced by outbound sends
///
/// Transport lifecycle errors never reach callers; they show up only as
/// transport events.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConnectionError {
    #[error("not connected to the narrator service")]
    NotConnected,
    #[error("failed to queue outbound message: {0}")]
    SendFailed(String),
}

/// Object-safe push-channel boundary implemented by transport adapters
#[async_trait]
pub trait GameConnectionPort: Send + Sync {
    /// Start the connection loop
    ///
    /// Never fails to the caller; progress and failure surface through
    /// transport events. Safe to call again after `disconnect`.
    async fn connect(&self, auth_token: &str);

    /// Stop the connection loop
    ///
    /// Idempotent; safe to call before a connection completes.
    async fn disconnect(&self);

    /// Queue a message for the narrator service
    async fn send(&self, message: ClientMessage) -> Result<(), ConnectionError>;

    /// Register the callback invoked on transport lifecycle changes
    async fn set_on_transport_event(
        &self,
        callback: Box<dyn FnMut(TransportEvent) + Send + 'static>,
    );

    /// Register the callback invoked for every server message
    async fn set_on_message(&self, callback: Box<dyn FnMut(ServerMessage) + Send + 'static>);
}
