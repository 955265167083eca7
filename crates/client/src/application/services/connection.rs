//! Connection manager - owns the push-channel lifecycle and status signal
//!
//! Folds transport events into the session's single `ConnectionStatus` and
//! re-announces room membership after every successful (re)connection,
//! since the transport does not preserve it across reconnects.

use std::sync::Arc;

use uuid::Uuid;

use loreline_protocol::ClientMessage;

use crate::ports::outbound::{
    ConnectionError, ConnectionStatus, GameConnectionPort, TransportEvent,
};

pub struct ConnectionManager {
    connection: Arc<dyn GameConnectionPort>,
    campaign_id: Uuid,
    user_id: String,
    status: ConnectionStatus,
}

impl ConnectionManager {
    pub fn new(
        connection: Arc<dyn GameConnectionPort>,
        campaign_id: Uuid,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            connection,
            campaign_id,
            user_id: user_id.into(),
            status: ConnectionStatus::Connecting,
        }
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    /// Start connecting
    ///
    /// Transport errors never reach the caller; they surface only through
    /// status changes.
    pub async fn connect(&mut self, auth_token: &str) {
        self.status = ConnectionStatus::Connecting;
        self.connection.connect(auth_token).await;
    }

    /// Idempotent; safe before a connection completes
    pub async fn disconnect(&mut self) {
        self.connection.disconnect().await;
        self.status = ConnectionStatus::Disconnected;
    }

    /// Fold a transport event into the status signal
    ///
    /// On every `Connected` the join-room intent is sent exactly once for
    /// that connection.
    pub async fn handle_transport_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::Connected => {
                self.status = ConnectionStatus::Connected;
                let join = ClientMessage::JoinRoom {
                    campaign_id: self.campaign_id,
                    user_id: self.user_id.clone(),
                };
                if let Err(error) = self.connection.send(join).await {
                    tracing::warn!(%error, "failed to announce room membership");
                }
            }
            TransportEvent::Reconnecting => {
                self.status = ConnectionStatus::Reconnecting;
            }
            TransportEvent::Disconnected => {
                self.status = ConnectionStatus::Disconnected;
            }
        }
    }

    /// Queue a message on the push channel
    pub async fn send(&self, message: ClientMessage) -> Result<(), ConnectionError> {
        self.connection.send(message).await
    }
}
