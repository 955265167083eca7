//! Action service - submits free-text narrative actions
//!
//! Prefers the push channel; falls back to the REST submission endpoint when
//! the channel is unavailable. Callers turn failures into System timeline
//! entries rather than propagating them.

use std::sync::Arc;

use uuid::Uuid;

use loreline_protocol::ClientMessage;

use crate::application::error::ServiceError;
use crate::ports::outbound::{ApiPort, GameConnectionPort};

pub struct ActionService {
    connection: Arc<dyn GameConnectionPort>,
    api: Arc<dyn ApiPort>,
    campaign_id: Uuid,
    character_id: String,
}

impl ActionService {
    pub fn new(
        connection: Arc<dyn GameConnectionPort>,
        api: Arc<dyn ApiPort>,
        campaign_id: Uuid,
        character_id: impl Into<String>,
    ) -> Self {
        Self {
            connection,
            api,
            campaign_id,
            character_id: character_id.into(),
        }
    }

    /// Submit an action, push channel first, REST as fallback
    pub async fn submit(&self, action: &str) -> Result<(), ServiceError> {
        let message = ClientMessage::GameAction {
            campaign_id: self.campaign_id,
            character_id: self.character_id.clone(),
            action: action.to_string(),
        };
        match self.connection.send(message).await {
            Ok(()) => Ok(()),
            Err(error) => {
                tracing::debug!(%error, "push channel unavailable, falling back to REST");
                self.api
                    .submit_action(self.campaign_id, &self.character_id, action)
                    .await?;
                Ok(())
            }
        }
    }
}
