//! API Port - outbound port for the HTTP-shaped resource API
//!
//! Typed boundary over campaign/character/session/save resources. Adapters
//! translate transport failures into `ApiError`; callers decide whether a
//! fault is swallowed (fetches keep their last-known value) or surfaced as a
//! system timeline entry (user-facing submissions).

use async_trait::async_trait;
use uuid::Uuid;

use loreline_protocol::{
    CharacterPatchData, CharacterRecordData, HistoryEntryData, QuestData, SaveRecordData,
    SessionRefData, WorldEntitySetsData,
};

/// Errors from resource API operations
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("resource not found: {0}")]
    NotFound(String),
    #[error("server returned status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("failed to decode response: {0}")]
    Decode(String),
}

/// Resource API boundary consumed by the application services
#[mockall::automock]
#[async_trait]
pub trait ApiPort: Send + Sync {
    /// Fetch a character record by id
    async fn get_character(&self, character_id: &str) -> Result<CharacterRecordData, ApiError>;

    /// Update a character with partial fields
    async fn update_character(
        &self,
        character_id: &str,
        patch: &CharacterPatchData,
    ) -> Result<(), ApiError>;

    /// Fetch the campaign's world entity sets (locations/NPCs/shops/items)
    async fn get_world_entities(&self, campaign_id: Uuid)
        -> Result<WorldEntitySetsData, ApiError>;

    /// Fetch campaign quests filtered by status
    async fn get_quests(&self, campaign_id: Uuid, status: &str) -> Result<Vec<QuestData>, ApiError>;

    /// Resolve the active session of a campaign
    async fn resolve_active_session(&self, campaign_id: Uuid) -> Result<SessionRefData, ApiError>;

    /// Fetch up to `limit` of the most recent session history entries
    async fn get_session_history(
        &self,
        session_id: Uuid,
        limit: u32,
    ) -> Result<Vec<HistoryEntryData>, ApiError>;

    /// Create a named save record scoped to a campaign
    async fn create_save(&self, campaign_id: Uuid, name: &str) -> Result<SaveRecordData, ApiError>;

    /// List save records of a campaign
    async fn list_saves(&self, campaign_id: Uuid) -> Result<Vec<SaveRecordData>, ApiError>;

    /// Fetch one save record
    async fn get_save(&self, save_id: &str) -> Result<SaveRecordData, ApiError>;

    /// Delete one save record
    async fn delete_save(&self, save_id: &str) -> Result<(), ApiError>;

    /// Submit a narrative action over REST (fallback when the push channel
    /// is unavailable)
    async fn submit_action(
        &self,
        campaign_id: Uuid,
        character_id: &str,
        action: &str,
    ) -> Result<(), ApiError>;
}
