//! Session key - the (campaign, character) pair scoping cache and history

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies which cached timeline and active session apply
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionKey {
    pub campaign_id: Uuid,
    pub character_id: String,
}

impl SessionKey {
    pub fn new(campaign_id: Uuid, character_id: impl Into<String>) -> Self {
        Self {
            campaign_id,
            character_id: character_id.into(),
        }
    }

    /// Stable string form used to name cache entries
    pub fn storage_key(&self) -> String {
        format!("{}-{}", self.campaign_id, sanitize(&self.character_id))
    }
}

/// Keep cache file names filesystem-safe regardless of id contents
fn sanitize(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
