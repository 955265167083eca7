//! Timeline message types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use loreline_protocol::HistoryEntryData;

/// Who a timeline entry speaks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageKind {
    /// Story text from the narrator
    Narrative,
    /// A player-submitted action
    Action,
    /// Client-generated status or error text
    System,
}

/// One entry of the session timeline
///
/// Identity is `id`; the timeline is ordered by arrival/merge order, not by
/// `created_at`. This type is also the persisted cache layout, so timestamps
/// serialize as ISO-8601 via chrono.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub kind: MessageKind,
    pub content: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub audio_url: Option<String>,
}

impl Message {
    /// Build a System-kind entry with a fresh id
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind: MessageKind::System,
            content: content.into(),
            created_at: Utc::now(),
            audio_url: None,
        }
    }

    /// Build an Action-kind entry with a fresh id
    pub fn action(content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            kind: MessageKind::Action,
            content: content.into(),
            created_at: Utc::now(),
            audio_url: None,
        }
    }
}

impl From<HistoryEntryData> for Message {
    fn from(entry: HistoryEntryData) -> Self {
        let kind = match entry.role.as_str() {
            "player" => MessageKind::Action,
            "system" => MessageKind::System,
            _ => MessageKind::Narrative,
        };
        Self {
            id: entry.id,
            kind,
            content: entry.text,
            created_at: entry.created_at,
            audio_url: entry.audio_url,
        }
    }
}
