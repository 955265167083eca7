//! WebSocket message types for Narrator-Client communication
//!
//! This module contains all message types exchanged over the push channel.
//! The Narrator sends ServerMessage and receives ClientMessage; the Client
//! does the reverse.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{CharacterPatchData, CombatStateData, EnemyRefData, InventoryDeltaData};

// =============================================================================
// Client Messages (Client → Narrator)
// =============================================================================

/// Messages from client to the Narrator service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    /// Join the room for a campaign session
    ///
    /// Room membership is not preserved across transport reconnects, so the
    /// client re-sends this after every successful (re)connection.
    JoinRoom { campaign_id: Uuid, user_id: String },
    /// Player submits a free-text narrative action
    GameAction {
        campaign_id: Uuid,
        character_id: String,
        action: String,
    },
    /// Player submits an attack against a combat target
    SubmitAttack {
        campaign_id: Uuid,
        attacker_id: String,
        attacker_name: String,
        target_id: String,
        target_name: String,
        attack_bonus: i32,
        target_ac: i32,
        damage_dice: String,
        damage_type: String,
        advantage: bool,
        disadvantage: bool,
    },
    /// Request the narrator advance to the next combat turn
    ///
    /// Fire-and-forget: local state only changes when the server pushes the
    /// resulting combat snapshot back.
    AdvanceTurn { campaign_id: Uuid },
    /// Heartbeat ping
    Heartbeat,
}

// =============================================================================
// Server Messages (Narrator → Client)
// =============================================================================

/// Messages pushed from the Narrator service to the client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    /// A block of story text plus optional side-channel data
    Narrative {
        id: String,
        text: String,
        created_at: chrono::DateTime<chrono::Utc>,
        #[serde(default)]
        inventory_delta: Option<InventoryDeltaData>,
        #[serde(default)]
        enemies: Option<Vec<EnemyRefData>>,
        #[serde(default)]
        audio_url: Option<String>,
        #[serde(default)]
        ambience_url: Option<String>,
    },
    /// Full combat snapshot (replaces any prior combat state wholesale)
    CombatState { state: CombatStateData },
    /// Patch a single combatant's hit points by id
    CombatHpUpdated {
        combatant_id: String,
        hp: i32,
        max_hp: i32,
    },
    /// Result of a resolved attack, for display only
    CombatAttackResult {
        attacker_id: String,
        attacker_name: String,
        target_id: String,
        target_name: String,
        hit: bool,
        critical: bool,
        damage: i32,
        attack_roll: i32,
        #[serde(default)]
        rolls: Vec<i32>,
    },
    /// Combat has ended; the turn order is discarded
    CombatEnded,
    /// Combat-scoped error message
    CombatError { message: String },
    /// Session-scoped error message
    GameError { message: String },
    /// Partial character-state update
    CharacterUpdate { fields: CharacterPatchData },
    /// A narration clip is ready for playback
    AudioReady { campaign_id: Uuid, url: String },
    /// An ambience track is ready for playback
    AmbienceReady { campaign_id: Uuid, url: String },
    /// Heartbeat response
    Pong,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_message_tagged_serialization() {
        let msg = ClientMessage::JoinRoom {
            campaign_id: Uuid::nil(),
            user_id: "user-1".to_string(),
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "JoinRoom");
        assert_eq!(json["user_id"], "user-1");
    }

    #[test]
    fn test_narrative_optional_fields_default() {
        let json = serde_json::json!({
            "type": "Narrative",
            "id": "m1",
            "text": "You enter the tavern.",
            "created_at": "2025-03-01T12:00:00Z",
        });
        let msg: ServerMessage = serde_json::from_value(json).unwrap();
        match msg {
            ServerMessage::Narrative {
                inventory_delta,
                enemies,
                audio_url,
                ambience_url,
                ..
            } => {
                assert!(inventory_delta.is_none());
                assert!(enemies.is_none());
                assert!(audio_url.is_none());
                assert!(ambience_url.is_none());
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }
}
