//! Wire-format DTOs shared by the REST surface and the push channel
//!
//! These are serialization shapes, not domain types; the client normalizes
//! them at its protocol boundary.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Inventory & Character Types
// =============================================================================

/// An inventory line as it appears on the wire
///
/// Older narrator payloads carry bare item names; newer ones carry
/// name+quantity pairs. Both deserialize here and are normalized to the pair
/// form by the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InventoryLineWire {
    Name(String),
    Pair { name: String, quantity: u32 },
}

/// Inventory/gold change attached to a narrative turn
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InventoryDeltaData {
    #[serde(default)]
    pub items_added: Vec<String>,
    #[serde(default)]
    pub items_removed: Vec<String>,
    #[serde(default)]
    pub gold_change: i64,
}

/// Full character record as returned by the resource API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterRecordData {
    pub id: String,
    pub name: String,
    pub hp: i32,
    pub max_hp: i32,
    pub armor_class: i32,
    pub experience: i64,
    pub level: i32,
    pub money: i64,
    #[serde(default)]
    pub inventory: Vec<InventoryLineWire>,
}

/// Partial character update (REST PATCH body and push-channel event payload)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CharacterPatchData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hp: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_hp: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub armor_class: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub money: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory: Option<Vec<InventoryLineWire>>,
}

// =============================================================================
// Combat Types
// =============================================================================

/// A single combat participant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatantData {
    pub id: String,
    pub name: String,
    pub hp: i32,
    pub max_hp: i32,
    pub armor_class: i32,
    pub initiative: i32,
    pub is_player: bool,
}

/// Full combat snapshot pushed by the narrator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatStateData {
    pub round: u32,
    pub current_turn_index: usize,
    pub turn_order: Vec<CombatantData>,
}

/// Reference to an enemy mentioned in a narrative block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyRefData {
    pub id: String,
    pub name: String,
}

// =============================================================================
// Session & History Types
// =============================================================================

/// Pointer to the active session of a campaign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRefData {
    pub session_id: Uuid,
    pub campaign_id: Uuid,
}

/// One row of a paginated session history page
///
/// `role` is the narrator's speaker tag: "player", "narrator", or "system".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntryData {
    pub id: String,
    pub role: String,
    pub text: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub audio_url: Option<String>,
}

// =============================================================================
// World & Quest Types
// =============================================================================

/// A named world entity (location, NPC, shop, or item)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldEntityData {
    pub id: String,
    pub name: String,
}

/// Entity sets for a campaign world, grouped by category
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldEntitySetsData {
    #[serde(default)]
    pub locations: Vec<WorldEntityData>,
    #[serde(default)]
    pub npcs: Vec<WorldEntityData>,
    #[serde(default)]
    pub shops: Vec<WorldEntityData>,
    #[serde(default)]
    pub items: Vec<WorldEntityData>,
}

/// A quest scoped to a campaign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestData {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: String,
}

// =============================================================================
// Save Types
// =============================================================================

/// A named save record scoped to a campaign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveRecordData {
    pub id: String,
    pub campaign_id: Uuid,
    pub name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_line_wire_accepts_both_forms() {
        let bare: InventoryLineWire = serde_json::from_value(serde_json::json!("Torch")).unwrap();
        assert_eq!(bare, InventoryLineWire::Name("Torch".to_string()));

        let pair: InventoryLineWire =
            serde_json::from_value(serde_json::json!({"name": "Torch", "quantity": 3})).unwrap();
        assert_eq!(
            pair,
            InventoryLineWire::Pair {
                name: "Torch".to_string(),
                quantity: 3
            }
        );
    }

    #[test]
    fn test_character_patch_skips_absent_fields() {
        let patch = CharacterPatchData {
            money: Some(25),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({"money": 25}));
    }
}
