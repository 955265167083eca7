//! Application-layer session events
//!
//! The typed event enumeration consumed by the coordinator's dispatch
//! function. Infrastructure translates wire messages into these, so unit
//! tests can feed synthetic event sequences without a real transport.

use uuid::Uuid;

use crate::domain::{AttackResult, CharacterPatch, CombatState, InventoryDelta, Message, WorldEntity};
use crate::ports::outbound::TransportEvent;

/// Everything the coordinator can react to
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Transport lifecycle change
    Transport(TransportEvent),
    /// A narrative block with its optional side-channel data
    Narrative {
        message: Message,
        inventory_delta: Option<InventoryDelta>,
        enemies: Vec<WorldEntity>,
        audio_url: Option<String>,
        ambience_url: Option<String>,
    },
    /// Full combat snapshot
    CombatState(CombatState),
    /// Single-combatant hp patch
    CombatHpUpdated {
        combatant_id: String,
        hp: i32,
        max_hp: i32,
    },
    /// Attack outcome, display only
    CombatAttackResult(AttackResult),
    /// Combat over; turn order discarded
    CombatEnded,
    /// Combat-scoped error text
    CombatError { message: String },
    /// Session-scoped error text
    GameError { message: String },
    /// Partial character update
    CharacterUpdate(CharacterPatch),
    /// Narration clip ready, scoped to a campaign
    AudioReady { campaign_id: Uuid, url: String },
    /// Ambience track ready, scoped to a campaign
    AmbienceReady { campaign_id: Uuid, url: String },
}
