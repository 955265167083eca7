//! Combat turn-order replication
//!
//! The tracker mirrors combat state pushed incrementally by the narrator.
//! Full snapshots replace the state wholesale (the turn order's composition
//! can change between pushes, so partial patching would be unsafe); hp
//! updates patch a single combatant by id.

use serde::{Deserialize, Serialize};

use loreline_protocol::{CombatStateData, CombatantData};

/// A combat participant as displayed locally
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Combatant {
    pub id: String,
    pub name: String,
    pub hp: i32,
    pub max_hp: i32,
    pub armor_class: i32,
    pub initiative: i32,
    pub is_player: bool,
}

impl From<CombatantData> for Combatant {
    fn from(data: CombatantData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            hp: data.hp,
            max_hp: data.max_hp,
            armor_class: data.armor_class,
            initiative: data.initiative,
            is_player: data.is_player,
        }
    }
}

/// Replicated turn-order state for one combat instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatState {
    pub round: u32,
    pub current_turn_index: usize,
    pub turn_order: Vec<Combatant>,
}

impl From<CombatStateData> for CombatState {
    fn from(data: CombatStateData) -> Self {
        Self {
            round: data.round.max(1),
            current_turn_index: data.current_turn_index,
            turn_order: data.turn_order.into_iter().map(Into::into).collect(),
        }
    }
}

/// Result of a resolved attack, replicated for display only
#[derive(Debug, Clone, PartialEq)]
pub struct AttackResult {
    pub attacker_name: String,
    pub target_name: String,
    pub hit: bool,
    pub critical: bool,
    pub damage: i32,
    pub attack_roll: i32,
}

/// Holds the active combat instance, if any
///
/// `NoCombat <-> Active`: created by a full snapshot, destroyed by combat
/// end. Each combat instance starts fresh.
#[derive(Debug, Default)]
pub struct CombatTracker {
    state: Option<CombatState>,
}

impl CombatTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Option<&CombatState> {
        self.state.as_ref()
    }

    pub fn in_combat(&self) -> bool {
        self.state.is_some()
    }

    /// Replace the combat state wholesale from a server snapshot
    pub fn apply_snapshot(&mut self, state: CombatState) {
        self.state = Some(state);
    }

    /// Patch one combatant's hit points by id
    ///
    /// An unknown combatant id leaves the turn order untouched.
    pub fn apply_hp_update(&mut self, combatant_id: &str, hp: i32, max_hp: i32) {
        let Some(state) = self.state.as_mut() else {
            return;
        };
        match state
            .turn_order
            .iter_mut()
            .find(|combatant| combatant.id == combatant_id)
        {
            Some(combatant) => {
                combatant.max_hp = max_hp;
                // clamp for display; the server value stays authoritative
                combatant.hp = hp.clamp(0, max_hp.max(0));
            }
            None => {
                tracing::debug!(id = %combatant_id, "hp update for unknown combatant, ignoring");
            }
        }
    }

    /// Drop the combat instance
    pub fn end_combat(&mut self) {
        self.state = None;
    }

    /// The combatant whose action is currently expected
    pub fn current_combatant(&self) -> Option<&Combatant> {
        let state = self.state.as_ref()?;
        state.turn_order.get(state.current_turn_index)
    }

    /// True when the given combatant holds the current turn
    pub fn is_current_turn(&self, combatant_id: &str) -> bool {
        self.current_combatant()
            .is_some_and(|combatant| combatant.id == combatant_id)
    }

    /// Pick an attack target when none was chosen explicitly
    ///
    /// Preference order: the explicit target if given and present, then the
    /// first non-player combatant in turn order, then the first combatant
    /// whose id differs from the attacker. None means the attack is a no-op.
    pub fn resolve_target(&self, acting_id: &str, explicit: Option<&str>) -> Option<&Combatant> {
        let state = self.state.as_ref()?;
        if let Some(target_id) = explicit {
            return state
                .turn_order
                .iter()
                .find(|combatant| combatant.id == target_id);
        }
        state
            .turn_order
            .iter()
            .find(|combatant| !combatant.is_player)
            .or_else(|| {
                state
                    .turn_order
                    .iter()
                    .find(|combatant| combatant.id != acting_id)
            })
    }
}
