//! Combat service - replicated combat state plus outbound combat intents
//!
//! Wraps the pure `CombatTracker` with the client-side UX guard: only the
//! combatant at the current turn index may submit an attack or advance the
//! turn. The guard rejects locally (nothing is sent); the server re-validates
//! regardless.

use std::sync::Arc;

use uuid::Uuid;

use loreline_protocol::ClientMessage;

use crate::domain::{CombatState, CombatTracker};
use crate::ports::outbound::GameConnectionPort;

/// Parameters of an attack submission the caller provides
#[derive(Debug, Clone)]
pub struct AttackSpec {
    pub attack_bonus: i32,
    pub damage_dice: String,
    pub damage_type: String,
    pub advantage: bool,
    pub disadvantage: bool,
}

pub struct CombatService {
    connection: Arc<dyn GameConnectionPort>,
    campaign_id: Uuid,
    tracker: CombatTracker,
}

impl CombatService {
    pub fn new(connection: Arc<dyn GameConnectionPort>, campaign_id: Uuid) -> Self {
        Self {
            connection,
            campaign_id,
            tracker: CombatTracker::new(),
        }
    }

    pub fn state(&self) -> Option<&CombatState> {
        self.tracker.state()
    }

    pub fn apply_snapshot(&mut self, state: CombatState) {
        self.tracker.apply_snapshot(state);
    }

    pub fn apply_hp_update(&mut self, combatant_id: &str, hp: i32, max_hp: i32) {
        self.tracker.apply_hp_update(combatant_id, hp, max_hp);
    }

    pub fn end_combat(&mut self) {
        self.tracker.end_combat();
    }

    /// Submit an attack for the acting combatant
    ///
    /// No-op when the actor does not hold the current turn or when no target
    /// can be resolved.
    pub async fn submit_attack(
        &self,
        acting_id: &str,
        explicit_target: Option<&str>,
        spec: AttackSpec,
    ) {
        if !self.tracker.is_current_turn(acting_id) {
            tracing::debug!(actor = %acting_id, "attack rejected locally: not the current turn");
            return;
        }
        let Some(attacker) = self.tracker.current_combatant() else {
            return;
        };
        let Some(target) = self.tracker.resolve_target(acting_id, explicit_target) else {
            tracing::debug!(actor = %acting_id, "no attack target available, nothing sent");
            return;
        };

        let message = ClientMessage::SubmitAttack {
            campaign_id: self.campaign_id,
            attacker_id: attacker.id.clone(),
            attacker_name: attacker.name.clone(),
            target_id: target.id.clone(),
            target_name: target.name.clone(),
            attack_bonus: spec.attack_bonus,
            target_ac: target.armor_class,
            damage_dice: spec.damage_dice,
            damage_type: spec.damage_type,
            advantage: spec.advantage,
            disadvantage: spec.disadvantage,
        };
        if let Err(error) = self.connection.send(message).await {
            tracing::warn!(%error, "failed to submit attack");
        }
    }

    /// Ask the narrator to advance the turn
    ///
    /// Fire-and-forget: local state only changes when the server pushes the
    /// resulting snapshot.
    pub async fn advance_turn(&self, acting_id: &str) {
        if !self.tracker.is_current_turn(acting_id) {
            tracing::debug!(actor = %acting_id, "turn advance rejected locally: not the current turn");
            return;
        }
        let message = ClientMessage::AdvanceTurn {
            campaign_id: self.campaign_id,
        };
        if let Err(error) = self.connection.send(message).await {
            tracing::warn!(%error, "failed to request turn advance");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Combatant;
    use crate::infrastructure::testing::MockGameConnection;

    fn combatant(id: &str, is_player: bool) -> Combatant {
        Combatant {
            id: id.to_string(),
            name: id.to_uppercase(),
            hp: 10,
            max_hp: 10,
            armor_class: 13,
            initiative: 10,
            is_player,
        }
    }

    fn state(current: usize) -> CombatState {
        CombatState {
            round: 1,
            current_turn_index: current,
            turn_order: vec![
                combatant("p1", true),
                combatant("e1", false),
                combatant("e2", false),
            ],
        }
    }

    fn spec() -> AttackSpec {
        AttackSpec {
            attack_bonus: 4,
            damage_dice: "1d8+2".to_string(),
            damage_type: "slashing".to_string(),
            advantage: false,
            disadvantage: false,
        }
    }

    #[tokio::test]
    async fn test_attack_targets_first_non_player_by_default() {
        let mock = Arc::new(MockGameConnection::new());
        let mut service = CombatService::new(mock.clone(), Uuid::nil());
        service.apply_snapshot(state(0));

        service.submit_attack("p1", None, spec()).await;

        let sent = mock.sent_messages();
        assert_eq!(sent.len(), 1);
        match &sent[0] {
            ClientMessage::SubmitAttack {
                target_id,
                target_ac,
                ..
            } => {
                assert_eq!(target_id, "e1");
                assert_eq!(*target_ac, 13);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_attack_rejected_when_not_current_turn() {
        let mock = Arc::new(MockGameConnection::new());
        let mut service = CombatService::new(mock.clone(), Uuid::nil());
        service.apply_snapshot(state(1));

        service.submit_attack("p1", None, spec()).await;
        assert!(mock.sent_messages().is_empty());
    }

    #[tokio::test]
    async fn test_attack_noop_without_candidate_target() {
        let mock = Arc::new(MockGameConnection::new());
        let mut service = CombatService::new(mock.clone(), Uuid::nil());
        service.apply_snapshot(CombatState {
            round: 1,
            current_turn_index: 0,
            turn_order: vec![combatant("p1", true)],
        });

        service.submit_attack("p1", None, spec()).await;
        assert!(mock.sent_messages().is_empty());
    }

    #[tokio::test]
    async fn test_advance_turn_gated_to_turn_holder() {
        let mock = Arc::new(MockGameConnection::new());
        let mut service = CombatService::new(mock.clone(), Uuid::nil());
        service.apply_snapshot(state(1));

        service.advance_turn("p1").await;
        assert!(mock.sent_messages().is_empty());

        service.advance_turn("e1").await;
        let sent = mock.sent_messages();
        assert_eq!(sent.len(), 1);
        assert!(matches!(sent[0], ClientMessage::AdvanceTurn { .. }));
    }
}
