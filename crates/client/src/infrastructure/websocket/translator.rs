//! Wire-to-application message translation
//!
//! Normalizes `ServerMessage` payloads into `SessionEvent`s carrying domain
//! types, so the application layer never touches wire DTOs.

use loreline_protocol::ServerMessage;

use crate::application::SessionEvent;
use crate::domain::{AttackResult, EntityKind, Message, MessageKind, WorldEntity};

/// Translate one server message into a session event
///
/// Returns None for transport chatter with no application meaning.
pub fn translate(message: ServerMessage) -> Option<SessionEvent> {
    match message {
        ServerMessage::Narrative {
            id,
            text,
            created_at,
            inventory_delta,
            enemies,
            audio_url,
            ambience_url,
        } => Some(SessionEvent::Narrative {
            message: Message {
                id,
                kind: MessageKind::Narrative,
                content: text,
                created_at,
                audio_url: audio_url.clone(),
            },
            inventory_delta: inventory_delta.map(Into::into),
            enemies: enemies
                .unwrap_or_default()
                .into_iter()
                .map(|enemy| WorldEntity {
                    id: enemy.id,
                    name: enemy.name,
                    kind: EntityKind::Enemy,
                })
                .collect(),
            audio_url,
            ambience_url,
        }),
        ServerMessage::CombatState { state } => Some(SessionEvent::CombatState(state.into())),
        ServerMessage::CombatHpUpdated {
            combatant_id,
            hp,
            max_hp,
        } => Some(SessionEvent::CombatHpUpdated {
            combatant_id,
            hp,
            max_hp,
        }),
        ServerMessage::CombatAttackResult {
            attacker_name,
            target_name,
            hit,
            critical,
            damage,
            attack_roll,
            ..
        } => Some(SessionEvent::CombatAttackResult(AttackResult {
            attacker_name,
            target_name,
            hit,
            critical,
            damage,
            attack_roll,
        })),
        ServerMessage::CombatEnded => Some(SessionEvent::CombatEnded),
        ServerMessage::CombatError { message } => Some(SessionEvent::CombatError { message }),
        ServerMessage::GameError { message } => Some(SessionEvent::GameError { message }),
        ServerMessage::CharacterUpdate { fields } => {
            Some(SessionEvent::CharacterUpdate(fields.into()))
        }
        ServerMessage::AudioReady { campaign_id, url } => {
            Some(SessionEvent::AudioReady { campaign_id, url })
        }
        ServerMessage::AmbienceReady { campaign_id, url } => {
            Some(SessionEvent::AmbienceReady { campaign_id, url })
        }
        ServerMessage::Pong => None,
    }
}
