//! Session coordinator - wires the components and exposes one snapshot
//!
//! The canonical place where incoming session events become state
//! mutations. Each event is dispatched through a single match so tests can
//! drive the whole session with synthetic event sequences.

use std::sync::Arc;

use uuid::Uuid;

use crate::application::events::SessionEvent;
use crate::application::services::{
    ActionService, AttackSpec, AudioOrchestrator, AudioPlaybackState, CharacterService,
    CombatService, ConnectionManager, SaveService, TimelinePhase, TimelineStore, WorldService,
};
use crate::domain::{
    highlight, AttackResult, CharacterSnapshot, CombatState, Message, SessionKey, TextSegment,
    WorldEntity,
};
use crate::ports::outbound::{
    ApiPort, AudioChannelPort, ConnectionStatus, GameConnectionPort, TimelineCachePort,
};

/// Composed read-only view consumed by rendering
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    pub status: ConnectionStatus,
    pub phase: TimelinePhase,
    pub timeline: Vec<Message>,
    pub character: Option<CharacterSnapshot>,
    pub combat: Option<CombatState>,
    pub audio: AudioPlaybackState,
}

pub struct SessionCoordinator {
    campaign_id: Uuid,
    key: SessionKey,
    connection: ConnectionManager,
    timeline: TimelineStore,
    character: CharacterService,
    combat: CombatService,
    audio: AudioOrchestrator,
    world: WorldService,
    saves: SaveService,
    actions: ActionService,
    /// Enemy references from the latest narrative block, pooled into
    /// highlighting alongside the world entity sets
    enemies: Vec<WorldEntity>,
}

impl SessionCoordinator {
    pub fn new(
        connection: Arc<dyn GameConnectionPort>,
        api: Arc<dyn ApiPort>,
        cache: Arc<dyn TimelineCachePort>,
        narration: Arc<dyn AudioChannelPort>,
        ambience: Arc<dyn AudioChannelPort>,
        key: SessionKey,
        user_id: impl Into<String>,
    ) -> Self {
        let campaign_id = key.campaign_id;
        let character_id = key.character_id.clone();
        Self {
            campaign_id,
            key: key.clone(),
            connection: ConnectionManager::new(connection.clone(), campaign_id, user_id),
            timeline: TimelineStore::new(api.clone(), cache, key),
            character: CharacterService::new(api.clone()),
            combat: CombatService::new(connection.clone(), campaign_id),
            audio: AudioOrchestrator::new(narration, ambience),
            world: WorldService::new(api.clone(), campaign_id),
            saves: SaveService::new(api.clone(), campaign_id),
            actions: ActionService::new(connection, api, campaign_id, character_id),
            enemies: Vec::new(),
        }
    }

    /// Connect and load the session's initial state
    ///
    /// Cached timeline content is already published by construction; this
    /// resolves the authoritative history, character, and world data.
    pub async fn start(&mut self, auth_token: &str) {
        self.connection.connect(auth_token).await;
        let character_id = self.key.character_id.clone();
        self.character.load(&character_id).await;
        self.world.refresh_entities().await;
        self.timeline.load_history().await;
    }

    /// Stop live-event processing
    ///
    /// In-flight fetches are not cancelled; their results may still apply.
    pub async fn disconnect(&mut self) {
        self.connection.disconnect().await;
    }

    /// Dispatch one session event
    pub async fn handle_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Transport(transport) => {
                self.connection.handle_transport_event(transport).await;
            }

            SessionEvent::Narrative {
                message,
                inventory_delta,
                enemies,
                audio_url,
                ambience_url,
            } => {
                self.timeline.append_live(message);
                if let Some(delta) = inventory_delta {
                    self.character.apply_delta(&delta).await;
                }
                if !enemies.is_empty() {
                    self.enemies = enemies;
                }
                if let Some(url) = audio_url {
                    self.audio.handle_clip_ready(url).await;
                }
                if let Some(url) = ambience_url {
                    self.audio.handle_ambience_ready(url).await;
                }
            }

            SessionEvent::CombatState(state) => {
                self.combat.apply_snapshot(state);
            }
            SessionEvent::CombatHpUpdated {
                combatant_id,
                hp,
                max_hp,
            } => {
                self.combat.apply_hp_update(&combatant_id, hp, max_hp);
            }
            SessionEvent::CombatAttackResult(result) => {
                self.timeline.push_system(describe_attack(&result));
            }
            SessionEvent::CombatEnded => {
                self.combat.end_combat();
            }
            SessionEvent::CombatError { message } => {
                self.timeline.push_system(format!("Combat error: {message}"));
            }
            SessionEvent::GameError { message } => {
                self.timeline.push_system(format!("Game error: {message}"));
            }

            SessionEvent::CharacterUpdate(patch) => {
                self.character.apply_server_patch(&patch);
            }

            SessionEvent::AudioReady { campaign_id, url } => {
                if campaign_id == self.campaign_id {
                    self.audio.handle_clip_ready(url).await;
                }
            }
            SessionEvent::AmbienceReady { campaign_id, url } => {
                if campaign_id == self.campaign_id {
                    self.audio.handle_ambience_ready(url).await;
                }
            }
        }
    }

    /// Submit a free-text action
    ///
    /// The action appears on the timeline immediately; a failed submission
    /// becomes a System entry instead of an error.
    pub async fn submit_action(&mut self, action: &str) {
        let trimmed = action.trim();
        if trimmed.is_empty() {
            return;
        }
        self.timeline.append_live(Message::action(trimmed));
        if let Err(error) = self.actions.submit(trimmed).await {
            tracing::warn!(%error, "action submission failed");
            self.timeline
                .push_system("Could not reach the narrator; your action was not delivered.");
        }
    }

    /// Submit an attack for the acting combatant
    pub async fn submit_attack(
        &mut self,
        acting_id: &str,
        explicit_target: Option<&str>,
        spec: AttackSpec,
    ) {
        self.combat
            .submit_attack(acting_id, explicit_target, spec)
            .await;
    }

    /// Request a turn advance for the acting combatant
    pub async fn advance_turn(&mut self, acting_id: &str) {
        self.combat.advance_turn(acting_id).await;
    }

    /// Create a named save; failures surface as System entries
    pub async fn create_save(&mut self, name: &str) {
        match self.saves.create(name).await {
            Ok(record) => {
                self.timeline
                    .push_system(format!("Saved game as \"{}\".", record.name));
            }
            Err(error) => {
                tracing::warn!(%error, "save failed");
                self.timeline.push_system("Saving the game failed.");
            }
        }
    }

    /// Load a named save; the server rewinds, so the client re-syncs
    ///
    /// Failures surface as System entries rather than errors.
    pub async fn load_save(&mut self, save_id: &str) {
        match self.saves.get(save_id).await {
            Ok(record) => {
                let character_id = self.key.character_id.clone();
                self.character.load(&character_id).await;
                self.timeline.load_history().await;
                self.timeline
                    .push_system(format!("Loaded save \"{}\".", record.name));
            }
            Err(error) => {
                tracing::warn!(%error, "save load failed");
                self.timeline.push_system("Loading the save failed.");
            }
        }
    }

    /// Switch to another (campaign, character) pair
    ///
    /// The one path on which the timeline may shrink: the store resets to
    /// the new key's cache and reloads history.
    pub async fn switch_session(&mut self, key: SessionKey) {
        self.key = key.clone();
        self.timeline.reset(key.clone());
        self.character.load(&key.character_id).await;
        self.timeline.load_history().await;
    }

    /// Mark a user gesture for the audio unlock gate
    pub fn note_user_gesture(&mut self) {
        self.audio.note_user_gesture();
    }

    pub fn audio_mut(&mut self) -> &mut AudioOrchestrator {
        &mut self.audio
    }

    pub fn world_mut(&mut self) -> &mut WorldService {
        &mut self.world
    }

    pub fn saves(&self) -> &SaveService {
        &self.saves
    }

    /// Highlight entity mentions in narrative text
    ///
    /// Pools the campaign's world entities with the latest narrative block's
    /// enemy references.
    pub fn highlight(&self, text: &str) -> Vec<TextSegment> {
        let mut pool: Vec<WorldEntity> = self.world.entities().to_vec();
        pool.extend(self.enemies.iter().cloned());
        highlight(text, &pool)
    }

    /// The composed snapshot consumed by rendering
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            status: self.connection.status(),
            phase: self.timeline.phase(),
            timeline: self.timeline.messages().to_vec(),
            character: self.character.snapshot().cloned(),
            combat: self.combat.state().cloned(),
            audio: self.audio.state().clone(),
        }
    }
}

fn describe_attack(result: &AttackResult) -> String {
    if !result.hit {
        return format!(
            "{} misses {} (rolled {}).",
            result.attacker_name, result.target_name, result.attack_roll
        );
    }
    let crit = if result.critical { " Critical hit!" } else { "" };
    format!(
        "{} hits {} for {} damage (rolled {}).{}",
        result.attacker_name, result.target_name, result.damage, result.attack_roll, crit
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_attack_variants() {
        let mut result = AttackResult {
            attacker_name: "Grok".to_string(),
            target_name: "Goblin".to_string(),
            hit: true,
            critical: true,
            damage: 9,
            attack_roll: 20,
        };
        assert_eq!(
            describe_attack(&result),
            "Grok hits Goblin for 9 damage (rolled 20). Critical hit!"
        );
        result.hit = false;
        assert_eq!(describe_attack(&result), "Grok misses Goblin (rolled 20).");
    }
}
