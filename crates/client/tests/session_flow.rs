//! End-to-end coordinator tests over synthetic event sequences
//!
//! No real transport: the mock connection, mock audio channels, in-memory
//! cache, and the API mock stand in for every collaborator.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use loreline_client::application::{SessionCoordinator, SessionEvent};
use loreline_client::domain::{
    CharacterPatch, CombatState, Combatant, InventoryDelta, Message, MessageKind, SessionKey,
    TextSegment, WorldEntity,
};
use loreline_client::infrastructure::testing::{
    MemoryTimelineCache, MockAudioChannel, MockGameConnection,
};
use loreline_client::ports::outbound::{ConnectionStatus, MockApiPort, TransportEvent};
use loreline_protocol::{
    CharacterRecordData, ClientMessage, HistoryEntryData, SessionRefData, WorldEntityData,
    WorldEntitySetsData,
};

fn campaign() -> Uuid {
    Uuid::from_u128(7)
}

fn key() -> SessionKey {
    SessionKey::new(campaign(), "char-1")
}

fn record() -> CharacterRecordData {
    CharacterRecordData {
        id: "char-1".to_string(),
        name: "Grok".to_string(),
        hp: 10,
        max_hp: 12,
        armor_class: 14,
        experience: 0,
        level: 1,
        money: 10,
        inventory: vec![],
    }
}

fn full_api() -> MockApiPort {
    let mut api = MockApiPort::new();
    api.expect_get_character().returning(|_| Ok(record()));
    api.expect_update_character().returning(|_, _| Ok(()));
    api.expect_get_world_entities().returning(|_| {
        Ok(WorldEntitySetsData {
            locations: vec![WorldEntityData {
                id: "l1".to_string(),
                name: "Dawnridge".to_string(),
            }],
            npcs: vec![],
            shops: vec![],
            items: vec![],
        })
    });
    api.expect_resolve_active_session().returning(|campaign_id| {
        Ok(SessionRefData {
            session_id: Uuid::from_u128(99),
            campaign_id,
        })
    });
    api.expect_get_session_history().returning(|_, _| {
        Ok(vec![HistoryEntryData {
            id: "h1".to_string(),
            role: "narrator".to_string(),
            text: "You arrive at Dawnridge.".to_string(),
            created_at: Utc::now(),
            audio_url: None,
        }])
    });
    api
}

fn narrative(id: &str, text: &str) -> Message {
    Message {
        id: id.to_string(),
        kind: MessageKind::Narrative,
        content: text.to_string(),
        created_at: Utc::now(),
        audio_url: None,
    }
}

fn coordinator_with(
    api: MockApiPort,
    connection: Arc<MockGameConnection>,
) -> SessionCoordinator {
    SessionCoordinator::new(
        connection,
        Arc::new(api),
        Arc::new(MemoryTimelineCache::new()),
        Arc::new(MockAudioChannel::new()),
        Arc::new(MockAudioChannel::new()),
        key(),
        "user-1",
    )
}

#[tokio::test]
async fn test_start_publishes_history_and_joins_room() {
    let connection = Arc::new(MockGameConnection::new());
    let mut coordinator = coordinator_with(full_api(), connection.clone());

    coordinator.start("token").await;
    coordinator
        .handle_event(SessionEvent::Transport(TransportEvent::Connected))
        .await;

    let snapshot = coordinator.snapshot();
    assert_eq!(snapshot.status, ConnectionStatus::Connected);
    assert_eq!(snapshot.timeline.len(), 1);
    assert_eq!(snapshot.timeline[0].id, "h1");
    assert_eq!(snapshot.character.as_ref().map(|c| c.money), Some(10));

    assert_eq!(connection.connect_calls(), 1);
    assert!(connection
        .sent_messages()
        .iter()
        .any(|message| matches!(message, ClientMessage::JoinRoom { .. })));
}

#[tokio::test]
async fn test_join_room_reannounced_after_reconnect() {
    let connection = Arc::new(MockGameConnection::new());
    let mut coordinator = coordinator_with(full_api(), connection.clone());
    coordinator.start("token").await;

    coordinator
        .handle_event(SessionEvent::Transport(TransportEvent::Connected))
        .await;
    coordinator
        .handle_event(SessionEvent::Transport(TransportEvent::Reconnecting))
        .await;
    assert_eq!(coordinator.snapshot().status, ConnectionStatus::Reconnecting);
    coordinator
        .handle_event(SessionEvent::Transport(TransportEvent::Connected))
        .await;

    let joins = connection
        .sent_messages()
        .into_iter()
        .filter(|message| matches!(message, ClientMessage::JoinRoom { .. }))
        .count();
    assert_eq!(joins, 2);
}

#[tokio::test]
async fn test_narrative_event_fans_out() {
    let connection = Arc::new(MockGameConnection::new());
    let mut coordinator = coordinator_with(full_api(), connection);
    coordinator.start("token").await;

    coordinator
        .handle_event(SessionEvent::Narrative {
            message: narrative("m1", "A goblin snatches 5 gold and flees!"),
            inventory_delta: Some(InventoryDelta {
                items_added: vec!["Goblin Ear".to_string()],
                items_removed: vec![],
                gold_change: -5,
            }),
            enemies: vec![WorldEntity {
                id: "e1".to_string(),
                name: "Goblin".to_string(),
                kind: loreline_client::domain::EntityKind::Enemy,
            }],
            audio_url: None,
            ambience_url: None,
        })
        .await;

    let snapshot = coordinator.snapshot();
    assert_eq!(snapshot.timeline.last().map(|m| m.id.as_str()), Some("m1"));
    // the delta was reconciled and the authoritative record re-fetched;
    // the mock returns the original record, which wins (last writer)
    assert!(snapshot.character.is_some());

    // enemy refs pool into highlighting next to world entities
    let segments = coordinator.highlight("The Goblin runs toward Dawnridge.");
    let mentioned: Vec<String> = segments
        .iter()
        .filter_map(|segment| match segment {
            TextSegment::Mention { entity, .. } => Some(entity.name.clone()),
            TextSegment::Literal(_) => None,
        })
        .collect();
    assert_eq!(mentioned, vec!["Goblin".to_string(), "Dawnridge".to_string()]);
}

#[tokio::test]
async fn test_duplicate_live_event_is_dropped() {
    let connection = Arc::new(MockGameConnection::new());
    let mut coordinator = coordinator_with(full_api(), connection);
    coordinator.start("token").await;

    for _ in 0..2 {
        coordinator
            .handle_event(SessionEvent::Narrative {
                message: narrative("m1", "The same push, twice."),
                inventory_delta: None,
                enemies: vec![],
                audio_url: None,
                ambience_url: None,
            })
            .await;
    }

    let ids: Vec<_> = coordinator
        .snapshot()
        .timeline
        .iter()
        .map(|m| m.id.clone())
        .collect();
    assert_eq!(ids, vec!["h1".to_string(), "m1".to_string()]);
}

#[tokio::test]
async fn test_combat_replication_and_display_entries() {
    let connection = Arc::new(MockGameConnection::new());
    let mut coordinator = coordinator_with(full_api(), connection);
    coordinator.start("token").await;

    let combatant = |id: &str, is_player: bool| Combatant {
        id: id.to_string(),
        name: id.to_uppercase(),
        hp: 10,
        max_hp: 10,
        armor_class: 12,
        initiative: 10,
        is_player,
    };
    coordinator
        .handle_event(SessionEvent::CombatState(CombatState {
            round: 1,
            current_turn_index: 1,
            turn_order: vec![
                combatant("p1", true),
                combatant("e1", false),
                combatant("e2", false),
            ],
        }))
        .await;
    coordinator
        .handle_event(SessionEvent::CombatHpUpdated {
            combatant_id: "e2".to_string(),
            hp: 3,
            max_hp: 10,
        })
        .await;

    let combat = coordinator.snapshot().combat.unwrap();
    assert_eq!(combat.current_turn_index, 1);
    assert_eq!(combat.turn_order[2].hp, 3);

    coordinator
        .handle_event(SessionEvent::CombatError {
            message: "it is not your turn".to_string(),
        })
        .await;
    coordinator.handle_event(SessionEvent::CombatEnded).await;

    let snapshot = coordinator.snapshot();
    assert!(snapshot.combat.is_none());
    let last = snapshot.timeline.last().unwrap();
    assert_eq!(last.kind, MessageKind::System);
    assert!(last.content.contains("it is not your turn"));
}

#[tokio::test]
async fn test_character_update_replaces_named_fields() {
    let connection = Arc::new(MockGameConnection::new());
    let mut coordinator = coordinator_with(full_api(), connection);
    coordinator.start("token").await;

    coordinator
        .handle_event(SessionEvent::CharacterUpdate(CharacterPatch {
            hp: Some(4),
            ..Default::default()
        }))
        .await;

    let character = coordinator.snapshot().character.unwrap();
    assert_eq!(character.hp, 4);
    assert_eq!(character.money, 10);
}

#[tokio::test]
async fn test_audio_events_scoped_to_campaign() {
    let connection = Arc::new(MockGameConnection::new());
    let narration = Arc::new(MockAudioChannel::new());
    let mut coordinator = SessionCoordinator::new(
        connection,
        Arc::new(full_api()),
        Arc::new(MemoryTimelineCache::new()),
        narration.clone(),
        Arc::new(MockAudioChannel::new()),
        key(),
        "user-1",
    );
    coordinator.start("token").await;
    coordinator.note_user_gesture();

    // a clip for some other campaign is ignored
    coordinator
        .handle_event(SessionEvent::AudioReady {
            campaign_id: Uuid::from_u128(12345),
            url: "https://cdn/other.wav".to_string(),
        })
        .await;
    assert!(narration.commands().is_empty());

    coordinator
        .handle_event(SessionEvent::AudioReady {
            campaign_id: campaign(),
            url: "https://cdn/mine.wav".to_string(),
        })
        .await;
    assert!(!narration.commands().is_empty());
    assert!(coordinator.snapshot().audio.narration.is_playing);
}

#[tokio::test]
async fn test_failed_action_submission_becomes_system_entry() {
    let connection = Arc::new(MockGameConnection::new());
    connection.reject_sends();
    let mut api = full_api();
    api.expect_submit_action().returning(|_, _, _| {
        Err(loreline_client::ports::outbound::ApiError::Transport(
            "offline".to_string(),
        ))
    });

    let mut coordinator = coordinator_with(api, connection);
    coordinator.start("token").await;
    coordinator.submit_action("open the chest").await;

    let snapshot = coordinator.snapshot();
    let kinds: Vec<_> = snapshot.timeline.iter().map(|m| m.kind).collect();
    assert!(kinds.contains(&MessageKind::Action));
    assert_eq!(kinds.last(), Some(&MessageKind::System));
}
