//! World service - campaign world entities and quests
//!
//! Fetch faults keep the last-known values so the corresponding view never
//! blanks.

use std::sync::Arc;

use uuid::Uuid;

use loreline_protocol::{QuestData, WorldEntitySetsData};

use crate::domain::{EntityKind, WorldEntity};
use crate::ports::outbound::ApiPort;

pub struct WorldService {
    api: Arc<dyn ApiPort>,
    campaign_id: Uuid,
    entities: Vec<WorldEntity>,
    quests: Vec<QuestData>,
}

impl WorldService {
    pub fn new(api: Arc<dyn ApiPort>, campaign_id: Uuid) -> Self {
        Self {
            api,
            campaign_id,
            entities: Vec::new(),
            quests: Vec::new(),
        }
    }

    /// All known entities pooled across categories
    pub fn entities(&self) -> &[WorldEntity] {
        &self.entities
    }

    pub fn quests(&self) -> &[QuestData] {
        &self.quests
    }

    /// Refresh the entity pool; faults keep the last-known pool
    pub async fn refresh_entities(&mut self) {
        match self.api.get_world_entities(self.campaign_id).await {
            Ok(sets) => self.entities = pool(sets),
            Err(error) => {
                tracing::warn!(%error, "world entity fetch failed, keeping last-known set");
            }
        }
    }

    /// Refresh quests by status; faults keep the last-known list
    pub async fn refresh_quests(&mut self, status: &str) {
        match self.api.get_quests(self.campaign_id, status).await {
            Ok(quests) => self.quests = quests,
            Err(error) => {
                tracing::warn!(%error, "quest fetch failed, keeping last-known list");
            }
        }
    }
}

fn pool(sets: WorldEntitySetsData) -> Vec<WorldEntity> {
    let tag = |kind: EntityKind| {
        move |entity: loreline_protocol::WorldEntityData| WorldEntity {
            id: entity.id,
            name: entity.name,
            kind,
        }
    };
    sets.locations
        .into_iter()
        .map(tag(EntityKind::Location))
        .chain(sets.npcs.into_iter().map(tag(EntityKind::Npc)))
        .chain(sets.shops.into_iter().map(tag(EntityKind::Shop)))
        .chain(sets.items.into_iter().map(tag(EntityKind::Item)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::{ApiError, MockApiPort};
    use loreline_protocol::WorldEntityData;

    fn sets() -> WorldEntitySetsData {
        WorldEntitySetsData {
            locations: vec![WorldEntityData {
                id: "l1".to_string(),
                name: "Dawnridge".to_string(),
            }],
            npcs: vec![WorldEntityData {
                id: "n1".to_string(),
                name: "Elara".to_string(),
            }],
            shops: vec![],
            items: vec![],
        }
    }

    #[tokio::test]
    async fn test_entities_pooled_across_categories() {
        let mut api = MockApiPort::new();
        api.expect_get_world_entities().returning(|_| Ok(sets()));

        let mut service = WorldService::new(Arc::new(api), Uuid::nil());
        service.refresh_entities().await;

        let kinds: Vec<_> = service.entities().iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EntityKind::Location, EntityKind::Npc]);
    }

    #[tokio::test]
    async fn test_quests_refreshed_by_status() {
        let mut api = MockApiPort::new();
        api.expect_get_quests()
            .withf(|_, status| status == "active")
            .returning(|_, _| {
                Ok(vec![QuestData {
                    id: "q1".to_string(),
                    name: "The Missing Caravan".to_string(),
                    description: "Find the caravan lost near Dawnridge.".to_string(),
                    status: "active".to_string(),
                }])
            });

        let mut service = WorldService::new(Arc::new(api), Uuid::nil());
        service.refresh_quests("active").await;
        assert_eq!(service.quests().len(), 1);
        assert_eq!(service.quests()[0].id, "q1");
    }

    #[tokio::test]
    async fn test_fetch_fault_keeps_last_known() {
        let mut api = MockApiPort::new();
        let mut calls = 0;
        api.expect_get_world_entities().returning(move |_| {
            calls += 1;
            if calls == 1 {
                Ok(sets())
            } else {
                Err(ApiError::Transport("offline".to_string()))
            }
        });

        let mut service = WorldService::new(Arc::new(api), Uuid::nil());
        service.refresh_entities().await;
        service.refresh_entities().await;
        assert_eq!(service.entities().len(), 2);
    }
}
