//! Character service - reconciles deltas against the held character state
//!
//! The pure reconciliation lives in `domain::inventory`; this service adds
//! the empty-delta guard, the optimistic local update, the remote persist,
//! and the authoritative re-fetch that corrects any divergence caused by
//! concurrent server-side mutation.

use std::sync::Arc;

use loreline_protocol::CharacterPatchData;

use crate::domain::{inventory, CharacterPatch, CharacterSnapshot, InventoryDelta};
use crate::ports::outbound::ApiPort;

pub struct CharacterService {
    api: Arc<dyn ApiPort>,
    snapshot: Option<CharacterSnapshot>,
}

impl CharacterService {
    pub fn new(api: Arc<dyn ApiPort>) -> Self {
        Self {
            api,
            snapshot: None,
        }
    }

    pub fn snapshot(&self) -> Option<&CharacterSnapshot> {
        self.snapshot.as_ref()
    }

    /// Fetch the character record; faults keep the last-known value
    pub async fn load(&mut self, character_id: &str) {
        match self.api.get_character(character_id).await {
            Ok(record) => self.snapshot = Some(record.into()),
            Err(error) => {
                tracing::warn!(%error, "character fetch failed, keeping last-known snapshot");
            }
        }
    }

    /// Apply a narrative-turn delta, persist it, then re-fetch
    ///
    /// An all-zero delta is skipped entirely: no snapshot replacement, no
    /// network write. After a successful persist the authoritative record is
    /// preferred over the optimistic local value.
    pub async fn apply_delta(&mut self, delta: &InventoryDelta) {
        if delta.is_empty() {
            tracing::debug!("empty inventory delta, skipping");
            return;
        }
        let Some(current) = self.snapshot.as_ref() else {
            tracing::debug!("inventory delta before character load, ignoring");
            return;
        };

        let next = inventory::apply(current, delta);
        let character_id = next.id.clone();
        let patch = CharacterPatchData {
            money: Some(next.money),
            inventory: Some(next.inventory.iter().map(Into::into).collect()),
            ..Default::default()
        };
        self.snapshot = Some(next);

        if let Err(error) = self.api.update_character(&character_id, &patch).await {
            tracing::warn!(%error, "failed to persist reconciled character, keeping optimistic value");
            return;
        }
        match self.api.get_character(&character_id).await {
            Ok(record) => self.snapshot = Some(record.into()),
            Err(error) => {
                tracing::warn!(%error, "post-persist re-fetch failed, keeping optimistic value");
            }
        }
    }

    /// Apply a partial server-pushed update
    ///
    /// Last-applied-wins with any in-flight re-fetch: each present field
    /// replaces the local value wholesale.
    pub fn apply_server_patch(&mut self, patch: &CharacterPatch) {
        if let Some(snapshot) = self.snapshot.as_mut() {
            patch.apply_to(snapshot);
        }
    }

    /// Dedicated money increment/decrement affordance
    ///
    /// Unlike delta-driven gold changes this never takes the displayed or
    /// persisted value below zero.
    pub async fn adjust_money(&mut self, amount: i64) {
        let Some(snapshot) = self.snapshot.as_mut() else {
            return;
        };
        snapshot.money = (snapshot.money + amount).max(0);
        let character_id = snapshot.id.clone();
        let patch = CharacterPatchData {
            money: Some(snapshot.money),
            ..Default::default()
        };
        if let Err(error) = self.api.update_character(&character_id, &patch).await {
            tracing::warn!(%error, "failed to persist money adjustment");
        }
    }
}
