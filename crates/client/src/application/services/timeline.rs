//! Timeline store - the canonical ordered message list
//!
//! Merges three disagreeing sources: the persisted local cache (published
//! synchronously at construction), the paginated server history (fetched
//! concurrently and authoritative on conflict), and live push events
//! (appended with id-based dedup). Every mutation writes the full timeline
//! back to the cache so a reload can re-hydrate near-instantly.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Message, SessionKey};
use crate::ports::outbound::{ApiPort, TimelineCachePort};

/// Newest history entries fetched per page
pub const HISTORY_PAGE_SIZE: u32 = 100;

/// Lifecycle of the store's contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelinePhase {
    /// No content yet
    Empty,
    /// Showing cached content, history fetch not started
    Hydrating,
    /// Awaiting the server history page
    Loading,
    /// History applied; live events append from here
    Live,
}

pub struct TimelineStore {
    api: Arc<dyn ApiPort>,
    cache: Arc<dyn TimelineCachePort>,
    key: SessionKey,
    session_id: Option<Uuid>,
    phase: TimelinePhase,
    messages: Vec<Message>,
}

impl TimelineStore {
    /// Create the store and synchronously hydrate from cache
    ///
    /// Cached content is published immediately so rendering has something to
    /// show before any network round trip completes.
    pub fn new(
        api: Arc<dyn ApiPort>,
        cache: Arc<dyn TimelineCachePort>,
        key: SessionKey,
    ) -> Self {
        let (messages, phase) = match cache.load(&key) {
            Some(cached) if !cached.is_empty() => (cached, TimelinePhase::Hydrating),
            _ => (Vec::new(), TimelinePhase::Empty),
        };
        Self {
            api,
            cache,
            key,
            session_id: None,
            phase,
            messages,
        }
    }

    pub fn phase(&self) -> TimelinePhase {
        self.phase
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Pin an explicit history target, skipping the active-session lookup
    pub fn set_session_id(&mut self, session_id: Uuid) {
        self.session_id = Some(session_id);
    }

    /// Fetch the authoritative history page and replace the hydrated content
    ///
    /// The cache is a latency optimization, not a durable log: server
    /// history supersedes it on conflict. Fetch faults keep the last-known
    /// content.
    pub async fn load_history(&mut self) {
        self.phase = TimelinePhase::Loading;

        let session_id = match self.session_id {
            Some(id) => id,
            None => match self.api.resolve_active_session(self.key.campaign_id).await {
                Ok(session) => {
                    self.session_id = Some(session.session_id);
                    session.session_id
                }
                Err(error) => {
                    tracing::warn!(%error, "could not resolve active session, keeping cached timeline");
                    self.phase = TimelinePhase::Live;
                    return;
                }
            },
        };

        match self
            .api
            .get_session_history(session_id, HISTORY_PAGE_SIZE)
            .await
        {
            Ok(entries) => {
                self.messages = entries.into_iter().map(Message::from).collect();
                self.persist();
            }
            Err(error) => {
                tracing::warn!(%error, "history fetch failed, keeping cached timeline");
            }
        }
        self.phase = TimelinePhase::Live;
    }

    /// Append a live message, deduplicated by id
    ///
    /// Re-delivering an id already present changes nothing, so the merge is
    /// idempotent and the timeline never shrinks here.
    pub fn append_live(&mut self, message: Message) {
        if self.messages.iter().any(|existing| existing.id == message.id) {
            tracing::debug!(id = %message.id, "duplicate live message dropped");
            return;
        }
        self.messages.push(message);
        self.persist();
    }

    /// Append a client-generated System entry (user-facing faults)
    pub fn push_system(&mut self, content: impl Into<String>) {
        self.messages.push(Message::system(content));
        self.persist();
    }

    /// Switch to a new session key, dropping the old content
    ///
    /// The only path on which consumers may observe the timeline shrink.
    pub fn reset(&mut self, key: SessionKey) {
        self.key = key;
        self.session_id = None;
        let (messages, phase) = match self.cache.load(&self.key) {
            Some(cached) if !cached.is_empty() => (cached, TimelinePhase::Hydrating),
            _ => (Vec::new(), TimelinePhase::Empty),
        };
        self.messages = messages;
        self.phase = phase;
    }

    fn persist(&self) {
        self.cache.store(&self.key, &self.messages);
    }
}
