//! In-memory timeline cache with write counting

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::domain::{Message, SessionKey};
use crate::ports::outbound::TimelineCachePort;

/// In-memory `TimelineCachePort` for tests
#[derive(Clone, Default)]
pub struct MemoryTimelineCache {
    entries: Arc<Mutex<HashMap<String, Vec<Message>>>>,
    store_count: Arc<Mutex<usize>>,
}

impl MemoryTimelineCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `store` calls observed, for no-redundant-write assertions
    pub fn store_count(&self) -> usize {
        *self.store_count.lock().expect("mock state")
    }
}

impl TimelineCachePort for MemoryTimelineCache {
    fn load(&self, key: &SessionKey) -> Option<Vec<Message>> {
        self.entries
            .lock()
            .expect("mock state")
            .get(&key.storage_key())
            .cloned()
    }

    fn store(&self, key: &SessionKey, messages: &[Message]) {
        self.entries
            .lock()
            .expect("mock state")
            .insert(key.storage_key(), messages.to_vec());
        *self.store_count.lock().expect("mock state") += 1;
    }
}
