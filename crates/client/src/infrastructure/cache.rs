//! File-backed timeline cache
//!
//! One JSON file per (campaign, character) pair under the platform cache
//! directory. Best effort only: every failure is logged and swallowed, and
//! the next authoritative history fetch overwrites the entry anyway.

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;

use crate::domain::{Message, SessionKey};
use crate::ports::outbound::TimelineCachePort;

pub struct FileTimelineCache {
    dir: PathBuf,
}

impl FileTimelineCache {
    /// Cache under the platform-specific cache directory
    pub fn new() -> Option<Self> {
        let dirs = ProjectDirs::from("", "", "loreline")?;
        Some(Self::with_dir(dirs.cache_dir().join("timelines")))
    }

    /// Cache under an explicit directory (config override and tests)
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        if let Err(error) = fs::create_dir_all(&dir) {
            tracing::warn!(%error, dir = %dir.display(), "could not create cache directory");
        }
        Self { dir }
    }

    fn path_for(&self, key: &SessionKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.storage_key()))
    }
}

impl TimelineCachePort for FileTimelineCache {
    fn load(&self, key: &SessionKey) -> Option<Vec<Message>> {
        let path = self.path_for(key);
        let raw = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(messages) => Some(messages),
            Err(error) => {
                tracing::warn!(%error, path = %path.display(), "discarding unreadable timeline cache");
                None
            }
        }
    }

    fn store(&self, key: &SessionKey, messages: &[Message]) {
        let path = self.path_for(key);
        let json = match serde_json::to_string(messages) {
            Ok(json) => json,
            Err(error) => {
                tracing::warn!(%error, "could not serialize timeline for caching");
                return;
            }
        };
        if let Err(error) = fs::write(&path, json) {
            tracing::warn!(%error, path = %path.display(), "timeline cache write failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MessageKind;
    use chrono::Utc;
    use uuid::Uuid;

    fn message(id: &str) -> Message {
        Message {
            id: id.to_string(),
            kind: MessageKind::Narrative,
            content: "text".to_string(),
            created_at: Utc::now(),
            audio_url: None,
        }
    }

    #[test]
    fn test_round_trip_per_session_key() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileTimelineCache::with_dir(dir.path());
        let key_a = SessionKey::new(Uuid::nil(), "char-a");
        let key_b = SessionKey::new(Uuid::nil(), "char-b");

        cache.store(&key_a, &[message("a1"), message("a2")]);
        cache.store(&key_b, &[message("b1")]);

        let loaded = cache.load(&key_a).unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].id, "a1");
        assert_eq!(cache.load(&key_b).unwrap().len(), 1);
    }

    #[test]
    fn test_missing_entry_loads_none() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileTimelineCache::with_dir(dir.path());
        assert!(cache.load(&SessionKey::new(Uuid::nil(), "nobody")).is_none());
    }

    #[test]
    fn test_corrupt_entry_discarded() {
        let dir = tempfile::tempdir().unwrap();
        let cache = FileTimelineCache::with_dir(dir.path());
        let key = SessionKey::new(Uuid::nil(), "char-a");
        fs::write(dir.path().join(format!("{}.json", key.storage_key())), "{not json").unwrap();
        assert!(cache.load(&key).is_none());
    }
}
