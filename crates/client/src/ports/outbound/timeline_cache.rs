//! Timeline Cache Port - local persistence for the message timeline
//!
//! Best-effort storage, overwritten by the next authoritative fetch. Loads
//! are synchronous so the store can publish cached content before any
//! network round trip completes.

use crate::domain::{Message, SessionKey};

/// Local cache boundary, one entry per session key
pub trait TimelineCachePort: Send + Sync {
    /// Load the cached timeline for a session key, if any
    fn load(&self, key: &SessionKey) -> Option<Vec<Message>>;

    /// Persist the full timeline for a session key
    ///
    /// Fire-and-forget: adapters log and swallow failures.
    fn store(&self, key: &SessionKey, messages: &[Message]);
}
