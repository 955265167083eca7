//! Mock implementations of the outbound ports for testing
//!
//! These live in the adapters layer (not ports) because they are concrete
//! implementations of port traits; test utilities belong next to the
//! implementations they stand in for.

pub mod memory_cache;
pub mod mock_audio;
pub mod mock_connection;

pub use memory_cache::MemoryTimelineCache;
pub use mock_audio::{AudioCommand, MockAudioChannel};
pub use mock_connection::MockGameConnection;
