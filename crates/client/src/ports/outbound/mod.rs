//! Outbound ports - dependencies the application layer calls out through

pub mod api;
pub mod audio;
pub mod game_connection;
pub mod timeline_cache;

pub use api::{ApiError, ApiPort, MockApiPort};
pub use audio::{AudioChannelPort, AudioError};
pub use game_connection::{ConnectionError, ConnectionStatus, GameConnectionPort, TransportEvent};
pub use timeline_cache::TimelineCachePort;
