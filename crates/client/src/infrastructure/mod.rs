//! Infrastructure adapters - concrete implementations of the outbound ports

pub mod audio;
pub mod cache;
pub mod config;
pub mod http;
pub mod testing;
pub mod websocket;

pub use audio::NullAudioChannel;
pub use cache::FileTimelineCache;
pub use config::ClientConfig;
pub use http::HttpApi;
pub use websocket::{translate, WsConnection};
