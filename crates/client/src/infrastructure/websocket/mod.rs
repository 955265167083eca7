//! WebSocket transport adapter

pub mod client;
pub mod translator;

pub use client::WsConnection;
pub use translator::translate;
