//! Loreline Client - live session synchronization and reconciliation layer
//!
//! This crate keeps one consistent view of a running narrative session while
//! the push channel connects, drops, and reconnects, and while REST fetches
//! race live events. It is layered hexagonally:
//!
//! - `domain` - pure session state and pure logic (no IO)
//! - `ports` - trait boundaries the application depends on
//! - `application` - per-component services plus the session coordinator
//! - `infrastructure` - WebSocket/HTTP/cache adapters and test doubles

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;
