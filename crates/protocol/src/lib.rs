//! Loreline Protocol - Shared types for Narrator and Client communication
//!
//! This crate contains all types exchanged between the Narrator service
//! (backend) and the Client (this repository):
//! - WebSocket message types (ClientMessage, ServerMessage)
//! - Wire-format DTOs (REST + WebSocket)
//!
//! # Design Principles
//!
//! 1. **Minimal dependencies** - Only serde, uuid, chrono, and serde_json
//! 2. **No business logic** - Pure data types and serialization
//! 3. **No domain types** - the client normalizes these at its boundary

pub mod messages;
pub mod types;

// =============================================================================
// WebSocket Message Types
// =============================================================================
pub use messages::{ClientMessage, ServerMessage};

// =============================================================================
// Wire DTOs
// =============================================================================
pub use types::{
    CharacterPatchData,
    CharacterRecordData,
    CombatStateData,
    CombatantData,
    EnemyRefData,
    HistoryEntryData,
    InventoryDeltaData,
    InventoryLineWire,
    QuestData,
    SaveRecordData,
    SessionRefData,
    WorldEntityData,
    WorldEntitySetsData,
};
