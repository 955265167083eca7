//! Per-component application services

pub mod actions;
pub mod audio;
pub mod character;
pub mod combat;
pub mod connection;
pub mod saves;
pub mod timeline;
pub mod world;

pub use actions::ActionService;
pub use audio::{AmbienceState, AudioOrchestrator, AudioPlaybackState, NarrationState};
pub use character::CharacterService;
pub use combat::{AttackSpec, CombatService};
pub use connection::ConnectionManager;
pub use saves::SaveService;
pub use timeline::{TimelinePhase, TimelineStore};
pub use world::WorldService;
