//! Application layer - per-component services and the session coordinator
//!
//! Each component owns its own state slice exclusively and exposes read
//! accessors plus mutation entry points; the coordinator is the only writer
//! of cross-component state.

pub mod coordinator;
pub mod error;
pub mod events;
pub mod services;

pub use coordinator::{SessionCoordinator, SessionSnapshot};
pub use error::ServiceError;
pub use events::SessionEvent;
