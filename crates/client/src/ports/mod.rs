//! Trait boundaries between the application layer and infrastructure

pub mod outbound;
