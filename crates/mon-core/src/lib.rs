//! Core types for Monster: actors, locations, and the shared world registry.
//!
//! This crate is the contract between the rules engines and the game-object
//! framework around them. It models only the state the rules read and mutate
//! (health, level, transient concealment, room policy, occupancy) and the
//! fire-and-forget messaging used to narrate what happened.

/// Actor identifiers, kinds, health pools, and transient concealment.
pub mod entity;
/// Error types used throughout the crate.
pub mod error;
/// Rooms, their concealment policy, and their occupants.
pub mod location;
/// Narration messages and the messenger contract.
pub mod message;
/// The shared registry that owns every location behind its own lock.
pub mod world;

/// Re-export core entity types.
pub use entity::{Actor, ActorId, ActorKind, Concealment, HealthPool};
/// Re-export error types.
pub use error::{WorldError, WorldResult};
/// Re-export location types.
pub use location::{ConcealmentPolicy, Location, LocationId};
/// Re-export messaging types.
pub use message::{Message, MessageLog, Messenger, Outbox};
/// Re-export the world registry.
pub use world::World;
