use crate::entity::ActorId;
use crate::location::LocationId;

/// Alias for `Result<T, WorldError>`.
pub type WorldResult<T> = Result<T, WorldError>;

/// Errors that can occur when reading or mutating the world.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// The actor is not present in any registered location.
    #[error("actor not found: {0}")]
    ActorNotFound(ActorId),

    /// The requested location ID does not exist in the world.
    #[error("location not found: {0}")]
    LocationNotFound(LocationId),

    /// A location with the same name already exists.
    #[error("location already exists: \"{0}\"")]
    DuplicateName(String),

    /// A lock guarding world state was poisoned by a panicking holder.
    #[error("world lock poisoned")]
    LockPoisoned,
}
