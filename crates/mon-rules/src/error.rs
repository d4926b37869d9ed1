//! Error types for the rules engine.
//!
//! Rule outcomes are never errors: a failed hide or a fruitless search is an
//! ordinary result. Only infrastructure problems end up here.

use mon_core::WorldError;

/// Errors that can occur while evaluating rules.
#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    /// The world could not find or lock the state a rule needed.
    #[error(transparent)]
    World(#[from] WorldError),

    /// The rules configuration is malformed.
    #[error("invalid rules config: {0}")]
    InvalidConfig(String),
}

/// Convenience result type for rules operations.
pub type RulesResult<T> = Result<T, RulesError>;
