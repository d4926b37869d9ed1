//! Concealment and combat rules engine for Monster.
//!
//! Provides the concealment engine (hide, reveal, search), the combat and
//! health engine (damage, healing, condition tiers, death and respawn), and
//! [`RulesEngine`], which binds both to a shared [`mon_core::World`] and a
//! [`mon_core::Messenger`]. Every roll goes through an injected
//! [`RandomSource`] so tests can replay exact sequences.

pub mod concealment;
pub mod config;
pub mod dice;
pub mod engine;
pub mod error;
pub mod health;
pub mod narration;

pub use concealment::{HideOutcome, RevealOutcome, SearchCategory, SearchOutcome};
pub use config::RulesConfig;
pub use dice::{RandomSource, ScriptedRolls};
pub use engine::RulesEngine;
pub use error::{RulesError, RulesResult};
pub use health::{Condition, DeathReport, HealthReport};
pub use narration::{PlainStrikeFormatter, Strike, StrikeFormatter};
