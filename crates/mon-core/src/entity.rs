use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default health capacity for a freshly created actor.
pub const DEFAULT_MAX_HEALTH: i32 = 1000;

/// Unique identifier for every actor in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorId(pub Uuid);

impl ActorId {
    /// Generate a new random actor ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ActorId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// What sort of thing an occupant is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorKind {
    /// A character puppeted by a connected account.
    Player,
    /// A computer-controlled creature.
    Mobile,
    /// An inert item or exit. Never counts as a watcher or a search candidate.
    Object,
}

impl ActorKind {
    /// Returns true for characters and creatures, false for inert objects.
    pub fn is_player_or_mobile(self) -> bool {
        matches!(self, Self::Player | Self::Mobile)
    }
}

impl fmt::Display for ActorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player => write!(f, "player"),
            Self::Mobile => write!(f, "mobile"),
            Self::Object => write!(f, "object"),
        }
    }
}

/// An actor's vitality, clamped to `0..=max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthPool {
    current: i32,
    max: i32,
}

impl HealthPool {
    /// Create a full pool. A non-positive capacity is raised to 1.
    pub fn new(max: i32) -> Self {
        let max = max.max(1);
        Self { current: max, max }
    }

    /// Create a pool with a custom starting value, clamped into range.
    pub fn with_current(current: i32, max: i32) -> Self {
        let max = max.max(1);
        Self {
            current: current.clamp(0, max),
            max,
        }
    }

    /// Current health.
    pub fn current(&self) -> i32 {
        self.current
    }

    /// Maximum health.
    pub fn max(&self) -> i32 {
        self.max
    }

    /// Adjust by a delta, clamping to bounds. Returns the new value.
    pub fn adjust(&mut self, delta: i32) -> i32 {
        self.current = self.current.saturating_add(delta).clamp(0, self.max);
        self.current
    }

    /// Set the current value, clamping to bounds. Returns the new value.
    pub fn set(&mut self, value: i32) -> i32 {
        self.current = value.clamp(0, self.max);
        self.current
    }

    /// Restore the pool to its maximum.
    pub fn refill(&mut self) {
        self.current = self.max;
    }

    /// Returns true once the pool has run dry.
    pub fn is_depleted(&self) -> bool {
        self.current <= 0
    }
}

impl fmt::Display for HealthPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current, self.max)
    }
}

/// How far an actor has withdrawn from view. Zero means fully visible.
///
/// Concealment is session state: it is never serialized, and every spawn,
/// respawn, reconnect, reveal, or discovery starts it over from zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Concealment(u32);

impl Concealment {
    /// Concealment at a given level. Intended for fixtures and restores.
    pub fn at(level: u32) -> Self {
        Self(level)
    }

    /// Current level.
    pub fn level(self) -> u32 {
        self.0
    }

    /// Returns true if the actor is hidden at all.
    pub fn is_hidden(self) -> bool {
        self.0 > 0
    }

    /// Hide one level deeper. Returns the new level.
    pub fn deepen(&mut self) -> u32 {
        self.0 = self.0.saturating_add(1);
        self.0
    }

    /// Step back into plain view.
    pub fn clear(&mut self) {
        self.0 = 0;
    }
}

/// A character, creature, or object occupying a location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    /// Unique identifier.
    pub id: ActorId,
    /// Display name used in narration.
    pub name: String,
    /// Classification used by the watcher and search rules.
    pub kind: ActorKind,
    /// Experience level, at least 1. Caps concealment at `level + 1`.
    pub level: u32,
    /// Vitality.
    pub health: HealthPool,
    #[serde(skip)]
    concealment: Concealment,
}

impl Actor {
    /// Create an actor of the given kind at level 1 with full default health.
    pub fn new(kind: ActorKind, name: impl Into<String>) -> Self {
        Self {
            id: ActorId::new(),
            name: name.into(),
            kind,
            level: 1,
            health: HealthPool::new(DEFAULT_MAX_HEALTH),
            concealment: Concealment::default(),
        }
    }

    /// Create a player character.
    pub fn player(name: impl Into<String>) -> Self {
        Self::new(ActorKind::Player, name)
    }

    /// Create a computer-controlled creature.
    pub fn mobile(name: impl Into<String>) -> Self {
        Self::new(ActorKind::Mobile, name)
    }

    /// Create an inert object.
    pub fn object(name: impl Into<String>) -> Self {
        Self::new(ActorKind::Object, name)
    }

    /// Set the level. Levels below 1 are raised to 1.
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level.max(1);
        self
    }

    /// Replace the health pool with a full pool of the given capacity.
    pub fn with_max_health(mut self, max: i32) -> Self {
        self.health = HealthPool::new(max);
        self
    }

    /// Set current health, keeping the capacity.
    pub fn with_health(mut self, current: i32) -> Self {
        self.health.set(current);
        self
    }

    /// Start hidden at the given level.
    pub fn with_concealment(mut self, level: u32) -> Self {
        self.concealment = Concealment::at(level);
        self
    }

    /// Current concealment.
    pub fn concealment(&self) -> Concealment {
        self.concealment
    }

    /// Mutable access to the concealment counter.
    pub fn concealment_mut(&mut self) -> &mut Concealment {
        &mut self.concealment
    }

    /// Returns true if the actor is currently hidden.
    pub fn is_hiding(&self) -> bool {
        self.concealment.is_hidden()
    }

    /// The deepest concealment this actor can reach.
    pub fn concealment_cap(&self) -> u32 {
        self.level.saturating_add(1)
    }

    /// Restore spawn state: full health and no concealment.
    pub fn reinitialize(&mut self) {
        self.health.refill();
        self.concealment.clear();
    }
}
