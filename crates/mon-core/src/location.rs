use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::{Actor, ActorId};

/// Unique identifier for every location in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationId(pub Uuid);

impl LocationId {
    /// Generate a new random location ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LocationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Per-room rule gating whether, and how easily, hiding succeeds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcealmentPolicy {
    /// Hiding follows the ordinary rules.
    #[default]
    Normal,
    /// Nowhere to hide at all.
    NoHide,
    /// Hiding only works on a lucky roll.
    HardToHide,
}

/// A room and everything currently inside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    /// Unique identifier.
    pub id: LocationId,
    /// Name used for lookups and narration.
    pub name: String,
    /// Concealment rule for this room.
    pub policy: ConcealmentPolicy,
    occupants: Vec<Actor>,
}

impl Location {
    /// Create an empty room with the normal concealment policy.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: LocationId::new(),
            name: name.into(),
            policy: ConcealmentPolicy::Normal,
            occupants: Vec::new(),
        }
    }

    /// Set the concealment policy.
    pub fn with_policy(mut self, policy: ConcealmentPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// All occupants, in no meaningful order.
    pub fn occupants(&self) -> &[Actor] {
        &self.occupants
    }

    /// Snapshot of the ids of everyone present.
    pub fn occupant_ids(&self) -> Vec<ActorId> {
        self.occupants.iter().map(|a| a.id).collect()
    }

    /// Returns true if the actor is in this room.
    pub fn contains(&self, id: ActorId) -> bool {
        self.occupants.iter().any(|a| a.id == id)
    }

    /// Look up an occupant.
    pub fn occupant(&self, id: ActorId) -> Option<&Actor> {
        self.occupants.iter().find(|a| a.id == id)
    }

    /// Look up an occupant mutably.
    pub fn occupant_mut(&mut self, id: ActorId) -> Option<&mut Actor> {
        self.occupants.iter_mut().find(|a| a.id == id)
    }

    /// Put an actor into the room. An actor already present is replaced.
    pub fn insert(&mut self, actor: Actor) {
        match self.occupants.iter_mut().find(|a| a.id == actor.id) {
            Some(slot) => *slot = actor,
            None => self.occupants.push(actor),
        }
    }

    /// Take an actor out of the room.
    pub fn remove(&mut self, id: ActorId) -> Option<Actor> {
        let idx = self.occupants.iter().position(|a| a.id == id)?;
        Some(self.occupants.swap_remove(idx))
    }

    /// Players and mobiles present, including `actor` itself if it is one.
    pub fn players_and_mobiles(&self) -> Vec<ActorId> {
        self.occupants
            .iter()
            .filter(|a| a.kind.is_player_or_mobile())
            .map(|a| a.id)
            .collect()
    }

    /// Number of players and mobiles present other than `actor`.
    pub fn count_others(&self, actor: ActorId) -> usize {
        self.occupants
            .iter()
            .filter(|a| a.id != actor && a.kind.is_player_or_mobile())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_remove() {
        let mut room = Location::new("Cellar");
        let rat = Actor::mobile("Rat");
        let rat_id = rat.id;
        room.insert(rat);
        assert!(room.contains(rat_id));
        assert_eq!(room.occupant(rat_id).unwrap().name, "Rat");
        let removed = room.remove(rat_id).unwrap();
        assert_eq!(removed.id, rat_id);
        assert!(room.occupants().is_empty());
        assert!(room.remove(rat_id).is_none());
    }

    #[test]
    fn insert_replaces_existing() {
        let mut room = Location::new("Cellar");
        let rat = Actor::mobile("Rat");
        let mut wounded = rat.clone();
        wounded.health.set(3);
        room.insert(rat);
        room.insert(wounded);
        assert_eq!(room.occupants().len(), 1);
        assert_eq!(room.occupants()[0].health.current(), 3);
    }

    #[test]
    fn objects_are_not_counted() {
        let mut room = Location::new("Hall");
        let hero = Actor::player("Hero");
        let hero_id = hero.id;
        room.insert(hero);
        room.insert(Actor::object("Chest"));
        room.insert(Actor::object("north exit"));
        assert_eq!(room.count_others(hero_id), 0);

        room.insert(Actor::mobile("Goblin"));
        assert_eq!(room.count_others(hero_id), 1);
        assert_eq!(room.players_and_mobiles().len(), 2);
    }

    #[test]
    fn policy_serializes_snake_case() {
        let json = serde_json::to_string(&ConcealmentPolicy::HardToHide).unwrap();
        assert_eq!(json, "\"hard_to_hide\"");
    }
}
