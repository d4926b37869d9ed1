use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, RwLock};

use crate::entity::{Actor, ActorId};
use crate::error::{WorldError, WorldResult};
use crate::location::{Location, LocationId};

/// How many times a lookup chases an actor that moved between the index
/// read and the location lock.
const LOOKUP_RETRIES: usize = 4;

/// The shared world. Owns every location, each behind its own lock.
///
/// Locations are registered up front through `&mut self`; after that the
/// world is shared (`Arc<World>`) and every mutation goes through a single
/// location's mutex. No method ever holds two location locks at once.
#[derive(Debug, Default)]
pub struct World {
    locations: HashMap<LocationId, Mutex<Location>>,

    // Indexes
    by_name_lower: HashMap<String, LocationId>,
    whereabouts: RwLock<HashMap<ActorId, LocationId>>,
}

impl World {
    /// Create an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Topology
    // -----------------------------------------------------------------------

    /// Register a location, indexing anyone already inside it.
    pub fn add_location(&mut self, location: Location) -> WorldResult<LocationId> {
        let name_lower = location.name.to_lowercase();
        if self.by_name_lower.contains_key(&name_lower) {
            return Err(WorldError::DuplicateName(location.name.clone()));
        }

        let id = location.id;
        let whereabouts = self
            .whereabouts
            .get_mut()
            .map_err(|_| WorldError::LockPoisoned)?;
        for occupant in location.occupant_ids() {
            whereabouts.insert(occupant, id);
        }
        self.by_name_lower.insert(name_lower, id);
        self.locations.insert(id, Mutex::new(location));
        Ok(id)
    }

    /// Find a location by name (case-insensitive).
    pub fn resolve_location_by_name(&self, name: &str) -> Option<LocationId> {
        self.by_name_lower.get(&name.to_lowercase()).copied()
    }

    /// Ids of every registered location.
    pub fn location_ids(&self) -> Vec<LocationId> {
        self.locations.keys().copied().collect()
    }

    /// Number of registered locations.
    pub fn location_count(&self) -> usize {
        self.locations.len()
    }

    // -----------------------------------------------------------------------
    // Occupancy
    // -----------------------------------------------------------------------

    /// Place an actor in a location with fresh spawn state.
    ///
    /// An actor that is already somewhere else is taken out of that room first.
    pub fn spawn(&self, mut actor: Actor, at: LocationId) -> WorldResult<ActorId> {
        let target = self.slot(at)?;
        let id = actor.id;
        actor.reinitialize();

        let mut whereabouts = self
            .whereabouts
            .write()
            .map_err(|_| WorldError::LockPoisoned)?;
        if let Some(previous) = whereabouts.get(&id).copied() {
            lock(self.slot(previous)?)?.remove(id);
        }
        lock(target)?.insert(actor);
        whereabouts.insert(id, at);
        tracing::debug!(actor = %id, location = %at, "spawned");
        Ok(id)
    }

    /// Take an actor out of the world entirely.
    pub fn despawn(&self, id: ActorId) -> WorldResult<Actor> {
        let mut whereabouts = self
            .whereabouts
            .write()
            .map_err(|_| WorldError::LockPoisoned)?;
        let at = whereabouts
            .remove(&id)
            .ok_or(WorldError::ActorNotFound(id))?;
        lock(self.slot(at)?)?
            .remove(id)
            .ok_or(WorldError::ActorNotFound(id))
    }

    /// Move an actor to another location.
    ///
    /// The source lock is released before the destination lock is taken.
    /// Lookups for the actor wait until the move has finished.
    pub fn relocate(&self, id: ActorId, to: LocationId) -> WorldResult<()> {
        let target = self.slot(to)?;
        let mut whereabouts = self
            .whereabouts
            .write()
            .map_err(|_| WorldError::LockPoisoned)?;
        let from = *whereabouts.get(&id).ok_or(WorldError::ActorNotFound(id))?;
        if from == to {
            return Ok(());
        }

        let actor = lock(self.slot(from)?)?
            .remove(id)
            .ok_or(WorldError::ActorNotFound(id))?;
        lock(target)?.insert(actor);
        whereabouts.insert(id, to);
        tracing::debug!(actor = %id, %from, %to, "relocated");
        Ok(())
    }

    /// The location an actor currently occupies.
    pub fn location_of(&self, id: ActorId) -> WorldResult<LocationId> {
        self.whereabouts
            .read()
            .map_err(|_| WorldError::LockPoisoned)?
            .get(&id)
            .copied()
            .ok_or(WorldError::ActorNotFound(id))
    }

    /// Reset an actor's session state after a reconnect. Health is untouched.
    pub fn reconnect(&self, id: ActorId) -> WorldResult<()> {
        self.with_location_of(id, |room| {
            if let Some(actor) = room.occupant_mut(id) {
                actor.concealment_mut().clear();
            }
        })
    }

    // -----------------------------------------------------------------------
    // Locked access
    // -----------------------------------------------------------------------

    /// Run `f` with a location locked.
    pub fn with_location<T>(
        &self,
        id: LocationId,
        f: impl FnOnce(&mut Location) -> T,
    ) -> WorldResult<T> {
        let mut guard = lock(self.slot(id)?)?;
        Ok(f(&mut guard))
    }

    /// Run `f` with the actor's current location locked.
    ///
    /// The actor is guaranteed to be in the room while `f` runs.
    pub fn with_location_of<T>(
        &self,
        actor: ActorId,
        f: impl FnOnce(&mut Location) -> T,
    ) -> WorldResult<T> {
        for _ in 0..LOOKUP_RETRIES {
            let at = self.location_of(actor)?;
            let mut guard = lock(self.slot(at)?)?;
            if guard.contains(actor) {
                return Ok(f(&mut guard));
            }
        }
        Err(WorldError::ActorNotFound(actor))
    }

    /// A snapshot copy of an actor.
    pub fn actor(&self, id: ActorId) -> WorldResult<Actor> {
        self.with_location_of(id, |room| room.occupant(id).cloned())?
            .ok_or(WorldError::ActorNotFound(id))
    }

    /// Snapshot of who is in a location.
    pub fn occupants(&self, id: LocationId) -> WorldResult<Vec<ActorId>> {
        self.with_location(id, |room| room.occupant_ids())
    }

    fn slot(&self, id: LocationId) -> WorldResult<&Mutex<Location>> {
        self.locations
            .get(&id)
            .ok_or(WorldError::LocationNotFound(id))
    }
}

fn lock(slot: &Mutex<Location>) -> WorldResult<MutexGuard<'_, Location>> {
    slot.lock().map_err(|_| WorldError::LockPoisoned)
}
