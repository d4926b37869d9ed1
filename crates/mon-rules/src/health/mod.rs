//! Combat and health engine: damage, healing, condition narration, death.
//!
//! The functions here work on one locked [`Location`]. Dying resets the
//! actor in place; moving the body to the fallback room needs a second
//! location and is left to [`crate::engine::RulesEngine`].

pub mod condition;

pub use condition::Condition;

use mon_core::{Actor, ActorId, Location, LocationId, Outbox, WorldError};

use crate::config::RulesConfig;
use crate::error::RulesResult;
use crate::narration::{Strike, StrikeFormatter};

/// What the death transition did to an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeathReport {
    /// Health after the reset.
    pub respawn_health: i32,
    /// Where the actor was sent, if the fallback room resolved.
    pub relocated_to: Option<LocationId>,
}

/// The result of a change to an actor's health.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthReport {
    /// Health before the change.
    pub before: i32,
    /// Health right after the change, before any respawn.
    pub after: i32,
    /// Condition tier of `after`.
    pub condition: Condition,
    /// Set if the change killed the actor.
    pub death: Option<DeathReport>,
}

impl HealthReport {
    /// Health actually lost. Negative when healed.
    pub fn dealt(&self) -> i32 {
        self.before - self.after
    }

    /// Health the actor is left with, after any respawn.
    pub fn current(&self) -> i32 {
        self.death.map_or(self.after, |d| d.respawn_health)
    }

    /// Returns true if the actor died.
    pub fn died(&self) -> bool {
        self.death.is_some()
    }
}

/// Land a blow on a defender.
///
/// The defender hears about the strike and about their new condition, the
/// rest of the room hears about the condition, and an emptied pool runs the
/// death transition before anything else can touch the defender.
pub fn apply_damage(
    room: &mut Location,
    defender: ActorId,
    strike: &Strike,
    formatter: &dyn StrikeFormatter,
    config: &RulesConfig,
    out: &mut Outbox,
) -> RulesResult<HealthReport> {
    let location = room.id;
    let actor = room
        .occupant_mut(defender)
        .ok_or(WorldError::ActorNotFound(defender))?;

    out.notify(defender, formatter.describe(strike));

    let before = actor.health.current();
    let after = actor.health.adjust(-strike.damage());
    let condition = Condition::from_health(after);
    tracing::debug!(
        defender = %defender,
        attacker = %strike.attacker,
        weapon = %strike.weapon,
        before,
        after,
        %condition,
        "damage applied"
    );

    out.notify(defender, condition.self_message());
    out.broadcast(location, condition.observer_message(&actor.name), &[defender]);

    let death = actor.health.is_depleted().then(|| die(actor, config));
    Ok(HealthReport {
        before,
        after,
        condition,
        death,
    })
}

/// Heal (positive) or harm (negative) an actor outside of a strike.
///
/// The pool is clamped to its bounds. If it empties the death transition
/// runs; otherwise the room is told how the actor now looks.
pub fn adjust_health(
    room: &mut Location,
    target: ActorId,
    delta: i32,
    config: &RulesConfig,
    out: &mut Outbox,
) -> RulesResult<HealthReport> {
    let location = room.id;
    let actor = room
        .occupant_mut(target)
        .ok_or(WorldError::ActorNotFound(target))?;

    let before = actor.health.current();
    let after = actor.health.adjust(delta);
    let condition = Condition::from_health(after);

    if actor.health.is_depleted() {
        let death = die(actor, config);
        return Ok(HealthReport {
            before,
            after,
            condition,
            death: Some(death),
        });
    }

    out.broadcast(location, condition.observer_message(&actor.name), &[target]);
    Ok(HealthReport {
        before,
        after,
        condition,
        death: None,
    })
}

/// Reset a dead actor: respawn health and no concealment.
///
/// Relocation is not done here; `relocated_to` is always `None`.
pub fn die(actor: &mut Actor, config: &RulesConfig) -> DeathReport {
    let respawn_health = actor.health.set(config.respawn_health);
    actor.concealment_mut().clear();
    tracing::info!(actor = %actor.id, name = %actor.name, respawn_health, "actor died");
    DeathReport {
        respawn_health,
        relocated_to: None,
    }
}
