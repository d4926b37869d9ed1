//! Entry points the command layer calls.
//!
//! Each call locks the acting actor's location, runs one rule against it,
//! releases the lock, and only then delivers narration. A death moves the
//! body to the fallback room after the source lock is gone, so no call ever
//! holds two location locks.

use std::sync::Arc;

use mon_core::{ActorId, Location, LocationId, Messenger, Outbox, World};

use crate::concealment::{self, HideOutcome, RevealOutcome, SearchOutcome};
use crate::config::RulesConfig;
use crate::dice::RandomSource;
use crate::error::RulesResult;
use crate::health::{self, HealthReport};
use crate::narration::{PlainStrikeFormatter, Strike, StrikeFormatter};

/// The concealment and combat rules bound to a world and a messenger.
pub struct RulesEngine<M: Messenger> {
    world: Arc<World>,
    messenger: M,
    config: RulesConfig,
    formatter: Box<dyn StrikeFormatter>,
}

impl<M: Messenger> std::fmt::Debug for RulesEngine<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RulesEngine")
            .field("locations", &self.world.location_count())
            .field("config", &self.config)
            .finish()
    }
}

impl<M: Messenger> RulesEngine<M> {
    /// Create an engine with the default configuration.
    pub fn new(world: Arc<World>, messenger: M) -> Self {
        Self {
            world,
            messenger,
            config: RulesConfig::default(),
            formatter: Box::new(PlainStrikeFormatter),
        }
    }

    /// Replace the configuration after validating it.
    pub fn with_config(mut self, config: RulesConfig) -> RulesResult<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    /// Replace the strike formatter.
    pub fn with_strike_formatter(mut self, formatter: impl StrikeFormatter + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// The world this engine rules over.
    pub fn world(&self) -> &Arc<World> {
        &self.world
    }

    /// The messenger narration is delivered through.
    pub fn messenger(&self) -> &M {
        &self.messenger
    }

    /// The active configuration.
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Concealment
    // -----------------------------------------------------------------------

    /// Try to hide a little better.
    pub fn hide<R: RandomSource + ?Sized>(
        &self,
        actor: ActorId,
        rng: &mut R,
    ) -> RulesResult<HideOutcome> {
        let (outcome, _) = self.run(actor, |room, out| {
            concealment::hide(room, actor, &self.config, rng, out)
        })?;
        Ok(outcome)
    }

    /// Step out of hiding.
    pub fn reveal(&self, actor: ActorId) -> RulesResult<RevealOutcome> {
        let (outcome, _) = self.run(actor, |room, out| concealment::reveal(room, actor, out))?;
        Ok(outcome)
    }

    /// Search the room for anything hidden.
    pub fn search<R: RandomSource + ?Sized>(
        &self,
        actor: ActorId,
        rng: &mut R,
    ) -> RulesResult<SearchOutcome> {
        let (outcome, _) = self.run(actor, |room, out| {
            concealment::search(room, actor, &self.config, rng, out)
        })?;
        Ok(outcome)
    }

    // -----------------------------------------------------------------------
    // Health
    // -----------------------------------------------------------------------

    /// Land a blow on a defender.
    pub fn apply_damage(&self, defender: ActorId, strike: &Strike) -> RulesResult<HealthReport> {
        let (mut report, at) = self.run(defender, |room, out| {
            health::apply_damage(
                room,
                defender,
                strike,
                self.formatter.as_ref(),
                &self.config,
                out,
            )
        })?;
        self.finish_death(defender, at, &mut report);
        Ok(report)
    }

    /// Heal (positive) or harm (negative) an actor outside of a strike.
    pub fn adjust_health(&self, actor: ActorId, delta: i32) -> RulesResult<HealthReport> {
        let (mut report, at) = self.run(actor, |room, out| {
            health::adjust_health(room, actor, delta, &self.config, out)
        })?;
        self.finish_death(actor, at, &mut report);
        Ok(report)
    }

    // -----------------------------------------------------------------------
    // Plumbing
    // -----------------------------------------------------------------------

    /// Run a rule with the actor's room locked, then deliver its narration.
    fn run<T>(
        &self,
        actor: ActorId,
        rule: impl FnOnce(&mut Location, &mut Outbox) -> RulesResult<T>,
    ) -> RulesResult<(T, LocationId)> {
        let (result, outbox, at) = self.world.with_location_of(actor, |room| {
            let mut outbox = Outbox::new();
            let result = rule(room, &mut outbox);
            (result, outbox, room.id)
        })?;
        let value = result?;
        self.messenger.deliver(outbox);
        Ok((value, at))
    }

    /// Send a freshly respawned actor to the fallback room.
    ///
    /// An unresolvable fallback or a failed move leaves the actor where it
    /// died; health has already been reset either way.
    fn finish_death(&self, actor: ActorId, from: LocationId, report: &mut HealthReport) {
        let Some(death) = report.death.as_mut() else {
            return;
        };
        let Some(fallback) = self
            .world
            .resolve_location_by_name(&self.config.fallback_location)
        else {
            tracing::warn!(
                actor = %actor,
                fallback = %self.config.fallback_location,
                "fallback location not found, leaving actor in place"
            );
            return;
        };

        if fallback == from {
            death.relocated_to = Some(fallback);
            return;
        }
        match self.world.relocate(actor, fallback) {
            Ok(()) => death.relocated_to = Some(fallback),
            Err(err) => {
                tracing::warn!(actor = %actor, error = %err, "failed to move dead actor");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::ScriptedRolls;
    use mon_core::{Actor, MessageLog};

    fn world_with(actor: Actor) -> (Arc<World>, ActorId, LocationId, LocationId) {
        let mut world = World::new();
        let hall = world.add_location(Location::new("Hall")).unwrap();
        let limbo = world.add_location(Location::new("Limbo")).unwrap();
        let id = world.spawn(actor, hall).unwrap();
        (Arc::new(world), id, hall, limbo)
    }

    #[test]
    fn narration_is_delivered_after_the_rule() {
        let (world, id, _, _) = world_with(Actor::player("Vex"));
        let engine = RulesEngine::new(world, MessageLog::new());
        let outcome = engine.hide(id, &mut ScriptedRolls::new([60])).unwrap();
        assert_eq!(outcome, HideOutcome::Hidden { level: 1 });
        assert_eq!(
            engine.messenger().notices_for(id),
            vec!["You've hidden yourself from view."]
        );
    }

    #[test]
    fn death_moves_to_fallback() {
        let (world, id, _, limbo) = world_with(Actor::player("Vex"));
        let engine = RulesEngine::new(Arc::clone(&world), MessageLog::new());
        let report = engine
            .apply_damage(id, &Strike::new("Ogre", "a club", 5000))
            .unwrap();
        assert_eq!(report.death.unwrap().relocated_to, Some(limbo));
        assert_eq!(world.location_of(id).unwrap(), limbo);
        assert_eq!(world.actor(id).unwrap().health.current(), 200);
    }

    #[test]
    fn dying_in_the_fallback_room_stays_put() {
        let (world, id, _, limbo) = world_with(Actor::player("Vex"));
        world.relocate(id, limbo).unwrap();
        let engine = RulesEngine::new(Arc::clone(&world), MessageLog::new());
        let report = engine.adjust_health(id, -5000).unwrap();
        assert_eq!(report.death.unwrap().relocated_to, Some(limbo));
        assert_eq!(world.location_of(id).unwrap(), limbo);
    }

    #[test]
    fn missing_fallback_still_resets_health() {
        let (world, id, hall, _) = world_with(Actor::player("Vex"));
        let engine = RulesEngine::new(Arc::clone(&world), MessageLog::new())
            .with_config(RulesConfig::default().with_fallback_location("The Void"))
            .unwrap();
        let report = engine
            .apply_damage(id, &Strike::new("Ogre", "a club", 5000))
            .unwrap();
        assert!(report.died());
        assert_eq!(report.death.unwrap().relocated_to, None);
        assert_eq!(world.location_of(id).unwrap(), hall);
        assert_eq!(world.actor(id).unwrap().health.current(), 200);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let (world, _, _, _) = world_with(Actor::player("Vex"));
        let result = RulesEngine::new(world, MessageLog::new())
            .with_config(RulesConfig::default().with_respawn_health(-1));
        assert!(result.is_err());
    }

    #[test]
    fn unknown_actor_is_an_error() {
        let (world, _, _, _) = world_with(Actor::player("Vex"));
        let engine = RulesEngine::new(world, MessageLog::new());
        assert!(engine.reveal(ActorId::new()).is_err());
        assert!(engine.messenger().is_empty());
    }

    #[derive(Debug)]
    struct Terse;

    impl StrikeFormatter for Terse {
        fn describe(&self, strike: &Strike) -> String {
            format!("-{}", strike.damage())
        }
    }

    #[test]
    fn custom_strike_formatter() {
        let (world, id, _, _) = world_with(Actor::player("Vex"));
        let engine = RulesEngine::new(world, MessageLog::new()).with_strike_formatter(Terse);
        engine.apply_damage(id, &Strike::new("Rat", "teeth", 3)).unwrap();
        assert_eq!(engine.messenger().notices_for(id)[0], "-3");
    }
}
