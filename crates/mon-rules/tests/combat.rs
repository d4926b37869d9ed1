//! Integration tests for combat rules.

use std::sync::Arc;

use mon_core::{Actor, ActorId, Location, LocationId, MessageLog, World};
use mon_rules::{Condition, HideOutcome, RulesEngine, ScriptedRolls, Strike};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

struct Arena {
    engine: Arc<RulesEngine<MessageLog>>,
    pit: LocationId,
    limbo: LocationId,
}

fn arena() -> Arena {
    let mut world = World::new();
    let pit = world.add_location(Location::new("Fighting Pit")).unwrap();
    let limbo = world.add_location(Location::new("Limbo")).unwrap();
    Arena {
        engine: Arc::new(RulesEngine::new(Arc::new(world), MessageLog::new())),
        pit,
        limbo,
    }
}

impl Arena {
    fn spawn(&self, actor: Actor) -> ActorId {
        self.engine.world().spawn(actor, self.pit).unwrap()
    }

    fn set_health(&self, id: ActorId, health: i32) {
        self.engine
            .world()
            .with_location_of(id, |room| {
                room.occupant_mut(id).unwrap().health.set(health);
            })
            .unwrap();
    }
}

#[test]
fn wound_without_death() {
    let a = arena();
    let vex = a.spawn(Actor::player("Vex"));
    let orla = a.spawn(Actor::player("Orla"));

    let report = a
        .engine
        .apply_damage(vex, &Strike::new("Orla", "a short sword", 150))
        .unwrap();

    assert_eq!(report.current(), 850);
    assert_eq!(report.condition, Condition::Exceptional);
    assert!(!report.died());
    assert_eq!(
        a.engine.messenger().notices_for(vex),
        vec![
            "Orla hits you with a short sword for 150 damage!",
            "You are in exceptional health.",
        ]
    );
    assert_eq!(
        a.engine.messenger().broadcasts_in(a.pit),
        vec![("Vex is in exceptional health.".to_string(), vec![vex])]
    );
    assert!(a.engine.messenger().notices_for(orla).is_empty());
}

#[test]
fn killing_blow_respawns_in_limbo() {
    let a = arena();
    let vex = a.spawn(Actor::player("Vex"));
    a.set_health(vex, 40);

    let report = a
        .engine
        .apply_damage(vex, &Strike::new("Orla", "an axe", 60))
        .unwrap();

    assert_eq!(report.after, 0);
    assert_eq!(report.condition, Condition::Dead);
    let death = report.death.unwrap();
    assert_eq!(death.respawn_health, 200);
    assert_eq!(death.relocated_to, Some(a.limbo));

    let world = a.engine.world();
    assert_eq!(world.location_of(vex).unwrap(), a.limbo);
    assert_eq!(world.actor(vex).unwrap().health.current(), 200);
    assert!(world.occupants(a.pit).unwrap().is_empty());
    assert_eq!(
        a.engine.messenger().notices_for(vex).last().unwrap(),
        "You are dead."
    );
}

#[test]
fn death_clears_concealment() {
    let a = arena();
    let vex = a.spawn(Actor::player("Vex").with_level(4));
    let outcome = a.engine.hide(vex, &mut ScriptedRolls::new([70])).unwrap();
    assert_eq!(outcome, HideOutcome::Hidden { level: 1 });

    a.engine.adjust_health(vex, -10_000).unwrap();
    assert!(!a.engine.world().actor(vex).unwrap().is_hiding());
}

#[test]
fn healing_between_fights() {
    let a = arena();
    let troll = a.spawn(Actor::mobile("Troll").with_max_health(1500));
    a.set_health(troll, 300);

    let report = a.engine.adjust_health(troll, 1000).unwrap();
    assert_eq!(report.after, 1300);
    assert_eq!(report.condition, Condition::Extraordinary);
    assert_eq!(
        a.engine.messenger().broadcasts_in(a.pit),
        vec![("Troll is in extraordinary health.".to_string(), vec![troll])]
    );
}

#[test]
fn concurrent_blows_never_skip_a_death() {
    let a = arena();
    let vex = a.spawn(Actor::player("Vex").with_max_health(800));
    let attackers: Vec<String> = (0..8).map(|i| format!("Goblin {i}")).collect();

    let reports = std::thread::scope(|s| {
        let handles: Vec<_> = attackers
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let engine = Arc::clone(&a.engine);
                s.spawn(move || {
                    let mut rng = StdRng::seed_from_u64(i as u64);
                    (0..200)
                        .map(|_| {
                            let amount = rng.random_range(-20..250);
                            engine
                                .apply_damage(vex, &Strike::new(name.as_str(), "a spear", amount))
                                .unwrap()
                        })
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect::<Vec<_>>()
    });

    assert_eq!(reports.len(), 1600);
    for report in &reports {
        // Every blow lands on a living actor: deaths reset before the next one.
        assert!(report.before > 0);
        assert!((0..=800).contains(&report.after));
        assert_eq!(report.died(), report.after == 0);
    }
    assert!(reports.iter().any(|r| r.died()));

    let vex_now = a.engine.world().actor(vex).unwrap();
    assert!((1..=800).contains(&vex_now.health.current()));
    assert_eq!(a.engine.world().location_of(vex).unwrap(), a.limbo);
}
