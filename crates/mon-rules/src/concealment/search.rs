//! Searching a room for whatever is hidden in it.

use mon_core::{ActorId, Location, Outbox, WorldError};

use crate::config::RulesConfig;
use crate::dice::RandomSource;
use crate::error::RulesResult;
use crate::narration;

/// What a search ends up looking for, chosen by a percentile roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchCategory {
    /// Hidden objects. Nothing is hideable yet, so this always misses.
    Objects,
    /// Hidden exits. Nothing is hideable yet, so this always misses.
    Exits,
    /// Concealed players and mobiles.
    People,
}

impl SearchCategory {
    /// Map a percentile roll onto a category.
    pub fn from_roll(roll: u32, config: &RulesConfig) -> Self {
        if roll < config.search_objects_below {
            Self::Objects
        } else if roll < config.search_exits_below {
            Self::Exits
        } else {
            Self::People
        }
    }
}

impl std::fmt::Display for SearchCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Objects => write!(f, "objects"),
            Self::Exits => write!(f, "exits"),
            Self::People => write!(f, "people"),
        }
    }
}

/// How a search turned out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOutcome {
    /// The category roll.
    pub roll: u32,
    /// What the searcher looked for.
    pub category: SearchCategory,
    /// Who was dragged out of hiding, if anyone.
    pub found: Option<ActorId>,
}

impl SearchOutcome {
    /// Returns true if the search found anything.
    pub fn found_anything(&self) -> bool {
        self.found.is_some()
    }
}

/// Look around the room for anything hidden.
pub fn search<R: RandomSource + ?Sized>(
    room: &mut Location,
    searcher: ActorId,
    config: &RulesConfig,
    rng: &mut R,
    out: &mut Outbox,
) -> RulesResult<SearchOutcome> {
    let name = room
        .occupant(searcher)
        .ok_or(WorldError::ActorNotFound(searcher))?
        .name
        .clone();
    out.broadcast(room.id, narration::looking_around(&name), &[searcher]);

    let roll = rng.percentile();
    let category = SearchCategory::from_roll(roll, config);
    tracing::debug!(actor = %searcher, roll, %category, "search");

    let found = match category {
        SearchCategory::Objects | SearchCategory::Exits => None,
        SearchCategory::People => reveal_people(room, searcher, config, rng, out)?,
    };
    if found.is_none() {
        out.notify(searcher, narration::FOUND_NOTHING);
    }

    Ok(SearchOutcome {
        roll,
        category,
        found,
    })
}

/// Pick at random among the players and mobiles present, a fixed number of
/// times, looking for someone concealed who fails to stay hidden.
///
/// A pick qualifies when it is not the searcher, is concealed, and a fresh
/// `0..=max_hide` roll beats its concealment level. The first qualifying
/// pick is revealed and the search stops. A pick that lands on the searcher
/// or on someone in plain view costs an attempt without rolling.
pub fn reveal_people<R: RandomSource + ?Sized>(
    room: &mut Location,
    searcher: ActorId,
    config: &RulesConfig,
    rng: &mut R,
    out: &mut Outbox,
) -> RulesResult<Option<ActorId>> {
    let searcher_name = room
        .occupant(searcher)
        .ok_or(WorldError::ActorNotFound(searcher))?
        .name
        .clone();
    let candidates = room.players_and_mobiles();

    for _ in 0..config.search_attempts {
        let Some(idx) = rng.pick(candidates.len()) else {
            break;
        };
        let picked = candidates[idx];
        if picked == searcher {
            continue;
        }
        let Some(hider) = room.occupant_mut(picked) else {
            continue;
        };
        let level = hider.concealment().level();
        if level == 0 {
            continue;
        }

        let roll = rng.roll(0, config.max_hide);
        if roll <= level {
            continue;
        }

        hider.concealment_mut().clear();
        let hider_name = hider.name.clone();
        tracing::info!(searcher = %searcher, found = %picked, roll, level, "hider discovered");
        out.notify(searcher, narration::found_someone(&hider_name));
        out.notify(picked, narration::discovered_by(&searcher_name));
        out.broadcast(
            room.id,
            narration::found_in_room(&searcher_name, &hider_name),
            &[searcher],
        );
        return Ok(Some(picked));
    }
    Ok(None)
}
