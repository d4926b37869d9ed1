//! Concealment engine: hiding, stepping out, and searching.
//!
//! Every rule here runs against a single locked [`Location`]. Narration goes
//! into an [`Outbox`] that the caller delivers once the lock is released.

pub mod search;

pub use search::{SearchCategory, SearchOutcome, reveal_people, search};

use mon_core::{ActorId, ConcealmentPolicy, Location, Outbox, WorldError};

use crate::config::RulesConfig;
use crate::dice::RandomSource;
use crate::error::RulesResult;
use crate::narration;

/// How a hide attempt turned out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HideOutcome {
    /// The room does not allow hiding.
    NoRoom,
    /// The room is hard to hide in and the roll came up short.
    NoPlaceFound {
        /// The percentile roll.
        roll: u32,
    },
    /// Other players or mobiles are present.
    Watched {
        /// How many of them.
        watchers: usize,
        /// Whether the hider was already concealed.
        already_hidden: bool,
    },
    /// The hiding roll was fumbled.
    Fumbled {
        /// The percentile roll.
        roll: u32,
        /// Whether the hider was already concealed.
        already_hidden: bool,
    },
    /// The hider cannot get any less visible.
    AtCap {
        /// Unchanged concealment level.
        level: u32,
    },
    /// Concealment went up by one.
    Hidden {
        /// New concealment level.
        level: u32,
    },
}

impl HideOutcome {
    /// Returns true if concealment increased.
    pub fn succeeded(self) -> bool {
        matches!(self, Self::Hidden { .. })
    }
}

/// How a reveal turned out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    /// The actor was already in plain view.
    NotHiding,
    /// The actor stepped out of hiding.
    Revealed {
        /// Concealment level before stepping out.
        from: u32,
    },
}

/// Try to hide a little better.
///
/// Checks run in order and the first failure ends the attempt: room policy,
/// the hard-to-hide roll, watchers, the fumble roll, then the `level + 1`
/// cap. Only a full success changes state.
pub fn hide<R: RandomSource + ?Sized>(
    room: &mut Location,
    hider: ActorId,
    config: &RulesConfig,
    rng: &mut R,
    out: &mut Outbox,
) -> RulesResult<HideOutcome> {
    let (current, cap) = {
        let actor = room
            .occupant(hider)
            .ok_or(WorldError::ActorNotFound(hider))?;
        (actor.concealment().level(), actor.concealment_cap())
    };
    let already_hidden = current > 0;

    match room.policy {
        ConcealmentPolicy::NoHide => {
            out.notify(hider, narration::NO_ROOM_TO_HIDE);
            return Ok(HideOutcome::NoRoom);
        }
        ConcealmentPolicy::HardToHide => {
            let roll = rng.percentile();
            tracing::debug!(actor = %hider, roll, "hard-to-hide roll");
            if roll > config.hard_to_hide_chance {
                out.notify(hider, narration::NO_PLACE_TO_HIDE);
                return Ok(HideOutcome::NoPlaceFound { roll });
            }
        }
        ConcealmentPolicy::Normal => {}
    }

    let watchers = room.count_others(hider);
    if watchers > 0 {
        let text = if already_hidden {
            narration::WATCHED_WHILE_HIDDEN
        } else {
            narration::WATCHED
        };
        out.notify(hider, text);
        return Ok(HideOutcome::Watched {
            watchers,
            already_hidden,
        });
    }

    let roll = rng.percentile();
    tracing::debug!(actor = %hider, roll, "hide roll");
    if roll < config.hide_fumble_below {
        let text = if already_hidden {
            narration::NO_BETTER_SPOT
        } else {
            narration::NO_GOOD_SPOT
        };
        out.notify(hider, text);
        return Ok(HideOutcome::Fumbled {
            roll,
            already_hidden,
        });
    }

    // Can reach level + 1 and no further.
    if current >= cap {
        out.notify(hider, narration::AT_CONCEALMENT_CAP);
        return Ok(HideOutcome::AtCap { level: current });
    }

    let level = room
        .occupant_mut(hider)
        .ok_or(WorldError::ActorNotFound(hider))?
        .concealment_mut()
        .deepen();
    let text = if level > 1 {
        narration::HIDDEN_BETTER
    } else {
        narration::HIDDEN
    };
    out.notify(hider, text);
    Ok(HideOutcome::Hidden { level })
}

/// Step out of hiding and let the room know.
pub fn reveal(room: &mut Location, actor: ActorId, out: &mut Outbox) -> RulesResult<RevealOutcome> {
    let location = room.id;
    let occupant = room
        .occupant_mut(actor)
        .ok_or(WorldError::ActorNotFound(actor))?;
    let from = occupant.concealment().level();
    if from == 0 {
        out.notify(actor, narration::NOT_HIDING);
        return Ok(RevealOutcome::NotHiding);
    }

    occupant.concealment_mut().clear();
    let name = occupant.name.clone();
    out.notify(actor, narration::NO_LONGER_HIDING);
    out.broadcast(location, narration::stepped_out(&name), &[actor]);
    Ok(RevealOutcome::Revealed { from })
}
