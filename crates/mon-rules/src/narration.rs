//! Narration text for the concealment and combat rules.

/// Hiding is forbidden in this room.
pub const NO_ROOM_TO_HIDE: &str = "There is no room to hide here.";
/// The hard-to-hide roll failed.
pub const NO_PLACE_TO_HIDE: &str = "You couldn't find a place to hide.";
/// Someone is watching and the hider is already concealed.
pub const WATCHED_WHILE_HIDDEN: &str = "You can't hide any better with people in the room.";
/// Someone is watching and the hider is in plain view.
pub const WATCHED: &str = "You can't hide when people are watching you.";
/// The fumble roll failed while already concealed.
pub const NO_BETTER_SPOT: &str = "You could not find a better hiding place.";
/// The fumble roll failed from plain view.
pub const NO_GOOD_SPOT: &str = "You could not find a good hiding place.";
/// Concealment is already at its cap.
pub const AT_CONCEALMENT_CAP: &str =
    "You're pretty well hidden now.  I don't think you could be any less visible.";
/// First level of concealment reached.
pub const HIDDEN: &str = "You've hidden yourself from view.";
/// Concealment deepened past the first level.
pub const HIDDEN_BETTER: &str = "You've managed to hide yourself a little better.";
/// Reveal on an actor who was not hiding.
pub const NOT_HIDING: &str = "You were not hiding.";
/// Reveal succeeded.
pub const NO_LONGER_HIDING: &str = "You are no longer hiding.";
/// A search turned up nothing.
pub const FOUND_NOTHING: &str = "You haven't found anything.";

/// Told to the room when a hider steps out.
pub fn stepped_out(name: &str) -> String {
    format!("{name} has stepped out of the shadows.")
}

/// Told to the room when someone starts searching.
pub fn looking_around(name: &str) -> String {
    format!("{name} seems to be looking for something.")
}

/// Told to the searcher on a find.
pub fn found_someone(hider: &str) -> String {
    format!("You've found {hider} hiding in the shadows!")
}

/// Told to the hider who was found.
pub fn discovered_by(searcher: &str) -> String {
    format!("You've been discovered by {searcher}")
}

/// Told to the room on a find.
pub fn found_in_room(searcher: &str, hider: &str) -> String {
    format!("{searcher} has found {hider} hiding in the shadows!")
}

/// A single blow landing on a defender.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Strike {
    /// Name of whoever landed the blow.
    pub attacker: String,
    /// Label of the weapon, claw, or spell used.
    pub weapon: String,
    /// Damage dealt. Negative values are treated as zero.
    pub amount: i32,
}

impl Strike {
    /// Describe a blow.
    pub fn new(attacker: impl Into<String>, weapon: impl Into<String>, amount: i32) -> Self {
        Self {
            attacker: attacker.into(),
            weapon: weapon.into(),
            amount,
        }
    }

    /// Damage with negative amounts clamped to zero.
    pub fn damage(&self) -> i32 {
        self.amount.max(0)
    }
}

/// Formats the line a defender sees when a blow lands.
pub trait StrikeFormatter: Send + Sync {
    /// The defender's view of the strike.
    fn describe(&self, strike: &Strike) -> String;
}

/// Plain one-line strike descriptions.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainStrikeFormatter;

impl StrikeFormatter for PlainStrikeFormatter {
    fn describe(&self, strike: &Strike) -> String {
        format!(
            "{} hits you with {} for {} damage!",
            strike.attacker,
            strike.weapon,
            strike.damage()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_lines() {
        insta::assert_snapshot!(stepped_out("Vex"), @"Vex has stepped out of the shadows.");
        insta::assert_snapshot!(looking_around("Orla"), @"Orla seems to be looking for something.");
        insta::assert_snapshot!(found_in_room("Orla", "Vex"), @"Orla has found Vex hiding in the shadows!");
    }

    #[test]
    fn personal_lines() {
        assert_eq!(found_someone("Vex"), "You've found Vex hiding in the shadows!");
        assert_eq!(discovered_by("Orla"), "You've been discovered by Orla");
    }

    #[test]
    fn strike_clamps_negative_damage() {
        let strike = Strike::new("Goblin", "a rusty dirk", -30);
        assert_eq!(strike.damage(), 0);
        assert_eq!(
            PlainStrikeFormatter.describe(&strike),
            "Goblin hits you with a rusty dirk for 0 damage!"
        );
    }
}
