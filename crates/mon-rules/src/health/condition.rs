//! Condition tiers: how healthy an actor looks, to themselves and to others.

/// One of thirteen health bands, ordered from best to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Condition {
    /// 1700 and up.
    Ultimate,
    /// 1401 to 1699.
    Incredible,
    /// 1201 to 1400.
    Extraordinary,
    /// 1001 to 1200.
    Tremendous,
    /// 851 to 1000.
    Superior,
    /// 701 to 850.
    Exceptional,
    /// 501 to 700.
    Good,
    /// 351 to 500.
    Dazed,
    /// 201 to 350.
    MinorWounds,
    /// 101 to 200.
    SeriousWounds,
    /// 51 to 100.
    Critical,
    /// 2 to 50.
    NearDeath,
    /// 1 or less.
    Dead,
}

impl Condition {
    /// Every tier, best first.
    pub const ALL: [Condition; 13] = [
        Self::Ultimate,
        Self::Incredible,
        Self::Extraordinary,
        Self::Tremendous,
        Self::Superior,
        Self::Exceptional,
        Self::Good,
        Self::Dazed,
        Self::MinorWounds,
        Self::SeriousWounds,
        Self::Critical,
        Self::NearDeath,
        Self::Dead,
    ];

    /// Select the tier for a health value. First matching band wins, top down.
    pub fn from_health(health: i32) -> Self {
        match health {
            h if h >= 1700 => Self::Ultimate,
            h if h > 1400 => Self::Incredible,
            h if h > 1200 => Self::Extraordinary,
            h if h > 1000 => Self::Tremendous,
            h if h > 850 => Self::Superior,
            h if h > 700 => Self::Exceptional,
            h if h > 500 => Self::Good,
            h if h > 350 => Self::Dazed,
            h if h > 200 => Self::MinorWounds,
            h if h > 100 => Self::SeriousWounds,
            h if h > 50 => Self::Critical,
            h if h > 1 => Self::NearDeath,
            _ => Self::Dead,
        }
    }

    /// Position in [`Condition::ALL`]; larger is worse.
    pub fn severity(self) -> usize {
        self as usize
    }

    /// The actor's own view of their condition.
    pub fn self_message(self) -> &'static str {
        match self {
            Self::Ultimate => "You are in ultimate health.",
            Self::Incredible => "You are in incredible health.",
            Self::Extraordinary => "You are in extraordinary health.",
            Self::Tremendous => "You are in tremendous health.",
            Self::Superior => "You are in superior condition.",
            Self::Exceptional => "You are in exceptional health.",
            Self::Good => "You are in good health.",
            Self::Dazed => "You feel a little bit dazed.",
            Self::MinorWounds => "You have some minor cuts and abrasions.",
            Self::SeriousWounds => "You are suffering from some serious wounds.",
            Self::Critical => "You are in critical condition.",
            Self::NearDeath => "You are near death.",
            Self::Dead => "You are dead.",
        }
    }

    /// How the room sees someone in this condition.
    pub fn observer_message(self, name: &str) -> String {
        match self {
            Self::Ultimate => format!("{name} is in ultimate health."),
            Self::Incredible => format!("{name} is in incredible health."),
            Self::Extraordinary => format!("{name} is in extraordinary health."),
            Self::Tremendous => format!("{name} is in tremendous health."),
            Self::Superior => format!("{name} is in superior condition."),
            Self::Exceptional => format!("{name} is in exceptional health."),
            Self::Good => format!("{name} is in good health."),
            Self::Dazed => format!("{name} looks a little bit dazed."),
            Self::MinorWounds => format!("{name} has some minor wounds."),
            Self::SeriousWounds => format!("{name} is suffering from some serious wounds."),
            Self::Critical => format!("{name} is in critical condition."),
            Self::NearDeath => format!("{name} is near death."),
            Self::Dead => format!("{name} is dead."),
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Ultimate => "ultimate",
            Self::Incredible => "incredible",
            Self::Extraordinary => "extraordinary",
            Self::Tremendous => "tremendous",
            Self::Superior => "superior",
            Self::Exceptional => "exceptional",
            Self::Good => "good",
            Self::Dazed => "dazed",
            Self::MinorWounds => "minor wounds",
            Self::SeriousWounds => "serious wounds",
            Self::Critical => "critical",
            Self::NearDeath => "near death",
            Self::Dead => "dead",
        };
        write!(f, "{label}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn band_boundaries() {
        let cases = [
            (1700, Condition::Ultimate),
            (1699, Condition::Incredible),
            (1401, Condition::Incredible),
            (1400, Condition::Extraordinary),
            (1201, Condition::Extraordinary),
            (1200, Condition::Tremendous),
            (1001, Condition::Tremendous),
            (1000, Condition::Superior),
            (851, Condition::Superior),
            (850, Condition::Exceptional),
            (701, Condition::Exceptional),
            (700, Condition::Good),
            (501, Condition::Good),
            (500, Condition::Dazed),
            (351, Condition::Dazed),
            (350, Condition::MinorWounds),
            (201, Condition::MinorWounds),
            (200, Condition::SeriousWounds),
            (101, Condition::SeriousWounds),
            (100, Condition::Critical),
            (51, Condition::Critical),
            (50, Condition::NearDeath),
            (2, Condition::NearDeath),
            (1, Condition::Dead),
            (0, Condition::Dead),
            (-40, Condition::Dead),
        ];
        for (health, expected) in cases {
            assert_eq!(Condition::from_health(health), expected, "health {health}");
        }
    }

    #[test]
    fn all_is_ordered_by_severity() {
        for (idx, tier) in Condition::ALL.iter().enumerate() {
            assert_eq!(tier.severity(), idx);
        }
    }

    #[test]
    fn messages_by_perspective() {
        assert_eq!(Condition::Exceptional.self_message(), "You are in exceptional health.");
        insta::assert_snapshot!(Condition::Dazed.observer_message("Vex"), @"Vex looks a little bit dazed.");
        insta::assert_snapshot!(Condition::Dead.observer_message("Vex"), @"Vex is dead.");
    }

    #[test]
    fn display_labels() {
        assert_eq!(Condition::NearDeath.to_string(), "near death");
        assert_eq!(Condition::Ultimate.to_string(), "ultimate");
    }

    proptest! {
        #[test]
        fn tiers_are_monotonic(a in -100i32..3000, b in -100i32..3000) {
            let (high, low) = if a >= b { (a, b) } else { (b, a) };
            prop_assert!(Condition::from_health(high) <= Condition::from_health(low));
        }
    }
}
