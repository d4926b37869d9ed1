//! Tunable constants for the concealment and health rules.

use serde::{Deserialize, Serialize};

use crate::error::{RulesError, RulesResult};

/// Configuration for the rules engines.
///
/// The defaults are the classic balance. Every value can be overridden from
/// JSON; keys that are left out keep their default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// In a hard-to-hide room, a percentile roll above this fails.
    pub hard_to_hide_chance: u32,
    /// A percentile roll below this fumbles an otherwise allowed hide.
    pub hide_fumble_below: u32,
    /// Upper bound of the searcher's discovery roll (`0..=max_hide`).
    pub max_hide: u32,
    /// How many random picks a people search makes before giving up.
    pub search_attempts: u32,
    /// Search category rolls below this look for objects.
    pub search_objects_below: u32,
    /// Search category rolls below this (and not below the object bound)
    /// look for exits. Anything higher looks for people.
    pub search_exits_below: u32,
    /// Health an actor comes back with after dying.
    pub respawn_health: i32,
    /// Name of the room dead actors are sent to.
    pub fallback_location: String,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            hard_to_hide_chance: 20,
            hide_fumble_below: 25,
            max_hide: 15,
            search_attempts: 7,
            search_objects_below: 20,
            search_exits_below: 40,
            respawn_health: 200,
            fallback_location: "Limbo".to_string(),
        }
    }
}

impl RulesConfig {
    /// Parse a configuration from JSON and validate it.
    pub fn from_json(json: &str) -> RulesResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| RulesError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the values make sense together.
    pub fn validate(&self) -> RulesResult<()> {
        if self.hard_to_hide_chance > 100 || self.hide_fumble_below > 101 {
            return Err(RulesError::InvalidConfig(
                "hide chances must be percentiles".to_string(),
            ));
        }
        if self.search_objects_below > self.search_exits_below {
            return Err(RulesError::InvalidConfig(format!(
                "search_objects_below ({}) exceeds search_exits_below ({})",
                self.search_objects_below, self.search_exits_below
            )));
        }
        if self.respawn_health <= 0 {
            return Err(RulesError::InvalidConfig(format!(
                "respawn_health must be positive, got {}",
                self.respawn_health
            )));
        }
        if self.fallback_location.trim().is_empty() {
            return Err(RulesError::InvalidConfig(
                "fallback_location is empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Set the hard-to-hide success chance.
    pub fn with_hard_to_hide_chance(mut self, chance: u32) -> Self {
        self.hard_to_hide_chance = chance;
        self
    }

    /// Set the fumble threshold for hiding.
    pub fn with_hide_fumble_below(mut self, threshold: u32) -> Self {
        self.hide_fumble_below = threshold;
        self
    }

    /// Set the upper bound of the discovery roll.
    pub fn with_max_hide(mut self, max_hide: u32) -> Self {
        self.max_hide = max_hide;
        self
    }

    /// Set how many picks a people search makes.
    pub fn with_search_attempts(mut self, attempts: u32) -> Self {
        self.search_attempts = attempts;
        self
    }

    /// Set the respawn health.
    pub fn with_respawn_health(mut self, health: i32) -> Self {
        self.respawn_health = health;
        self
    }

    /// Set the fallback room name.
    pub fn with_fallback_location(mut self, name: impl Into<String>) -> Self {
        self.fallback_location = name.into();
        self
    }
}
