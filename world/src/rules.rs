//! Tunable game rules shared by the player, monsters and bombs.

use std::time::Duration;

use log::warn;
use serde::{Deserialize, Serialize};

/// Numeric parameters that govern a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    /// Lives the player starts with.
    pub lives: u32,
    /// Bombs the player may have in play at once when the session starts.
    pub bomb_capacity: u32,
    /// Blast range of bombs placed when the session starts.
    pub bomb_range: u32,
    /// Upper bound reachable through capacity bonuses.
    pub max_bomb_capacity: u32,
    /// Upper bound reachable through range bonuses.
    pub max_bomb_range: u32,
    /// Upper bound reachable through heart bonuses.
    pub max_lives: u32,
    /// Length of the invulnerability window after taking damage, in milliseconds.
    pub invulnerability_ms: u64,
    /// Interval between monster re-aims, in milliseconds.
    pub monster_interval_ms: u64,
    /// Duration of a single bomb phase, in milliseconds.
    pub bomb_phase_ms: u64,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            lives: 3,
            bomb_capacity: 1,
            bomb_range: 1,
            max_bomb_capacity: 9,
            max_bomb_range: 9,
            max_lives: 9,
            invulnerability_ms: 1_000,
            monster_interval_ms: 1_000,
            bomb_phase_ms: 1_000,
        }
    }
}

impl Rules {
    /// Invulnerability window as a duration.
    #[must_use]
    pub const fn invulnerability(&self) -> Duration {
        Duration::from_millis(self.invulnerability_ms)
    }

    /// Monster re-aim interval as a duration.
    #[must_use]
    pub const fn monster_interval(&self) -> Duration {
        Duration::from_millis(self.monster_interval_ms)
    }

    /// Bomb phase length as a duration.
    #[must_use]
    pub const fn bomb_phase(&self) -> Duration {
        Duration::from_millis(self.bomb_phase_ms)
    }

    /// Returns a copy with every value pulled into a playable range.
    ///
    /// Maxima are raised to at least one, starting values are clamped into
    /// `1..=max`, and a zero bomb phase becomes one millisecond.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let mut rules = self;
        rules.max_bomb_capacity = at_least_one("max_bomb_capacity", rules.max_bomb_capacity);
        rules.max_bomb_range = at_least_one("max_bomb_range", rules.max_bomb_range);
        rules.max_lives = at_least_one("max_lives", rules.max_lives);
        rules.bomb_capacity = within("bomb_capacity", rules.bomb_capacity, rules.max_bomb_capacity);
        rules.bomb_range = within("bomb_range", rules.bomb_range, rules.max_bomb_range);
        rules.lives = within("lives", rules.lives, rules.max_lives);
        if rules.bomb_phase_ms == 0 {
            warn!("bomb_phase_ms must be positive, using 1");
            rules.bomb_phase_ms = 1;
        }
        rules
    }
}

fn at_least_one(name: &str, value: u32) -> u32 {
    if value == 0 {
        warn!("{name} must be at least 1, using 1");
        1
    } else {
        value
    }
}

fn within(name: &str, value: u32, max: u32) -> u32 {
    let clamped = value.clamp(1, max);
    if clamped != value {
        warn!("{name} = {value} is outside 1..={max}, using {clamped}");
    }
    clamped
}
