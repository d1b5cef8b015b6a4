use std::time::Duration;

use tile_bomber_core::{Direction, MonsterId, Position};

const INITIAL_HEADING: Direction = Direction::South;

/// Monster roaming a single world.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Monster {
    id: MonsterId,
    position: Position,
    direction: Direction,
    lives: u32,
    last_action: Option<Duration>,
    interval: Duration,
}

impl Monster {
    pub(crate) const fn new(id: MonsterId, position: Position, interval: Duration) -> Self {
        Self {
            id,
            position,
            direction: INITIAL_HEADING,
            lives: 1,
            last_action: None,
            interval,
        }
    }

    /// Identifier of the monster within its world.
    #[must_use]
    pub const fn id(&self) -> MonsterId {
        self.id
    }

    /// Cell the monster occupies.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Current heading.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Whether the monster still takes part in the simulation.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.lives > 0
    }

    /// Whether the re-aim interval elapsed since the last action.
    #[must_use]
    pub fn ready_to_aim(&self, now: Duration) -> bool {
        self.is_alive()
            && self
                .last_action
                .map_or(true, |last| now.saturating_sub(last) >= self.interval)
    }

    /// Records a re-aim; `None` keeps the previous heading.
    pub(crate) fn aim(&mut self, direction: Option<Direction>, now: Duration) {
        if let Some(direction) = direction {
            self.direction = direction;
        }
        self.last_action = Some(now);
    }

    pub(crate) fn move_to(&mut self, position: Position) {
        self.position = position;
    }

    /// Removes one life, returning whether the monster died.
    pub(crate) fn hit(&mut self) -> bool {
        self.lives = self.lives.saturating_sub(1);
        self.lives == 0
    }
}
