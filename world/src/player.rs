use std::time::Duration;

use tile_bomber_core::{BonusKind, Direction, Position};

use crate::rules::Rules;

/// The single player of a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    position: Position,
    direction: Direction,
    lives: u32,
    bomb_capacity: u32,
    bombs_in_play: u32,
    bomb_range: u32,
    keys: u32,
    invulnerable_until: Option<Duration>,
    alive: bool,
    winner: bool,
    pending_move: Option<Direction>,
}

impl Player {
    pub(crate) const fn new(position: Position, rules: &Rules) -> Self {
        Self {
            position,
            direction: Direction::South,
            lives: rules.lives,
            bomb_capacity: rules.bomb_capacity,
            bombs_in_play: 0,
            bomb_range: rules.bomb_range,
            keys: 0,
            invulnerable_until: None,
            alive: true,
            winner: false,
            pending_move: None,
        }
    }

    /// Cell the player occupies.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Direction the player faces.
    #[must_use]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Remaining lives.
    #[must_use]
    pub const fn lives(&self) -> u32 {
        self.lives
    }

    /// Bombs that may be in play at once.
    #[must_use]
    pub const fn bomb_capacity(&self) -> u32 {
        self.bomb_capacity
    }

    /// Bombs currently on a board.
    #[must_use]
    pub const fn bombs_in_play(&self) -> u32 {
        self.bombs_in_play
    }

    /// Blast range of the next bomb.
    #[must_use]
    pub const fn bomb_range(&self) -> u32 {
        self.bomb_range
    }

    /// Keys held.
    #[must_use]
    pub const fn keys(&self) -> u32 {
        self.keys
    }

    /// Whether the player still has lives left.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    /// Whether the player rescued the princess.
    #[must_use]
    pub const fn is_winner(&self) -> bool {
        self.winner
    }

    /// Whether damage applies at `now`.
    #[must_use]
    pub fn is_vulnerable(&self, now: Duration) -> bool {
        self.alive && self.invulnerable_until.map_or(true, |until| now >= until)
    }

    /// Whether another bomb may be placed.
    #[must_use]
    pub const fn can_place_bomb(&self) -> bool {
        self.bombs_in_play < self.bomb_capacity
    }

    pub(crate) fn request_move(&mut self, direction: Direction) {
        self.direction = direction;
        self.pending_move = Some(direction);
    }

    pub(crate) fn take_pending_move(&mut self) -> Option<Direction> {
        self.pending_move.take()
    }

    pub(crate) fn place_at(&mut self, position: Position) {
        self.position = position;
    }

    /// Removes one life and opens an invulnerability window, returning the lives left.
    pub(crate) fn lose_life(&mut self, now: Duration, window: Duration) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        self.invulnerable_until = Some(now.saturating_add(window));
        if self.lives == 0 {
            self.alive = false;
        }
        self.lives
    }

    pub(crate) fn arm_bomb(&mut self) {
        self.bombs_in_play = self.bombs_in_play.saturating_add(1);
    }

    pub(crate) fn refund_bomb(&mut self) {
        self.bombs_in_play = self.bombs_in_play.saturating_sub(1);
    }

    pub(crate) fn apply_bonus(&mut self, bonus: BonusKind, rules: &Rules) {
        match bonus {
            BonusKind::BombRange(adjustment) => {
                self.bomb_range = adjust(self.bomb_range, adjustment.amount(), rules.max_bomb_range);
            }
            BonusKind::BombCapacity(adjustment) => {
                self.bomb_capacity =
                    adjust(self.bomb_capacity, adjustment.amount(), rules.max_bomb_capacity);
            }
            BonusKind::Heart => {
                self.lives = self.lives.saturating_add(1).min(rules.max_lives.max(self.lives));
            }
            BonusKind::Key => self.keys = self.keys.saturating_add(1),
        }
    }

    /// Consumes a key, returning whether one was held.
    pub(crate) fn take_key(&mut self) -> bool {
        if self.keys == 0 {
            return false;
        }
        self.keys -= 1;
        true
    }

    pub(crate) fn win(&mut self) {
        self.winner = true;
    }
}

fn adjust(value: u32, amount: i32, max: u32) -> u32 {
    let adjusted = if amount >= 0 {
        value.saturating_add(amount.unsigned_abs())
    } else {
        value.saturating_sub(amount.unsigned_abs())
    };
    adjusted.clamp(1, max.max(1))
}
