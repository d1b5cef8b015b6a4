#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Monster AI that periodically re-aims monsters towards a random open direction.

use rand::{seq::SliceRandom, Rng};
use tile_bomber_core::{Command, Direction, Event, MonsterView, Position, WorldIndex};

/// Pure system that reacts to world events and emits monster aiming commands.
#[derive(Debug, Default)]
pub struct Movement {
    candidates: Vec<Direction>,
}

impl Movement {
    /// Creates a new movement system.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes world events and the monster view to emit aiming commands.
    ///
    /// Only runs on ticks that advanced time. Every monster whose re-aim
    /// interval elapsed receives one [`Command::AimMonster`], carrying a
    /// direction drawn uniformly from the currently open ones, or `None` when
    /// the monster is boxed in.
    pub fn handle<F, R>(
        &mut self,
        events: &[Event],
        monster_view: &MonsterView,
        can_move: F,
        rng: &mut R,
        out: &mut Vec<Command>,
    ) where
        F: Fn(WorldIndex, Position, Direction) -> bool,
        R: Rng + ?Sized,
    {
        if !events
            .iter()
            .any(|event| matches!(event, Event::TimeAdvanced { .. }))
        {
            return;
        }

        for monster in monster_view.iter().filter(|monster| monster.ready_to_aim) {
            self.candidates.clear();
            self.candidates.extend(
                Direction::ALL
                    .into_iter()
                    .filter(|direction| can_move(monster.world, monster.position, *direction)),
            );
            out.push(Command::AimMonster {
                world: monster.world,
                monster: monster.id,
                direction: self.candidates.choose(rng).copied(),
            });
        }
    }
}
