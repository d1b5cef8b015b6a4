//! Collision rules shared by the player and monsters.

use tile_bomber_core::{DecorRules, Direction, EnterEffect, Position};

use crate::world::World;

/// Kind of entity attempting a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mover {
    /// The player, who may push boxes and share a cell with monsters.
    Player,
    /// A monster, blocked by every obstacle and by other monsters.
    Monster,
}

/// Reports whether the mover may take one step from `from` towards `direction`.
#[must_use]
pub fn can_move(world: &World, from: Position, direction: Direction, mover: Mover) -> bool {
    let target = direction.next_position(from);
    if !world.is_inside(target) {
        return false;
    }
    let decor = world.decor_at(target);
    match mover {
        Mover::Player => match decor.map(|decor| decor.on_player_enter()) {
            None => true,
            Some(EnterEffect::Blocked) => false,
            Some(EnterEffect::Push) => can_push(world, target, direction),
            Some(EnterEffect::Collect(_) | EnterEffect::Travel(_) | EnterEffect::Rescue) => true,
        },
        Mover::Monster => {
            !decor.is_some_and(|decor| decor.blocks_movement()) && !world.has_monster_at(target)
        }
    }
}

/// Reports whether the box at `box_at` can slide one cell towards `direction`.
///
/// The destination must lie inside the grid, hold no decor and no live monster.
#[must_use]
pub fn can_push(world: &World, box_at: Position, direction: Direction) -> bool {
    let beyond = direction.next_position(box_at);
    matches!(world.get(beyond), Ok(None)) && !world.has_monster_at(beyond)
}
