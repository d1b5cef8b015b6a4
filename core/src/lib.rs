#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Tile Bomber engine.
//!
//! This crate defines the message surface that connects the driver, the
//! authoritative game state, and pure systems. The driver submits [`Command`]
//! values describing desired mutations, the world crate executes them through
//! its `apply` entry point and broadcasts [`Event`] values. Systems consume
//! event streams and immutable views, and respond exclusively with new
//! command batches.

mod decor;
mod grid;

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub use decor::{
    Adjustment, BonusKind, Decor, DecorRules, Door, DoorSide, EnterEffect, WallKind, WorldEntity,
};
pub use grid::{Dimension, Direction, Position};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Tile Bomber.";

/// Phase at which an armed bomb explodes.
pub const EXPLOSION_PHASE: u8 = 5;

/// Commands that express all permissible game mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Records the timestamp of the frame being simulated.
    Tick {
        /// Monotonic time elapsed since the session started.
        now: Duration,
    },
    /// Records the direction the player wants to move in during this tick.
    RequestMove {
        /// Requested heading.
        direction: Direction,
    },
    /// Requests a bomb at the player's current cell.
    PlaceBomb,
    /// Requests that the player unlock the closed door it is facing.
    UseKey,
    /// Resolves the pending move intent against the current world state.
    MovePlayer,
    /// Re-aims a monster after its action interval elapsed.
    AimMonster {
        /// World the monster lives in.
        world: WorldIndex,
        /// Identifier of the monster.
        monster: MonsterId,
        /// New heading, or `None` when no direction is currently valid.
        direction: Option<Direction>,
    },
    /// Advances every live monster one step along its heading when legal.
    StepMonsters,
    /// Applies contact damage between monsters and the player.
    ResolveContacts,
    /// Recomputes bomb phases from the current timestamp.
    AdvanceBombs,
    /// Applies the blast of a fused bomb.
    Detonate {
        /// World the bomb was placed in.
        world: WorldIndex,
        /// Identifier of the bomb.
        bomb: BombId,
        /// Cells affected by the blast, including the bomb's own cell.
        zone: Vec<Position>,
    },
    /// Removes dead entities and commits any pending world transition.
    EndTick,
    /// Clears the changed flag of the current world once the renderer refreshed it.
    AcknowledgeRender,
}

/// Events broadcast after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Timestamp now in effect.
        now: Duration,
    },
    /// Confirms that the player moved between two cells.
    PlayerMoved {
        /// Cell occupied before the move.
        from: Position,
        /// Cell occupied after the move.
        to: Position,
    },
    /// Confirms that the player pushed a box.
    BoxPushed {
        /// Cell the box occupied before the push.
        from: Position,
        /// Cell the box occupies after the push.
        to: Position,
    },
    /// Confirms that the player consumed a bonus.
    BonusCollected {
        /// Cell the bonus was removed from.
        position: Position,
        /// Kind of bonus consumed.
        bonus: BonusKind,
    },
    /// Confirms that a bomb was armed.
    BombPlaced {
        /// World the bomb was placed in.
        world: WorldIndex,
        /// Identifier assigned to the bomb.
        bomb: BombId,
        /// Cell holding the bomb.
        position: Position,
    },
    /// Confirms that a key opened a door.
    DoorUnlocked {
        /// Cell holding the door.
        position: Position,
    },
    /// Announces that a world transition will be committed at the end of the tick.
    TransitionRequested {
        /// Whether the player is heading to the next level.
        going_up: bool,
    },
    /// Announces that the player now stands in another world.
    WorldChanged {
        /// World the player left.
        from: WorldIndex,
        /// World the player entered.
        to: WorldIndex,
        /// Cell the player was placed on.
        spawn: Position,
    },
    /// Confirms that a monster chose a new heading.
    MonsterAimed {
        /// World the monster lives in.
        world: WorldIndex,
        /// Identifier of the monster.
        monster: MonsterId,
        /// Heading chosen.
        direction: Direction,
    },
    /// Confirms that a monster moved between two cells.
    MonsterMoved {
        /// World the monster lives in.
        world: WorldIndex,
        /// Identifier of the monster.
        monster: MonsterId,
        /// Cell occupied before the move.
        from: Position,
        /// Cell occupied after the move.
        to: Position,
    },
    /// Reports that the player lost a life.
    PlayerDamaged {
        /// What inflicted the damage.
        cause: DamageCause,
        /// Lives left after the hit.
        lives_remaining: u32,
    },
    /// Reports that a monster ran out of lives.
    MonsterKilled {
        /// World the monster lived in.
        world: WorldIndex,
        /// Identifier of the monster.
        monster: MonsterId,
    },
    /// Reports that a bomb entered a later phase.
    BombPhaseAdvanced {
        /// World the bomb was placed in.
        world: WorldIndex,
        /// Identifier of the bomb.
        bomb: BombId,
        /// Phase now in effect.
        phase: u8,
    },
    /// Reports that a bomb reached its explosion phase and awaits detonation.
    BombFused {
        /// World the bomb was placed in.
        world: WorldIndex,
        /// Identifier of the bomb.
        bomb: BombId,
        /// Cell holding the bomb.
        origin: Position,
        /// Number of cells the blast extends along each arm.
        range: u32,
    },
    /// Confirms that a bomb exploded.
    BombExploded {
        /// World the bomb was placed in.
        world: WorldIndex,
        /// Identifier of the bomb.
        bomb: BombId,
        /// Cells covered by the blast.
        zone: Vec<Position>,
    },
    /// Reports that an explosion removed a decor.
    DecorDestroyed {
        /// World holding the decor.
        world: WorldIndex,
        /// Cell the decor was removed from.
        position: Position,
        /// Decor that was removed.
        decor: Decor,
    },
    /// The player ran out of lives.
    PlayerDied,
    /// The player rescued the princess.
    GameWon,
}

/// Source of damage inflicted on the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageCause {
    /// A monster shared the player's cell.
    Monster,
    /// The player stood in a blast zone.
    Explosion,
}

/// Overall state of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// The simulation keeps running.
    Running,
    /// The player rescued the princess.
    Won,
    /// The player ran out of lives.
    Lost,
}

impl GameStatus {
    /// Whether the status halts the simulation.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }
}

/// Zero-based index of a world in the level sequence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WorldIndex(usize);

impl WorldIndex {
    /// Creates a new world index.
    #[must_use]
    pub const fn new(value: usize) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the index.
    #[must_use]
    pub const fn get(&self) -> usize {
        self.0
    }

    /// One-based level number shown to players.
    #[must_use]
    pub const fn level_number(&self) -> usize {
        self.0 + 1
    }
}

/// Unique identifier assigned to a monster within its world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonsterId(u32);

impl MonsterId {
    /// Creates a new monster identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a bomb for the whole session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BombId(u32);

impl BombId {
    /// Creates a new bomb identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Immutable representation of a single monster's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonsterSnapshot {
    /// World the monster lives in.
    pub world: WorldIndex,
    /// Identifier of the monster.
    pub id: MonsterId,
    /// Cell occupied by the monster.
    pub position: Position,
    /// Current heading.
    pub direction: Direction,
    /// Indicates whether the monster's action interval elapsed.
    pub ready_to_aim: bool,
}

/// Read-only snapshot describing the monsters of every loaded world.
#[derive(Clone, Debug, Default)]
pub struct MonsterView {
    snapshots: Vec<MonsterSnapshot>,
}

impl MonsterView {
    /// Creates a new monster view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<MonsterSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| (snapshot.world, snapshot.id));
        Self { snapshots }
    }

    /// Iterator over the captured snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &MonsterSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<MonsterSnapshot> {
        self.snapshots
    }
}

/// Read-only view into the dense decor grid of one world.
#[derive(Clone, Copy, Debug)]
pub struct DecorView<'a> {
    cells: &'a [Option<Decor>],
    dimension: Dimension,
}

impl<'a> DecorView<'a> {
    /// Captures a new view backed by the provided row-major cell slice.
    #[must_use]
    pub const fn new(cells: &'a [Option<Decor>], dimension: Dimension) -> Self {
        Self { cells, dimension }
    }

    /// Dimension of the underlying grid.
    #[must_use]
    pub const fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Reports whether the position lies inside the grid.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.dimension.contains(position)
    }

    /// Decor at the position; `None` for empty cells and positions outside the grid.
    #[must_use]
    pub fn decor(&self, position: Position) -> Option<Decor> {
        self.dimension
            .index(position)
            .and_then(|index| self.cells.get(index).copied().flatten())
    }
}
