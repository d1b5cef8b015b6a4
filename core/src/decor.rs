//! Static grid occupants and the level code table that produces them.

use serde::{Deserialize, Serialize};

/// Flavours of indestructible obstacles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WallKind {
    /// Grey boulder.
    Stone,
    /// Tree trunk.
    Tree,
}

/// Which neighbouring level a door leads to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DoorSide {
    /// Leads back to the previous level. Players arriving from below land here.
    Previous,
    /// Leads on to the next level. Players returning from above land here.
    Next,
}

/// Door occupying a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Door {
    closed: bool,
    side: DoorSide,
}

impl Door {
    /// Creates an open door leading to the provided side.
    #[must_use]
    pub const fn open(side: DoorSide) -> Self {
        Self {
            closed: false,
            side,
        }
    }

    /// Creates a closed door leading to the provided side.
    #[must_use]
    pub const fn closed(side: DoorSide) -> Self {
        Self { closed: true, side }
    }

    /// Whether the door currently blocks passage.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Side of the level graph the door leads to.
    #[must_use]
    pub const fn side(&self) -> DoorSide {
        self.side
    }

    /// Whether this is the landing door for players entering from the level below.
    #[must_use]
    pub const fn is_prev_side(&self) -> bool {
        matches!(self.side, DoorSide::Previous)
    }

    /// Returns the same door with its lock removed.
    #[must_use]
    pub const fn unlocked(self) -> Self {
        Self::open(self.side)
    }
}

/// Direction in which a bonus adjusts a player statistic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Adjustment {
    /// Raises the statistic by one.
    Increase,
    /// Lowers the statistic by one.
    Decrease,
}

impl Adjustment {
    /// Signed amount applied to the statistic.
    #[must_use]
    pub const fn amount(self) -> i32 {
        match self {
            Self::Increase => 1,
            Self::Decrease => -1,
        }
    }
}

/// Collectibles consumed when the player walks over them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusKind {
    /// Changes the blast range of future bombs.
    BombRange(Adjustment),
    /// Changes how many bombs may be in play at once.
    BombCapacity(Adjustment),
    /// Grants an extra life.
    Heart,
    /// Grants a key that opens a closed door.
    Key,
}

/// Outcome of the player attempting to enter a decorated cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnterEffect {
    /// The cell cannot be entered.
    Blocked,
    /// The decor must be pushed one cell further before the player can enter.
    Push,
    /// The player enters and consumes the bonus.
    Collect(BonusKind),
    /// The player enters an open door and travels to the level on that side.
    Travel(DoorSide),
    /// The player reaches the princess and wins.
    Rescue,
}

/// Capabilities every decor variant declares.
pub trait DecorRules {
    /// Whether an explosion removes the decor.
    fn is_destructible(&self) -> bool;

    /// Whether the decor blocks an entity that cannot push it.
    fn blocks_movement(&self) -> bool;

    /// Whether an explosion ray stops before reaching this cell.
    fn blocks_blast(&self) -> bool;

    /// Effect of the player stepping onto the decor.
    fn on_player_enter(&self) -> EnterEffect;
}

/// Static or semi-static grid occupant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decor {
    /// Indestructible obstacle.
    Wall(WallKind),
    /// Pushable, destructible crate.
    Box,
    /// Door to a neighbouring level.
    Door(Door),
    /// Collectible that adjusts the player.
    Bonus(BonusKind),
    /// Goal of the final level.
    Princess,
    /// Marker for an armed bomb tracked in the world's bomb set.
    Bomb,
}

impl DecorRules for Decor {
    fn is_destructible(&self) -> bool {
        match self {
            Self::Box => true,
            Self::Bonus(kind) => !matches!(kind, BonusKind::Key),
            Self::Wall(_) | Self::Door(_) | Self::Princess | Self::Bomb => false,
        }
    }

    fn blocks_movement(&self) -> bool {
        match self {
            Self::Wall(_) | Self::Box | Self::Bomb => true,
            Self::Door(door) => door.is_closed(),
            Self::Bonus(_) | Self::Princess => false,
        }
    }

    fn blocks_blast(&self) -> bool {
        match self {
            Self::Wall(_) => true,
            Self::Door(door) => door.is_closed(),
            Self::Box | Self::Bonus(_) | Self::Princess | Self::Bomb => false,
        }
    }

    fn on_player_enter(&self) -> EnterEffect {
        match self {
            Self::Wall(_) | Self::Bomb => EnterEffect::Blocked,
            Self::Box => EnterEffect::Push,
            Self::Door(door) if door.is_closed() => EnterEffect::Blocked,
            Self::Door(door) => EnterEffect::Travel(door.side()),
            Self::Bonus(kind) => EnterEffect::Collect(*kind),
            Self::Princess => EnterEffect::Rescue,
        }
    }
}

/// Symbolic codes used by level files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorldEntity {
    /// Walkable empty cell.
    Empty,
    /// Pushable crate.
    Box,
    /// Extra life.
    Heart,
    /// Door key.
    Key,
    /// Monster spawn point.
    Monster,
    /// Open door back to the previous level.
    DoorPrevOpened,
    /// Open door on to the next level.
    DoorNextOpened,
    /// Locked door on to the next level.
    DoorNextClosed,
    /// Player start.
    Player,
    /// Stone wall.
    Stone,
    /// Tree wall.
    Tree,
    /// Princess awaiting rescue.
    Princess,
    /// Bomb range increase.
    BombRangeInc,
    /// Bomb range decrease.
    BombRangeDec,
    /// Bomb capacity increase.
    BombNumberInc,
    /// Bomb capacity decrease.
    BombNumberDec,
}

impl WorldEntity {
    /// Every entity in the code table.
    pub const ALL: [WorldEntity; 16] = [
        WorldEntity::Empty,
        WorldEntity::Box,
        WorldEntity::Heart,
        WorldEntity::Key,
        WorldEntity::Monster,
        WorldEntity::DoorPrevOpened,
        WorldEntity::DoorNextOpened,
        WorldEntity::DoorNextClosed,
        WorldEntity::Player,
        WorldEntity::Stone,
        WorldEntity::Tree,
        WorldEntity::Princess,
        WorldEntity::BombRangeInc,
        WorldEntity::BombRangeDec,
        WorldEntity::BombNumberInc,
        WorldEntity::BombNumberDec,
    ];

    /// Character representing the entity in a level file.
    #[must_use]
    pub const fn code(self) -> char {
        match self {
            Self::Empty => '_',
            Self::Box => 'B',
            Self::Heart => 'H',
            Self::Key => 'K',
            Self::Monster => 'M',
            Self::DoorPrevOpened => 'V',
            Self::DoorNextOpened => 'N',
            Self::DoorNextClosed => 'n',
            Self::Player => 'P',
            Self::Stone => 'S',
            Self::Tree => 'T',
            Self::Princess => 'W',
            Self::BombRangeInc => '>',
            Self::BombRangeDec => '<',
            Self::BombNumberInc => '+',
            Self::BombNumberDec => '-',
        }
    }

    /// Looks up the entity for a level file character.
    #[must_use]
    pub fn from_code(code: char) -> Option<Self> {
        Self::ALL.into_iter().find(|entity| entity.code() == code)
    }

    /// Decor placed in the grid for this entity, if any.
    ///
    /// Spawn markers (player and monster) leave the cell empty.
    #[must_use]
    pub const fn decor(self) -> Option<Decor> {
        match self {
            Self::Empty | Self::Monster | Self::Player => None,
            Self::Box => Some(Decor::Box),
            Self::Heart => Some(Decor::Bonus(BonusKind::Heart)),
            Self::Key => Some(Decor::Bonus(BonusKind::Key)),
            Self::DoorPrevOpened => Some(Decor::Door(Door::open(DoorSide::Previous))),
            Self::DoorNextOpened => Some(Decor::Door(Door::open(DoorSide::Next))),
            Self::DoorNextClosed => Some(Decor::Door(Door::closed(DoorSide::Next))),
            Self::Stone => Some(Decor::Wall(WallKind::Stone)),
            Self::Tree => Some(Decor::Wall(WallKind::Tree)),
            Self::Princess => Some(Decor::Princess),
            Self::BombRangeInc => Some(Decor::Bonus(BonusKind::BombRange(Adjustment::Increase))),
            Self::BombRangeDec => Some(Decor::Bonus(BonusKind::BombRange(Adjustment::Decrease))),
            Self::BombNumberInc => {
                Some(Decor::Bonus(BonusKind::BombCapacity(Adjustment::Increase)))
            }
            Self::BombNumberDec => {
                Some(Decor::Bonus(BonusKind::BombCapacity(Adjustment::Decrease)))
            }
        }
    }
}
