//! Presentation snapshot handed to rendering adapters once per frame.

use serde::Serialize;
use tile_bomber_core::{Decor, Dimension, Direction, GameStatus, Position};
use tile_bomber_world::{query, BombState, Game};

/// Decor occupying a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SceneCell {
    /// Cell holding the decor.
    pub position: Position,
    /// Decor to draw.
    pub decor: Decor,
}

/// Player as seen by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PlayerPresentation {
    /// Cell occupied by the player.
    pub position: Position,
    /// Direction the player faces.
    pub direction: Direction,
    /// Whether damage currently applies; renderers blink the sprite otherwise.
    pub vulnerable: bool,
}

/// Monster as seen by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MonsterPresentation {
    /// Cell occupied by the monster.
    pub position: Position,
    /// Heading of the monster.
    pub direction: Direction,
}

/// Bomb as seen by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BombPresentation {
    /// Cell holding the bomb.
    pub position: Position,
    /// Phase in `0..=5`.
    pub phase: u8,
}

/// Scalar values for the heads-up display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Hud {
    /// One-based number of the current level.
    pub level: usize,
    /// Remaining lives.
    pub lives: u32,
    /// Bombs that may be in play at once.
    pub bomb_capacity: u32,
    /// Bombs currently on a board.
    pub bombs_in_play: u32,
    /// Blast range of the next bomb.
    pub bomb_range: u32,
    /// Keys held.
    pub keys: u32,
}

/// Scene description of the world the player stands in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Scene {
    /// Size of the current world.
    pub dimension: Dimension,
    /// Every decor cell in row-major order, present only when the grid changed
    /// since the last render acknowledgement.
    pub decor: Option<Vec<SceneCell>>,
    /// The player.
    pub player: PlayerPresentation,
    /// Live monsters ordered by identifier.
    pub monsters: Vec<MonsterPresentation>,
    /// Armed bombs in placement order.
    pub bombs: Vec<BombPresentation>,
    /// Cells covered by explosions during the last update.
    pub explosions: Vec<Position>,
    /// Heads-up display values.
    pub hud: Hud,
    /// Overall state of the session.
    pub status: GameStatus,
}

impl Scene {
    /// Captures the scene for the world the player currently stands in.
    #[must_use]
    pub fn capture(game: &Game) -> Self {
        let world = query::current_world(game);
        let player = query::player(game);
        let decor = world.is_changed().then(|| {
            world
                .occupied_cells()
                .map(|(position, decor)| SceneCell { position, decor })
                .collect()
        });
        let monsters = world
            .monsters()
            .iter()
            .filter(|monster| monster.is_alive())
            .map(|monster| MonsterPresentation {
                position: monster.position(),
                direction: monster.direction(),
            })
            .collect();
        let bombs = world
            .bombs()
            .iter()
            .filter(|bomb| bomb.state() != BombState::Exploded)
            .map(|bomb| BombPresentation {
                position: bomb.position(),
                phase: bomb.phase(),
            })
            .collect();

        Self {
            dimension: world.dimension(),
            decor,
            player: PlayerPresentation {
                position: player.position(),
                direction: player.direction(),
                vulnerable: player.is_vulnerable(query::now(game)),
            },
            monsters,
            bombs,
            explosions: query::exploded_cells(game).to_vec(),
            hud: Hud {
                level: world.index().level_number(),
                lives: player.lives(),
                bomb_capacity: player.bomb_capacity(),
                bombs_in_play: player.bombs_in_play(),
                bomb_range: player.bomb_range(),
                keys: player.keys(),
            },
            status: query::status(game),
        }
    }
}
