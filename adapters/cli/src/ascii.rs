//! Text renderer for scenes produced by the simulation.

use std::fmt::Write as _;

use tile_bomber_core::{Adjustment, BonusKind, Decor, Dimension, DoorSide, Position, WallKind};
use tile_bomber_simulation::Scene;

const FLOOR: char = '.';
const PLAYER: char = '@';
const MONSTER: char = 'M';
const FLAME: char = '*';

/// Keeps the last shipped decor grid and draws scenes on top of it.
///
/// Scenes only carry decor when the grid changed, so the renderer caches it
/// between frames.
#[derive(Debug, Default)]
pub(crate) struct AsciiRenderer {
    dimension: Dimension,
    decor: Vec<Option<Decor>>,
}

impl AsciiRenderer {
    /// Draws the scene followed by a HUD line.
    pub(crate) fn draw(&mut self, scene: &Scene) -> String {
        if let Some(cells) = &scene.decor {
            self.dimension = scene.dimension;
            self.decor = vec![None; scene.dimension.cell_count()];
            for cell in cells {
                if let Some(slot) = self.slot(cell.position) {
                    self.decor[slot] = Some(cell.decor);
                }
            }
        }

        let mut canvas: Vec<char> = self
            .decor
            .iter()
            .map(|decor| decor.map_or(FLOOR, symbol))
            .collect();
        let mut paint = |position: Position, glyph: char| {
            if let Some(slot) = self.dimension.index(position) {
                if let Some(cell) = canvas.get_mut(slot) {
                    *cell = glyph;
                }
            }
        };
        for &position in &scene.explosions {
            paint(position, FLAME);
        }
        for bomb in &scene.bombs {
            paint(bomb.position, char::from(b'0' + bomb.phase.min(9)));
        }
        for monster in &scene.monsters {
            paint(monster.position, MONSTER);
        }
        paint(scene.player.position, PLAYER);

        let width = self.dimension.width() as usize;
        let mut frame = String::with_capacity(canvas.len() + self.dimension.height() as usize + 64);
        for row in canvas.chunks(width.max(1)) {
            frame.extend(row);
            frame.push('\n');
        }
        let hud = &scene.hud;
        let _ = write!(
            frame,
            "level {} | lives {} | bombs {}/{} | range {} | keys {}",
            hud.level, hud.lives, hud.bombs_in_play, hud.bomb_capacity, hud.bomb_range, hud.keys
        );
        if !scene.player.vulnerable {
            frame.push_str(" | shielded");
        }
        frame
    }

    fn slot(&self, position: Position) -> Option<usize> {
        self.dimension
            .index(position)
            .filter(|&slot| slot < self.decor.len())
    }
}

fn symbol(decor: Decor) -> char {
    match decor {
        Decor::Wall(WallKind::Stone) => 'S',
        Decor::Wall(WallKind::Tree) => 'T',
        Decor::Box => 'B',
        Decor::Door(door) => match (door.side(), door.is_closed()) {
            (DoorSide::Previous, false) => 'V',
            (DoorSide::Previous, true) => 'v',
            (DoorSide::Next, false) => 'N',
            (DoorSide::Next, true) => 'n',
        },
        Decor::Bonus(BonusKind::Heart) => 'H',
        Decor::Bonus(BonusKind::Key) => 'K',
        Decor::Bonus(BonusKind::BombRange(Adjustment::Increase)) => '>',
        Decor::Bonus(BonusKind::BombRange(Adjustment::Decrease)) => '<',
        Decor::Bonus(BonusKind::BombCapacity(Adjustment::Increase)) => '+',
        Decor::Bonus(BonusKind::BombCapacity(Adjustment::Decrease)) => '-',
        Decor::Princess => 'W',
        Decor::Bomb => 'o',
    }
}
