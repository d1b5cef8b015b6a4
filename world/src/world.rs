use std::time::Duration;

use tile_bomber_core::{
    BombId, Decor, DecorView, Dimension, Event, MonsterId, Position, WorldIndex,
};

use crate::{
    bomb::{BombObject, BombState},
    error::GridError,
    level::LevelLayout,
    monster::Monster,
    movement::{can_move, Mover},
};

/// Grid, monsters and bombs of a single level.
///
/// A world lives for the whole session once loaded, so boxes, monsters and
/// bombs keep their state when the player comes back to it.
#[derive(Clone, Debug)]
pub struct World {
    index: WorldIndex,
    dimension: Dimension,
    cells: Vec<Option<Decor>>,
    monsters: Vec<Monster>,
    bombs: Vec<BombObject>,
    changed: bool,
}

impl World {
    /// Builds a world from a parsed level, spawning a monster on every marker.
    #[must_use]
    pub fn from_layout(index: WorldIndex, layout: &LevelLayout, monster_interval: Duration) -> Self {
        let cells = layout.cells().map(|(_, entity)| entity.decor()).collect();
        let monsters = layout
            .monster_spawns()
            .into_iter()
            .zip(0_u32..)
            .map(|(position, id)| Monster::new(MonsterId::new(id), position, monster_interval))
            .collect();
        Self {
            index,
            dimension: layout.dimension(),
            cells,
            monsters,
            bombs: Vec::new(),
            changed: true,
        }
    }

    /// Position of the world in the level sequence.
    #[must_use]
    pub const fn index(&self) -> WorldIndex {
        self.index
    }

    /// Size of the grid.
    #[must_use]
    pub const fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Reports whether the position lies inside the grid.
    #[must_use]
    pub fn is_inside(&self, position: Position) -> bool {
        self.dimension.contains(position)
    }

    fn cell_index(&self, position: Position) -> Result<usize, GridError> {
        self.dimension
            .index(position)
            .ok_or(GridError::OutOfBounds {
                position,
                dimension: self.dimension,
            })
    }

    /// Decor at the position, `None` for an empty walkable cell.
    pub fn get(&self, position: Position) -> Result<Option<Decor>, GridError> {
        let index = self.cell_index(position)?;
        Ok(self.cells.get(index).copied().flatten())
    }

    /// Places a decor, replacing whatever occupied the cell.
    pub fn set(&mut self, position: Position, decor: Decor) -> Result<(), GridError> {
        let index = self.cell_index(position)?;
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = Some(decor);
            self.changed = true;
        }
        Ok(())
    }

    /// Empties the cell, returning the decor it held.
    pub fn clear(&mut self, position: Position) -> Result<Option<Decor>, GridError> {
        let index = self.cell_index(position)?;
        let previous = self.cells.get_mut(index).and_then(Option::take);
        self.changed = true;
        Ok(previous)
    }

    /// Decor at the position, treating cells outside the grid as empty.
    #[must_use]
    pub fn decor_at(&self, position: Position) -> Option<Decor> {
        self.get(position).ok().flatten()
    }

    /// Lazily yields every occupied cell in row-major order.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (Position, Decor)> + '_ {
        self.dimension
            .positions()
            .zip(self.cells.iter())
            .filter_map(|(position, cell)| cell.map(|decor| (position, decor)))
    }

    /// Captures a read-only view of the decor grid.
    #[must_use]
    pub fn decor_view(&self) -> DecorView<'_> {
        DecorView::new(&self.cells, self.dimension)
    }

    /// Whether the grid changed since the renderer last acknowledged it.
    #[must_use]
    pub const fn is_changed(&self) -> bool {
        self.changed
    }

    pub(crate) fn mark_changed(&mut self) {
        self.changed = true;
    }

    pub(crate) fn acknowledge_render(&mut self) {
        self.changed = false;
    }

    /// Monsters of the world ordered by identifier, including those killed this tick.
    #[must_use]
    pub fn monsters(&self) -> &[Monster] {
        &self.monsters
    }

    /// Whether a live monster stands on the cell.
    #[must_use]
    pub fn has_monster_at(&self, position: Position) -> bool {
        self.monsters
            .iter()
            .any(|monster| monster.is_alive() && monster.position() == position)
    }

    pub(crate) fn monster_mut(&mut self, id: MonsterId) -> Option<&mut Monster> {
        self.monsters
            .iter_mut()
            .find(|monster| monster.id() == id && monster.is_alive())
    }

    pub(crate) fn monsters_mut(&mut self) -> impl Iterator<Item = &mut Monster> {
        self.monsters.iter_mut().filter(|monster| monster.is_alive())
    }

    /// Bombs placed in the world, including those exploded this tick.
    #[must_use]
    pub fn bombs(&self) -> &[BombObject] {
        &self.bombs
    }

    pub(crate) fn add_bomb(&mut self, bomb: BombObject) {
        self.bombs.push(bomb);
    }

    pub(crate) fn bomb_mut(&mut self, id: BombId) -> Option<&mut BombObject> {
        self.bombs.iter_mut().find(|bomb| bomb.id() == id)
    }

    pub(crate) fn bombs_mut(&mut self) -> impl Iterator<Item = &mut BombObject> {
        self.bombs.iter_mut()
    }

    /// Steps every live monster one cell along its heading when the move is legal.
    ///
    /// Monsters move in identifier order and each one sees the positions the
    /// earlier ones already reached, so two monsters never end on one cell.
    pub(crate) fn step_monsters(&mut self, out_events: &mut Vec<Event>) {
        for slot in 0..self.monsters.len() {
            let Some(monster) = self.monsters.get(slot) else {
                continue;
            };
            if !monster.is_alive() {
                continue;
            }
            let (id, from, direction) = (monster.id(), monster.position(), monster.direction());
            if !can_move(self, from, direction, Mover::Monster) {
                continue;
            }
            let to = direction.next_position(from);
            if let Some(monster) = self.monsters.get_mut(slot) {
                monster.move_to(to);
                out_events.push(Event::MonsterMoved {
                    world: self.index,
                    monster: id,
                    from,
                    to,
                });
            }
        }
    }

    /// Drops dead monsters and exploded bombs.
    pub(crate) fn compact(&mut self) {
        self.monsters.retain(Monster::is_alive);
        self.bombs
            .retain(|bomb| bomb.state() != BombState::Exploded);
    }

    /// First open door in row-major order where a player arriving from the
    /// given direction lands.
    ///
    /// Arriving from below (`going_up`) lands on a `Previous` door, arriving
    /// from above lands on a `Next` door.
    #[must_use]
    pub fn find_landing_door(&self, going_up: bool) -> Option<Position> {
        self.occupied_cells()
            .find(|(_, decor)| match decor {
                Decor::Door(door) => !door.is_closed() && door.is_prev_side() == going_up,
                _ => false,
            })
            .map(|(position, _)| position)
    }
}
