use std::time::Duration;

use log::{debug, info, warn};
use tile_bomber_core::{Position, WorldIndex};

use crate::{
    error::{LevelError, MalformedReason, TransitionError},
    level::LevelSource,
    player::Player,
    world::World,
};

/// Outcome of a committed world transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldChange {
    /// World the player left.
    pub from: WorldIndex,
    /// World the player entered.
    pub to: WorldIndex,
    /// Cell the player was placed on.
    pub spawn: Position,
}

/// Ordered level sequence with lazy loading of unvisited levels.
#[derive(Debug)]
pub struct WorldManager {
    worlds: Vec<World>,
    current: usize,
    level_count: usize,
    source: Box<dyn LevelSource>,
    monster_interval: Duration,
}

impl WorldManager {
    /// Loads the first level and returns the manager along with the player start.
    ///
    /// The first level must contain a player start marker.
    pub fn start(
        source: Box<dyn LevelSource>,
        level_count: usize,
        monster_interval: Duration,
    ) -> Result<(Self, Position), LevelError> {
        let first = WorldIndex::new(0);
        let layout = source.load(first)?;
        let start = layout.player_start().ok_or(LevelError::Malformed {
            level: first.level_number(),
            reason: MalformedReason::MissingPlayerStart,
        })?;
        if level_count == 0 {
            warn!("level count must be at least 1, using 1");
        }
        let mut manager = Self {
            worlds: Vec::new(),
            current: 0,
            level_count: level_count.max(1),
            source,
            monster_interval,
        };
        manager.add_world(World::from_layout(first, &layout, monster_interval));
        debug!("loaded level {} ({})", first.level_number(), layout.dimension());
        Ok((manager, start))
    }

    /// Appends a world to the sequence.
    pub(crate) fn add_world(&mut self, world: World) {
        self.worlds.push(world);
    }

    /// Number of worlds loaded so far.
    #[must_use]
    pub fn max_worlds_reached(&self) -> usize {
        self.worlds.len()
    }

    /// Index of the world the player stands in.
    #[must_use]
    pub const fn current_index(&self) -> WorldIndex {
        WorldIndex::new(self.current)
    }

    /// World the player stands in.
    #[must_use]
    pub fn current(&self) -> &World {
        &self.worlds[self.current]
    }

    pub(crate) fn current_mut(&mut self) -> &mut World {
        &mut self.worlds[self.current]
    }

    /// Loaded world at the index, if any.
    #[must_use]
    pub fn world(&self, index: WorldIndex) -> Option<&World> {
        self.worlds.get(index.get())
    }

    pub(crate) fn world_mut(&mut self, index: WorldIndex) -> Option<&mut World> {
        self.worlds.get_mut(index.get())
    }

    /// Every loaded world in index order.
    #[must_use]
    pub fn worlds(&self) -> &[World] {
        &self.worlds
    }

    pub(crate) fn worlds_mut(&mut self) -> impl Iterator<Item = &mut World> {
        self.worlds.iter_mut()
    }

    /// Moves to the next world, loading it on first visit.
    ///
    /// Returns `None` and stays put when the current world is the last level.
    pub fn next_world(&mut self) -> Result<Option<&mut World>, LevelError> {
        let target = self.current + 1;
        if target >= self.level_count {
            debug!("no level after {}", self.current_index().level_number());
            return Ok(None);
        }
        if target == self.worlds.len() {
            let index = WorldIndex::new(target);
            let layout = self.source.load(index)?;
            debug!("loaded level {} ({})", index.level_number(), layout.dimension());
            self.add_world(World::from_layout(index, &layout, self.monster_interval));
        }
        self.current = target;
        Ok(self.worlds.get_mut(target))
    }

    /// Moves back to the already loaded previous world.
    pub fn previous_world(&mut self) -> Result<&mut World, TransitionError> {
        let target = self
            .current
            .checked_sub(1)
            .ok_or(TransitionError::NoPreviousWorld)?;
        self.current = target;
        Ok(&mut self.worlds[target])
    }

    /// Switches worlds and places the player on the matching landing door.
    ///
    /// Returns `None` without side effects when there is no level above the
    /// last one. When the target world has no matching open door the player
    /// keeps its coordinates, clamped into the new grid.
    pub fn change_world(
        &mut self,
        going_up: bool,
        player: &mut Player,
    ) -> Result<Option<WorldChange>, TransitionError> {
        let from = self.current_index();
        let world = if going_up {
            match self.next_world()? {
                Some(world) => world,
                None => return Ok(None),
            }
        } else {
            self.previous_world()?
        };

        let spawn = world.find_landing_door(going_up).unwrap_or_else(|| {
            let clamped = world.dimension().clamp(player.position());
            warn!(
                "level {} has no open landing door, placing player at {clamped}",
                world.index().level_number()
            );
            clamped
        });
        world.mark_changed();
        player.place_at(spawn);

        let to = world.index();
        info!(
            "player moved from level {} to level {} at {spawn}",
            from.level_number(),
            to.level_number()
        );
        Ok(Some(WorldChange { from, to, spawn }))
    }
}
