#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Simulation driver that sequences one Tile Bomber tick per rendered frame.
//!
//! [`Simulation`] owns the authoritative [`Game`], the pure systems and the
//! single session random number generator. Adapters feed it a timestamp and a
//! [`FrameInput`] per frame and read back a [`Scene`].

mod config;
mod input;
mod scene;

use std::time::Duration;

use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tile_bomber_core::{Command, Event, GameStatus};
use tile_bomber_system_explosion::Explosion;
use tile_bomber_system_movement::Movement;
use tile_bomber_world::{
    self as world, query, FileLevelSource, Game, LevelError, LevelSource, Rules,
};

pub use config::{ConfigError, GameConfig, LevelsConfig};
pub use input::FrameInput;
pub use scene::{BombPresentation, Hud, MonsterPresentation, PlayerPresentation, Scene, SceneCell};

/// Failures that stop the simulation.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// A level could not be loaded at startup or during a transition.
    #[error(transparent)]
    Level(#[from] LevelError),
}

/// Outcome of a single update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// The session keeps running.
    Running,
    /// The player rescued the princess.
    Won,
    /// The player ran out of lives.
    Lost,
    /// The player asked to leave.
    Quit,
}

impl Status {
    /// Whether the driver loop should stop.
    #[must_use]
    pub const fn is_finished(self) -> bool {
        !matches!(self, Self::Running)
    }
}

impl From<GameStatus> for Status {
    fn from(status: GameStatus) -> Self {
        match status {
            GameStatus::Running => Self::Running,
            GameStatus::Won => Self::Won,
            GameStatus::Lost => Self::Lost,
        }
    }
}

/// Explicit simulation context owned by the top-level driver loop.
#[derive(Debug)]
pub struct Simulation {
    game: Game,
    movement: Movement,
    explosion: Explosion,
    rng: ChaCha8Rng,
    events: Vec<Event>,
}

impl Simulation {
    /// Starts a session reading level files as described by the configuration.
    pub fn new(config: &GameConfig) -> Result<Self, SimulationError> {
        let source = FileLevelSource::new(
            config.levels.directory.clone(),
            config.levels.prefix.as_str(),
        );
        info!(
            "loading {} levels from {}",
            config.levels.count,
            source.directory().display()
        );
        Self::with_source(Box::new(source), config.levels.count, config.rules, config.seed)
    }

    /// Starts a session on an arbitrary level source.
    pub fn with_source(
        source: Box<dyn LevelSource>,
        level_count: usize,
        rules: Rules,
        seed: u64,
    ) -> Result<Self, SimulationError> {
        Ok(Self {
            game: Game::new(source, level_count, rules)?,
            movement: Movement::new(),
            explosion: Explosion::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            events: Vec::new(),
        })
    }

    /// Simulates one frame at timestamp `now`.
    ///
    /// A quit intent returns [`Status::Quit`] without simulating anything, and
    /// once the session reached a terminal status further updates only report it.
    pub fn update(&mut self, now: Duration, input: FrameInput) -> Result<Status, SimulationError> {
        if input.quit {
            info!("quit requested");
            return Ok(Status::Quit);
        }
        let status = query::status(&self.game);
        if status.is_terminal() {
            return Ok(status.into());
        }

        let mut events = Vec::new();
        self.submit(Command::Tick { now }, &mut events)?;
        if let Some(direction) = input.movement {
            self.submit(Command::RequestMove { direction }, &mut events)?;
        }
        if input.place_bomb {
            self.submit(Command::PlaceBomb, &mut events)?;
        }
        if input.use_key {
            self.submit(Command::UseKey, &mut events)?;
        }
        self.submit(Command::MovePlayer, &mut events)?;

        let mut commands = Vec::new();
        {
            let game = &self.game;
            self.movement.handle(
                &events,
                &query::monster_view(game),
                |world, from, direction| query::monster_can_move(game, world, from, direction),
                &mut self.rng,
                &mut commands,
            );
        }
        for command in commands.drain(..) {
            self.submit(command, &mut events)?;
        }
        self.submit(Command::StepMonsters, &mut events)?;
        self.submit(Command::ResolveContacts, &mut events)?;

        let fused_from = events.len();
        self.submit(Command::AdvanceBombs, &mut events)?;
        {
            let game = &self.game;
            self.explosion.handle(
                &events[fused_from..],
                |index| query::decor_view(game, index),
                &mut commands,
            );
        }
        for command in commands.drain(..) {
            self.submit(command, &mut events)?;
        }
        self.submit(Command::EndTick, &mut events)?;

        self.events = events;
        Ok(query::status(&self.game).into())
    }

    fn submit(&mut self, command: Command, events: &mut Vec<Event>) -> Result<(), SimulationError> {
        world::apply(&mut self.game, command, events)?;
        Ok(())
    }

    /// Captures the scene of the world the player stands in.
    #[must_use]
    pub fn scene(&self) -> Scene {
        Scene::capture(&self.game)
    }

    /// Tells the simulation that the renderer refreshed the current grid.
    pub fn acknowledge_render(&mut self) -> Result<(), SimulationError> {
        let mut events = Vec::new();
        self.submit(Command::AcknowledgeRender, &mut events)
    }

    /// Events produced by the last simulated frame.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Provides read-only access to the authoritative game state.
    #[must_use]
    pub fn game(&self) -> &Game {
        &self.game
    }
}
