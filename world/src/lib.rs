#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game state management for Tile Bomber.
//!
//! All mutations go through [`apply`], which executes a single [`Command`]
//! against the [`Game`] and reports what happened as [`Event`] values. Read
//! access for systems and adapters lives in [`query`].

mod bomb;
mod error;
mod level;
mod manager;
mod monster;
mod movement;
mod player;
mod rules;
mod world;

use std::time::Duration;

use log::{debug, info, warn};
use tile_bomber_core::{
    BombId, Command, DamageCause, Decor, DecorRules, Direction, DoorSide, EnterEffect, Event,
    GameStatus, MonsterId, Position, WorldIndex, EXPLOSION_PHASE, WELCOME_BANNER,
};

pub use bomb::{BombObject, BombState};
pub use error::{GridError, LevelError, MalformedReason, TransitionError};
pub use level::{FileLevelSource, LevelLayout, LevelSource, StaticLevels};
pub use manager::{WorldChange, WorldManager};
pub use monster::Monster;
pub use movement::{can_move, can_push, Mover};
pub use player::Player;
pub use rules::Rules;
pub use world::World;

/// Complete state of a session: every loaded world, the player and the clock.
#[derive(Debug)]
pub struct Game {
    banner: &'static str,
    manager: WorldManager,
    player: Player,
    rules: Rules,
    now: Duration,
    status: GameStatus,
    pending_transition: Option<bool>,
    next_bomb_id: u32,
    exploded_cells: Vec<Position>,
}

impl Game {
    /// Loads the first level from `source` and places the player on its start marker.
    pub fn new(
        source: Box<dyn LevelSource>,
        level_count: usize,
        rules: Rules,
    ) -> Result<Self, LevelError> {
        let rules = rules.sanitized();
        let (manager, start) = WorldManager::start(source, level_count, rules.monster_interval())?;
        info!("session started on level 1 at {start}");
        Ok(Self {
            banner: WELCOME_BANNER,
            manager,
            player: Player::new(start, &rules),
            rules,
            now: Duration::ZERO,
            status: GameStatus::Running,
            pending_transition: None,
            next_bomb_id: 0,
            exploded_cells: Vec::new(),
        })
    }

    fn request_transition(&mut self, going_up: bool, out_events: &mut Vec<Event>) {
        if self.pending_transition.is_none() {
            self.pending_transition = Some(going_up);
            out_events.push(Event::TransitionRequested { going_up });
        }
    }

    fn damage_player(&mut self, cause: DamageCause, out_events: &mut Vec<Event>) {
        let lives_remaining = self
            .player
            .lose_life(self.now, self.rules.invulnerability());
        out_events.push(Event::PlayerDamaged {
            cause,
            lives_remaining,
        });
        if lives_remaining == 0 {
            self.status = GameStatus::Lost;
            info!("player died on level {}", self.manager.current_index().level_number());
            out_events.push(Event::PlayerDied);
        }
    }

    fn place_bomb(&mut self, out_events: &mut Vec<Event>) {
        if !self.player.can_place_bomb() {
            return;
        }
        let position = self.player.position();
        let world = self.manager.current_mut();
        if !matches!(world.get(position), Ok(None)) || world.has_monster_at(position) {
            return;
        }
        if world.set(position, Decor::Bomb).is_err() {
            return;
        }
        let bomb = BombId::new(self.next_bomb_id);
        self.next_bomb_id = self.next_bomb_id.wrapping_add(1);
        world.add_bomb(BombObject::new(
            bomb,
            position,
            self.player.bomb_range(),
            self.now,
        ));
        self.player.arm_bomb();
        out_events.push(Event::BombPlaced {
            world: world.index(),
            bomb,
            position,
        });
    }

    fn use_key(&mut self, out_events: &mut Vec<Event>) {
        let target = self
            .player
            .direction()
            .next_position(self.player.position());
        let world = self.manager.current_mut();
        let Some(Decor::Door(door)) = world.decor_at(target) else {
            return;
        };
        if !door.is_closed() || self.player.keys() == 0 {
            return;
        }
        if world.set(target, Decor::Door(door.unlocked())).is_err() || !self.player.take_key() {
            return;
        }
        out_events.push(Event::DoorUnlocked { position: target });
        self.request_transition(!door.is_prev_side(), out_events);
    }

    fn move_player(&mut self, out_events: &mut Vec<Event>) {
        let Some(direction) = self.player.take_pending_move() else {
            return;
        };
        let from = self.player.position();
        let world = self.manager.current_mut();
        if !can_move(world, from, direction, Mover::Player) {
            return;
        }
        let to = direction.next_position(from);
        let effect = world.decor_at(to).map(|decor| decor.on_player_enter());
        match effect {
            Some(EnterEffect::Blocked) => return,
            Some(EnterEffect::Push) => {
                let beyond = direction.next_position(to);
                if world.clear(to).is_err() || world.set(beyond, Decor::Box).is_err() {
                    return;
                }
                out_events.push(Event::BoxPushed {
                    from: to,
                    to: beyond,
                });
            }
            Some(EnterEffect::Collect(bonus)) => {
                if world.clear(to).is_err() {
                    return;
                }
                self.player.apply_bonus(bonus, &self.rules);
                out_events.push(Event::BonusCollected {
                    position: to,
                    bonus,
                });
            }
            None | Some(EnterEffect::Travel(_) | EnterEffect::Rescue) => {}
        }

        self.player.place_at(to);
        out_events.push(Event::PlayerMoved { from, to });

        match effect {
            Some(EnterEffect::Travel(side)) => {
                self.request_transition(side == DoorSide::Next, out_events);
            }
            Some(EnterEffect::Rescue) => {
                self.player.win();
                self.status = GameStatus::Won;
                info!("princess rescued at {to}");
                out_events.push(Event::GameWon);
            }
            _ => {}
        }
    }

    fn aim_monster(
        &mut self,
        world: WorldIndex,
        monster: MonsterId,
        direction: Option<Direction>,
        out_events: &mut Vec<Event>,
    ) {
        let now = self.now;
        let Some(target) = self
            .manager
            .world_mut(world)
            .and_then(|target| target.monster_mut(monster))
        else {
            return;
        };
        target.aim(direction, now);
        if let Some(direction) = direction {
            out_events.push(Event::MonsterAimed {
                world,
                monster,
                direction,
            });
        }
    }

    fn resolve_contacts(&mut self, out_events: &mut Vec<Event>) {
        let position = self.player.position();
        if self.player.is_vulnerable(self.now) && self.manager.current().has_monster_at(position) {
            self.damage_player(DamageCause::Monster, out_events);
        }
    }

    fn advance_bombs(&mut self, out_events: &mut Vec<Event>) {
        let (now, phase_length) = (self.now, self.rules.bomb_phase());
        for world in self.manager.worlds_mut() {
            let index = world.index();
            for bomb in world.bombs_mut() {
                let Some(phase) = bomb.advance(now, phase_length) else {
                    continue;
                };
                out_events.push(Event::BombPhaseAdvanced {
                    world: index,
                    bomb: bomb.id(),
                    phase,
                });
                if phase == EXPLOSION_PHASE {
                    out_events.push(Event::BombFused {
                        world: index,
                        bomb: bomb.id(),
                        origin: bomb.position(),
                        range: bomb.range(),
                    });
                }
            }
        }
    }

    fn detonate(
        &mut self,
        index: WorldIndex,
        bomb: BombId,
        zone: Vec<Position>,
        out_events: &mut Vec<Event>,
    ) {
        let Some(world) = self.manager.world_mut(index) else {
            return;
        };
        let Some(origin) = world
            .bomb_mut(bomb)
            .filter(|armed| armed.state() == BombState::Exploding)
            .map(|armed| {
                armed.mark_exploded();
                armed.position()
            })
        else {
            return;
        };

        for &position in &zone {
            if let Ok(Some(decor)) = world.get(position) {
                if decor.is_destructible() && world.clear(position).is_ok() {
                    out_events.push(Event::DecorDestroyed {
                        world: index,
                        position,
                        decor,
                    });
                }
            }
        }
        for monster in world.monsters_mut() {
            if zone.contains(&monster.position()) && monster.hit() {
                out_events.push(Event::MonsterKilled {
                    world: index,
                    monster: monster.id(),
                });
            }
        }
        if world.decor_at(origin) == Some(Decor::Bomb) {
            let _ = world.clear(origin);
        }
        self.player.refund_bomb();
        debug!(
            "bomb {} exploded at {origin} on level {} covering {} cells",
            bomb.get(),
            index.level_number(),
            zone.len()
        );

        if index == self.manager.current_index() {
            let position = self.player.position();
            if zone.contains(&position) && self.player.is_vulnerable(self.now) {
                self.damage_player(DamageCause::Explosion, out_events);
            }
            self.exploded_cells.extend(zone.iter().copied());
        }
        out_events.push(Event::BombExploded {
            world: index,
            bomb,
            zone,
        });
    }

    fn end_tick(&mut self, out_events: &mut Vec<Event>) -> Result<(), LevelError> {
        for world in self.manager.worlds_mut() {
            world.compact();
        }
        let Some(going_up) = self.pending_transition.take() else {
            return Ok(());
        };
        match self.manager.change_world(going_up, &mut self.player) {
            Ok(Some(change)) => {
                // Blast cells belong to the world the player just left.
                self.exploded_cells.clear();
                out_events.push(Event::WorldChanged {
                    from: change.from,
                    to: change.to,
                    spawn: change.spawn,
                });
            }
            Ok(None) => info!("door on the last level leads nowhere"),
            Err(TransitionError::NoPreviousWorld) => {
                warn!("ignored transition below the first level");
            }
            Err(TransitionError::Load(error)) => return Err(error),
        }
        Ok(())
    }
}

/// Applies the provided command to the game, mutating state deterministically.
///
/// Gameplay rejections (a blocked move, a bomb with no capacity left, a door
/// without a key) are silent no-ops. Only a failed level load during
/// [`Command::EndTick`] is reported as an error. Once the game reached a
/// terminal status every command is ignored.
pub fn apply(game: &mut Game, command: Command, out_events: &mut Vec<Event>) -> Result<(), LevelError> {
    if game.status.is_terminal() {
        return Ok(());
    }
    match command {
        Command::Tick { now } => {
            game.now = game.now.max(now);
            game.exploded_cells.clear();
            out_events.push(Event::TimeAdvanced { now: game.now });
        }
        Command::RequestMove { direction } => game.player.request_move(direction),
        Command::PlaceBomb => game.place_bomb(out_events),
        Command::UseKey => game.use_key(out_events),
        Command::MovePlayer => game.move_player(out_events),
        Command::AimMonster {
            world,
            monster,
            direction,
        } => game.aim_monster(world, monster, direction, out_events),
        Command::StepMonsters => {
            for world in game.manager.worlds_mut() {
                world.step_monsters(out_events);
            }
        }
        Command::ResolveContacts => game.resolve_contacts(out_events),
        Command::AdvanceBombs => game.advance_bombs(out_events),
        Command::Detonate { world, bomb, zone } => game.detonate(world, bomb, zone, out_events),
        Command::EndTick => game.end_tick(out_events)?,
        Command::AcknowledgeRender => game.manager.current_mut().acknowledge_render(),
    }
    Ok(())
}

/// Query functions that provide read-only access to the game state.
pub mod query {
    use std::time::Duration;

    use tile_bomber_core::{
        DecorView, Direction, GameStatus, MonsterSnapshot, MonsterView, Position, WorldIndex,
    };

    use super::{can_move, Game, Mover, Player, Rules, World};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(game: &Game) -> &'static str {
        game.banner
    }

    /// Overall state of the session.
    #[must_use]
    pub fn status(game: &Game) -> GameStatus {
        game.status
    }

    /// Provides read-only access to the player.
    #[must_use]
    pub fn player(game: &Game) -> &Player {
        &game.player
    }

    /// Rules in effect after sanitizing.
    #[must_use]
    pub fn rules(game: &Game) -> &Rules {
        &game.rules
    }

    /// Timestamp of the tick being simulated.
    #[must_use]
    pub fn now(game: &Game) -> Duration {
        game.now
    }

    /// Index of the world the player stands in.
    #[must_use]
    pub fn current_index(game: &Game) -> WorldIndex {
        game.manager.current_index()
    }

    /// World the player stands in.
    #[must_use]
    pub fn current_world(game: &Game) -> &World {
        game.manager.current()
    }

    /// Loaded world at the index, if any.
    #[must_use]
    pub fn world(game: &Game, index: WorldIndex) -> Option<&World> {
        game.manager.world(index)
    }

    /// Number of worlds loaded so far.
    #[must_use]
    pub fn max_worlds_reached(game: &Game) -> usize {
        game.manager.max_worlds_reached()
    }

    /// Transition requested this tick, `Some(true)` when heading up.
    #[must_use]
    pub fn pending_transition(game: &Game) -> Option<bool> {
        game.pending_transition
    }

    /// Cells of the current world covered by explosions during this tick.
    #[must_use]
    pub fn exploded_cells(game: &Game) -> &[Position] {
        &game.exploded_cells
    }

    /// Captures a read-only view of the decor grid of a loaded world.
    #[must_use]
    pub fn decor_view(game: &Game, index: WorldIndex) -> Option<DecorView<'_>> {
        game.manager.world(index).map(World::decor_view)
    }

    /// Captures the live monsters of every loaded world.
    #[must_use]
    pub fn monster_view(game: &Game) -> MonsterView {
        let snapshots = game
            .manager
            .worlds()
            .iter()
            .flat_map(|world| {
                world
                    .monsters()
                    .iter()
                    .filter(|monster| monster.is_alive())
                    .map(move |monster| MonsterSnapshot {
                        world: world.index(),
                        id: monster.id(),
                        position: monster.position(),
                        direction: monster.direction(),
                        ready_to_aim: monster.ready_to_aim(game.now),
                    })
            })
            .collect();
        MonsterView::from_snapshots(snapshots)
    }

    /// Reports whether a monster standing at `from` may step towards `direction`.
    #[must_use]
    pub fn monster_can_move(
        game: &Game,
        world: WorldIndex,
        from: Position,
        direction: Direction,
    ) -> bool {
        game.manager
            .world(world)
            .is_some_and(|world| can_move(world, from, direction, Mover::Monster))
    }
}
