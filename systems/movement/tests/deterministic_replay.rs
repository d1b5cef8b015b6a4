use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
    time::Duration,
};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tile_bomber_core::{Command, Direction, MonsterId, Position, WorldIndex};
use tile_bomber_system_movement::Movement;
use tile_bomber_world::{self as world, query, Game, Rules, StaticLevels};

const LEVEL: &str = "\
SSSSSSSSS
SP__B___S
S_M___M_S
S__SSS__S
S_M___M_S
S_______S
SSSSSSSSS";

#[test]
fn deterministic_replay_produces_identical_monster_paths() {
    let first = replay(0x5eed);
    let second = replay(0x5eed);

    assert_eq!(first, second, "replay diverged between runs");
    assert_eq!(first.fingerprint(), second.fingerprint());
    assert!(
        first.moves > 0,
        "monsters should wander during the replay"
    );
}

fn replay(seed: u64) -> ReplayOutcome {
    let source = StaticLevels::new([LEVEL]);
    let mut game = Game::new(Box::new(source), 1, Rules::default()).expect("level loads");
    let mut movement = Movement::new();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut trail = Vec::new();
    let mut moves = 0;

    for frame in 0..120_u64 {
        let mut events = Vec::new();
        world::apply(
            &mut game,
            Command::Tick {
                now: Duration::from_millis(frame * 100),
            },
            &mut events,
        )
        .expect("tick");

        let mut commands = Vec::new();
        movement.handle(
            &events,
            &query::monster_view(&game),
            |world, from, direction| query::monster_can_move(&game, world, from, direction),
            &mut rng,
            &mut commands,
        );
        for command in commands {
            world::apply(&mut game, command, &mut events).expect("aim");
        }
        world::apply(&mut game, Command::StepMonsters, &mut events).expect("step");
        world::apply(&mut game, Command::EndTick, &mut events).expect("end tick");

        moves += events
            .iter()
            .filter(|event| matches!(event, tile_bomber_core::Event::MonsterMoved { .. }))
            .count();
        trail.extend(
            query::monster_view(&game)
                .into_vec()
                .into_iter()
                .map(MonsterState::from),
        );
    }

    ReplayOutcome { trail, moves }
}

#[derive(Debug, PartialEq, Eq, Hash)]
struct ReplayOutcome {
    trail: Vec<MonsterState>,
    moves: usize,
}

impl ReplayOutcome {
    fn fingerprint(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.hash(&mut hasher);
        hasher.finish()
    }
}

#[derive(Debug, PartialEq, Eq, Hash)]
struct MonsterState {
    world: WorldIndex,
    id: MonsterId,
    position: Position,
    direction: Direction,
}

impl From<tile_bomber_core::MonsterSnapshot> for MonsterState {
    fn from(snapshot: tile_bomber_core::MonsterSnapshot) -> Self {
        Self {
            world: snapshot.world,
            id: snapshot.id,
            position: snapshot.position,
            direction: snapshot.direction,
        }
    }
}
