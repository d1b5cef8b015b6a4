use std::time::Duration;

use tile_bomber_core::{Decor, Direction, Event, Position, WorldIndex};
use tile_bomber_simulation::{FrameInput, Simulation, Status};
use tile_bomber_world::{query, Rules, StaticLevels};

const BOX_ROOM: &str = "\
SSSSS
SPB_S
S___S
S___S
SSSSS";

fn simulation(levels: &[&str], rules: Rules) -> Simulation {
    let source = StaticLevels::new(levels.iter().copied());
    Simulation::with_source(Box::new(source), levels.len(), rules, 42).expect("levels load")
}

fn frame(simulation: &mut Simulation, millis: u64, input: FrameInput) -> Status {
    simulation
        .update(Duration::from_millis(millis), input)
        .expect("frame simulates")
}

fn bomb() -> FrameInput {
    FrameInput {
        place_bomb: true,
        ..FrameInput::default()
    }
}

#[test]
fn push_box_then_bomb_it() {
    let mut simulation = simulation(&[BOX_ROOM], Rules::default());

    assert_eq!(frame(&mut simulation, 0, FrameInput::moving(Direction::East)), Status::Running);
    let world = query::current_world(simulation.game());
    assert_eq!(query::player(simulation.game()).position(), Position::new(2, 1));
    assert_eq!(world.get(Position::new(3, 1)), Ok(Some(Decor::Box)));
    assert_eq!(world.get(Position::new(2, 1)), Ok(None));

    let _ = frame(&mut simulation, 100, bomb());
    let player = query::player(simulation.game());
    assert_eq!(player.bombs_in_play(), 1);
    assert!(!player.can_place_bomb());
    assert_eq!(
        query::current_world(simulation.game()).get(Position::new(2, 1)),
        Ok(Some(Decor::Bomb))
    );

    let _ = frame(&mut simulation, 200, FrameInput::moving(Direction::South));
    let _ = frame(&mut simulation, 300, bomb());
    assert!(!simulation
        .events()
        .iter()
        .any(|event| matches!(event, Event::BombPlaced { .. })));
    let _ = frame(&mut simulation, 400, FrameInput::moving(Direction::South));
    let _ = frame(&mut simulation, 500, FrameInput::moving(Direction::West));
    assert_eq!(query::player(simulation.game()).position(), Position::new(1, 3));

    let _ = frame(&mut simulation, 2_100, FrameInput::default());
    assert!(simulation
        .events()
        .iter()
        .any(|event| matches!(event, Event::BombPhaseAdvanced { phase: 2, .. })));
    assert_eq!(simulation.scene().bombs[0].phase, 2);

    let _ = frame(&mut simulation, 5_100, FrameInput::default());
    assert!(simulation
        .events()
        .iter()
        .any(|event| matches!(event, Event::BombExploded { .. })));
    let world = query::current_world(simulation.game());
    assert_eq!(world.get(Position::new(3, 1)), Ok(None));
    assert_eq!(world.get(Position::new(2, 1)), Ok(None));

    let player = query::player(simulation.game());
    assert_eq!(player.bombs_in_play(), 0);
    assert_eq!(player.lives(), 3);

    let scene = simulation.scene();
    assert!(scene.explosions.contains(&Position::new(3, 1)));
    assert!(scene.bombs.is_empty());

    let _ = frame(&mut simulation, 5_200, FrameInput::default());
    assert!(simulation.scene().explosions.is_empty());
}

#[test]
fn standing_on_a_bomb_costs_a_life() {
    let mut simulation = simulation(&[BOX_ROOM], Rules::default());
    let _ = frame(&mut simulation, 0, bomb());
    let _ = frame(&mut simulation, 5_000, FrameInput::default());
    assert!(simulation.events().contains(&Event::PlayerDamaged {
        cause: tile_bomber_core::DamageCause::Explosion,
        lives_remaining: 2,
    }));
    assert!(!simulation.scene().player.vulnerable);
}

#[test]
fn monster_walks_into_the_player() {
    let mut simulation = simulation(&["SSSSS\nSM_PS\nSSSSS"], Rules::default());
    let _ = frame(&mut simulation, 0, FrameInput::default());
    let _ = frame(&mut simulation, 100, FrameInput::default());
    assert!(simulation.events().contains(&Event::PlayerDamaged {
        cause: tile_bomber_core::DamageCause::Monster,
        lives_remaining: 2,
    }));
    assert_eq!(simulation.scene().hud.lives, 2);
}

#[test]
fn defeat_halts_the_session() {
    let rules = Rules {
        lives: 1,
        ..Rules::default()
    };
    let mut simulation = simulation(&["SSSSS\nSM_PS\nSSSSS"], rules);
    let _ = frame(&mut simulation, 0, FrameInput::default());
    assert_eq!(frame(&mut simulation, 100, FrameInput::default()), Status::Lost);
    assert_eq!(frame(&mut simulation, 200, FrameInput::moving(Direction::West)), Status::Lost);
    assert_eq!(query::player(simulation.game()).position(), Position::new(3, 1));
}

#[test]
fn victory_and_quit_are_reported() {
    let mut simulation = simulation(&["PW"], Rules::default());
    assert_eq!(frame(&mut simulation, 0, FrameInput::moving(Direction::East)), Status::Won);

    let mut simulation = self::simulation(&["PW"], Rules::default());
    let quit = FrameInput {
        quit: true,
        ..FrameInput::default()
    };
    assert_eq!(frame(&mut simulation, 0, quit), Status::Quit);
    assert_eq!(query::player(simulation.game()).position(), Position::new(0, 0));
}

#[test]
fn scene_ships_decor_until_acknowledged() {
    let mut simulation = simulation(&[BOX_ROOM], Rules::default());
    let scene = simulation.scene();
    let decor = scene.decor.expect("fresh world is dirty");
    assert_eq!(decor.len(), 17);
    assert_eq!(scene.hud.level, 1);

    simulation.acknowledge_render().expect("acknowledged");
    assert!(simulation.scene().decor.is_none());

    let _ = frame(&mut simulation, 0, FrameInput::moving(Direction::East));
    assert!(simulation.scene().decor.is_some());
}

#[test]
fn key_door_leads_to_the_next_level() {
    let first = "\
SSSSS
SKP_S
SSnSS";
    let second = "\
SSS
SVS
S_S
SSS";
    let mut simulation = simulation(&[first, second], Rules::default());
    let _ = frame(&mut simulation, 0, FrameInput::moving(Direction::West));
    let _ = frame(&mut simulation, 100, FrameInput::moving(Direction::East));
    assert_eq!(simulation.scene().hud.keys, 1);

    let _ = frame(&mut simulation, 200, FrameInput::moving(Direction::South));
    assert_eq!(query::player(simulation.game()).direction(), Direction::South);
    assert_eq!(query::player(simulation.game()).position(), Position::new(2, 1));

    let unlock = FrameInput {
        use_key: true,
        ..FrameInput::default()
    };
    let _ = frame(&mut simulation, 300, unlock);
    let scene = simulation.scene();
    assert_eq!(scene.hud.level, 2);
    assert_eq!(scene.hud.keys, 0);
    assert_eq!(scene.player.position, Position::new(1, 1));
}

const DOOR_ROOM: &str = "P_N\n___";
const LANDING_ROOM: &str = "V__\n___";

#[test]
fn bomb_in_left_world_still_explodes() {
    let mut simulation = simulation(&[DOOR_ROOM, LANDING_ROOM], Rules::default());
    let _ = frame(&mut simulation, 0, bomb());
    let _ = frame(&mut simulation, 100, FrameInput::moving(Direction::East));
    let _ = frame(&mut simulation, 200, FrameInput::moving(Direction::East));
    assert_eq!(query::current_index(simulation.game()), WorldIndex::new(1));
    assert_eq!(query::player(simulation.game()).position(), Position::new(0, 0));

    let _ = frame(&mut simulation, 5_100, FrameInput::default());
    assert!(simulation.events().iter().any(|event| matches!(
        event,
        Event::BombExploded { world, .. } if *world == WorldIndex::new(0)
    )));
    let player = query::player(simulation.game());
    assert_eq!(player.lives(), 3, "blast on level 1 reached the player on level 2");
    assert_eq!(player.bombs_in_play(), 0);
    assert!(player.can_place_bomb());

    let left = query::world(simulation.game(), WorldIndex::new(0)).expect("level 1 stays loaded");
    assert_eq!(left.get(Position::new(0, 0)), Ok(None));
    assert!(left.bombs().is_empty());
    assert!(simulation.scene().explosions.is_empty());
}

#[test]
fn explosions_stay_in_their_world() {
    let mut simulation = simulation(&[DOOR_ROOM, LANDING_ROOM], Rules::default());
    let _ = frame(&mut simulation, 0, bomb());
    let _ = frame(&mut simulation, 100, FrameInput::moving(Direction::East));
    let _ = frame(&mut simulation, 5_000, FrameInput::moving(Direction::East));

    assert!(simulation
        .events()
        .iter()
        .any(|event| matches!(event, Event::BombExploded { .. })));
    let scene = simulation.scene();
    assert_eq!(scene.hud.level, 2);
    assert_eq!(scene.player.position, Position::new(0, 0));
    assert!(scene.explosions.is_empty(), "{:?}", scene.explosions);
}

#[test]
fn monsters_keep_walking_in_left_worlds() {
    let mut simulation = simulation(&["P_N\nM__\n___", LANDING_ROOM], Rules::default());
    let _ = frame(&mut simulation, 0, FrameInput::moving(Direction::East));
    let _ = frame(&mut simulation, 100, FrameInput::moving(Direction::East));
    assert_eq!(query::current_index(simulation.game()), WorldIndex::new(1));

    let (mut aims, mut steps) = (0, 0);
    for millis in (200..=5_000).step_by(100) {
        let _ = frame(&mut simulation, millis, FrameInput::default());
        for event in simulation.events() {
            match event {
                Event::MonsterAimed { world, .. } if *world == WorldIndex::new(0) => aims += 1,
                Event::MonsterMoved { world, .. } if *world == WorldIndex::new(0) => steps += 1,
                _ => {}
            }
        }
    }
    assert!(aims >= 4, "monster re-aimed {aims} times");
    assert!(steps >= aims, "monster stepped {steps} times after {aims} aims");
    assert_eq!(query::player(simulation.game()).lives(), 3);
}
