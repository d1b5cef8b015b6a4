use tile_bomber_core::{Command, Direction, Event, Position, WorldIndex};
use tile_bomber_world::{self as world, query, Game, LevelError, Rules, StaticLevels};

const FIRST: &str = "\
SSSSS
SP_NS
S___S
SSSSS";

const SECOND: &str = "\
SSSSSS
S_V__S
S__V_S
S_N__S
SSSSSS";

fn game(levels: &[&str], count: usize) -> Game {
    let source = StaticLevels::new(levels.iter().copied());
    Game::new(Box::new(source), count, Rules::default()).expect("first level loads")
}

fn walk(game: &mut Game, directions: &[Direction]) -> Result<Vec<Event>, LevelError> {
    let mut events = Vec::new();
    for &direction in directions {
        world::apply(game, Command::RequestMove { direction }, &mut events)?;
        world::apply(game, Command::MovePlayer, &mut events)?;
        world::apply(game, Command::EndTick, &mut events)?;
    }
    Ok(events)
}

#[test]
fn going_up_lands_on_first_previous_door_in_row_major_order() {
    let mut game = game(&[FIRST, SECOND], 2);
    let events = walk(&mut game, &[Direction::East, Direction::East]).expect("walks");

    assert!(events.contains(&Event::WorldChanged {
        from: WorldIndex::new(0),
        to: WorldIndex::new(1),
        spawn: Position::new(2, 1),
    }));
    assert_eq!(query::current_index(&game), WorldIndex::new(1));
    assert_eq!(query::player(&game).position(), Position::new(2, 1));
    assert!(query::current_world(&game).is_changed());
}

#[test]
fn going_down_returns_to_the_next_door() {
    let mut game = game(&[FIRST, SECOND], 2);
    let _ = walk(&mut game, &[Direction::East, Direction::East]).expect("walks up");

    let _ = walk(&mut game, &[Direction::South, Direction::North]).expect("walks back");
    assert_eq!(query::current_index(&game), WorldIndex::new(0));
    assert_eq!(query::player(&game).position(), Position::new(3, 1));
}

#[test]
fn transitions_are_reproducible() {
    let route = [
        Direction::East,
        Direction::East,
        Direction::South,
        Direction::South,
        Direction::West,
        Direction::East,
    ];
    let first = walk(&mut game(&[FIRST, SECOND], 2), &route).expect("walks");
    let second = walk(&mut game(&[FIRST, SECOND], 2), &route).expect("walks");
    assert_eq!(first, second);
}

#[test]
fn door_on_last_level_is_a_no_op() {
    let mut game = game(&[FIRST, SECOND], 1);
    let events = walk(&mut game, &[Direction::East, Direction::East]).expect("walks");

    assert!(events.contains(&Event::TransitionRequested { going_up: true }));
    assert!(!events
        .iter()
        .any(|event| matches!(event, Event::WorldChanged { .. })));
    assert_eq!(query::current_index(&game), WorldIndex::new(0));
    assert_eq!(query::max_worlds_reached(&game), 1);
}

#[test]
fn missing_next_level_fails_the_tick() {
    let mut game = game(&[FIRST], 2);
    let error = walk(&mut game, &[Direction::East, Direction::East]).expect_err("level missing");
    assert!(matches!(error, LevelError::NotFound { .. }));
}

#[test]
fn revisited_world_keeps_its_state() {
    let with_box = "\
SSSSSS
SVB__S
S____S
SSSSSS";
    let mut game = game(&[FIRST, with_box], 2);
    let _ = walk(&mut game, &[Direction::East, Direction::East, Direction::East])
        .expect("walks and pushes");
    assert_eq!(query::player(&game).position(), Position::new(2, 1));
    let _ = walk(&mut game, &[Direction::West]).expect("walks back down");
    assert_eq!(query::current_index(&game), WorldIndex::new(0));

    let second = query::world(&game, WorldIndex::new(1)).expect("second world kept");
    assert_eq!(second.get(Position::new(2, 1)), Ok(None));
    assert!(second.get(Position::new(3, 1)).expect("inside").is_some());
}
