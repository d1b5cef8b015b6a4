#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Blast propagation system that turns fused bombs into detonation commands.

use tile_bomber_core::{Command, DecorRules, DecorView, Direction, Event, Position, WorldIndex};

/// Pure system that computes blast zones for bombs reaching their explosion phase.
#[derive(Debug, Default)]
pub struct Explosion;

impl Explosion {
    /// Creates a new explosion system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Emits one [`Command::Detonate`] per [`Event::BombFused`] in the batch.
    ///
    /// Every zone is computed from the grids as they are when the batch is
    /// handled, so bombs fusing on the same tick do not see each other's
    /// clearings.
    pub fn handle<'a, G>(&mut self, events: &[Event], grids: G, out: &mut Vec<Command>)
    where
        G: Fn(WorldIndex) -> Option<DecorView<'a>>,
    {
        for event in events {
            let Event::BombFused {
                world,
                bomb,
                origin,
                range,
            } = event
            else {
                continue;
            };
            let zone = match grids(*world) {
                Some(view) => blast_zone(*origin, *range, &view),
                None => vec![*origin],
            };
            out.push(Command::Detonate {
                world: *world,
                bomb: *bomb,
                zone,
            });
        }
    }
}

/// Cells reached by a blast of `range` cells centred on `origin`.
///
/// The origin always belongs to the zone. Each arm stops before a cell whose
/// decor blocks blasts, and stops on (including) the first destructible decor.
#[must_use]
pub fn blast_zone(origin: Position, range: u32, view: &DecorView<'_>) -> Vec<Position> {
    let mut zone = vec![origin];
    for direction in Direction::ALL {
        let mut position = origin;
        for _ in 0..range {
            position = direction.next_position(position);
            if !view.contains(position) {
                break;
            }
            match view.decor(position) {
                Some(decor) if decor.blocks_blast() => break,
                Some(decor) if decor.is_destructible() => {
                    zone.push(position);
                    break;
                }
                _ => zone.push(position),
            }
        }
    }
    zone
}

#[cfg(test)]
mod tests {
    use tile_bomber_core::{BombId, Decor, Dimension, Door, DoorSide, WallKind};

    use super::*;

    fn grid(width: u32, height: u32, decor: &[(i32, i32, Decor)]) -> Vec<Option<Decor>> {
        let dimension = Dimension::new(width, height);
        let mut cells = vec![None; dimension.cell_count()];
        for &(x, y, item) in decor {
            if let Some(index) = dimension.index(Position::new(x, y)) {
                cells[index] = Some(item);
            }
        }
        cells
    }

    fn sorted(mut zone: Vec<Position>) -> Vec<Position> {
        zone.sort();
        zone
    }

    #[test]
    fn zero_range_covers_only_the_origin() {
        let cells = grid(3, 3, &[]);
        let view = DecorView::new(&cells, Dimension::new(3, 3));
        assert_eq!(blast_zone(Position::new(1, 1), 0, &view), vec![Position::new(1, 1)]);
    }

    #[test]
    fn walls_and_closed_doors_stop_the_ray_and_are_spared() {
        let cells = grid(
            5,
            5,
            &[
                (3, 2, Decor::Wall(WallKind::Tree)),
                (2, 1, Decor::Door(Door::closed(DoorSide::Next))),
            ],
        );
        let view = DecorView::new(&cells, Dimension::new(5, 5));
        let zone = sorted(blast_zone(Position::new(2, 2), 2, &view));
        assert_eq!(
            zone,
            sorted(vec![
                Position::new(2, 2),
                Position::new(1, 2),
                Position::new(0, 2),
                Position::new(2, 3),
                Position::new(2, 4),
            ])
        );
    }

    #[test]
    fn destructible_decor_is_hit_and_stops_the_ray() {
        let cells = grid(5, 1, &[(1, 0, Decor::Box)]);
        let view = DecorView::new(&cells, Dimension::new(5, 1));
        let zone = sorted(blast_zone(Position::new(0, 0), 4, &view));
        assert_eq!(zone, vec![Position::new(0, 0), Position::new(1, 0)]);
    }

    #[test]
    fn open_doors_and_keys_let_the_ray_through() {
        let keys = Decor::Bonus(tile_bomber_core::BonusKind::Key);
        let cells = grid(
            4,
            1,
            &[(1, 0, Decor::Door(Door::open(DoorSide::Previous))), (2, 0, keys)],
        );
        let view = DecorView::new(&cells, Dimension::new(4, 1));
        let zone = sorted(blast_zone(Position::new(0, 0), 3, &view));
        assert_eq!(zone.len(), 4);
    }

    #[test]
    fn emits_detonation_for_each_fused_bomb() {
        let cells = grid(3, 3, &[]);
        let dimension = Dimension::new(3, 3);
        let events = vec![
            Event::TimeAdvanced {
                now: std::time::Duration::from_secs(5),
            },
            Event::BombFused {
                world: WorldIndex::new(0),
                bomb: BombId::new(4),
                origin: Position::new(0, 0),
                range: 1,
            },
        ];
        let mut out = Vec::new();
        Explosion::new().handle(
            &events,
            |_| Some(DecorView::new(&cells, dimension)),
            &mut out,
        );
        assert_eq!(out.len(), 1);
        let Command::Detonate { world, bomb, zone } = &out[0] else {
            panic!("expected a detonation, got {:?}", out[0]);
        };
        assert_eq!(*world, WorldIndex::new(0));
        assert_eq!(*bomb, BombId::new(4));
        assert_eq!(
            sorted(zone.clone()),
            sorted(vec![Position::new(0, 0), Position::new(1, 0), Position::new(0, 1)])
        );
    }
}
