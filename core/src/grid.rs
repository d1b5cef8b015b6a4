//! Coordinate primitives shared by every layer of the engine.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Location of a single grid cell expressed as column and row coordinates.
///
/// Coordinates are signed so that stepping off the edge of a world produces a
/// representable position that bounds checks can reject.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    x: i32,
    y: i32,
}

impl Position {
    /// Creates a new grid position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Zero-based column of the cell.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Zero-based row of the cell.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns the position displaced by the provided deltas.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    /// Number of steps along a single axis separating two positions, or `None`
    /// when they do not share a row or column.
    #[must_use]
    pub fn axis_distance(self, other: Position) -> Option<u32> {
        if self.x == other.x {
            Some(self.y.abs_diff(other.y))
        } else if self.y == other.y {
            Some(self.x.abs_diff(other.x))
        } else {
            None
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Cardinal directions available to every moving entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Every direction in a fixed order.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Unit delta applied to a position when stepping in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    /// Position reached by taking one step from `position`.
    #[must_use]
    pub const fn next_position(self, position: Position) -> Position {
        let (dx, dy) = self.delta();
        position.offset(dx, dy)
    }
}

/// Width and height of a world measured in cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    width: u32,
    height: u32,
}

impl Dimension {
    /// Creates a new dimension descriptor.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells covered by the dimension.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        let cells = u64::from(self.width) * u64::from(self.height);
        usize::try_from(cells).unwrap_or(usize::MAX)
    }

    /// Reports whether the position lies within `0..width` and `0..height`.
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        let column = u32::try_from(position.x()).map_or(false, |x| x < self.width);
        let row = u32::try_from(position.y()).map_or(false, |y| y < self.height);
        column && row
    }

    /// Dense row-major index of an in-bounds position.
    #[must_use]
    pub fn index(&self, position: Position) -> Option<usize> {
        if !self.contains(position) {
            return None;
        }
        let row = usize::try_from(position.y()).ok()?;
        let column = usize::try_from(position.x()).ok()?;
        let width = usize::try_from(self.width).ok()?;
        Some(row * width + column)
    }

    /// Position stored at a dense row-major index.
    #[must_use]
    pub fn position_at(&self, index: usize) -> Option<Position> {
        let width = usize::try_from(self.width).ok()?;
        if width == 0 || index >= self.cell_count() {
            return None;
        }
        let x = i32::try_from(index % width).ok()?;
        let y = i32::try_from(index / width).ok()?;
        Some(Position::new(x, y))
    }

    /// Pulls the position inside the dimension, preserving it when already inside.
    #[must_use]
    pub fn clamp(&self, position: Position) -> Position {
        let max_x = i32::try_from(self.width.saturating_sub(1)).unwrap_or(i32::MAX);
        let max_y = i32::try_from(self.height.saturating_sub(1)).unwrap_or(i32::MAX);
        Position::new(position.x().clamp(0, max_x), position.y().clamp(0, max_y))
    }

    /// Iterates every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let dimension = *self;
        (0..dimension.cell_count()).filter_map(move |index| dimension.position_at(index))
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
