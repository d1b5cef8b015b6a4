//! Error types raised by the authoritative game state.

use std::{io, path::PathBuf};

use thiserror::Error;
use tile_bomber_core::{Dimension, Position};

/// Failures raised when addressing a world grid.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum GridError {
    /// The position lies outside the world's dimension.
    #[error("position {position} lies outside the {dimension} world")]
    OutOfBounds {
        /// Position that was addressed.
        position: Position,
        /// Dimension of the world.
        dimension: Dimension,
    },
}

/// Specific defect found while parsing a level file.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MalformedReason {
    /// The file contains no cells.
    #[error("the level contains no rows")]
    Empty,
    /// A row differs in length from the first row.
    #[error("row {row} is {found} cells wide, expected {expected}")]
    InconsistentWidth {
        /// Zero-based row index.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// A character does not belong to the code table.
    #[error("unknown symbol '{symbol}' at column {x}, row {y}")]
    UnknownSymbol {
        /// Offending character.
        symbol: char,
        /// Zero-based column.
        x: usize,
        /// Zero-based row.
        y: usize,
    },
    /// The first level does not say where the player starts.
    #[error("no player start ('P') was found")]
    MissingPlayerStart,
}

/// Failures raised while loading level definitions.
#[derive(Debug, Error)]
pub enum LevelError {
    /// The level file exists but its contents are invalid.
    #[error("level {level} is malformed: {reason}")]
    Malformed {
        /// One-based level number.
        level: usize,
        /// Specific defect.
        reason: MalformedReason,
    },
    /// The level file does not exist.
    #[error("level file {} not found", .path.display())]
    NotFound {
        /// Path that was attempted.
        path: PathBuf,
    },
    /// The level file could not be read.
    #[error("could not read level file {}", .path.display())]
    Io {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

/// Failures raised while switching between worlds.
#[derive(Debug, Error)]
pub enum TransitionError {
    /// A transition down was requested from the first world.
    #[error("there is no world before the first one")]
    NoPreviousWorld,
    /// The next world could not be loaded.
    #[error(transparent)]
    Load(#[from] LevelError),
}
