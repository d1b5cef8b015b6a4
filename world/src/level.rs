//! Level definitions and the sources they are read from.

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

use tile_bomber_core::{Dimension, Position, WorldEntity, WorldIndex};

use crate::error::{LevelError, MalformedReason};

/// Parsed contents of a level file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelLayout {
    dimension: Dimension,
    entities: Vec<WorldEntity>,
}

impl LevelLayout {
    /// Parses a rectangular grid of level codes, one line per row.
    ///
    /// Rows are checked for a consistent width before any symbol is decoded.
    pub fn parse(text: &str) -> Result<Self, MalformedReason> {
        let rows: Vec<&str> = text.lines().collect();
        if rows.iter().all(|row| row.is_empty()) {
            return Err(MalformedReason::Empty);
        }

        let width = rows.first().map_or(0, |row| row.chars().count());
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(MalformedReason::InconsistentWidth {
                    row,
                    expected: width,
                    found,
                });
            }
        }

        let mut entities = Vec::with_capacity(width * rows.len());
        for (y, line) in rows.iter().enumerate() {
            for (x, symbol) in line.chars().enumerate() {
                let entity = WorldEntity::from_code(symbol)
                    .ok_or(MalformedReason::UnknownSymbol { symbol, x, y })?;
                entities.push(entity);
            }
        }

        let dimension = Dimension::new(
            u32::try_from(width).map_err(|_| MalformedReason::Empty)?,
            u32::try_from(rows.len()).map_err(|_| MalformedReason::Empty)?,
        );
        Ok(Self {
            dimension,
            entities,
        })
    }

    /// Dimension of the level.
    #[must_use]
    pub const fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Entity at the position, if it lies inside the level.
    #[must_use]
    pub fn entity(&self, position: Position) -> Option<WorldEntity> {
        self.dimension
            .index(position)
            .and_then(|index| self.entities.get(index).copied())
    }

    /// Iterates every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (Position, WorldEntity)> + '_ {
        self.dimension.positions().zip(self.entities.iter().copied())
    }

    /// First player start marker in row-major order.
    #[must_use]
    pub fn player_start(&self) -> Option<Position> {
        self.cells()
            .find(|(_, entity)| *entity == WorldEntity::Player)
            .map(|(position, _)| position)
    }

    /// Every monster spawn marker in row-major order.
    #[must_use]
    pub fn monster_spawns(&self) -> Vec<Position> {
        self.cells()
            .filter(|(_, entity)| *entity == WorldEntity::Monster)
            .map(|(position, _)| position)
            .collect()
    }
}

/// Supplies level layouts on demand.
pub trait LevelSource: fmt::Debug {
    /// Loads the layout of the level at the provided index.
    fn load(&self, level: WorldIndex) -> Result<LevelLayout, LevelError>;
}

/// Reads levels named `<prefix><number>.txt` from a directory.
#[derive(Clone, Debug)]
pub struct FileLevelSource {
    directory: PathBuf,
    prefix: String,
}

impl FileLevelSource {
    /// Creates a source rooted at `directory` using the provided file name prefix.
    #[must_use]
    pub fn new(directory: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            prefix: prefix.into(),
        }
    }

    /// Directory the level files are resolved under.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Path of the file holding the level at the provided index.
    #[must_use]
    pub fn path_for(&self, level: WorldIndex) -> PathBuf {
        self.directory
            .join(format!("{}{}.txt", self.prefix, level.level_number()))
    }
}

impl LevelSource for FileLevelSource {
    fn load(&self, level: WorldIndex) -> Result<LevelLayout, LevelError> {
        let path = self.path_for(level);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                return Err(LevelError::NotFound { path });
            }
            Err(source) => return Err(LevelError::Io { path, source }),
        };
        LevelLayout::parse(&text).map_err(|reason| LevelError::Malformed {
            level: level.level_number(),
            reason,
        })
    }
}

/// Levels held in memory, indexed from zero.
#[derive(Clone, Debug, Default)]
pub struct StaticLevels {
    levels: Vec<String>,
}

impl StaticLevels {
    /// Creates a source from level texts ordered by level number.
    #[must_use]
    pub fn new<I, S>(levels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            levels: levels.into_iter().map(Into::into).collect(),
        }
    }

    /// Number of levels held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Whether no level is held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

impl LevelSource for StaticLevels {
    fn load(&self, level: WorldIndex) -> Result<LevelLayout, LevelError> {
        let text = self
            .levels
            .get(level.get())
            .ok_or_else(|| LevelError::NotFound {
                path: PathBuf::from(format!("<memory>/{}", level.level_number())),
            })?;
        LevelLayout::parse(text).map_err(|reason| LevelError::Malformed {
            level: level.level_number(),
            reason,
        })
    }
}
