//! Session configuration loaded from TOML.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tile_bomber_world::Rules;

const DEFAULT_SEED: u64 = 0x7ab1_e5b0_0b1e_5eed;

/// Failures raised while reading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("could not read configuration file {}", .path.display())]
    Read {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The file is not valid TOML or holds values of the wrong type.
    #[error("invalid configuration file {}", .path.display())]
    Parse {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying parse failure.
        #[source]
        source: toml::de::Error,
    },
}

/// Where level files are found and how many levels the session has.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelsConfig {
    /// Directory holding the level files.
    pub directory: PathBuf,
    /// File name prefix; level `n` is read from `<prefix><n>.txt`.
    pub prefix: String,
    /// Number of levels in the session.
    pub count: usize,
}

impl Default for LevelsConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("worlds"),
            prefix: String::from("level"),
            count: 3,
        }
    }
}

/// Complete configuration of a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Level file location.
    pub levels: LevelsConfig,
    /// Gameplay rules.
    pub rules: Rules,
    /// Seed of the session random number generator.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            levels: LevelsConfig::default(),
            rules: Rules::default(),
            seed: DEFAULT_SEED,
        }
    }
}

impl GameConfig {
    /// Parses a configuration from TOML text. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Reads a configuration file.
    ///
    /// A relative level directory is resolved against the directory holding
    /// the configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if config.levels.directory.is_relative() {
            if let Some(parent) = path.parent() {
                config.levels.directory = parent.join(&config.levels.directory);
            }
        }
        Ok(config)
    }
}
