//! Content factory for assembling everything an encounter runtime needs.

use std::path::{Path, PathBuf};

use overload_core::{ActionCatalog, OverloadConfig, UnitSpec};

use crate::loaders::{
    ActionLoader, ConfigLoader, EncounterLoader, LoadResult, PlayerLoader, PlayerSpec,
};

const CONFIG_TOML: &str = include_str!("../../data/config.toml");
const PLAYER_RON: &str = include_str!("../../data/player.ron");
const ENCOUNTER_RON: &str = include_str!("../../data/encounter.ron");

/// All loaded content, ready to hand to the runtime.
#[derive(Debug, Clone)]
pub struct ContentBundle {
    pub config: OverloadConfig,
    pub catalog: ActionCatalog,
    pub player: PlayerSpec,
    pub roster: Vec<UnitSpec>,
}

/// Content factory that loads content from a data directory or from the
/// copies embedded in the binary.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── player.ron
/// ├── encounter.ron
/// └── actions/
///     ├── attack.ron
///     ├── imbue.ron
///     ├── items.ron
///     └── menu.ron
/// ```
///
/// A file missing from the directory falls back to its embedded copy. The
/// `actions/` directory replaces the embedded catalog as a whole.
#[derive(Debug, Clone, Default)]
pub struct ContentFactory {
    data_dir: Option<PathBuf>,
}

impl ContentFactory {
    /// Creates a content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: Some(data_dir.into()),
        }
    }

    /// Creates a content factory that only uses embedded data.
    pub fn embedded() -> Self {
        Self::default()
    }

    pub fn data_dir(&self) -> Option<&Path> {
        self.data_dir.as_deref()
    }

    /// Load overload configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<OverloadConfig> {
        match self.existing("config.toml") {
            Some(path) => ConfigLoader::load(&path),
            None => ConfigLoader::parse(CONFIG_TOML, "embedded config.toml"),
        }
    }

    /// Load the action catalog from `actions/`.
    pub fn load_catalog(&self) -> LoadResult<ActionCatalog> {
        match self.existing("actions") {
            Some(dir) => ActionLoader::load_dir(&dir),
            None => ActionLoader::embedded(),
        }
    }

    /// Load the player loadout from `player.ron`.
    pub fn load_player(&self) -> LoadResult<PlayerSpec> {
        match self.existing("player.ron") {
            Some(path) => PlayerLoader::load(&path),
            None => PlayerLoader::parse(PLAYER_RON, "embedded player.ron"),
        }
    }

    /// Load the encounter roster from `encounter.ron`.
    pub fn load_roster(&self) -> LoadResult<Vec<UnitSpec>> {
        match self.existing("encounter.ron") {
            Some(path) => EncounterLoader::load(&path),
            None => EncounterLoader::parse(ENCOUNTER_RON, "embedded encounter.ron"),
        }
    }

    /// Load every content file.
    pub fn load_all(&self) -> LoadResult<ContentBundle> {
        Ok(ContentBundle {
            config: self.load_config()?,
            catalog: self.load_catalog()?,
            player: self.load_player()?,
            roster: self.load_roster()?,
        })
    }

    fn existing(&self, name: &str) -> Option<PathBuf> {
        self.data_dir
            .as_ref()
            .map(|dir| dir.join(name))
            .filter(|path| path.exists())
    }
}
