//! Content factory for loading a game's data directory.

use std::path::{Path, PathBuf};

use emberveil_core::{GameConfig, ItemDefinition, WorldState};

use crate::loaders::{
    CompanionLoader, CompanionSpec, ConfigLoader, ItemLoader, LoadResult, SceneLoader,
};

/// Loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── items.ron
/// ├── companions.ron
/// └── scenes/
///     ├── mountain_cave.ron
///     └── overworld.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load the item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<Vec<ItemDefinition>> {
        ItemLoader::load(&self.data_dir.join("items.ron"))
    }

    /// Load the companion roster from `companions.ron`.
    pub fn load_companions(&self) -> LoadResult<Vec<CompanionSpec>> {
        CompanionLoader::load(&self.data_dir.join("companions.ron"))
    }

    /// Load and build the named scene from `scenes/<name>.ron`.
    pub fn load_scene(&self, name: &str) -> LoadResult<WorldState> {
        let path = self.data_dir.join("scenes").join(format!("{name}.ron"));
        let spec = SceneLoader::load(&path)?;
        spec.build_world()
    }
}
