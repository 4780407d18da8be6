//! Content loaders for reading game data from files.
//!
//! Loaders convert RON/TOML files into core state and oracle inputs. Spec
//! types mirror the file formats; mapping onto core types happens here so
//! the core never needs to know about file layouts.

pub mod companions;
pub mod config;
pub mod factory;
pub mod item;
pub mod scene;

pub use companions::{AbilitySpec, CompanionLoader, CompanionSpec};
pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use item::ItemLoader;
pub use scene::{InteractableKindSpec, InteractableSpec, SceneLoader, SceneSpec, SpawnPointSpec};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
