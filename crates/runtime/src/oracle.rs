//! Content-backed collaborator implementations.

use std::collections::HashMap;

use emberveil_content::ContentFactory;
use emberveil_core::{ItemDefinition, ItemId, ItemOracle, SceneId, WorldState};

use crate::error::{Result, RuntimeError};

/// [`ItemOracle`] over a loaded item catalog.
#[derive(Debug, Default)]
pub struct CatalogOracle {
    definitions: HashMap<ItemId, ItemDefinition>,
}

impl CatalogOracle {
    pub fn new(definitions: Vec<ItemDefinition>) -> Self {
        Self {
            definitions: definitions
                .into_iter()
                .map(|def| (def.id, def))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl ItemOracle for CatalogOracle {
    fn definition(&self, id: ItemId) -> Option<ItemDefinition> {
        self.definitions.get(&id).cloned()
    }

    fn all_definitions(&self) -> Vec<ItemDefinition> {
        self.definitions.values().cloned().collect()
    }
}

/// Provides destination worlds for scene transitions.
///
/// Loading is poll-based: `begin_load` starts a load, `poll` reports
/// `None` while in flight and the built world once ready. A load may take
/// any number of ticks; the transition sequence waits in `Loading` mode.
pub trait SceneSource {
    fn begin_load(&mut self, scene: &SceneId) -> Result<()>;
    fn poll(&mut self) -> Option<Result<WorldState>>;
}

/// [`SceneSource`] that builds worlds from a content data directory.
/// Loads resolve on the tick after they start.
pub struct ContentSceneSource {
    factory: ContentFactory,
    pending: Option<SceneId>,
}

impl ContentSceneSource {
    pub fn new(factory: ContentFactory) -> Self {
        Self {
            factory,
            pending: None,
        }
    }
}

impl SceneSource for ContentSceneSource {
    fn begin_load(&mut self, scene: &SceneId) -> Result<()> {
        self.pending = Some(scene.clone());
        Ok(())
    }

    fn poll(&mut self) -> Option<Result<WorldState>> {
        let scene = self.pending.take()?;
        Some(
            self.factory
                .load_scene(scene.as_str())
                .map_err(RuntimeError::ContentLoad),
        )
    }
}

/// [`SceneSource`] over pre-built worlds, for embedders that assemble
/// scenes in code.
#[derive(Default)]
pub struct StaticSceneSource {
    scenes: HashMap<SceneId, Box<dyn Fn() -> WorldState>>,
    pending: Option<SceneId>,
}

impl StaticSceneSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a builder for the named scene.
    pub fn insert(
        &mut self,
        scene: impl Into<SceneId>,
        build: impl Fn() -> WorldState + 'static,
    ) {
        self.scenes.insert(scene.into(), Box::new(build));
    }
}

impl SceneSource for StaticSceneSource {
    fn begin_load(&mut self, scene: &SceneId) -> Result<()> {
        if !self.scenes.contains_key(scene) {
            return Err(RuntimeError::SceneNotFound(scene.clone()));
        }
        self.pending = Some(scene.clone());
        Ok(())
    }

    fn poll(&mut self) -> Option<Result<WorldState>> {
        let scene = self.pending.take()?;
        let build = self.scenes.get(&scene)?;
        Some(Ok(build()))
    }
}
