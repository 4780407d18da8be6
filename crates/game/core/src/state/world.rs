use std::fmt;

use bounded_vector::BoundedVec;

use crate::config::GameConfig;
use crate::env::{ItemOracle, LayerMask};
use crate::interact::kinds::InteractableKind;
use crate::interact::InteractionKind;
use crate::math::{Facing, Vec2};

/// Unique identifier for an interactable entity within a scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Named scene identifier.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneId(String);

impl SceneId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SceneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SceneId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Marks where the player appears after a scene transition.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnPoint {
    pub id: String,
    pub position: Vec2,
    pub facing: Facing,
}

/// An entity the gloves can target.
///
/// Shared attributes live here; kind-specific state lives in the
/// [`InteractableKind`] variant.
#[derive(Clone, Debug)]
pub struct Interactable {
    pub id: EntityId,
    pub name: String,
    pub position: Vec2,
    /// Collider radius used by world queries.
    pub radius: f32,
    pub layer: LayerMask,
    /// Master switch; a disabled entity ignores interaction attempts.
    pub interactable: bool,
    /// Whether the presentation layer should tint this entity while hovered.
    pub highlight_on_hover: bool,
    /// Currently targeted by the gloves. Maintained by the dispatcher.
    pub hovered: bool,
    /// Disabled colliders are invisible to world queries (carried objects,
    /// collected pickups mid-despawn).
    pub collider_enabled: bool,
    pub kind: InteractableKind,
}

impl Interactable {
    /// The interaction verb this entity currently offers.
    pub fn interaction(&self) -> InteractionKind {
        self.kind.interaction()
    }

    /// Prompt text for the targeting UI, derived from current kind state.
    pub fn prompt(&self, items: Option<&dyn ItemOracle>) -> String {
        self.kind.prompt(&self.name, items)
    }
}

/// Errors raised by world mutation helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    #[error("scene interactable limit reached")]
    TooManyInteractables,
}

/// Per-scene world contents: interactable entities and spawn points.
#[derive(Debug)]
pub struct WorldState {
    pub scene: SceneId,
    /// Sequential entity ID allocator (monotonically increasing, never reused).
    next_entity_id: u32,
    interactables: BoundedVec<Interactable, 0, { GameConfig::MAX_INTERACTABLES }>,
    pub spawn_points: Vec<SpawnPoint>,
}

impl WorldState {
    pub fn new(scene: SceneId) -> Self {
        Self {
            scene,
            next_entity_id: 1,
            interactables: BoundedVec::default(),
            spawn_points: Vec::new(),
        }
    }

    /// Adds an interactable, allocating its entity id.
    pub fn spawn(
        &mut self,
        name: impl Into<String>,
        position: Vec2,
        kind: InteractableKind,
    ) -> Result<EntityId, WorldError> {
        let id = EntityId(self.next_entity_id);
        self.next_entity_id += 1;

        let entity = Interactable {
            id,
            name: name.into(),
            position,
            radius: 0.5,
            layer: LayerMask::INTERACTABLE,
            interactable: true,
            highlight_on_hover: true,
            hovered: false,
            collider_enabled: true,
            kind,
        };
        self.interactables
            .push(entity)
            .map_err(|_| WorldError::TooManyInteractables)?;
        Ok(id)
    }

    pub fn interactable(&self, id: EntityId) -> Option<&Interactable> {
        self.interactables.iter().find(|entity| entity.id == id)
    }

    pub fn interactable_mut(&mut self, id: EntityId) -> Option<&mut Interactable> {
        self.interactables.iter_mut().find(|entity| entity.id == id)
    }

    /// Removes an entity from the scene (collected pickups). Returns whether
    /// anything was removed.
    pub fn despawn(&mut self, id: EntityId) -> bool {
        let index = self.interactables.iter().position(|entity| entity.id == id);
        match index {
            Some(index) => {
                let _ = self.interactables.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Interactable> {
        self.interactables.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Interactable> {
        self.interactables.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.interactables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interactables.is_empty()
    }

    /// Finds the spawn point with the given id.
    pub fn spawn_point(&self, id: &str) -> Option<&SpawnPoint> {
        self.spawn_points.iter().find(|sp| sp.id == id)
    }
}
