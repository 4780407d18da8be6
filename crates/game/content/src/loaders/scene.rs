//! Scene layout loader and world builder.
//!
//! A scene file lists spawn points and interactable placements. Switches
//! reference the doors they drive by entity *name*; the builder resolves
//! names to entity ids after every placement has been spawned.

use std::collections::HashMap;
use std::path::Path;

use emberveil_core::interact::kinds::{
    DoorState, ExaminableState, ForgeState, InteractableKind, LiftableState, NpcState, PickupState,
    SwitchState,
};
use emberveil_core::{
    DialogueLine, EntityId, Facing, ItemId, LayerMask, SceneId, SpawnPoint, Vec2, WorldState,
};
use serde::{Deserialize, Serialize};

use crate::loaders::companions::{abilities_from_specs, AbilitySpec};
use crate::loaders::{read_file, LoadResult};

fn default_true() -> bool {
    true
}

fn default_quantity() -> u16 {
    1
}

fn default_radius() -> f32 {
    0.5
}

/// Spawn point entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnPointSpec {
    pub id: String,
    pub position: Vec2,
    #[serde(default)]
    pub facing: Facing,
}

/// One line of scripted dialogue in a scene file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineSpec {
    pub speaker: String,
    pub text: String,
    #[serde(default)]
    pub portrait: Option<String>,
}

/// Kind-specific data for an interactable placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum InteractableKindSpec {
    Door {
        #[serde(default)]
        locked: bool,
        #[serde(default)]
        key_item: Option<ItemId>,
        #[serde(default = "default_true")]
        consume_key: bool,
        #[serde(default)]
        locked_message: Option<String>,
        #[serde(default)]
        exit: Option<ExitSpec>,
    },
    Switch {
        #[serde(default)]
        one_way: bool,
        #[serde(default)]
        linked_doors: Vec<String>,
    },
    Pickup {
        item: ItemId,
        #[serde(default = "default_quantity")]
        quantity: u16,
    },
    Liftable {
        #[serde(default)]
        requires: Vec<AbilitySpec>,
    },
    Examinable {
        text: String,
        #[serde(default)]
        text_after_first: Option<String>,
    },
    Npc {
        #[serde(default)]
        portrait: Option<String>,
        #[serde(default)]
        lines: Vec<LineSpec>,
        #[serde(default = "default_true")]
        freeze_player: bool,
        #[serde(default)]
        recruits: Option<String>,
    },
    Forge {
        #[serde(default)]
        recipes: Vec<ItemId>,
    },
}

/// Scene exit behind a door.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExitSpec {
    pub scene: String,
    pub spawn_point: String,
}

/// One interactable placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractableSpec {
    pub name: String,
    pub position: Vec2,
    #[serde(default = "default_radius")]
    pub radius: f32,
    pub kind: InteractableKindSpec,
}

/// Scene file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSpec {
    pub name: String,
    #[serde(default)]
    pub spawn_points: Vec<SpawnPointSpec>,
    #[serde(default)]
    pub interactables: Vec<InteractableSpec>,
}

impl SceneSpec {
    /// Instantiates the world this scene describes.
    ///
    /// Spawns every placement, then resolves switch door links by name.
    /// Unknown door names are an error; shipping a scene that silently
    /// drops links would strand its puzzles.
    pub fn build_world(&self) -> LoadResult<WorldState> {
        let mut world = WorldState::new(SceneId::new(self.name.clone()));

        for spawn in &self.spawn_points {
            world.spawn_points.push(SpawnPoint {
                id: spawn.id.clone(),
                position: spawn.position,
                facing: spawn.facing,
            });
        }

        let mut ids_by_name: HashMap<&str, EntityId> = HashMap::new();
        let mut pending_links: Vec<(EntityId, Vec<String>)> = Vec::new();

        for spec in &self.interactables {
            let kind = match &spec.kind {
                InteractableKindSpec::Door {
                    locked,
                    key_item,
                    consume_key,
                    locked_message,
                    exit,
                } => {
                    let mut door = DoorState::new();
                    door.locked = *locked;
                    door.key_item = *key_item;
                    door.consume_key = *consume_key;
                    if let Some(message) = locked_message {
                        door.locked_message = message.clone();
                    }
                    if let Some(exit) = exit {
                        door = door.with_exit(exit.scene.as_str(), exit.spawn_point.clone());
                    }
                    InteractableKind::Door(door)
                }
                InteractableKindSpec::Switch { one_way, .. } => {
                    let switch = if *one_way {
                        SwitchState::one_way()
                    } else {
                        SwitchState::new()
                    };
                    InteractableKind::Switch(switch)
                }
                InteractableKindSpec::Pickup { item, quantity } => {
                    InteractableKind::Pickup(PickupState::new(*item, *quantity))
                }
                InteractableKindSpec::Liftable { requires } => {
                    let liftable = if requires.is_empty() {
                        LiftableState::new()
                    } else {
                        LiftableState::heavy(abilities_from_specs(requires))
                    };
                    InteractableKind::Liftable(liftable)
                }
                InteractableKindSpec::Examinable {
                    text,
                    text_after_first,
                } => {
                    let mut examinable = ExaminableState::new(text.clone());
                    examinable.text_after_first = text_after_first.clone();
                    InteractableKind::Examinable(examinable)
                }
                InteractableKindSpec::Npc {
                    portrait,
                    lines,
                    freeze_player,
                    recruits,
                } => {
                    let lines = lines
                        .iter()
                        .map(|line| {
                            let mut out = DialogueLine::new(line.speaker.clone(), line.text.clone());
                            out.portrait = line.portrait.clone();
                            out
                        })
                        .collect();
                    let mut npc = NpcState::new(lines);
                    npc.portrait = portrait.clone();
                    npc.freeze_player = *freeze_player;
                    npc.recruits = recruits.as_deref().map(Into::into);
                    InteractableKind::Npc(npc)
                }
                InteractableKindSpec::Forge { recipes } => {
                    InteractableKind::Forge(ForgeState::new(recipes.clone()))
                }
            };

            let id = world
                .spawn(spec.name.clone(), spec.position, kind)
                .map_err(|e| anyhow::anyhow!("Scene '{}': {}", self.name, e))?;

            if let Some(entity) = world.interactable_mut(id) {
                entity.radius = spec.radius;
                // Closed doors block movement until opened.
                if let InteractableKind::Door(door) = &entity.kind {
                    if !door.open {
                        entity.layer = LayerMask::INTERACTABLE | LayerMask::BLOCKING;
                    }
                }
            }
            ids_by_name.entry(spec.name.as_str()).or_insert(id);

            if let InteractableKindSpec::Switch { linked_doors, .. } = &spec.kind {
                pending_links.push((id, linked_doors.clone()));
            }
        }

        for (switch_id, door_names) in pending_links {
            let mut linked = Vec::with_capacity(door_names.len());
            for name in &door_names {
                let door_id = ids_by_name.get(name.as_str()).copied().ok_or_else(|| {
                    anyhow::anyhow!("Scene '{}': switch links unknown door '{}'", self.name, name)
                })?;
                linked.push(door_id);
            }
            if let Some(entity) = world.interactable_mut(switch_id) {
                if let InteractableKind::Switch(switch) = &mut entity.kind {
                    switch.linked_doors = linked;
                }
            }
        }

        Ok(world)
    }
}

/// Loader for scene layouts from RON files.
pub struct SceneLoader;

impl SceneLoader {
    pub fn load(path: &Path) -> LoadResult<SceneSpec> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<SceneSpec> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse scene RON: {}", e))
    }
}
