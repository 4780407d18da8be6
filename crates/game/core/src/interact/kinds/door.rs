use crate::env::{GameEnv, ItemId, ItemOracle, LayerMask};
use crate::events::{EventSink, GameEvent};
use crate::interact::kinds::InteractableKind;
use crate::interact::{InteractError, InteractOutcome};
use crate::scene::TransitionRequest;
use crate::state::{EntityId, GameState, SceneId};

/// Destination behind a door that leads to another scene.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SceneExit {
    pub scene: SceneId,
    pub spawn_point: String,
}

/// A door that can be opened, closed, and optionally locked.
///
/// A locked door may require a key item; interacting while locked attempts
/// the unlock (and does not open the door; that takes a second use).
#[derive(Clone, Debug)]
pub struct DoorState {
    pub open: bool,
    pub locked: bool,
    /// Item required to unlock, if the lock is keyed.
    pub key_item: Option<ItemId>,
    /// Whether the key is consumed on use.
    pub consume_key: bool,
    /// Message shown when the door refuses to open.
    pub locked_message: String,
    /// Scene transition triggered when the door opens.
    pub exit: Option<SceneExit>,
}

impl Default for DoorState {
    fn default() -> Self {
        Self {
            open: false,
            locked: false,
            key_item: None,
            consume_key: true,
            locked_message: "The door is locked.".to_owned(),
            exit: None,
        }
    }
}

impl DoorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn locked_with_key(key: ItemId) -> Self {
        Self {
            locked: true,
            key_item: Some(key),
            ..Self::default()
        }
    }

    pub fn with_exit(mut self, scene: impl Into<SceneId>, spawn_point: impl Into<String>) -> Self {
        self.exit = Some(SceneExit {
            scene: scene.into(),
            spawn_point: spawn_point.into(),
        });
        self
    }

    pub(crate) fn prompt(&self, items: Option<&dyn ItemOracle>) -> String {
        if self.locked {
            match self.key_item.and_then(|key| items.and_then(|i| i.definition(key))) {
                Some(def) => format!("Unlock (needs {})", def.name),
                None => "Locked".to_owned(),
            }
        } else if self.exit.is_some() {
            "Enter".to_owned()
        } else if self.open {
            "Close door".to_owned()
        } else {
            "Open door".to_owned()
        }
    }
}

pub(crate) fn interact(
    state: &mut GameState,
    _env: &GameEnv<'_>,
    id: EntityId,
    events: &mut EventSink,
) -> Result<InteractOutcome, InteractError> {
    let door = door_state(state, id)?;
    if door.locked {
        try_unlock(state, id, events)
    } else if door.open {
        close(state, id, events);
        Ok(InteractOutcome::DoorToggled { open: false })
    } else {
        let exit = door.exit.clone();
        open(state, id, events);
        match exit {
            Some(exit) => Ok(InteractOutcome::TransitionRequested(TransitionRequest::new(
                exit.scene,
                exit.spawn_point,
            ))),
            None => Ok(InteractOutcome::DoorToggled { open: true }),
        }
    }
}

/// Attempts to unlock with a key from the inventory. Refuses with the
/// door's locked message when no usable key is held.
fn try_unlock(
    state: &mut GameState,
    id: EntityId,
    events: &mut EventSink,
) -> Result<InteractOutcome, InteractError> {
    let door = door_state(state, id)?;
    let key_item = door.key_item;
    let consume_key = door.consume_key;
    let locked_message = door.locked_message.clone();

    if let Some(key) = key_item {
        if state.inventory.has(key, 1) {
            let door = door_state_mut(state, id)?;
            door.locked = false;
            events.push(GameEvent::DoorUnlocked { entity: id });

            if consume_key {
                state.inventory.remove(key, 1, events);
            }
            return Ok(InteractOutcome::DoorUnlocked);
        }
    }

    events.push(GameEvent::MessageShown {
        text: locked_message.clone(),
    });
    Ok(InteractOutcome::Refused {
        message: locked_message,
    })
}

/// Opens the door if closed and unlocked. Returns whether state changed.
/// Used both by direct interaction and by linked switches; switch-driven
/// opens never trigger the door's scene exit.
pub(crate) fn open(state: &mut GameState, id: EntityId, events: &mut EventSink) -> bool {
    let Some(entity) = state.world.interactable_mut(id) else {
        return false;
    };
    let InteractableKind::Door(door) = &mut entity.kind else {
        return false;
    };
    if door.open || door.locked {
        return false;
    }
    door.open = true;
    entity.layer.remove(LayerMask::BLOCKING);
    events.push(GameEvent::DoorOpened { entity: id });
    true
}

/// Closes the door if open. Returns whether state changed.
pub(crate) fn close(state: &mut GameState, id: EntityId, events: &mut EventSink) -> bool {
    let Some(entity) = state.world.interactable_mut(id) else {
        return false;
    };
    let InteractableKind::Door(door) = &mut entity.kind else {
        return false;
    };
    if !door.open {
        return false;
    }
    door.open = false;
    entity.layer.insert(LayerMask::BLOCKING);
    events.push(GameEvent::DoorClosed { entity: id });
    true
}

fn door_state(state: &GameState, id: EntityId) -> Result<&DoorState, InteractError> {
    match state.world.interactable(id).map(|entity| &entity.kind) {
        Some(InteractableKind::Door(door)) => Ok(door),
        _ => Err(InteractError::UnknownEntity(id)),
    }
}

fn door_state_mut(state: &mut GameState, id: EntityId) -> Result<&mut DoorState, InteractError> {
    match state.world.interactable_mut(id).map(|entity| &mut entity.kind) {
        Some(InteractableKind::Door(door)) => Ok(door),
        _ => Err(InteractError::UnknownEntity(id)),
    }
}
