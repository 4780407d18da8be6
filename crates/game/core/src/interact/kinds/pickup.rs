use crate::env::{GameEnv, ItemId};
use crate::events::{EventSink, GameEvent};
use crate::interact::kinds::InteractableKind;
use crate::interact::{InteractError, InteractOutcome};
use crate::state::{EntityId, GameState};

/// A world item that can be collected into the inventory.
///
/// The entity despawns on collection; a full inventory leaves it in place.
#[derive(Clone, Copy, Debug)]
pub struct PickupState {
    pub item: ItemId,
    pub quantity: u16,
}

impl PickupState {
    pub fn new(item: ItemId, quantity: u16) -> Self {
        Self { item, quantity }
    }

    pub(crate) fn prompt(&self, name: &str) -> String {
        format!("Pick up {name}")
    }
}

pub(crate) fn interact(
    state: &mut GameState,
    env: &GameEnv<'_>,
    id: EntityId,
    events: &mut EventSink,
) -> Result<InteractOutcome, InteractError> {
    let (item, quantity) = {
        let Some(entity) = state.world.interactable(id) else {
            return Err(InteractError::UnknownEntity(id));
        };
        let InteractableKind::Pickup(pickup) = &entity.kind else {
            return Err(InteractError::UnknownEntity(id));
        };
        (pickup.item, pickup.quantity)
    };

    // Without an item oracle the pickup still collects; stacking falls back
    // to stackable (the ledger's default).
    let definition = env.items().ok().and_then(|items| items.definition(item));

    if !state.inventory.add(definition.as_ref(), item, quantity, events) {
        let message = "Your pack is full.".to_owned();
        events.push(GameEvent::MessageShown {
            text: message.clone(),
        });
        return Ok(InteractOutcome::Refused { message });
    }

    events.push(GameEvent::PickupCollected {
        entity: id,
        item,
        quantity,
    });
    state.world.despawn(id);

    Ok(InteractOutcome::PickedUp { item, quantity })
}
