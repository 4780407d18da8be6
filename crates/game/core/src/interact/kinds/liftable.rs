use crate::events::{EventSink, GameEvent};
use crate::interact::kinds::InteractableKind;
use crate::interact::{InteractError, InteractOutcome};
use crate::state::{CompanionAbilities, EntityId, GameState};

/// An object the gloves can lift and carry.
///
/// A carried object follows the player (its collider is disabled so scans
/// pass through it) and is put down on a second use or when the gloves
/// disengage. Heavy objects require a party member with the right ability.
#[derive(Clone, Debug, Default)]
pub struct LiftableState {
    pub lifted: bool,
    /// Abilities the party must provide before this can be lifted.
    pub requires: Option<CompanionAbilities>,
}

impl LiftableState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn heavy(requires: CompanionAbilities) -> Self {
        Self {
            lifted: false,
            requires: Some(requires),
        }
    }

    pub(crate) fn prompt(&self) -> String {
        if self.lifted {
            "Put down".to_owned()
        } else {
            "Lift".to_owned()
        }
    }
}

pub(crate) fn interact(
    state: &mut GameState,
    id: EntityId,
    events: &mut EventSink,
) -> Result<InteractOutcome, InteractError> {
    let (lifted, requires) = {
        let Some(entity) = state.world.interactable(id) else {
            return Err(InteractError::UnknownEntity(id));
        };
        let InteractableKind::Liftable(liftable) = &entity.kind else {
            return Err(InteractError::UnknownEntity(id));
        };
        (liftable.lifted, liftable.requires)
    };

    if lifted {
        put_down(state, id, events);
        return Ok(InteractOutcome::Dropped);
    }

    if let Some(requires) = requires {
        if !state.party.has_ability(requires) {
            let message = "It's far too heavy to lift alone.".to_owned();
            events.push(GameEvent::MessageShown {
                text: message.clone(),
            });
            return Ok(InteractOutcome::Refused { message });
        }
    }

    if let Some(entity) = state.world.interactable_mut(id) {
        if let InteractableKind::Liftable(liftable) = &mut entity.kind {
            liftable.lifted = true;
        }
        entity.collider_enabled = false;
    }
    state.player.carrying = Some(id);
    events.push(GameEvent::ObjectLifted { entity: id });
    Ok(InteractOutcome::Lifted)
}

/// Puts a carried object down in place and re-enables its collider.
/// Also invoked when the gloves disengage mid-carry.
pub fn put_down(state: &mut GameState, id: EntityId, events: &mut EventSink) {
    if let Some(entity) = state.world.interactable_mut(id) {
        if let InteractableKind::Liftable(liftable) = &mut entity.kind {
            if !liftable.lifted {
                return;
            }
            liftable.lifted = false;
        }
        entity.collider_enabled = true;
    }
    if state.player.carrying == Some(id) {
        state.player.carrying = None;
    }
    events.push(GameEvent::ObjectDropped { entity: id });
}
