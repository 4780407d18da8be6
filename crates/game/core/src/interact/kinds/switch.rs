use crate::events::{EventSink, GameEvent};
use crate::interact::kinds::{door, InteractableKind};
use crate::interact::{InteractError, InteractOutcome};
use crate::state::{EntityId, GameState};

/// A lever or pressure plate that drives linked doors.
#[derive(Clone, Debug, Default)]
pub struct SwitchState {
    pub activated: bool,
    /// One-way switches refuse to toggle back off.
    pub can_deactivate: bool,
    /// Doors opened when the switch activates (and closed when it
    /// deactivates, for two-way switches).
    pub linked_doors: Vec<EntityId>,
}

impl SwitchState {
    pub fn new() -> Self {
        Self {
            can_deactivate: true,
            ..Self::default()
        }
    }

    pub fn one_way() -> Self {
        Self {
            can_deactivate: false,
            ..Self::default()
        }
    }

    pub fn linked_to(mut self, doors: &[EntityId]) -> Self {
        self.linked_doors = doors.to_vec();
        self
    }

    pub(crate) fn prompt(&self) -> String {
        if self.activated {
            "Deactivate".to_owned()
        } else {
            "Activate".to_owned()
        }
    }
}

pub(crate) fn interact(
    state: &mut GameState,
    id: EntityId,
    events: &mut EventSink,
) -> Result<InteractOutcome, InteractError> {
    let (activated, can_deactivate, linked) = {
        let Some(entity) = state.world.interactable_mut(id) else {
            return Err(InteractError::UnknownEntity(id));
        };
        let InteractableKind::Switch(switch) = &mut entity.kind else {
            return Err(InteractError::UnknownEntity(id));
        };

        if switch.activated && !switch.can_deactivate {
            return Ok(InteractOutcome::Ignored);
        }

        switch.activated = !switch.activated;
        (switch.activated, switch.can_deactivate, switch.linked_doors.clone())
    };

    events.push(GameEvent::SwitchToggled {
        entity: id,
        activated,
    });

    for door_id in linked {
        if activated {
            door::open(state, door_id, events);
        } else if can_deactivate {
            door::close(state, door_id, events);
        }
    }

    Ok(InteractOutcome::SwitchToggled { activated })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::interact::kinds::DoorState;
    use crate::math::Vec2;
    use crate::state::{SceneId, WorldState};

    fn setup() -> (GameState, EntityId, EntityId) {
        let mut world = WorldState::new(SceneId::new("test"));
        let door = world
            .spawn("Gate", Vec2::new(2.0, 0.0), InteractableKind::Door(DoorState::new()))
            .unwrap();
        let switch = world
            .spawn(
                "Lever",
                Vec2::ZERO,
                InteractableKind::Switch(SwitchState::new().linked_to(&[door])),
            )
            .unwrap();
        (GameState::new(GameConfig::default(), world), switch, door)
    }

    fn door_open(state: &GameState, id: EntityId) -> bool {
        match &state.world.interactable(id).unwrap().kind {
            InteractableKind::Door(door) => door.open,
            _ => unreachable!(),
        }
    }

    #[test]
    fn toggling_drives_linked_doors() {
        let (mut state, switch, door) = setup();
        let mut events = EventSink::new();

        let outcome = interact(&mut state, switch, &mut events).unwrap();
        assert!(matches!(outcome, InteractOutcome::SwitchToggled { activated: true }));
        assert!(door_open(&state, door));

        let outcome = interact(&mut state, switch, &mut events).unwrap();
        assert!(matches!(outcome, InteractOutcome::SwitchToggled { activated: false }));
        assert!(!door_open(&state, door));
    }

    #[test]
    fn one_way_switch_stays_on() {
        let mut world = WorldState::new(SceneId::new("test"));
        let switch = world
            .spawn("Plate", Vec2::ZERO, InteractableKind::Switch(SwitchState::one_way()))
            .unwrap();
        let mut state = GameState::new(GameConfig::default(), world);
        let mut events = EventSink::new();

        interact(&mut state, switch, &mut events).unwrap();
        let outcome = interact(&mut state, switch, &mut events).unwrap();
        assert!(matches!(outcome, InteractOutcome::Ignored));
    }
}
