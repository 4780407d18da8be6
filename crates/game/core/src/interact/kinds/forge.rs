use crate::craft;
use crate::env::{GameEnv, ItemId};
use crate::events::{EventSink, GameEvent};
use crate::interact::kinds::InteractableKind;
use crate::interact::{InteractError, InteractOutcome};
use crate::mode::{self, GameMode};
use crate::state::{EntityId, GameState};

/// An ancient crafting station.
///
/// Opening the forge claims the player's movement and switches to `Menu`
/// mode; closing restores both. Crafting itself goes through
/// [`craft::try_craft`] against the forge's recipe list.
#[derive(Clone, Debug, Default)]
pub struct ForgeState {
    /// Items that can be crafted at this forge.
    pub recipes: Vec<ItemId>,
    pub active: bool,
}

impl ForgeState {
    pub fn new(recipes: Vec<ItemId>) -> Self {
        Self {
            recipes,
            active: false,
        }
    }

    pub fn add_recipe(&mut self, item: ItemId) {
        if !self.recipes.contains(&item) {
            self.recipes.push(item);
        }
    }
}

pub(crate) fn interact(
    state: &mut GameState,
    id: EntityId,
    events: &mut EventSink,
) -> Result<InteractOutcome, InteractError> {
    let (active, recipes) = {
        let Some(entity) = state.world.interactable(id) else {
            return Err(InteractError::UnknownEntity(id));
        };
        let InteractableKind::Forge(forge) = &entity.kind else {
            return Err(InteractError::UnknownEntity(id));
        };
        (forge.active, forge.recipes.clone())
    };

    if active {
        close(state, id, events);
        return Ok(InteractOutcome::ForgeClosed);
    }

    if let Some(entity) = state.world.interactable_mut(id) {
        if let InteractableKind::Forge(forge) = &mut entity.kind {
            forge.active = true;
        }
    }
    state.player.lock_movement();
    mode::set_mode(state, GameMode::Menu, events);
    events.push(GameEvent::ForgeOpened { entity: id });
    Ok(InteractOutcome::ForgeOpened {
        entity: id,
        recipes,
    })
}

/// Closes the forge and restores player control. Also driven by the cancel
/// input while the forge menu is open.
pub fn close(state: &mut GameState, id: EntityId, events: &mut EventSink) {
    let was_active = match state.world.interactable_mut(id) {
        Some(entity) => match &mut entity.kind {
            InteractableKind::Forge(forge) => {
                let was = forge.active;
                forge.active = false;
                was
            }
            _ => return,
        },
        None => return,
    };
    if !was_active {
        return;
    }

    state.player.unlock_movement();
    mode::set_mode(state, GameMode::Playing, events);
    events.push(GameEvent::ForgeClosed { entity: id });
}

/// Recipes whose ingredients the player currently holds.
pub fn craftable_recipes(state: &GameState, env: &GameEnv<'_>, id: EntityId) -> Vec<ItemId> {
    let Some(entity) = state.world.interactable(id) else {
        return Vec::new();
    };
    let InteractableKind::Forge(forge) = &entity.kind else {
        return Vec::new();
    };
    let Ok(items) = env.items() else {
        return Vec::new();
    };

    forge
        .recipes
        .iter()
        .copied()
        .filter(|&item| craft::can_craft(&state.inventory, items, item))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::math::Vec2;
    use crate::state::{SceneId, WorldState};

    fn setup() -> (GameState, EntityId) {
        let mut world = WorldState::new(SceneId::new("workshop"));
        let id = world
            .spawn(
                "Forge",
                Vec2::new(2.0, 2.0),
                InteractableKind::Forge(ForgeState::new(vec![ItemId(20)])),
            )
            .unwrap();
        (GameState::new(GameConfig::default(), world), id)
    }

    #[test]
    fn open_close_cycle_claims_and_releases_control() {
        let (mut state, id) = setup();
        let mut events = EventSink::new();

        let outcome = interact(&mut state, id, &mut events).unwrap();
        assert!(matches!(outcome, InteractOutcome::ForgeOpened { .. }));
        assert_eq!(state.mode.current(), GameMode::Menu);
        assert!(!state.player.can_move());

        let outcome = interact(&mut state, id, &mut events).unwrap();
        assert!(matches!(outcome, InteractOutcome::ForgeClosed));
        assert_eq!(state.mode.current(), GameMode::Playing);
        assert!(state.player.can_move());
    }

    #[test]
    fn closing_an_inactive_forge_is_a_no_op() {
        let (mut state, id) = setup();
        let mut events = EventSink::new();

        close(&mut state, id, &mut events);
        assert!(state.player.can_move());
        assert!(events.is_empty());
    }
}
