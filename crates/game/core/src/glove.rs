//! The glove dispatcher.
//!
//! Owns the hover target and the engaged/disengaged state of the targeting
//! gloves. While engaged, every tick re-runs the directional scan and walks
//! hover transitions in the guaranteed order: exit the old target, enter the
//! new one, then announce the change. Activation is edge-triggered by the
//! embedder, so holding the button never repeat-fires an interaction.

use crate::env::GameEnv;
use crate::events::{EventSink, GameEvent};
use crate::interact::{self, kinds, InteractError, InteractOutcome};
use crate::scan::TargetScanner;
use crate::state::{EntityId, GameState};

/// Targeting state owned by the dispatcher.
///
/// Invariant: `target` is `None` whenever `engaged` is false.
#[derive(Clone, Copy, Debug, Default)]
pub struct GloveState {
    pub engaged: bool,
    pub target: Option<EntityId>,
}

/// Raises or lowers the gloves (press-and-hold semantics: the embedder
/// calls this on the input edge).
///
/// Lowering the gloves hover-exits any current target and drops a carried
/// object.
pub fn set_engaged(state: &mut GameState, engaged: bool, events: &mut EventSink) {
    if state.glove.engaged == engaged {
        return;
    }
    state.glove.engaged = engaged;
    events.push(GameEvent::GloveEngaged { engaged });

    if !engaged {
        clear_target(state, events);
        if let Some(carried) = state.player.carrying {
            kinds::liftable::put_down(state, carried, events);
        }
    }
}

/// Per-tick directional rescan while the gloves are engaged.
///
/// On a target change (by identity) the old target receives hover-exit
/// before the new one receives hover-enter, then a single target-changed
/// notification fires.
pub fn tick(state: &mut GameState, env: &GameEnv<'_>, events: &mut EventSink) {
    if !state.glove.engaged {
        return;
    }
    // Missing world query: scanning is a no-op, existing hover persists.
    let Ok(query) = env.query() else {
        return;
    };

    let scanner = TargetScanner::new(state.config.interaction_range);
    let new_target = scanner.scan_directional(query, state.player.position, state.player.facing);

    if new_target != state.glove.target {
        if let Some(old) = state.glove.target {
            hover_exit(state, old, events);
        }
        state.glove.target = new_target;
        if let Some(new) = new_target {
            hover_enter(state, new, events);
        }
        events.push(GameEvent::TargetChanged { target: new_target });
    }
}

/// Activation edge while the gloves are engaged: interacts with the current
/// target. Returns `None` when disengaged or nothing is hovered.
pub fn activate(
    state: &mut GameState,
    env: &GameEnv<'_>,
    events: &mut EventSink,
) -> Option<Result<InteractOutcome, InteractError>> {
    if !state.glove.engaged {
        return None;
    }
    let target = state.glove.target?;
    Some(interact::perform(state, env, target, events))
}

/// Quick-interact edge while the gloves are lowered: one-shot proximity
/// query, nearest candidate wins, no hover state involved.
pub fn quick_interact(
    state: &mut GameState,
    env: &GameEnv<'_>,
    events: &mut EventSink,
) -> Option<Result<InteractOutcome, InteractError>> {
    if state.glove.engaged {
        return None;
    }
    let query = env.query().ok()?;

    let scanner = TargetScanner::new(state.config.interaction_range);
    let target = scanner.scan_proximity(query, state.player.position)?;
    Some(interact::perform(state, env, target, events))
}

fn hover_enter(state: &mut GameState, id: EntityId, events: &mut EventSink) {
    if let Some(entity) = state.world.interactable_mut(id) {
        entity.hovered = true;
    }
    events.push(GameEvent::HoverEntered { target: id });
}

fn hover_exit(state: &mut GameState, id: EntityId, events: &mut EventSink) {
    if let Some(entity) = state.world.interactable_mut(id) {
        entity.hovered = false;
    }
    events.push(GameEvent::HoverExited { target: id });
}

fn clear_target(state: &mut GameState, events: &mut EventSink) {
    if let Some(old) = state.glove.target.take() {
        hover_exit(state, old, events);
        events.push(GameEvent::TargetChanged { target: None });
    }
}
