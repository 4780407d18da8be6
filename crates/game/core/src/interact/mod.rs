//! Interaction dispatch.
//!
//! Every interaction flows through [`perform`]: it resolves the target
//! entity, checks [`can_interact`], and routes to the kind-specific handler.
//! Handlers mutate [`GameState`] directly and report an [`InteractOutcome`].
//! Precondition failures the player should see (locked doors, a full pack,
//! a missing companion) are `Refused` outcomes carrying a message, never
//! errors. Errors are reserved for programming-level problems: an unknown
//! entity id or a missing collaborator, which callers log and no-op.

pub mod kinds;

use crate::dialogue::DialogueSession;
use crate::env::{GameEnv, ItemId, OracleError};
use crate::events::EventSink;
use crate::state::{EntityId, GameState};

/// The interaction verb an entity offers, shown as a prompt/cursor hint.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum InteractionKind {
    /// Not interactable.
    #[default]
    None,
    /// Look at / get a description.
    Examine,
    /// Start dialogue.
    Talk,
    /// Pick up and move.
    Lift,
    /// Repair broken objects.
    Mend,
    /// Accelerate plant growth.
    Grow,
    /// Reveal hidden information.
    Scan,
    /// Generic use (doors, switches, pickups, the forge).
    Use,
}

/// What an interaction did.
#[derive(Debug)]
pub enum InteractOutcome {
    /// Valid target but nothing to do (busy NPC, one-way switch already on).
    Ignored,
    /// Precondition failed; `message` is user-facing.
    Refused { message: String },
    DoorToggled { open: bool },
    DoorUnlocked,
    SwitchToggled { activated: bool },
    PickedUp { item: ItemId, quantity: u16 },
    Examined { text: String },
    Lifted,
    Dropped,
    DialogueStarted(DialogueSession),
    ForgeOpened {
        entity: EntityId,
        recipes: Vec<ItemId>,
    },
    ForgeClosed,
    /// The interaction opened an exit; the embedder should start a scene
    /// transition to this destination.
    TransitionRequested(crate::scene::TransitionRequest),
}

/// Errors surfaced by interaction dispatch.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InteractError {
    #[error("unknown interactable entity {0}")]
    UnknownEntity(EntityId),

    #[error("collaborator unavailable: {0}")]
    Oracle(#[from] OracleError),
}

/// Whether the entity currently accepts an interaction at all.
///
/// Kind-specific refusals that deserve a user-facing message (locked doors,
/// missing lift companion) are *not* decided here; they surface as
/// `Refused` outcomes from [`perform`].
pub fn can_interact(state: &GameState, target: EntityId) -> bool {
    let Some(entity) = state.world.interactable(target) else {
        return false;
    };
    if !entity.interactable {
        return false;
    }

    match &entity.kind {
        kinds::InteractableKind::Npc(npc) => !npc.in_dialogue,
        _ => true,
    }
}

/// Dispatch tag, copied out so the entity borrow ends before handlers run.
#[derive(Clone, Copy)]
enum KindTag {
    Door,
    Switch,
    Pickup,
    Liftable,
    Examinable,
    Npc,
    Forge,
}

/// Dispatches an interaction to the target's kind handler.
pub fn perform(
    state: &mut GameState,
    env: &GameEnv<'_>,
    target: EntityId,
    events: &mut EventSink,
) -> Result<InteractOutcome, InteractError> {
    let tag = {
        let Some(entity) = state.world.interactable(target) else {
            return Err(InteractError::UnknownEntity(target));
        };
        match &entity.kind {
            kinds::InteractableKind::Door(_) => KindTag::Door,
            kinds::InteractableKind::Switch(_) => KindTag::Switch,
            kinds::InteractableKind::Pickup(_) => KindTag::Pickup,
            kinds::InteractableKind::Liftable(_) => KindTag::Liftable,
            kinds::InteractableKind::Examinable(_) => KindTag::Examinable,
            kinds::InteractableKind::Npc(_) => KindTag::Npc,
            kinds::InteractableKind::Forge(_) => KindTag::Forge,
        }
    };
    if !can_interact(state, target) {
        return Ok(InteractOutcome::Ignored);
    }

    match tag {
        KindTag::Door => kinds::door::interact(state, env, target, events),
        KindTag::Switch => kinds::switch::interact(state, target, events),
        KindTag::Pickup => kinds::pickup::interact(state, env, target, events),
        KindTag::Liftable => kinds::liftable::interact(state, target, events),
        KindTag::Examinable => kinds::examine::interact(state, target, events),
        KindTag::Npc => kinds::npc::interact(state, target, events),
        KindTag::Forge => kinds::forge::interact(state, target, events),
    }
}
