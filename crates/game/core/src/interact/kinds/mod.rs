//! Concrete interactable kinds.
//!
//! One module per kind; each holds the kind's state struct and its
//! interaction handler. The closed [`InteractableKind`] enum is the only
//! coupling point between world entities and dispatch.

pub mod door;
pub mod examine;
pub mod forge;
pub mod liftable;
pub mod npc;
pub mod pickup;
pub mod switch;

pub use door::{DoorState, SceneExit};
pub use examine::ExaminableState;
pub use forge::ForgeState;
pub use liftable::LiftableState;
pub use npc::NpcState;
pub use pickup::PickupState;
pub use switch::SwitchState;

use crate::env::ItemOracle;
use crate::interact::InteractionKind;

/// Kind-specific state of an interactable entity.
#[derive(Clone, Debug)]
pub enum InteractableKind {
    Door(DoorState),
    Switch(SwitchState),
    Pickup(PickupState),
    Liftable(LiftableState),
    Examinable(ExaminableState),
    Npc(NpcState),
    Forge(ForgeState),
}

impl InteractableKind {
    /// The interaction verb this kind offers.
    pub fn interaction(&self) -> InteractionKind {
        match self {
            InteractableKind::Door(_) => InteractionKind::Use,
            InteractableKind::Switch(_) => InteractionKind::Use,
            InteractableKind::Pickup(_) => InteractionKind::Use,
            InteractableKind::Liftable(_) => InteractionKind::Lift,
            InteractableKind::Examinable(_) => InteractionKind::Examine,
            InteractableKind::Npc(_) => InteractionKind::Talk,
            InteractableKind::Forge(_) => InteractionKind::Use,
        }
    }

    /// Prompt text derived from current state. `name` is the entity's
    /// display name.
    pub fn prompt(&self, name: &str, items: Option<&dyn ItemOracle>) -> String {
        match self {
            InteractableKind::Door(door) => door.prompt(items),
            InteractableKind::Switch(switch) => switch.prompt(),
            InteractableKind::Pickup(pickup) => pickup.prompt(name),
            InteractableKind::Liftable(liftable) => liftable.prompt(),
            InteractableKind::Examinable(_) => "Examine".to_owned(),
            InteractableKind::Npc(_) => format!("Talk to {name}"),
            InteractableKind::Forge(_) => "Use Forge".to_owned(),
        }
    }
}
