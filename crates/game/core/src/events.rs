//! Events emitted by the core during simulation.
//!
//! Subsystems push into an [`EventSink`] as they mutate state; the embedding
//! runtime drains the sink once per tick and forwards to presentation or
//! logging. Event order within a tick is meaningful: hover-exit always
//! precedes the matching hover-enter, and `ModeChanged` fires after the mode
//! side effects have been applied.

use crate::env::ItemId;
use crate::mode::GameMode;
use crate::state::{CompanionId, EntityId, SceneId};

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    /// The targeting gloves were raised or lowered.
    GloveEngaged { engaged: bool },
    /// The hovered target changed (possibly to nothing).
    TargetChanged { target: Option<EntityId> },
    HoverEntered { target: EntityId },
    HoverExited { target: EntityId },

    /// Game mode transition, emitted after side effects were applied.
    ModeChanged { from: GameMode, to: GameMode },

    /// User-facing flavor or refusal text (examine results, locked doors).
    MessageShown { text: String },

    ItemAdded { item: ItemId, quantity: u16 },
    ItemRemoved { item: ItemId, quantity: u16 },
    /// Slot layout changed; inventory panels should refresh.
    InventoryChanged,
    InventoryFull { item: ItemId },
    ItemCrafted { item: ItemId },

    PickupCollected {
        entity: EntityId,
        item: ItemId,
        quantity: u16,
    },
    DoorOpened { entity: EntityId },
    DoorClosed { entity: EntityId },
    DoorUnlocked { entity: EntityId },
    SwitchToggled { entity: EntityId, activated: bool },
    ObjectLifted { entity: EntityId },
    ObjectDropped { entity: EntityId },
    ForgeOpened { entity: EntityId },
    ForgeClosed { entity: EntityId },

    DialogueStarted { entity: EntityId },
    DialogueLineShown {
        speaker: String,
        text: String,
        portrait: Option<String>,
    },
    DialogueEnded { entity: EntityId },

    CompanionJoined { id: CompanionId },
    CompanionLeft { id: CompanionId },
    /// First-ever recruitment of this companion id.
    CompanionRecruited { id: CompanionId },
    CompanionTeleported { id: CompanionId },

    CutsceneStarted,
    NarrationShown { text: String },
    CutsceneEnded,

    /// Ask the presentation layer to fade the screen overlay.
    FadeRequested {
        color: [f32; 3],
        to_alpha: f32,
        duration: f32,
    },

    TransitionStarted {
        scene: SceneId,
        spawn_point: String,
    },
    SceneLoaded { scene: SceneId },
    /// Requested spawn point was missing; an arbitrary one was used instead.
    SpawnFallback { requested: String, used: String },
    TransitionCompleted { scene: SceneId },
}

/// Per-tick event buffer.
#[derive(Debug, Default)]
pub struct EventSink {
    events: Vec<GameEvent>,
}

impl EventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events accumulated since the last drain.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Removes and returns all buffered events.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
