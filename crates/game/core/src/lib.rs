//! Deterministic interaction and coordination logic for Emberveil.
//!
//! `emberveil-core` defines the canonical rules of the exploration layer:
//! target scanning, the glove dispatcher, interaction kinds, game-mode
//! coordination, movement-lock claims, companion following, and the
//! inventory/crafting ledger. Everything is pure state plus events, with
//! no I/O and no clocks, so the runtime and offline tools can drive
//! the same code. Collaborator services (item catalog, collision queries)
//! enter through the traits in [`env`].

pub mod config;
pub mod craft;
pub mod dialogue;
pub mod env;
pub mod events;
pub mod follow;
pub mod glove;
pub mod interact;
pub mod math;
pub mod mode;
pub mod scan;
pub mod scene;
pub mod seq;
pub mod state;

pub use config::GameConfig;
pub use dialogue::{DialogueLine, DialogueSession};
pub use env::{
    Env, GameEnv, Ingredient, ItemCategory, ItemDefinition, ItemId, ItemOracle, LayerMask,
    OracleError, OverlapHit, RayHit, Recipe, WorldQuery,
};
pub use events::{EventSink, GameEvent};
pub use glove::GloveState;
pub use interact::{InteractError, InteractOutcome, InteractionKind};
pub use math::{Facing, Vec2};
pub use mode::{GameMode, ModeState};
pub use scan::TargetScanner;
pub use scene::{SceneTransition, TransitionRequest};
pub use seq::{CutscenePlayer, CutsceneStep, Fade, SeqStatus, Typewriter};
pub use state::{
    Companion, CompanionAbilities, CompanionId, EntityId, GameState, Interactable, InventorySlot,
    InventoryState, PartyState, PlayerState, SceneId, SpawnPoint, WorldError, WorldState,
};
