//! Authoritative game state representation.
//!
//! This module owns the data that describes the player, the current scene's
//! interactable entities, the companion party, and the inventory ledger.
//! Subsystems mutate this state exclusively through the operations in
//! `glove`, `interact`, `mode`, `follow`, and the sequence types; nothing in
//! here reaches for globals.

mod inventory;
mod party;
mod player;
mod world;

pub use inventory::{InventorySlot, InventoryState};
pub use party::{Companion, CompanionAbilities, CompanionId, PartyState};
pub use player::PlayerState;
pub use world::{EntityId, Interactable, SceneId, SpawnPoint, WorldError, WorldState};

use crate::config::GameConfig;
use crate::glove::GloveState;
use crate::mode::ModeState;

/// Canonical snapshot of the simulation state.
///
/// `world` is swapped wholesale on scene transitions; `player`, `party`,
/// `inventory`, and `mode` persist across scenes.
#[derive(Debug)]
pub struct GameState {
    pub config: GameConfig,
    pub mode: ModeState,
    pub player: PlayerState,
    pub world: WorldState,
    pub party: PartyState,
    pub inventory: InventoryState,
    pub glove: GloveState,
}

impl GameState {
    /// Creates a fresh state for the given scene with everything else at
    /// defaults (player at the origin, empty party and inventory, gloves
    /// lowered, mode `Playing`).
    pub fn new(config: GameConfig, world: WorldState) -> Self {
        Self {
            config,
            mode: ModeState::default(),
            player: PlayerState::default(),
            world,
            party: PartyState::default(),
            inventory: InventoryState::default(),
            glove: GloveState::default(),
        }
    }

    /// Convenience constructor placing the player.
    pub fn with_player_at(config: GameConfig, world: WorldState, position: crate::math::Vec2) -> Self {
        let mut state = Self::new(config, world);
        state.player.position = position;
        state
    }
}
