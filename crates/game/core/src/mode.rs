//! Game mode coordination.
//!
//! A single authoritative mode gates which subsystem may claim the player at
//! any time. All transitions flow through [`set_mode`], which diffs old and
//! new, applies the side effects keyed by the new mode, and emits exactly
//! one `ModeChanged` event. Subsystems never write the mode directly.

use crate::events::{EventSink, GameEvent};
use crate::state::GameState;

/// Mutually exclusive top-level game modes.
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
pub enum GameMode {
    /// Normal gameplay.
    #[default]
    Playing,
    /// Pause menu open; the simulation clock is frozen.
    Paused,
    /// In conversation. Movement freezing is managed by the dialogue session.
    Dialogue,
    /// Watching a cutscene; the coordinator holds a movement claim.
    Cutscene,
    /// Scene transition in flight.
    Loading,
    /// Menu surface open (forge, main menu).
    Menu,
}

/// Mode bookkeeping owned by the coordinator.
#[derive(Clone, Copy, Debug)]
pub struct ModeState {
    current: GameMode,
    /// Simulation-time multiplier; 0 while paused.
    time_scale: f32,
    /// Whether the coordinator itself holds a movement claim for Cutscene.
    cutscene_claim: bool,
}

impl Default for ModeState {
    fn default() -> Self {
        Self {
            current: GameMode::Playing,
            time_scale: 1.0,
            cutscene_claim: false,
        }
    }
}

impl ModeState {
    pub fn current(&self) -> GameMode {
        self.current
    }

    /// Multiplier applied to real time to obtain simulation time.
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }
}

/// Transitions to `new`, applying side effects and emitting `ModeChanged`.
///
/// No-op when `new` equals the current mode, so repeated calls never emit
/// duplicate notifications.
pub fn set_mode(state: &mut GameState, new: GameMode, events: &mut EventSink) {
    let old = state.mode.current;
    if old == new {
        return;
    }

    // The coordinator's own cutscene claim is released when leaving Cutscene.
    if old == GameMode::Cutscene && state.mode.cutscene_claim {
        state.mode.cutscene_claim = false;
        state.player.unlock_movement();
    }

    match new {
        GameMode::Paused => state.mode.time_scale = 0.0,
        GameMode::Playing => state.mode.time_scale = 1.0,
        GameMode::Cutscene => {
            state.mode.cutscene_claim = true;
            state.player.lock_movement();
        }
        // Movement freezing for these is managed by the owning subsystem.
        GameMode::Dialogue | GameMode::Loading | GameMode::Menu => {}
    }

    state.mode.current = new;
    events.push(GameEvent::ModeChanged { from: old, to: new });
}

/// Pauses when playing; does nothing in any other mode.
pub fn pause(state: &mut GameState, events: &mut EventSink) {
    if state.mode.current == GameMode::Playing {
        set_mode(state, GameMode::Paused, events);
    }
}

/// Resumes from pause; does nothing in any other mode.
pub fn resume(state: &mut GameState, events: &mut EventSink) {
    if state.mode.current == GameMode::Paused {
        set_mode(state, GameMode::Playing, events);
    }
}

/// Global pause binding: toggles Paused and Playing, and deliberately
/// no-ops during dialogue, cutscenes, loading, and menus.
pub fn toggle_pause(state: &mut GameState, events: &mut EventSink) {
    match state.mode.current {
        GameMode::Paused => resume(state, events),
        GameMode::Playing => pause(state, events),
        _ => {}
    }
}
