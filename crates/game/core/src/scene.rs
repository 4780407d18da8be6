//! Scene transitions.
//!
//! A transition is the one asynchronous boundary in the simulation: fade
//! out, hold in `Loading` mode while the embedder loads the destination
//! world (which may take multiple ticks), reposition the player at the
//! requested spawn point, fade back in, and return control. A missing spawn
//! point id degrades to the first available one with a warning event; it
//! never blocks the transition.

use crate::events::{EventSink, GameEvent};
use crate::mode::{self, GameMode};
use crate::seq::{Fade, SeqStatus, BLACK};
use crate::state::{GameState, SceneId, WorldState};

/// Destination of a scene transition.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionRequest {
    pub scene: SceneId,
    pub spawn_point: String,
}

impl TransitionRequest {
    pub fn new(scene: impl Into<SceneId>, spawn_point: impl Into<String>) -> Self {
        Self {
            scene: scene.into(),
            spawn_point: spawn_point.into(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    FadeOut,
    Loading,
    FadeIn,
}

/// In-flight scene transition.
#[derive(Debug)]
pub struct SceneTransition {
    request: TransitionRequest,
    phase: Phase,
    fade: Fade,
}

impl SceneTransition {
    /// Starts a transition: freezes the player, enters `Loading`, and kicks
    /// off the fade-out. The embedder should begin loading the destination
    /// world immediately and feed it to [`advance`] once ready.
    ///
    /// [`advance`]: SceneTransition::advance
    pub fn begin(
        state: &mut GameState,
        request: TransitionRequest,
        events: &mut EventSink,
    ) -> Self {
        state.player.lock_movement();
        mode::set_mode(state, GameMode::Loading, events);
        events.push(GameEvent::TransitionStarted {
            scene: request.scene.clone(),
            spawn_point: request.spawn_point.clone(),
        });

        let fade = Fade::fade_out(BLACK, state.config.transition_fade);
        events.push(fade.request_event());
        Self {
            request,
            phase: Phase::FadeOut,
            fade,
        }
    }

    /// Advances one tick of real time. `loaded` is taken the first tick it
    /// holds the destination world after the fade-out has finished.
    pub fn advance(
        &mut self,
        state: &mut GameState,
        dt_real: f32,
        loaded: &mut Option<WorldState>,
        events: &mut EventSink,
    ) -> SeqStatus {
        match self.phase {
            Phase::FadeOut => {
                if self.fade.advance(dt_real).is_done() {
                    self.phase = Phase::Loading;
                }
                SeqStatus::Running
            }
            Phase::Loading => {
                if let Some(world) = loaded.take() {
                    self.arrive(state, world, events);
                    self.phase = Phase::FadeIn;
                    self.fade = Fade::fade_in(BLACK, state.config.transition_fade);
                    events.push(self.fade.request_event());
                }
                SeqStatus::Running
            }
            Phase::FadeIn => {
                if self.fade.advance(dt_real).is_done() {
                    self.finish(state, events);
                    SeqStatus::Done
                } else {
                    SeqStatus::Running
                }
            }
        }
    }

    /// Swaps in the loaded world and repositions the player.
    fn arrive(&self, state: &mut GameState, world: WorldState, events: &mut EventSink) {
        state.world = world;
        events.push(GameEvent::SceneLoaded {
            scene: state.world.scene.clone(),
        });

        // A stale hover target from the previous scene must not survive.
        if state.glove.target.take().is_some() {
            events.push(GameEvent::TargetChanged { target: None });
        }
        state.player.carrying = None;

        let spawn = match state.world.spawn_point(&self.request.spawn_point) {
            Some(spawn) => Some(spawn.clone()),
            None => {
                let fallback = state.world.spawn_points.first().cloned();
                if let Some(used) = &fallback {
                    events.push(GameEvent::SpawnFallback {
                        requested: self.request.spawn_point.clone(),
                        used: used.id.clone(),
                    });
                }
                fallback
            }
        };

        if let Some(spawn) = spawn {
            state.player.position = spawn.position;
            state.player.facing = spawn.facing;
        }
    }

    fn finish(&self, state: &mut GameState, events: &mut EventSink) {
        mode::set_mode(state, GameMode::Playing, events);
        state.player.unlock_movement();
        events.push(GameEvent::TransitionCompleted {
            scene: state.world.scene.clone(),
        });
    }

    pub fn scene(&self) -> &SceneId {
        &self.request.scene
    }

    /// Whether the transition is waiting for the destination world.
    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::math::{Facing, Vec2};
    use crate::state::SpawnPoint;

    fn test_state() -> GameState {
        GameState::new(GameConfig::default(), WorldState::new(SceneId::new("burrow")))
    }

    fn workshop(spawns: Vec<SpawnPoint>) -> WorldState {
        let mut world = WorldState::new(SceneId::new("workshop"));
        world.spawn_points = spawns;
        world
    }

    fn run_to_completion(
        transition: &mut SceneTransition,
        state: &mut GameState,
        loaded: &mut Option<WorldState>,
        events: &mut EventSink,
    ) {
        let mut guard = 0;
        while !transition.advance(state, 0.25, loaded, events).is_done() {
            guard += 1;
            assert!(guard < 100, "transition failed to terminate");
        }
    }

    #[test]
    fn positions_player_at_requested_spawn_point() {
        let mut state = test_state();
        let mut events = EventSink::new();
        let mut transition = SceneTransition::begin(
            &mut state,
            TransitionRequest::new("workshop", "from_burrow"),
            &mut events,
        );
        assert_eq!(state.mode.current(), GameMode::Loading);
        assert!(!state.player.can_move());

        let mut loaded = Some(workshop(vec![
            SpawnPoint {
                id: "default".into(),
                position: Vec2::ZERO,
                facing: Facing::Down,
            },
            SpawnPoint {
                id: "from_burrow".into(),
                position: Vec2::new(4.0, 2.0),
                facing: Facing::Up,
            },
        ]));
        run_to_completion(&mut transition, &mut state, &mut loaded, &mut events);

        assert_eq!(state.player.position, Vec2::new(4.0, 2.0));
        assert_eq!(state.player.facing, Facing::Up);
        assert_eq!(state.mode.current(), GameMode::Playing);
        assert!(state.player.can_move());
        assert!(!events
            .events()
            .iter()
            .any(|e| matches!(e, GameEvent::SpawnFallback { .. })));
    }

    #[test]
    fn missing_spawn_point_falls_back_with_warning() {
        let mut state = test_state();
        let mut events = EventSink::new();
        let mut transition = SceneTransition::begin(
            &mut state,
            TransitionRequest::new("workshop", "no_such_door"),
            &mut events,
        );

        let mut loaded = Some(workshop(vec![SpawnPoint {
            id: "default".into(),
            position: Vec2::new(-1.0, 0.0),
            facing: Facing::Left,
        }]));
        run_to_completion(&mut transition, &mut state, &mut loaded, &mut events);

        assert_eq!(state.player.position, Vec2::new(-1.0, 0.0));
        assert!(events.events().iter().any(|e| matches!(
            e,
            GameEvent::SpawnFallback { requested, used }
                if requested == "no_such_door" && used == "default"
        )));
    }

    #[test]
    fn load_may_take_many_ticks() {
        let mut state = test_state();
        let mut events = EventSink::new();
        let mut transition = SceneTransition::begin(
            &mut state,
            TransitionRequest::new("workshop", "default"),
            &mut events,
        );

        let mut nothing = None;
        for _ in 0..20 {
            assert!(!transition
                .advance(&mut state, 0.25, &mut nothing, &mut events)
                .is_done());
        }
        assert!(transition.is_loading());
        assert_eq!(state.mode.current(), GameMode::Loading);

        let mut loaded = Some(workshop(Vec::new()));
        run_to_completion(&mut transition, &mut state, &mut loaded, &mut events);
        assert_eq!(state.mode.current(), GameMode::Playing);
    }
}
