//! High-level runtime orchestrator.
//!
//! The runtime owns the game state and drives one simulation tick per call,
//! in a fixed order: pause/cancel input, the active overlay sequence (or
//! gameplay input + glove dispatch), companion positioning, presentation
//! refresh. Nothing here is concurrent: long-running beats (dialogue,
//! cutscenes, scene loads) are resumable sequences advanced at tick
//! boundaries.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use emberveil_core::interact::kinds::{self, InteractableKind};
use emberveil_core::{
    craft, follow, glove, mode, Companion, CompanionId, CutscenePlayer, CutsceneStep,
    DialogueSession, Env, EntityId, EventSink, GameConfig, GameEnv, GameEvent, GameMode, GameState,
    InteractOutcome, InteractionKind, ItemDefinition, ItemId, ItemOracle, SceneTransition,
    TransitionRequest, Vec2, WorldQuery, WorldState,
};

use crate::error::Result;
use crate::index::SpatialIndex;
use crate::input::{InputFrame, InputIntents, InputTracker};
use crate::oracle::{CatalogOracle, ContentSceneSource, SceneSource, StaticSceneSource};
use crate::presenter::{Presenter, TracingPresenter};

/// The sequence currently suspending normal gameplay.
enum Overlay {
    Dialogue(DialogueSession),
    Cutscene(CutscenePlayer),
    Transition(SceneTransition),
}

/// Synchronous tick-driven orchestrator around [`GameState`].
pub struct Runtime {
    state: GameState,
    items: CatalogOracle,
    roster: HashMap<CompanionId, Companion>,
    scene_source: Box<dyn SceneSource>,
    presenter: Box<dyn Presenter>,
    input: InputTracker,
    index: SpatialIndex,
    overlay: Option<Overlay>,
    active_forge: Option<EntityId>,
    inventory_open: bool,
}

impl Runtime {
    pub fn builder(world: WorldState) -> RuntimeBuilder {
        RuntimeBuilder::new(world)
    }

    /// Builds a runtime entirely from a content data directory.
    pub fn from_content(
        factory: emberveil_content::ContentFactory,
        initial_scene: &str,
    ) -> Result<Self> {
        let config = factory.load_config()?;
        let items = factory.load_items()?;
        let companions = factory
            .load_companions()?
            .iter()
            .map(|spec| spec.to_companion())
            .collect();
        let world = factory.load_scene(initial_scene)?;

        Ok(RuntimeBuilder::new(world)
            .config(config)
            .items(items)
            .companions(companions)
            .scene_source(ContentSceneSource::new(factory))
            .build())
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable state access for scripting hooks and scenario setup. The
    /// mode invariant still holds: go through `mode::set_mode`, not the
    /// field, to change modes.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn mode(&self) -> GameMode {
        self.state.mode.current()
    }

    /// The conversation currently on screen, for typewriter sampling.
    pub fn active_dialogue(&self) -> Option<&DialogueSession> {
        match &self.overlay {
            Some(Overlay::Dialogue(session)) => Some(session),
            _ => None,
        }
    }

    /// Prompt text and verb for the hovered target, for the targeting UI.
    pub fn current_prompt(&self) -> Option<(InteractionKind, String)> {
        let target = self.state.glove.target?;
        let entity = self.state.world.interactable(target)?;
        Some((
            entity.interaction(),
            entity.prompt(Some(&self.items as &dyn ItemOracle)),
        ))
    }

    /// Whether a sequence (dialogue, cutscene, transition) is suspending
    /// gameplay.
    pub fn in_sequence(&self) -> bool {
        self.overlay.is_some()
    }

    pub fn is_inventory_open(&self) -> bool {
        self.inventory_open
    }

    /// Starts a scripted cutscene unless a sequence is already running.
    pub fn play_cutscene(&mut self, steps: Vec<CutsceneStep>) -> Vec<GameEvent> {
        let mut events = EventSink::new();
        if self.overlay.is_some() {
            warn!("cutscene requested while another sequence is active; ignored");
            return events.drain();
        }
        let player = CutscenePlayer::begin(steps, &mut self.state, &mut events);
        self.overlay = Some(Overlay::Cutscene(player));
        let drained = events.drain();
        self.present(&drained);
        drained
    }

    /// Crafts one unit of `item` at the open forge. Fails when no forge
    /// menu is open or the recipe is unsatisfied; a failed attempt never
    /// consumes materials.
    pub fn craft(&mut self, item: ItemId) -> bool {
        if self.active_forge.is_none() {
            debug!(%item, "craft attempt with no forge open");
            return false;
        }
        let mut events = EventSink::new();
        let crafted = craft::try_craft(&mut self.state.inventory, &self.items, item, &mut events);
        let drained = events.drain();
        self.present(&drained);
        crafted
    }

    /// Recipes craftable right now at the open forge.
    pub fn craftable_recipes(&self) -> Vec<ItemId> {
        let Some(forge) = self.active_forge else {
            return Vec::new();
        };
        let env: GameEnv<'_> = Env::new(Some(&self.items as &dyn ItemOracle), None);
        kinds::forge::craftable_recipes(&self.state, &env, forge)
    }

    /// Advances the simulation by one tick.
    ///
    /// `dt_real` is wall-clock seconds since the previous tick; simulation
    /// time is derived from it through the mode's time scale, so fades and
    /// narration keep running while the clock is frozen.
    pub fn tick(&mut self, dt_real: f32, frame: InputFrame) -> Vec<GameEvent> {
        let intents = self.input.edges(frame);
        let mut events = EventSink::new();

        self.handle_pause_input(&intents, &mut events);

        let dt_sim = dt_real * self.state.mode.time_scale();

        match self.overlay.take() {
            Some(Overlay::Dialogue(mut session)) => {
                session.advance(dt_real);
                let done = intents.advance_text_pressed
                    && session
                        .input_advance(&mut self.state, &mut events)
                        .is_done();
                if done {
                    self.handle_dialogue_end(session.npc(), &mut events);
                } else {
                    self.overlay = Some(Overlay::Dialogue(session));
                }
            }
            Some(Overlay::Cutscene(mut player)) => {
                let done = player
                    .advance(
                        &mut self.state,
                        dt_real,
                        intents.advance_text_pressed,
                        &mut events,
                    )
                    .is_done();
                if !done {
                    self.overlay = Some(Overlay::Cutscene(player));
                }
            }
            Some(Overlay::Transition(transition)) => {
                self.advance_transition(transition, dt_real, &mut events);
            }
            None => {
                self.gameplay_tick(&intents, dt_sim, &mut events);
            }
        }

        // Companions follow in every mode; frozen simulation time (pause)
        // parks them where they stand.
        follow::update_followers(
            &mut self.state.party,
            self.state.player.position,
            &self.state.config,
            dt_sim,
            &mut events,
        );

        let drained = events.drain();
        self.present(&drained);
        drained
    }

    /// Pause toggling, plus the cancel path for the forge menu.
    fn handle_pause_input(&mut self, intents: &InputIntents, events: &mut EventSink) {
        if !intents.toggle_pause_pressed {
            return;
        }
        if self.state.mode.current() == GameMode::Menu {
            if let Some(forge) = self.active_forge.take() {
                kinds::forge::close(&mut self.state, forge, events);
            }
            return;
        }
        mode::toggle_pause(&mut self.state, events);
    }

    /// One tick of unsuspended gameplay: movement, glove scan, dispatch.
    fn gameplay_tick(&mut self, intents: &InputIntents, dt_sim: f32, events: &mut EventSink) {
        glove::set_engaged(&mut self.state, intents.engage_held, events);
        self.state.player.apply_input(intents.movement);
        self.state.player.integrate(dt_sim);

        // Fresh collider snapshot after movement, before the scan.
        self.index.rebuild(&self.state.world);

        let mut outcomes = Vec::new();
        {
            let env: GameEnv<'_> = Env::new(
                Some(&self.items as &dyn ItemOracle),
                Some(&self.index as &dyn WorldQuery),
            );

            glove::tick(&mut self.state, &env, events);

            if self.state.player.carrying.is_some() {
                // Any interact press while carrying puts the object down.
                if intents.activate_pressed || intents.quick_interact_pressed {
                    if let Some(carried) = self.state.player.carrying {
                        kinds::liftable::put_down(&mut self.state, carried, events);
                    }
                }
            } else {
                if intents.activate_pressed {
                    if let Some(result) = glove::activate(&mut self.state, &env, events) {
                        match result {
                            Ok(outcome) => outcomes.push(outcome),
                            Err(error) => warn!(%error, "interaction dropped"),
                        }
                    }
                }
                if intents.quick_interact_pressed {
                    if let Some(result) = glove::quick_interact(&mut self.state, &env, events) {
                        match result {
                            Ok(outcome) => outcomes.push(outcome),
                            Err(error) => warn!(%error, "quick interaction dropped"),
                        }
                    }
                }
            }
        }

        // A carried object rides along with the player.
        if let Some(carried) = self.state.player.carrying {
            let player_position = self.state.player.position;
            if let Some(entity) = self.state.world.interactable_mut(carried) {
                entity.position = player_position;
            }
        }

        if intents.toggle_inventory_pressed {
            self.toggle_inventory();
        }

        for outcome in outcomes {
            self.apply_outcome(outcome, events);
        }
    }

    fn apply_outcome(&mut self, outcome: InteractOutcome, events: &mut EventSink) {
        match outcome {
            InteractOutcome::DialogueStarted(session) => {
                self.overlay = Some(Overlay::Dialogue(session));
            }
            InteractOutcome::TransitionRequested(request) => {
                self.begin_transition(request, events);
            }
            InteractOutcome::ForgeOpened { entity, .. } => {
                self.active_forge = Some(entity);
            }
            InteractOutcome::ForgeClosed => {
                self.active_forge = None;
            }
            // Everything else already reported through events.
            _ => {}
        }
    }

    fn begin_transition(&mut self, request: TransitionRequest, events: &mut EventSink) {
        match self.scene_source.begin_load(&request.scene) {
            Ok(()) => {
                let transition = SceneTransition::begin(&mut self.state, request, events);
                self.overlay = Some(Overlay::Transition(transition));
            }
            Err(error) => {
                warn!(%error, "cannot start scene transition");
            }
        }
    }

    fn advance_transition(
        &mut self,
        mut transition: SceneTransition,
        dt_real: f32,
        events: &mut EventSink,
    ) {
        let mut loaded = None;
        if transition.is_loading() {
            match self.scene_source.poll() {
                Some(Ok(world)) => loaded = Some(world),
                Some(Err(error)) => {
                    warn!(%error, "scene load failed; aborting transition");
                    mode::set_mode(&mut self.state, GameMode::Playing, events);
                    self.state.player.unlock_movement();
                    return;
                }
                None => {}
            }
        }

        if transition
            .advance(&mut self.state, dt_real, &mut loaded, events)
            .is_done()
        {
            self.index.rebuild(&self.state.world);
        } else {
            self.overlay = Some(Overlay::Transition(transition));
        }
    }

    /// Recruitment hook: an NPC conversation that just ended may bring its
    /// companion into the party.
    fn handle_dialogue_end(&mut self, npc: EntityId, events: &mut EventSink) {
        let recruits = match self.state.world.interactable(npc).map(|entity| &entity.kind) {
            Some(InteractableKind::Npc(npc_state)) => npc_state.recruits.clone(),
            _ => None,
        };
        let Some(id) = recruits else {
            return;
        };
        if self.state.party.has_companion(&id) {
            return;
        }

        match self.roster.get(&id).cloned() {
            Some(mut companion) => {
                // Join from the NPC's spot; the follow logic walks them in.
                if let Some(entity) = self.state.world.interactable(npc) {
                    companion.position = entity.position;
                }
                if self.state.party.add_companion(companion, events) {
                    info!(companion = %id, "companion joined the party");
                }
            }
            None => warn!(companion = %id, "no roster entry for recruited companion"),
        }
    }

    /// Inventory panel toggle; refuses to open during conversations and
    /// cutscenes.
    fn toggle_inventory(&mut self) {
        let mode = self.state.mode.current();
        if matches!(mode, GameMode::Dialogue | GameMode::Cutscene) {
            return;
        }
        self.inventory_open = !self.inventory_open;
        if self.inventory_open {
            self.presenter.refresh_inventory(self.state.inventory.slots());
        }
    }

    /// Forwards this tick's events to the presentation port.
    fn present(&mut self, events: &[GameEvent]) {
        for event in events {
            match event {
                GameEvent::InventoryChanged => {
                    self.presenter.refresh_inventory(self.state.inventory.slots());
                }
                GameEvent::DialogueLineShown {
                    speaker,
                    text,
                    portrait,
                } => {
                    self.presenter
                        .show_dialogue_line(speaker, text, portrait.as_deref());
                }
                GameEvent::FadeRequested {
                    color,
                    to_alpha,
                    duration,
                } => {
                    self.presenter.fade(*color, *to_alpha, *duration);
                }
                GameEvent::MessageShown { text } => {
                    self.presenter.show_message(text);
                }
                GameEvent::NarrationShown { text } => {
                    self.presenter.show_message(text);
                }
                GameEvent::SpawnFallback { requested, used } => {
                    warn!(requested = %requested, used = %used, "spawn point missing, fell back");
                }
                GameEvent::ModeChanged { from, to } => {
                    debug!(%from, %to, "mode changed");
                }
                _ => {}
            }
        }
    }
}

/// Builder for [`Runtime`].
pub struct RuntimeBuilder {
    config: GameConfig,
    world: WorldState,
    player_position: Vec2,
    items: Vec<ItemDefinition>,
    companions: Vec<Companion>,
    scene_source: Option<Box<dyn SceneSource>>,
    presenter: Option<Box<dyn Presenter>>,
}

impl RuntimeBuilder {
    pub fn new(world: WorldState) -> Self {
        Self {
            config: GameConfig::default(),
            world,
            player_position: Vec2::ZERO,
            items: Vec::new(),
            companions: Vec::new(),
            scene_source: None,
            presenter: None,
        }
    }

    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    pub fn player_at(mut self, position: Vec2) -> Self {
        self.player_position = position;
        self
    }

    pub fn items(mut self, items: Vec<ItemDefinition>) -> Self {
        self.items = items;
        self
    }

    /// Companion roster available for recruitment.
    pub fn companions(mut self, companions: Vec<Companion>) -> Self {
        self.companions = companions;
        self
    }

    pub fn scene_source(mut self, source: impl SceneSource + 'static) -> Self {
        self.scene_source = Some(Box::new(source));
        self
    }

    pub fn presenter(mut self, presenter: impl Presenter + 'static) -> Self {
        self.presenter = Some(Box::new(presenter));
        self
    }

    pub fn build(self) -> Runtime {
        let state = GameState::with_player_at(self.config, self.world, self.player_position);
        let roster = self
            .companions
            .into_iter()
            .map(|companion| (companion.id.clone(), companion))
            .collect();

        let mut runtime = Runtime {
            state,
            items: CatalogOracle::new(self.items),
            roster,
            scene_source: self
                .scene_source
                .unwrap_or_else(|| Box::new(StaticSceneSource::new())),
            presenter: self
                .presenter
                .unwrap_or_else(|| Box::new(TracingPresenter)),
            input: InputTracker::new(),
            index: SpatialIndex::new(),
            overlay: None,
            active_forge: None,
            inventory_open: false,
        };
        runtime.index.rebuild(&runtime.state.world);
        runtime
    }
}
