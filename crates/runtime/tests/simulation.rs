//! End-to-end simulation scenarios driven through `Runtime::tick`.

use emberveil_core::interact::kinds::{
    DoorState, ExaminableState, ForgeState, InteractableKind, LiftableState, NpcState, PickupState,
};
use emberveil_core::{
    Companion, CompanionAbilities, CompanionId, DialogueLine, Facing, GameEvent, GameMode,
    InteractionKind, ItemCategory, ItemDefinition, ItemId, Recipe, SceneId, SpawnPoint, Vec2,
    WorldState,
};
use emberveil_runtime::{
    InputFrame, NullPresenter, Runtime, RuntimeBuilder, SceneSource, StaticSceneSource,
};

const WOOD: ItemId = ItemId(1);
const STONE: ItemId = ItemId(2);
const AXE: ItemId = ItemId(3);

fn catalog() -> Vec<ItemDefinition> {
    vec![
        ItemDefinition::new(WOOD, "Wood", ItemCategory::Material),
        ItemDefinition::new(STONE, "Stone", ItemCategory::Material),
        ItemDefinition::new(AXE, "Axe", ItemCategory::Crafted)
            .with_recipe(Recipe::new(&[(WOOD, 2), (STONE, 1)])),
    ]
}

fn idle() -> InputFrame {
    InputFrame::default()
}

fn press_quick_interact() -> InputFrame {
    InputFrame {
        quick_interact: true,
        ..InputFrame::default()
    }
}

fn press_advance() -> InputFrame {
    InputFrame {
        advance_text: true,
        ..InputFrame::default()
    }
}

fn builder(world: WorldState) -> RuntimeBuilder {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
    Runtime::builder(world)
        .items(catalog())
        .presenter(NullPresenter)
}

#[test]
fn quick_interact_collects_the_nearest_pickup() {
    let mut world = WorldState::new(SceneId::new("cave"));
    world
        .spawn(
            "Wood",
            Vec2::new(1.0, 0.0),
            InteractableKind::Pickup(PickupState::new(WOOD, 2)),
        )
        .unwrap();
    // A second pickup just out of range must not be collected.
    world
        .spawn(
            "Stone",
            Vec2::new(3.0, 0.0),
            InteractableKind::Pickup(PickupState::new(STONE, 1)),
        )
        .unwrap();
    let mut runtime = builder(world).build();

    let events = runtime.tick(0.016, press_quick_interact());

    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::PickupCollected { item, .. } if *item == WOOD)));
    assert_eq!(runtime.state().inventory.count(WOOD), 2);
    assert_eq!(runtime.state().inventory.count(STONE), 0);
    assert_eq!(runtime.state().world.len(), 1);
}

#[test]
fn engaged_gloves_hover_and_examine_the_faced_target() {
    let mut world = WorldState::new(SceneId::new("cave"));
    let sign = world
        .spawn(
            "Carved Sign",
            Vec2::new(1.0, 0.0),
            InteractableKind::Examinable(ExaminableState::new("Old runes, worn smooth.")),
        )
        .unwrap();
    let mut runtime = builder(world).build();

    // Face right without moving, then raise the gloves.
    runtime.tick(0.0, InputFrame {
        movement: Vec2::new(1.0, 0.0),
        ..InputFrame::default()
    });
    assert_eq!(runtime.state().player.facing, Facing::Right);

    let engaged = InputFrame {
        engage_targeting: true,
        ..InputFrame::default()
    };
    let events = runtime.tick(0.016, engaged);
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::HoverEntered { target } if *target == sign)));
    assert_eq!(runtime.state().glove.target, Some(sign));
    assert!(runtime.state().world.interactable(sign).unwrap().hovered);
    assert_eq!(
        runtime.current_prompt(),
        Some((InteractionKind::Examine, "Examine".to_owned()))
    );

    let events = runtime.tick(0.016, InputFrame {
        engage_targeting: true,
        activate: true,
        ..InputFrame::default()
    });
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::MessageShown { text } if text.contains("runes"))));

    // Lowering the gloves clears the hover.
    let events = runtime.tick(0.016, idle());
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::HoverExited { target } if *target == sign)));
    assert_eq!(runtime.state().glove.target, None);
}

/// Scene source whose loads take a fixed number of polls to resolve.
struct SlowSource {
    inner: StaticSceneSource,
    delay: u32,
    remaining: u32,
}

impl SlowSource {
    fn new(inner: StaticSceneSource, delay: u32) -> Self {
        Self {
            inner,
            delay,
            remaining: 0,
        }
    }
}

impl SceneSource for SlowSource {
    fn begin_load(&mut self, scene: &SceneId) -> emberveil_runtime::Result<()> {
        self.remaining = self.delay;
        self.inner.begin_load(scene)
    }

    fn poll(&mut self) -> Option<emberveil_runtime::Result<WorldState>> {
        if self.remaining > 0 {
            self.remaining -= 1;
            return None;
        }
        self.inner.poll()
    }
}

#[test]
fn door_transition_swaps_scenes_with_spawn_fallback() {
    let mut world = WorldState::new(SceneId::new("cave"));
    world
        .spawn(
            "Cave Exit",
            Vec2::new(1.0, 0.0),
            InteractableKind::Door(DoorState::new().with_exit("workshop", "from_cave")),
        )
        .unwrap();

    let mut scenes = StaticSceneSource::new();
    scenes.insert("workshop", || {
        let mut workshop = WorldState::new(SceneId::new("workshop"));
        workshop.spawn_points.push(SpawnPoint {
            id: "bench".into(),
            position: Vec2::new(7.0, 3.0),
            facing: Facing::Down,
        });
        workshop
    });

    let mut runtime = builder(world)
        .scene_source(SlowSource::new(scenes, 3))
        .build();

    let events = runtime.tick(0.016, press_quick_interact());
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::TransitionStarted { .. })));
    assert_eq!(runtime.mode(), GameMode::Loading);
    assert!(!runtime.state().player.can_move());

    let mut all_events = Vec::new();
    for _ in 0..30 {
        all_events.extend(runtime.tick(0.25, idle()));
        if runtime.mode() == GameMode::Playing {
            break;
        }
    }

    assert_eq!(runtime.state().world.scene, SceneId::new("workshop"));
    assert_eq!(runtime.state().player.position, Vec2::new(7.0, 3.0));
    assert!(runtime.state().player.can_move());
    assert!(all_events.iter().any(|e| matches!(
        e,
        GameEvent::SpawnFallback { requested, used }
            if requested == "from_cave" && used == "bench"
    )));
    assert!(all_events
        .iter()
        .any(|e| matches!(e, GameEvent::TransitionCompleted { .. })));
}

#[test]
fn talking_to_a_recruiter_brings_the_companion_aboard() {
    let mut world = WorldState::new(SceneId::new("oak"));
    world
        .spawn(
            "Hawk",
            Vec2::new(1.0, 0.0),
            InteractableKind::Npc(
                NpcState::new(vec![
                    DialogueLine::new("Hawk", "You made it down the mountain."),
                    DialogueLine::new("Hawk", "I'll come with you."),
                ])
                .recruiting("hawk"),
            ),
        )
        .unwrap();

    let hawk = Companion::new("hawk", "Hawk").with_abilities(CompanionAbilities::SCOUT);
    let mut runtime = builder(world).companions(vec![hawk]).build();

    let events = runtime.tick(0.016, press_quick_interact());
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::DialogueStarted { .. })));
    assert_eq!(runtime.mode(), GameMode::Dialogue);
    assert!(runtime.active_dialogue().is_some());
    assert!(!runtime.state().player.can_move());

    // Walk the conversation: each press first skips typing, then advances.
    let mut all_events = Vec::new();
    for _ in 0..10 {
        all_events.extend(runtime.tick(0.016, press_advance()));
        all_events.extend(runtime.tick(0.016, idle()));
        if runtime.mode() == GameMode::Playing {
            break;
        }
    }

    assert!(all_events
        .iter()
        .any(|e| matches!(e, GameEvent::DialogueEnded { .. })));
    let hawk_id = CompanionId::new("hawk");
    assert!(runtime.state().party.has_companion(&hawk_id));
    assert!(all_events
        .iter()
        .any(|e| matches!(e, GameEvent::CompanionRecruited { id } if *id == hawk_id)));
    assert!(runtime.state().player.can_move());
}

#[test]
fn pausing_freezes_movement_and_followers() {
    let world = WorldState::new(SceneId::new("field"));
    let mut runtime = builder(world).build();
    let mut events = emberveil_core::EventSink::new();
    runtime.state_mut().party.add_companion(
        Companion::new("bear", "Bear").at(Vec2::new(5.0, 0.0)),
        &mut events,
    );

    // One normal tick: the companion closes in.
    runtime.tick(0.1, idle());
    let bear_id = CompanionId::new("bear");
    let after_walk = runtime.state().party.companion(&bear_id).unwrap().position;
    assert!(after_walk.distance(Vec2::new(5.0, 0.0)) > 0.0);

    runtime.tick(0.016, InputFrame {
        toggle_pause: true,
        ..InputFrame::default()
    });
    assert_eq!(runtime.mode(), GameMode::Paused);

    // While paused, neither the player nor followers move.
    let frame = InputFrame {
        movement: Vec2::new(1.0, 0.0),
        ..InputFrame::default()
    };
    runtime.tick(0.5, frame);
    assert_eq!(runtime.state().player.position, Vec2::ZERO);
    assert_eq!(
        runtime.state().party.companion(&bear_id).unwrap().position,
        after_walk
    );

    runtime.tick(0.016, InputFrame {
        toggle_pause: true,
        ..InputFrame::default()
    });
    assert_eq!(runtime.mode(), GameMode::Playing);
}

#[test]
fn forge_menu_crafts_and_closes_on_cancel() {
    let mut world = WorldState::new(SceneId::new("workshop"));
    world
        .spawn(
            "The Forge",
            Vec2::new(1.0, 0.0),
            InteractableKind::Forge(ForgeState::new(vec![AXE])),
        )
        .unwrap();
    let mut runtime = builder(world).build();

    {
        let mut events = emberveil_core::EventSink::new();
        let state = runtime.state_mut();
        let wood = catalog().into_iter().find(|d| d.id == WOOD).unwrap();
        let stone = catalog().into_iter().find(|d| d.id == STONE).unwrap();
        state.inventory.add(Some(&wood), WOOD, 2, &mut events);
        state.inventory.add(Some(&stone), STONE, 1, &mut events);
    }

    let events = runtime.tick(0.016, press_quick_interact());
    assert!(events.iter().any(|e| matches!(e, GameEvent::ForgeOpened { .. })));
    assert_eq!(runtime.mode(), GameMode::Menu);
    assert_eq!(runtime.craftable_recipes(), vec![AXE]);

    assert!(runtime.craft(AXE));
    assert_eq!(runtime.state().inventory.count(AXE), 1);
    assert_eq!(runtime.state().inventory.count(WOOD), 0);
    // Materials are gone now, so the axe is no longer craftable.
    assert!(runtime.craftable_recipes().is_empty());
    assert!(!runtime.craft(AXE));

    // Cancel input closes the menu instead of pausing.
    let events = runtime.tick(0.016, InputFrame {
        toggle_pause: true,
        ..InputFrame::default()
    });
    assert!(events.iter().any(|e| matches!(e, GameEvent::ForgeClosed { .. })));
    assert_eq!(runtime.mode(), GameMode::Playing);
    assert!(runtime.state().player.can_move());
    assert!(!runtime.craft(AXE));
}

#[test]
fn carried_objects_ride_along_and_drop_on_disengage() {
    let mut world = WorldState::new(SceneId::new("cave"));
    let crate_id = world
        .spawn(
            "Crate",
            Vec2::new(1.0, 0.0),
            InteractableKind::Liftable(LiftableState::new()),
        )
        .unwrap();
    let mut runtime = builder(world).build();

    // Face the crate, engage, and lift it.
    runtime.tick(0.0, InputFrame {
        movement: Vec2::new(1.0, 0.0),
        ..InputFrame::default()
    });
    runtime.tick(0.016, InputFrame {
        engage_targeting: true,
        ..InputFrame::default()
    });
    let events = runtime.tick(0.016, InputFrame {
        engage_targeting: true,
        activate: true,
        ..InputFrame::default()
    });
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::ObjectLifted { entity } if *entity == crate_id)));
    assert_eq!(runtime.state().player.carrying, Some(crate_id));

    // Walk up while carrying; the crate follows the player.
    runtime.tick(0.2, InputFrame {
        engage_targeting: true,
        movement: Vec2::new(0.0, 1.0),
        ..InputFrame::default()
    });
    let player_position = runtime.state().player.position;
    assert!(player_position.y > 0.0);
    assert_eq!(
        runtime.state().world.interactable(crate_id).unwrap().position,
        player_position
    );

    // Lowering the gloves drops it in place.
    let events = runtime.tick(0.016, idle());
    assert!(events
        .iter()
        .any(|e| matches!(e, GameEvent::ObjectDropped { entity } if *entity == crate_id)));
    assert_eq!(runtime.state().player.carrying, None);
    assert!(runtime
        .state()
        .world
        .interactable(crate_id)
        .unwrap()
        .collider_enabled);
}
