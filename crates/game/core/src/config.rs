/// Game configuration constants and tunable parameters.
///
/// Compile-time `MAX_*` constants bound the state collections; the runtime
/// fields are tunable per deployment and loadable from data files.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// How far the player can reach with a directional interaction scan.
    pub interaction_range: f32,

    /// Base gap between the leader and the first follower; follower `i`
    /// trails at `follow_distance * (i + 1)`.
    pub follow_distance: f32,

    /// Movement speed applied to companions while catching up.
    pub follow_speed: f32,

    /// Distance at which a companion snaps to its target position instead of
    /// walking (anti-softlock after fast relocations).
    pub teleport_distance: f32,

    /// Player walk speed in units per second.
    pub move_speed: f32,

    /// Characters revealed per second by dialogue typewriters.
    pub typewriter_speed: f32,

    /// Characters revealed per second by cutscene narration.
    pub narration_speed: f32,

    /// Seconds a finished narration line stays on screen before fading.
    pub narration_hold: f32,

    /// Seconds for a scene-transition fade out or in.
    pub transition_fade: f32,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum interactable entities tracked per scene.
    pub const MAX_INTERACTABLES: usize = 128;
    /// Maximum occupied inventory slots.
    pub const MAX_INVENTORY_SLOTS: usize = 20;
    /// Maximum companions following at once.
    pub const MAX_PARTY: usize = 4;
    /// Maximum ingredients per crafting recipe.
    pub const MAX_RECIPE_INGREDIENTS: usize = 4;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_INTERACTION_RANGE: f32 = 1.5;
    pub const DEFAULT_FOLLOW_DISTANCE: f32 = 2.0;
    pub const DEFAULT_FOLLOW_SPEED: f32 = 4.0;
    pub const DEFAULT_TELEPORT_DISTANCE: f32 = 10.0;
    pub const DEFAULT_MOVE_SPEED: f32 = 5.0;
    pub const DEFAULT_TYPEWRITER_SPEED: f32 = 40.0;
    pub const DEFAULT_NARRATION_SPEED: f32 = 30.0;
    pub const DEFAULT_NARRATION_HOLD: f32 = 2.0;
    pub const DEFAULT_TRANSITION_FADE: f32 = 0.5;

    pub fn new() -> Self {
        Self {
            interaction_range: Self::DEFAULT_INTERACTION_RANGE,
            follow_distance: Self::DEFAULT_FOLLOW_DISTANCE,
            follow_speed: Self::DEFAULT_FOLLOW_SPEED,
            teleport_distance: Self::DEFAULT_TELEPORT_DISTANCE,
            move_speed: Self::DEFAULT_MOVE_SPEED,
            typewriter_speed: Self::DEFAULT_TYPEWRITER_SPEED,
            narration_speed: Self::DEFAULT_NARRATION_SPEED,
            narration_hold: Self::DEFAULT_NARRATION_HOLD,
            transition_fade: Self::DEFAULT_TRANSITION_FADE,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
