use crate::math::{Facing, Vec2};
use crate::state::EntityId;

/// Player character state, including the movement-lock claim ledger.
///
/// Movement claims are counted: each narrative subsystem that freezes the
/// player (dialogue, cutscene, forge, scene transition) takes one claim on
/// entry and releases it on every exit path. Movement is allowed only while
/// no claims are held, so overlapping freezes cannot release each other
/// early.
#[derive(Clone, Debug)]
pub struct PlayerState {
    pub position: Vec2,
    pub facing: Facing,
    pub move_speed: f32,
    /// Normalized movement intent for the current tick.
    pub pending_intent: Vec2,
    /// Entity currently carried by the gloves, if any.
    pub carrying: Option<EntityId>,
    movement_claims: u32,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            facing: Facing::default(),
            move_speed: crate::config::GameConfig::DEFAULT_MOVE_SPEED,
            pending_intent: Vec2::ZERO,
            carrying: None,
            movement_claims: 0,
        }
    }
}

impl PlayerState {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Takes a movement-lock claim and drops any pending intent so the
    /// player stops on the same tick.
    pub fn lock_movement(&mut self) {
        self.movement_claims += 1;
        self.pending_intent = Vec2::ZERO;
    }

    /// Releases one movement-lock claim. Releasing with no claims held is a
    /// no-op rather than an underflow.
    pub fn unlock_movement(&mut self) {
        self.movement_claims = self.movement_claims.saturating_sub(1);
    }

    pub fn can_move(&self) -> bool {
        self.movement_claims == 0
    }

    /// Number of outstanding movement-lock claims.
    pub fn movement_claims(&self) -> u32 {
        self.movement_claims
    }

    /// Records the tick's movement input. Ignored while movement is locked;
    /// facing updates only when the intent is non-zero.
    pub fn apply_input(&mut self, intent: Vec2) {
        if !self.can_move() {
            self.pending_intent = Vec2::ZERO;
            return;
        }

        self.pending_intent = intent.normalized_or_zero();
        if let Some(facing) = Facing::from_movement(self.pending_intent) {
            self.facing = facing;
        }
    }

    /// Integrates the pending intent over simulation time.
    pub fn integrate(&mut self, dt_sim: f32) {
        self.position = self.position + self.pending_intent * (self.move_speed * dt_sim);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_claims_keep_movement_locked() {
        let mut player = PlayerState::default();
        player.lock_movement();
        player.lock_movement();
        player.unlock_movement();
        assert!(!player.can_move());
        player.unlock_movement();
        assert!(player.can_move());
    }

    #[test]
    fn locking_zeroes_pending_intent() {
        let mut player = PlayerState::default();
        player.apply_input(Vec2::new(1.0, 0.0));
        assert!(player.pending_intent.length() > 0.0);
        player.lock_movement();
        assert_eq!(player.pending_intent, Vec2::ZERO);
        player.apply_input(Vec2::new(1.0, 0.0));
        assert_eq!(player.pending_intent, Vec2::ZERO);
    }

    #[test]
    fn unlock_without_claim_is_a_no_op() {
        let mut player = PlayerState::default();
        player.unlock_movement();
        assert!(player.can_move());
        assert_eq!(player.movement_claims(), 0);
    }
}
