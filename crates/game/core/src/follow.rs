//! Companion follow coordination.
//!
//! Runs once per tick after the dispatcher. Each active companion at index
//! `i` trails the leader by `follow_distance * (i + 1)` along the
//! companion's *own* last-movement direction, staggering the line behind
//! the leader rather than chaining companions to each other. A companion
//! that falls beyond the teleport threshold snaps to its slot instantly.

use crate::config::GameConfig;
use crate::events::{EventSink, GameEvent};
use crate::math::{Facing, Vec2};
use crate::state::PartyState;

/// Where a companion at the given follow index wants to stand.
pub fn follow_target(leader: Vec2, last_move_dir: Vec2, index: usize, config: &GameConfig) -> Vec2 {
    let offset = config.follow_distance * (index as f32 + 1.0);
    leader - last_move_dir * offset
}

/// Advances every active companion toward its follow slot.
pub fn update_followers(
    party: &mut PartyState,
    leader: Vec2,
    config: &GameConfig,
    dt_sim: f32,
    events: &mut EventSink,
) {
    let ids: Vec<_> = party.active_ids().to_vec();
    for (index, id) in ids.iter().enumerate() {
        let Some(companion) = party.companion_mut(id) else {
            continue;
        };
        if !companion.following {
            continue;
        }

        let target = follow_target(leader, companion.last_move_dir, index, config);

        if companion.position.distance(leader) > config.teleport_distance {
            companion.position = target;
            events.push(GameEvent::CompanionTeleported { id: id.clone() });
            continue;
        }

        let before = companion.position;
        companion.position = companion
            .position
            .move_towards(target, config.follow_speed * dt_sim);

        let delta = companion.position - before;
        if delta.length_squared() > 1e-6 {
            companion.last_move_dir = delta.normalized_or_zero();
            if let Some(facing) = Facing::from_movement(delta) {
                companion.facing = facing;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Companion;

    fn config() -> GameConfig {
        GameConfig::default()
    }

    fn party_of(companions: Vec<Companion>) -> PartyState {
        let mut party = PartyState::new();
        let mut events = EventSink::new();
        for companion in companions {
            assert!(party.add_companion(companion, &mut events));
        }
        party
    }

    #[test]
    fn stagger_offsets_scale_with_party_index() {
        let config = config();
        let a = Companion::new("a", "A");
        let b = Companion::new("b", "B");
        // Both start facing down, so targets sit above/below the leader
        // along each companion's own direction.
        let leader = Vec2::new(10.0, 10.0);

        let target_a = follow_target(leader, a.last_move_dir, 0, &config);
        let target_b = follow_target(leader, b.last_move_dir, 1, &config);

        assert!((leader.distance(target_a) - 2.0).abs() < 1e-5);
        assert!((leader.distance(target_b) - 4.0).abs() < 1e-5);
    }

    #[test]
    fn offsets_follow_each_companions_own_direction() {
        let config = config();
        let mut left_mover = Companion::new("l", "L");
        left_mover.last_move_dir = Vec2::LEFT;
        let target = follow_target(Vec2::ZERO, left_mover.last_move_dir, 0, &config);
        // Moving left means the slot is to the leader's right.
        assert_eq!(target, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn distant_companion_teleports_to_its_slot() {
        let config = config();
        let mut party = party_of(vec![Companion::new("a", "A").at(Vec2::new(100.0, 0.0))]);
        let mut events = EventSink::new();

        update_followers(&mut party, Vec2::ZERO, &config, 0.016, &mut events);

        let id = crate::state::CompanionId::new("a");
        let companion = party.companion(&id).unwrap();
        assert!(companion.position.distance(Vec2::ZERO) <= config.teleport_distance);
        assert!(events
            .events()
            .iter()
            .any(|e| matches!(e, GameEvent::CompanionTeleported { .. })));
    }

    #[test]
    fn near_companion_walks_not_teleports() {
        let config = config();
        let mut party = party_of(vec![Companion::new("a", "A").at(Vec2::new(5.0, 0.0))]);
        let mut events = EventSink::new();

        let id = crate::state::CompanionId::new("a");
        let before = party.companion(&id).unwrap().position;
        update_followers(&mut party, Vec2::ZERO, &config, 0.1, &mut events);
        let after = party.companion(&id).unwrap().position;

        let step = before.distance(after);
        assert!(step > 0.0);
        assert!(step <= config.follow_speed * 0.1 + 1e-5);
        assert!(events.is_empty());
    }

    #[test]
    fn removing_the_front_companion_shifts_stagger_slots() {
        let config = config();
        let mut party = party_of(vec![Companion::new("a", "A"), Companion::new("b", "B")]);
        let mut events = EventSink::new();

        let b = crate::state::CompanionId::new("b");
        let dir = party.companion(&b).unwrap().last_move_dir;
        let leader = Vec2::ZERO;

        // B sits at index 1 while A leads the line.
        assert_eq!(party.active_ids()[1], b);
        let far = follow_target(leader, dir, 1, &config);
        assert!((leader.distance(far) - 4.0).abs() < 1e-5);

        party.dismiss_all(&mut events);
        // After a full dismissal both are gone; re-adding B alone puts it
        // at index 0 with the short offset.
        party.add_companion(Companion::new("b", "B"), &mut events);
        assert_eq!(party.active_ids()[0], b);
        let near = follow_target(leader, dir, 0, &config);
        assert!((leader.distance(near) - 2.0).abs() < 1e-5);
    }
}
