//! Spatial query index.
//!
//! A flat snapshot of interactable colliders, rebuilt once per tick after
//! movement. Queries run against the snapshot, never against live state, so
//! dispatch can mutate the world while the index is borrowed. Entry order
//! follows world iteration order, which is what makes proximity tie-breaks
//! deterministic ("first found wins").

use emberveil_core::{EntityId, LayerMask, OverlapHit, RayHit, Vec2, WorldQuery, WorldState};

#[derive(Clone, Copy, Debug)]
struct Entry {
    id: EntityId,
    position: Vec2,
    radius: f32,
    layer: LayerMask,
}

/// Brute-force collider index over a scene's interactables.
///
/// Scene entity counts are bounded (see `GameConfig::MAX_INTERACTABLES`),
/// so a linear scan per query is plenty.
#[derive(Debug, Default)]
pub struct SpatialIndex {
    entries: Vec<Entry>,
}

impl SpatialIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds the snapshot from the current world. Disabled colliders
    /// (carried objects) are excluded entirely.
    pub fn rebuild(&mut self, world: &WorldState) {
        self.entries.clear();
        self.entries.extend(world.iter().filter_map(|entity| {
            entity.collider_enabled.then_some(Entry {
                id: entity.id,
                position: entity.position,
                radius: entity.radius,
                layer: entity.layer,
            })
        }));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl WorldQuery for SpatialIndex {
    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        layer: LayerMask,
    ) -> Option<RayHit> {
        let direction = direction.normalized_or_zero();
        if direction == Vec2::ZERO {
            return None;
        }

        let mut best: Option<RayHit> = None;
        for entry in &self.entries {
            if !entry.layer.intersects(layer) {
                continue;
            }

            // Ray/circle: project the center onto the ray, then back off by
            // the chord half-length to the entry point.
            let to_center = entry.position - origin;
            let along = to_center.dot(direction);
            let lateral_sq = to_center.length_squared() - along * along;
            let radius_sq = entry.radius * entry.radius;
            if lateral_sq > radius_sq {
                continue;
            }

            let half_chord = (radius_sq - lateral_sq).max(0.0).sqrt();
            let exit_t = along + half_chord;
            if exit_t < 0.0 {
                continue; // entirely behind the origin
            }
            // Range is measured to the collider center, matching overlap(),
            // so directional and proximity scans agree on reach.
            if along > max_distance {
                continue;
            }
            let hit_distance = (along - half_chord).max(0.0);

            if best.map(|b| hit_distance < b.distance).unwrap_or(true) {
                best = Some(RayHit {
                    entity: entry.id,
                    distance: hit_distance,
                });
            }
        }
        best
    }

    fn overlap(&self, origin: Vec2, radius: f32, layer: LayerMask) -> Vec<OverlapHit> {
        self.entries
            .iter()
            .filter(|entry| entry.layer.intersects(layer))
            .filter_map(|entry| {
                let distance = entry.position.distance(origin);
                (distance <= radius).then_some(OverlapHit {
                    entity: entry.id,
                    distance,
                })
            })
            .collect()
    }
}
