//! Target selection queries.
//!
//! The scanner is a pure query layer over [`WorldQuery`]: it never touches
//! hover state (that belongs to the dispatcher) and never fails; no
//! candidate is an ordinary result.

use crate::env::{LayerMask, OverlapHit, WorldQuery};
use crate::math::{Facing, Vec2};
use crate::state::EntityId;

/// Finds at most one interaction candidate near an origin point.
#[derive(Clone, Copy, Debug)]
pub struct TargetScanner {
    pub range: f32,
    pub layer: LayerMask,
}

impl TargetScanner {
    pub fn new(range: f32) -> Self {
        Self {
            range,
            layer: LayerMask::INTERACTABLE,
        }
    }

    /// Directional mode: casts a ray along the facing direction and returns
    /// the first hit.
    pub fn scan_directional(
        &self,
        query: &dyn WorldQuery,
        origin: Vec2,
        facing: Facing,
    ) -> Option<EntityId> {
        query
            .raycast(origin, facing.unit(), self.range, self.layer)
            .map(|hit| hit.entity)
    }

    /// Proximity mode: returns the nearest candidate within range.
    ///
    /// Ties break to the first candidate found in world iteration order
    /// (strict `<` comparison, so an equally-near later entity never wins).
    pub fn scan_proximity(&self, query: &dyn WorldQuery, origin: Vec2) -> Option<EntityId> {
        let mut closest: Option<OverlapHit> = None;
        for hit in query.overlap(origin, self.range, self.layer) {
            let replace = match &closest {
                None => true,
                Some(best) => hit.distance < best.distance,
            };
            if replace {
                closest = Some(hit);
            }
        }
        closest.map(|hit| hit.entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::RayHit;

    /// Scripted query for scanner tests: plays back fixed hits.
    struct FixedQuery {
        ray: Option<RayHit>,
        overlap: Vec<OverlapHit>,
    }

    impl WorldQuery for FixedQuery {
        fn raycast(
            &self,
            _origin: Vec2,
            _direction: Vec2,
            max_distance: f32,
            _layer: LayerMask,
        ) -> Option<RayHit> {
            self.ray.filter(|hit| hit.distance <= max_distance)
        }

        fn overlap(&self, _origin: Vec2, radius: f32, _layer: LayerMask) -> Vec<OverlapHit> {
            self.overlap
                .iter()
                .copied()
                .filter(|hit| hit.distance <= radius)
                .collect()
        }
    }

    #[test]
    fn directional_scan_honors_range() {
        let near = FixedQuery {
            ray: Some(RayHit {
                entity: EntityId(1),
                distance: 1.0,
            }),
            overlap: Vec::new(),
        };
        let far = FixedQuery {
            ray: Some(RayHit {
                entity: EntityId(1),
                distance: 2.0,
            }),
            overlap: Vec::new(),
        };

        let scanner = TargetScanner::new(1.5);
        assert_eq!(
            scanner.scan_directional(&near, Vec2::ZERO, Facing::Right),
            Some(EntityId(1))
        );
        assert_eq!(scanner.scan_directional(&far, Vec2::ZERO, Facing::Right), None);
    }

    #[test]
    fn proximity_scan_picks_the_nearest() {
        let query = FixedQuery {
            ray: None,
            overlap: vec![
                OverlapHit {
                    entity: EntityId(1),
                    distance: 1.2,
                },
                OverlapHit {
                    entity: EntityId(2),
                    distance: 0.4,
                },
                OverlapHit {
                    entity: EntityId(3),
                    distance: 0.9,
                },
            ],
        };

        let scanner = TargetScanner::new(1.5);
        assert_eq!(scanner.scan_proximity(&query, Vec2::ZERO), Some(EntityId(2)));
    }

    #[test]
    fn proximity_ties_go_to_the_first_found() {
        let query = FixedQuery {
            ray: None,
            overlap: vec![
                OverlapHit {
                    entity: EntityId(7),
                    distance: 0.8,
                },
                OverlapHit {
                    entity: EntityId(8),
                    distance: 0.8,
                },
            ],
        };

        let scanner = TargetScanner::new(1.5);
        assert_eq!(scanner.scan_proximity(&query, Vec2::ZERO), Some(EntityId(7)));
    }

    #[test]
    fn empty_world_yields_no_candidate() {
        let query = FixedQuery {
            ray: None,
            overlap: Vec::new(),
        };
        let scanner = TargetScanner::new(1.5);
        assert_eq!(scanner.scan_directional(&query, Vec2::ZERO, Facing::Up), None);
        assert_eq!(scanner.scan_proximity(&query, Vec2::ZERO), None);
    }
}
