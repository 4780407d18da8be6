//! World-query collaborator interface.
//!
//! Collision queries stay outside the core: the embedder owns whatever
//! spatial structure it likes and exposes it through [`WorldQuery`]. Queries
//! are pure reads and never fail; an empty result means nothing intersected.

use bitflags::bitflags;

use crate::math::Vec2;
use crate::state::EntityId;

bitflags! {
    /// Collision layer membership used to filter queries.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct LayerMask: u8 {
        /// Entities the glove can target.
        const INTERACTABLE = 1 << 0;
        /// Entities that block movement.
        const BLOCKING = 1 << 1;
    }
}

impl Default for LayerMask {
    fn default() -> Self {
        LayerMask::INTERACTABLE
    }
}

/// Result of a directional raycast.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayHit {
    pub entity: EntityId,
    /// Distance from the ray origin to the hit point.
    pub distance: f32,
}

/// Result of a radius overlap query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverlapHit {
    pub entity: EntityId,
    /// Euclidean distance from the query origin to the entity center.
    pub distance: f32,
}

pub trait WorldQuery {
    /// Casts a ray and returns the nearest entity on `layer` whose center
    /// projects within `max_distance`, or `None` when nothing intersects.
    /// Range is measured to the entity center, as in [`overlap`], so the
    /// two query modes agree on reach; `RayHit::distance` still reports
    /// the collider entry point.
    ///
    /// [`overlap`]: WorldQuery::overlap
    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        layer: LayerMask,
    ) -> Option<RayHit>;

    /// Returns every entity on `layer` whose center lies within `radius` of
    /// `origin`, in stable world iteration order.
    fn overlap(&self, origin: Vec2, radius: f32, layer: LayerMask) -> Vec<OverlapHit>;
}
