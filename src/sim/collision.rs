//! Axis-aligned bounding box overlap
//!
//! Every entity's box is centred on its position with half-extents of half
//! its size. Touching edges count as a hit.

use glam::Vec2;

use super::entity::Entity;

/// Axis-aligned box given by its corners
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Box of an entity, centred on its position
    pub fn of(entity: &Entity) -> Self {
        let half = entity.sprite.half_extents();
        Self {
            min: entity.sprite.pos - half,
            max: entity.sprite.pos + half,
        }
    }

    /// Inclusive overlap on both axes
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        let overlap_x = self.min.x <= other.max.x && other.min.x <= self.max.x;
        let overlap_y = self.min.y <= other.max.y && other.min.y <= self.max.y;
        overlap_x && overlap_y
    }
}

/// Check whether two active entities overlap. Inactive entities never collide.
pub fn overlaps(a: &Entity, b: &Entity) -> bool {
    if !a.active || !b.active {
        return false;
    }
    Aabb::of(a).intersects(&Aabb::of(b))
}
