//! Picking rays

use crate::core::types::Vec3;
use super::aabb::Aabb;

/// Half-line from `origin` along a unit `direction`.
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
    inv_direction: Vec3,
}

impl Ray {
    /// Direction is normalized here; a zero direction yields a ray that hits nothing.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        let direction = direction.normalize_or_zero();
        Self {
            origin,
            direction,
            inv_direction: direction.recip(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Slab test. Returns `(entry, exit)` distances, entry clamped to 0 when
    /// the origin is inside the box.
    pub fn intersects_aabb(&self, aabb: &Aabb) -> Option<(f32, f32)> {
        if self.direction == Vec3::ZERO {
            return None;
        }
        let t1 = (aabb.min - self.origin) * self.inv_direction;
        let t2 = (aabb.max - self.origin) * self.inv_direction;

        let entry = t1.min(t2).max_element();
        let exit = t1.max(t2).min_element();

        (entry <= exit && exit >= 0.0).then(|| (entry.max(0.0), exit))
    }

    /// Distance to the first surface of `aabb` along the ray.
    pub fn hit_distance(&self, aabb: &Aabb) -> Option<f32> {
        self.intersects_aabb(aabb).map(|(entry, _)| entry)
    }
}
