//! Axis-aligned bounding box

use crate::core::types::Vec3;

/// Axis-aligned bounding box defined by min and max corners
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create AABB from min and max corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box standing on `base` (its bottom-center) with the given footprint and height
    pub fn from_base(base: Vec3, width: f32, height: f32, depth: f32) -> Self {
        let half = Vec3::new(width * 0.5, 0.0, depth * 0.5);
        Self {
            min: base - half,
            max: base + half + Vec3::new(0.0, height, 0.0),
        }
    }

    /// Get center point
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get size (max - min)
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Check if point is inside AABB
    pub fn contains_point(&self, p: Vec3) -> bool {
        p.x >= self.min.x && p.x <= self.max.x &&
        p.y >= self.min.y && p.y <= self.max.y &&
        p.z >= self.min.z && p.z <= self.max.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_base() {
        let aabb = Aabb::from_base(Vec3::new(10.0, 0.0, 5.0), 2.0, 3.0, 1.0);
        assert_eq!(aabb.min, Vec3::new(9.0, 0.0, 4.5));
        assert_eq!(aabb.max, Vec3::new(11.0, 3.0, 5.5));
        assert_eq!(aabb.center(), Vec3::new(10.0, 1.5, 5.0));
        assert_eq!(aabb.size(), Vec3::new(2.0, 3.0, 1.0));
    }

    #[test]
    fn test_contains_point() {
        let aabb = Aabb::new(Vec3::ZERO, Vec3::ONE);
        assert!(aabb.contains_point(Vec3::splat(0.5)));
        assert!(aabb.contains_point(Vec3::ONE));
        assert!(!aabb.contains_point(Vec3::new(1.5, 0.5, 0.5)));
    }
}
