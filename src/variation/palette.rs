//! Per-category shape palettes and per-shape parameter ranges.

use serde::{Deserialize, Serialize};

use crate::scene::entity::Category;

/// Silhouette family of an entity; indexes the geometry recipe table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Headstone,
    Cross,
    Slab,
    Obelisk,
    Lantern,
    Gabled,
    Block,
    Tower,
    Dome,
    Spire,
}

impl ShapeKind {
    pub const COUNT: usize = 10;

    pub const ALL: [ShapeKind; Self::COUNT] = [
        ShapeKind::Headstone,
        ShapeKind::Cross,
        ShapeKind::Slab,
        ShapeKind::Obelisk,
        ShapeKind::Lantern,
        ShapeKind::Gabled,
        ShapeKind::Block,
        ShapeKind::Tower,
        ShapeKind::Dome,
        ShapeKind::Spire,
    ];

    /// Stable position in [`ShapeKind::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Shapes that carry a light source (lantern flame, lit windows).
    pub fn emits_light(self) -> bool {
        matches!(self, ShapeKind::Lantern | ShapeKind::Tower | ShapeKind::Dome)
    }

    pub fn ranges(self) -> &'static ShapeRanges {
        &SHAPE_RANGES[self.index()]
    }
}

/// Inclusive-exclusive `[min, max)` ranges the generator remaps into.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeRanges {
    pub width: (f32, f32),
    pub height: (f32, f32),
    pub depth: (f32, f32),
    /// Maximum lean in radians, applied symmetrically.
    pub max_tilt: f32,
}

const fn ranges(width: (f32, f32), height: (f32, f32), depth: (f32, f32), max_tilt: f32) -> ShapeRanges {
    ShapeRanges { width, height, depth, max_tilt }
}

static SHAPE_RANGES: [ShapeRanges; ShapeKind::COUNT] = [
    ranges((0.5, 0.9), (0.7, 1.3), (0.12, 0.22), 0.08), // Headstone
    ranges((0.4, 0.7), (1.0, 1.6), (0.10, 0.16), 0.06), // Cross
    ranges((0.8, 1.2), (0.15, 0.35), (1.6, 2.2), 0.02), // Slab
    ranges((0.4, 0.7), (2.0, 3.5), (0.4, 0.7), 0.03),   // Obelisk
    ranges((0.25, 0.4), (0.5, 0.9), (0.25, 0.4), 0.05), // Lantern
    ranges((4.0, 7.0), (4.0, 7.0), (5.0, 8.0), 0.0),    // Gabled
    ranges((6.0, 12.0), (6.0, 18.0), (6.0, 12.0), 0.0), // Block
    ranges((5.0, 9.0), (20.0, 45.0), (5.0, 9.0), 0.0),  // Tower
    ranges((8.0, 14.0), (8.0, 14.0), (8.0, 14.0), 0.0), // Dome
    ranges((3.0, 5.0), (18.0, 30.0), (3.0, 5.0), 0.0),  // Spire
];

/// Weighted shape choices for a category.
pub fn palette(category: Category) -> &'static [(ShapeKind, f32)] {
    match category {
        Category::Marker => &[
            (ShapeKind::Headstone, 5.0),
            (ShapeKind::Cross, 3.0),
            (ShapeKind::Slab, 2.0),
            (ShapeKind::Lantern, 1.0),
        ],
        Category::Monument => &[
            (ShapeKind::Obelisk, 4.0),
            (ShapeKind::Lantern, 2.0),
            (ShapeKind::Cross, 1.0),
        ],
        Category::Residential => &[
            (ShapeKind::Gabled, 5.0),
            (ShapeKind::Block, 3.0),
        ],
        Category::Commercial => &[
            (ShapeKind::Block, 4.0),
            (ShapeKind::Tower, 3.0),
            (ShapeKind::Dome, 1.0),
        ],
        Category::Landmark => &[
            (ShapeKind::Spire, 3.0),
            (ShapeKind::Dome, 2.0),
            (ShapeKind::Tower, 2.0),
            (ShapeKind::Obelisk, 1.0),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_all() {
        for (i, shape) in ShapeKind::ALL.iter().enumerate() {
            assert_eq!(shape.index(), i);
        }
    }

    #[test]
    fn test_ranges_are_ordered() {
        for shape in ShapeKind::ALL {
            let r = shape.ranges();
            assert!(r.width.0 < r.width.1, "{shape:?} width");
            assert!(r.height.0 < r.height.1, "{shape:?} height");
            assert!(r.depth.0 < r.depth.1, "{shape:?} depth");
            assert!(r.max_tilt >= 0.0);
        }
    }

    #[test]
    fn test_every_palette_non_empty_and_positive() {
        for category in Category::ALL {
            let p = palette(category);
            assert!(!p.is_empty());
            assert!(p.iter().all(|(_, w)| *w > 0.0));
        }
    }
}
