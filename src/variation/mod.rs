//! Deterministic per-entity shape and material variation.
//!
//! Every entity gets its look from a pure function of `(id, category, color,
//! mode)`: the id seeds a [`rng::SeededSequence`], successive values are
//! remapped into per-shape ranges, and the result is cached. The same inputs
//! always produce bit-identical output, which keeps entities visually stable
//! across frames, re-renders and process runs.

pub mod palette;
pub mod rng;

use std::collections::HashMap;

use crate::atmosphere::DayNight;
use crate::scene::entity::{Category, Entity};

pub use palette::{ShapeKind, ShapeRanges};
use rng::SeededSequence;

/// Warm flame color for emissive surfaces at night.
const GLOW_COLOR: [f32; 3] = [1.0, 0.78, 0.45];

/// Physical size and lean of an entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    /// Lean around the entity's forward axis, radians.
    pub tilt: f32,
}

/// Surface parameters fed to the material recipe.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MaterialParams {
    pub base_color: [f32; 3],
    pub roughness: f32,
    /// 0 = fresh stone, 1 = heavily weathered
    pub weathering: f32,
    pub emissive: bool,
    pub emissive_color: [f32; 3],
    pub emissive_strength: f32,
}

/// Complete variation for one entity in one mode.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Variation {
    pub shape: ShapeKind,
    pub dimensions: Dimensions,
    pub material: MaterialParams,
    /// Animation phase offset in `[0, TAU)`.
    pub phase: f32,
}

/// Pure variation function.
///
/// Draw order is fixed (shape, width, height, depth, tilt, tint, roughness,
/// weathering, glow, phase) and independent of `mode`, so day and night
/// variants of an entity share their shape and dimensions exactly.
pub fn compute_variation(id: &str, category: Category, color: [f32; 3], mode: DayNight) -> Variation {
    let mut seq = SeededSequence::from_id(id);

    let shape = seq
        .pick_weighted(palette::palette(category))
        .unwrap_or(ShapeKind::Headstone);
    let r = shape.ranges();

    let dimensions = Dimensions {
        width: seq.range(r.width.0, r.width.1),
        height: seq.range(r.height.0, r.height.1),
        depth: seq.range(r.depth.0, r.depth.1),
        tilt: seq.range(-r.max_tilt, r.max_tilt),
    };

    let tint = seq.range(0.9, 1.1);
    let roughness = seq.range(0.55, 0.95);
    let weathering = seq.next_f32();
    let glow = seq.range(0.6, 1.2);
    let phase = seq.next_f32() * std::f32::consts::TAU;

    let emissive = mode.is_night() && shape.emits_light();
    let material = MaterialParams {
        base_color: color.map(|c| (c * tint).clamp(0.0, 1.0)),
        roughness,
        weathering,
        emissive,
        emissive_color: if emissive { GLOW_COLOR } else { [0.0; 3] },
        emissive_strength: if emissive { glow } else { 0.0 },
    };

    Variation {
        shape,
        dimensions,
        material,
        phase,
    }
}

/// Caches [`compute_variation`] results by `(id, mode)`.
#[derive(Debug, Default)]
pub struct VariationGenerator {
    /// Slot 0 = day, slot 1 = night
    cache: HashMap<String, [Option<Variation>; 2]>,
    hits: u64,
    misses: u64,
}

impl VariationGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Variation for an entity in the given mode (cached).
    pub fn variation_for(&mut self, entity: &Entity, mode: DayNight) -> Variation {
        if let Some(v) = self.cache.get(entity.id.as_str()).and_then(|slots| slots[mode.index()]) {
            self.hits += 1;
            return v;
        }
        self.misses += 1;
        let v = compute_variation(&entity.id, entity.category, entity.color, mode);
        self.cache.entry(entity.id.clone()).or_default()[mode.index()] = Some(v);
        v
    }

    /// Drop cached variations for an entity (removed or changed upstream).
    pub fn forget(&mut self, id: &str) {
        self.cache.remove(id);
    }

    pub fn clear(&mut self) {
        self.cache.clear();
    }

    /// Number of cached `(id, mode)` pairs
    pub fn len(&self) -> usize {
        self.cache.values().map(|slots| slots.iter().flatten().count()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// `(hits, misses)` since creation
    pub fn counters(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}
