//! Per-frame visibility and detail decisions.

use crate::atmosphere::DayNight;
use crate::core::Camera;
use crate::math::Frustum;
use crate::perf::QualityTier;
use crate::scene::entity::Entity;
use crate::variation::{Variation, VariationGenerator};

use super::level::{LodLevel, LodThresholds};

/// Derived per-entity state, recomputed every frame and read-only until the next.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderState {
    pub lod: LodLevel,
    pub in_frustum: bool,
    /// Euclidean distance to the camera.
    pub distance: f32,
    pub variation: Variation,
    /// Selected or hovered; overrides distance and cap.
    pub forced: bool,
}

/// Counters for one evaluation pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EvaluationStats {
    pub total: usize,
    pub culled: usize,
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub out_of_frustum: usize,
    pub forced: usize,
    /// High entities demoted to Medium by the full-detail cap.
    pub demoted: usize,
    pub degraded: usize,
}

impl EvaluationStats {
    pub fn count(&self, level: LodLevel) -> usize {
        match level {
            LodLevel::Culled => self.culled,
            LodLevel::Low => self.low,
            LodLevel::Medium => self.medium,
            LodLevel::High => self.high,
        }
    }

    pub fn visible(&self) -> usize {
        self.total - self.culled
    }
}

/// Assigns a [`LodLevel`] to every entity once per frame.
pub struct LodEvaluator {
    base: LodThresholds,
    thresholds: LodThresholds,
    tier: QualityTier,
    full_detail_cap: usize,
    states: Vec<RenderState>,
    stats: EvaluationStats,
    /// Scratch for the cap pass: (distance, index).
    high_scratch: Vec<(f32, usize)>,
}

impl LodEvaluator {
    pub fn new(base: LodThresholds, tier: QualityTier) -> Self {
        Self {
            base,
            thresholds: base.for_tier(tier),
            tier,
            full_detail_cap: tier.budget().full_detail_cap,
            states: Vec::new(),
            stats: EvaluationStats::default(),
            high_scratch: Vec::new(),
        }
    }

    pub fn tier(&self) -> QualityTier {
        self.tier
    }

    /// Thresholds in effect for the current tier.
    pub fn thresholds(&self) -> &LodThresholds {
        &self.thresholds
    }

    pub fn full_detail_cap(&self) -> usize {
        self.full_detail_cap
    }

    /// Re-scale thresholds and cap for a new tier.
    pub fn set_tier(&mut self, tier: QualityTier) {
        self.tier = tier;
        self.thresholds = self.base.for_tier(tier);
        self.full_detail_cap = tier.budget().full_detail_cap;
        log::debug!(
            "LOD thresholds for {}: {:.1}/{:.1}/{:.1}, cap {}",
            tier,
            self.thresholds.high,
            self.thresholds.medium,
            self.thresholds.low,
            self.full_detail_cap
        );
    }

    pub fn set_base_thresholds(&mut self, base: LodThresholds) {
        self.base = base;
        self.set_tier(self.tier);
    }

    /// States from the last evaluation, parallel to the entity slice.
    pub fn states(&self) -> &[RenderState] {
        &self.states
    }

    pub fn stats(&self) -> &EvaluationStats {
        &self.stats
    }

    /// Evaluate every entity against the camera.
    ///
    /// Order of rules: outside the frustum is always Culled; a forced entity
    /// is High; otherwise the distance band decides, then the cap demotes the
    /// farthest High entities to Medium. Degraded entities never exceed Low.
    pub fn evaluate(
        &mut self,
        camera: &Camera,
        entities: &[Entity],
        variations: &mut VariationGenerator,
        mode: DayNight,
        forced: &[&str],
    ) -> &[RenderState] {
        let frustum = Frustum::from_view_projection(&camera.view_projection());
        let eye = camera.position;

        self.states.clear();
        self.states.reserve(entities.len());
        self.high_scratch.clear();
        let mut stats = EvaluationStats {
            total: entities.len(),
            ..Default::default()
        };
        let mut forced_high = 0;

        for (index, entity) in entities.iter().enumerate() {
            let variation = variations.variation_for(entity, mode);
            let in_frustum = frustum.contains_point(entity.position);
            let distance = entity.position.distance(eye);
            let is_forced = in_frustum && forced.contains(&entity.id.as_str());

            let mut lod = if !in_frustum {
                stats.out_of_frustum += 1;
                LodLevel::Culled
            } else if is_forced {
                stats.forced += 1;
                LodLevel::High
            } else {
                self.thresholds.classify(distance)
            };

            if entity.degraded {
                stats.degraded += 1;
                if lod > LodLevel::Low {
                    lod = LodLevel::Low;
                }
            }

            if lod == LodLevel::High {
                if is_forced {
                    forced_high += 1;
                } else {
                    self.high_scratch.push((distance, index));
                }
            }

            self.states.push(RenderState {
                lod,
                in_frustum,
                distance,
                variation,
                forced: is_forced,
            });
        }

        // Forced entities consume cap slots first; the nearest of the rest keep High.
        let allowed = self.full_detail_cap.saturating_sub(forced_high);
        if self.high_scratch.len() > allowed {
            self.high_scratch.sort_by(|a, b| a.0.total_cmp(&b.0));
            for &(_, index) in &self.high_scratch[allowed..] {
                self.states[index].lod = LodLevel::Medium;
                stats.demoted += 1;
            }
        }

        for state in &self.states {
            match state.lod {
                LodLevel::Culled => stats.culled += 1,
                LodLevel::Low => stats.low += 1,
                LodLevel::Medium => stats.medium += 1,
                LodLevel::High => stats.high += 1,
            }
        }

        log::debug!(
            "LOD [{}]: {} high, {} medium, {} low, {} culled ({} forced, {} demoted, {} degraded)",
            self.tier,
            stats.high,
            stats.medium,
            stats.low,
            stats.culled,
            stats.forced,
            stats.demoted,
            stats.degraded
        );
        self.stats = stats;
        &self.states
    }

    pub fn clear(&mut self) {
        self.states.clear();
        self.stats = EvaluationStats::default();
    }
}

impl Default for LodEvaluator {
    fn default() -> Self {
        Self::new(LodThresholds::default(), QualityTier::High)
    }
}
