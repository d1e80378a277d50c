//! Frame driver owning every adaptive-quality component.
//!
//! The host calls [`AdaptivePipeline::frame`] once per rendered frame. Work
//! runs in a fixed order (pending mode toggle, sampling, quality evaluation,
//! LOD, draw recipes, animation) so a tier or mode change is fully applied
//! before anything in the frame reads it.

use std::path::Path;

use crate::animation::{AnimationFrame, AnimationScheduler};
use crate::atmosphere::{DayNight, DayNightController, LightingState, LightingUniform};
use crate::core::types::Result;
use crate::core::{Cadence, Camera, FrameClock};
use crate::lod::{build_draw_recipe, placeholder, DrawRecipe, EvaluationStats, LodEvaluator, RenderState};
use crate::perf::{FpsWindow, PerformanceSampler, QualityController, QualityTier, TierChange};
use crate::texture::{CacheStats, SurfaceProvider, TextureSet, TextureSynthesizer};
use crate::variation::VariationGenerator;

use super::config::SceneConfig;
use super::context::FrameContext;
use super::entity::{Entity, EntityRecord};
use super::interaction::{self, Interaction, InteractionEvent};
use super::registry::{EntityRegistry, SyncReport};

/// Everything produced by one frame.
#[derive(Clone, Debug)]
pub struct FrameOutput {
    pub context: FrameContext,
    /// Instantaneous fps of this frame, if measurable.
    pub fps: Option<f32>,
    pub fps_window: FpsWindow,
    /// Tier change committed at the top of this frame.
    pub tier_change: Option<TierChange>,
    pub stats: EvaluationStats,
    /// One recipe per visible entity, in entity order.
    pub draw_list: Vec<DrawRecipe>,
    /// Entities drawn as placeholders after a recipe error.
    pub recipe_failures: usize,
    pub animation: AnimationFrame,
    pub lighting: LightingState,
    pub lighting_uniform: LightingUniform,
    pub textures: TextureSet,
}

/// Top-level adaptive rendering pipeline.
pub struct AdaptivePipeline {
    config: SceneConfig,
    clock: FrameClock,
    sampler: PerformanceSampler,
    quality: QualityController,
    cadence: Cadence,
    lod: LodEvaluator,
    variations: VariationGenerator,
    textures: TextureSynthesizer,
    animation: AnimationScheduler,
    day_night: DayNightController,
    registry: EntityRegistry,
    interaction: Interaction,
    /// Toggles requested since the last frame; only parity matters.
    pending_toggles: u32,
    /// Handles held by live materials for the current (mode, tier).
    materials: Option<TextureSet>,
    /// Camera of the last frame, for hit testing between frames.
    last_camera: Option<Camera>,
    frame_index: u64,
}

impl AdaptivePipeline {
    pub fn new(config: SceneConfig) -> Self {
        let textures = TextureSynthesizer::new(config.texture.clone());
        Self::build(config, textures)
    }

    /// Pipeline drawing textures through a custom surface provider.
    pub fn with_surfaces(config: SceneConfig, surfaces: Box<dyn SurfaceProvider>) -> Self {
        let textures = TextureSynthesizer::with_surfaces(config.texture.clone(), surfaces);
        Self::build(config, textures)
    }

    fn build(config: SceneConfig, textures: TextureSynthesizer) -> Self {
        let tier = config.initial_tier();
        log::info!("Adaptive pipeline starting at {tier} quality, {} mode", config.mode.initial);
        Self {
            clock: FrameClock::new(),
            sampler: PerformanceSampler::new(&config.sampler),
            quality: QualityController::new(config.quality.clone(), tier),
            cadence: Cadence::new(config.quality.eval_interval_ms),
            lod: LodEvaluator::new(config.lod, tier),
            variations: VariationGenerator::new(),
            textures,
            animation: AnimationScheduler::new(config.animation.clone()),
            day_night: DayNightController::new(config.mode.clone()),
            registry: EntityRegistry::new(),
            interaction: Interaction::new(),
            pending_toggles: 0,
            materials: None,
            last_camera: None,
            frame_index: 0,
            config,
        }
    }

    // -----------------------------------------------------------------------
    // Inputs
    // -----------------------------------------------------------------------

    /// Replace the entity list.
    pub fn sync_entities(&mut self, records: Vec<EntityRecord>) -> SyncReport {
        let report = self.registry.sync(&records);
        for id in &report.stale {
            self.variations.forget(id);
        }
        let registry = &self.registry;
        self.interaction.retain(|id| registry.contains(id));
        // States are parallel to the old list until the next frame
        self.lod.clear();
        report
    }

    /// Request a day/night toggle, applied at the start of the next frame.
    /// Returns the mode that frame will use.
    pub fn toggle_mode(&mut self) -> DayNight {
        self.pending_toggles = self.pending_toggles.wrapping_add(1);
        self.next_mode()
    }

    /// Request a specific mode for the next frame.
    pub fn set_mode(&mut self, mode: DayNight) {
        self.pending_toggles = u32::from(self.day_night.mode() != mode);
    }

    fn next_mode(&self) -> DayNight {
        if self.pending_toggles % 2 == 1 {
            self.day_night.mode().toggled()
        } else {
            self.day_night.mode()
        }
    }

    /// Pointer moved to `ndc` (`[-1, 1]`, +Y up).
    pub fn pointer_moved(&mut self, ndc: [f32; 2]) {
        let hit = self.pick(ndc);
        self.interaction.hover(hit.as_deref());
    }

    /// Pointer clicked at `ndc`.
    pub fn pointer_clicked(&mut self, ndc: [f32; 2]) {
        let hit = self.pick(ndc);
        self.interaction.click(hit.as_deref());
    }

    fn pick(&self, ndc: [f32; 2]) -> Option<String> {
        let camera = self.last_camera.as_ref()?;
        let entities = self.registry.entities();
        let states = self.lod.states();
        if states.len() != entities.len() {
            return None;
        }
        interaction::pick(camera, ndc, entities, states).map(|i| entities[i].id.clone())
    }

    /// Events since the last drain.
    pub fn drain_events(&mut self) -> Vec<InteractionEvent> {
        self.interaction.drain_events()
    }

    // -----------------------------------------------------------------------
    // Frame
    // -----------------------------------------------------------------------

    /// Run one frame at wall time `now_ms`.
    pub fn frame(&mut self, now_ms: f64, camera: &Camera) -> FrameOutput {
        // 1. Mode toggle queued since the last frame
        if self.pending_toggles % 2 == 1 {
            let old = self.day_night.mode();
            self.day_night.toggle();
            self.materials = None;
            let evicted = self.textures.invalidate_mode(old);
            log::debug!("Mode change released {evicted} {old} textures");
        }
        self.pending_toggles = 0;

        // 2. Sample
        self.clock.tick(now_ms);
        let fps = self.sampler.record_frame(now_ms);

        // 3. Quality, on its own cadence
        let mut tier_change = None;
        if self.cadence.poll(now_ms) {
            if let Some(change) = self.quality.evaluate(self.sampler.average_fps()) {
                self.apply_tier_change(&change);
                tier_change = Some(change);
            }
        }

        let context = FrameContext {
            frame_index: self.frame_index,
            elapsed: self.clock.elapsed_secs(),
            dt: self.clock.delta_secs(),
            tier: self.quality.tier(),
            mode: self.day_night.mode(),
        };

        let textures = match &self.materials {
            Some(set) => set.clone(),
            None => {
                let set = self.textures.texture_set(context.mode, context.tier);
                self.materials = Some(set.clone());
                self.textures.release_unreferenced();
                set
            }
        };

        // 4. LOD
        let forced = self.interaction.forced_ids();
        self.lod.evaluate(
            camera,
            self.registry.entities(),
            &mut self.variations,
            context.mode,
            &forced,
        );
        let stats = *self.lod.stats();

        // 5. Recipes
        let (mut draw_list, mut recipe_failures) = self.build_recipes(&context);

        // 6. Animation
        let was_transitioning = self.day_night.is_transitioning();
        let light_ids: Vec<&str> = draw_list
            .iter()
            .filter(|r| r.point_light.is_some())
            .map(|r| r.id.as_str())
            .collect();
        let animation = self.animation.tick(&context, &light_ids, &mut self.day_night);
        if was_transitioning {
            // Fog and glow follow the blend step taken by this tick; the
            // light set itself does not depend on the blend.
            (draw_list, recipe_failures) = self.build_recipes(&context);
        }
        let lights = draw_list.iter_mut().filter_map(|r| r.point_light.as_mut());
        for (light, k) in lights.zip(&animation.light_intensities) {
            light.intensity *= k;
        }

        // 7. Output
        self.last_camera = Some(camera.clone());
        self.frame_index += 1;
        let lighting = self.day_night.state().clone();
        FrameOutput {
            context,
            fps,
            fps_window: self.sampler.stats(),
            tier_change,
            stats,
            draw_list,
            recipe_failures,
            animation,
            lighting_uniform: lighting.uniform(),
            lighting,
            textures,
        }
    }

    fn apply_tier_change(&mut self, change: &TierChange) {
        self.materials = None;
        let evicted = self.textures.invalidate_tier(change.from);
        self.lod.set_tier(change.to);
        log::debug!("Tier change released {evicted} {} textures", change.from);
    }

    fn build_recipes(&self, ctx: &FrameContext) -> (Vec<DrawRecipe>, usize) {
        let lighting = &self.day_night.state().lighting;
        let mut fog = lighting.fog;
        fog.enabled &= ctx.tier.budget().fog;

        let entities = self.registry.entities();
        let states = self.lod.states();
        let mut draw_list = Vec::with_capacity(states.len());
        let mut failures = 0;
        for (entity, state) in entities.iter().zip(states) {
            if !state.lod.is_visible() {
                continue;
            }
            match build_draw_recipe(entity, state, &fog, lighting.glow_strength) {
                Ok(recipe) => draw_list.push(recipe),
                Err(e) => {
                    log::warn!("{e}; drawing placeholder");
                    failures += 1;
                    draw_list.push(placeholder(entity, state, &fog));
                }
            }
        }
        (draw_list, failures)
    }

    // -----------------------------------------------------------------------
    // Reload
    // -----------------------------------------------------------------------

    /// Re-initialize with a new configuration. Entities are kept; measured
    /// performance, tier, mode, caches and interaction state start over.
    pub fn reload(&mut self, config: SceneConfig) -> Result<()> {
        config.validate()?;
        let tier = config.initial_tier();

        self.clock.reset();
        self.sampler = PerformanceSampler::new(&config.sampler);
        self.quality = QualityController::new(config.quality.clone(), tier);
        self.cadence = Cadence::new(config.quality.eval_interval_ms);
        self.lod = LodEvaluator::new(config.lod, tier);
        self.variations.clear();
        self.materials = None;
        self.textures.reconfigure(config.texture.clone());
        self.animation.reconfigure(config.animation.clone());
        self.animation.reset();
        self.day_night = DayNightController::new(config.mode.clone());
        self.interaction.clear();
        self.pending_toggles = 0;
        self.last_camera = None;
        self.frame_index = 0;
        self.config = config;

        log::info!("Scene reloaded at {tier} quality");
        Ok(())
    }

    /// [`reload`](Self::reload) from a JSON config file.
    pub fn reload_from_path(&mut self, path: &Path) -> Result<()> {
        let config = SceneConfig::load_sync(path)?;
        self.reload(config)
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    pub fn current_quality_tier(&self) -> QualityTier {
        self.quality.tier()
    }

    pub fn mode(&self) -> DayNight {
        self.day_night.mode()
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn entities(&self) -> &[Entity] {
        self.registry.entities()
    }

    /// States from the last frame, parallel to [`entities`](Self::entities).
    pub fn render_states(&self) -> &[RenderState] {
        self.lod.states()
    }

    pub fn selected(&self) -> Option<&str> {
        self.interaction.selected()
    }

    pub fn hovered(&self) -> Option<&str> {
        self.interaction.hovered()
    }

    pub fn texture_stats(&self) -> CacheStats {
        self.textures.stats()
    }

    pub fn textures(&self) -> &TextureSynthesizer {
        &self.textures
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_index
    }
}

impl Default for AdaptivePipeline {
    fn default() -> Self {
        Self::new(SceneConfig::default())
    }
}
