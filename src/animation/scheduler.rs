//! Per-frame animation tick.

use crate::atmosphere::DayNightController;
use crate::perf::QualityTier;
use crate::scene::context::FrameContext;

use super::config::AnimationConfig;
use super::effects::{self, LightFlicker, Particle, ParticleKind, SwayParams};

/// How much ambient work a tier allows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EffectBudget {
    pub particles: usize,
    pub flicker_lights: usize,
    pub fog: bool,
}

impl EffectBudget {
    pub fn for_tier(tier: QualityTier) -> Self {
        let b = tier.budget();
        Self {
            particles: b.particles,
            flicker_lights: b.flicker_lights,
            fog: b.fog,
        }
    }
}

/// Everything animated this frame.
#[derive(Clone, Debug, PartialEq)]
pub struct AnimationFrame {
    pub budget: EffectBudget,
    pub sway: SwayParams,
    /// None when the tier disables fog.
    pub fog_offset: Option<[f32; 2]>,
    pub particle_kind: ParticleKind,
    pub particles: Vec<Particle>,
    /// Multiplier per point light, in the order the lights were passed.
    pub light_intensities: Vec<f32>,
    /// Indices into `light_intensities` currently flickering.
    pub flickering: Vec<usize>,
    /// Day/night blend progress, 1.0 when settled.
    pub transition_progress: f32,
}

/// Runs ambient simulations, light flicker and mode transitions, in that
/// order, once per frame.
pub struct AnimationScheduler {
    config: AnimationConfig,
    flicker: LightFlicker,
    ticks: u64,
}

impl AnimationScheduler {
    pub fn new(config: AnimationConfig) -> Self {
        let flicker = LightFlicker::new(&config);
        Self {
            config,
            flicker,
            ticks: 0,
        }
    }

    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advance one frame. `lights` holds the entity id of every point light
    /// in this frame's draw list.
    pub fn tick(&mut self, ctx: &FrameContext, lights: &[&str], day_night: &mut DayNightController) -> AnimationFrame {
        let budget = EffectBudget::for_tier(ctx.tier);
        let elapsed = ctx.elapsed;

        // 1. Ambient simulations
        let sway = SwayParams::new(elapsed, &self.config);
        let fog_offset = budget.fog.then(|| effects::fog_offset(elapsed, self.config.fog_drift));
        let particle_kind = if ctx.mode.is_night() {
            ParticleKind::Firefly
        } else {
            ParticleKind::Dust
        };
        let mut particles = Vec::new();
        effects::particles(particle_kind, budget.particles, elapsed, &self.config, &mut particles);

        // 2. Flicker
        if self.flicker.update(elapsed, lights, budget.flicker_lights) {
            log::trace!("Flicker subset: {:?}", self.flicker.chosen());
        }
        let mut light_intensities = Vec::new();
        let flickering = self.flicker.intensities(elapsed, lights, &mut light_intensities);

        // 3. Transitions
        let transition_progress = day_night.advance(ctx.dt);

        self.ticks += 1;
        AnimationFrame {
            budget,
            sway,
            fog_offset,
            particle_kind,
            particles,
            light_intensities,
            flickering,
            transition_progress,
        }
    }

    pub fn reconfigure(&mut self, config: AnimationConfig) {
        self.flicker = LightFlicker::new(&config);
        self.config = config;
    }

    pub fn reset(&mut self) {
        self.flicker.reset();
        self.ticks = 0;
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new(AnimationConfig::default())
    }
}
