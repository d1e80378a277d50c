//! Ambient effects.
//!
//! Sway, fog drift and particle motion are pure functions of elapsed time so
//! they look the same at any frame rate. Only the flicker subset carries
//! state, re-chosen on a fixed interval.

use serde::{Deserialize, Serialize};

use crate::core::types::Vec3;
use crate::variation::rng::{id_seed, SeededSequence};

use super::config::AnimationConfig;

const PARTICLE_SEED: u32 = 7919;
const FLICKER_SEED: u32 = 104_729;
/// Drift wraps at this distance to keep precision over long sessions.
const FOG_WRAP: f32 = 1024.0;

// ---------------------------------------------------------------------------
// Wind sway
// ---------------------------------------------------------------------------

/// Sway function parameters for this frame; the renderer applies
/// [`SwayParams::angle`] per entity with its variation phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SwayParams {
    pub time: f32,
    pub frequency: f32,
    pub amplitude: f32,
}

impl SwayParams {
    pub fn new(elapsed: f32, config: &AnimationConfig) -> Self {
        Self {
            time: elapsed,
            frequency: config.wind_frequency,
            amplitude: config.wind_amplitude,
        }
    }

    /// Lean angle for an entity with animation phase `phase`.
    pub fn angle(&self, phase: f32) -> f32 {
        let t = self.time * self.frequency;
        // A slower second harmonic breaks up the regularity
        self.amplitude * ((t + phase).sin() * 0.75 + (t * 0.37 + phase * 1.7).sin() * 0.25)
    }
}

// ---------------------------------------------------------------------------
// Fog drift
// ---------------------------------------------------------------------------

/// Fog layer XZ offset at `elapsed`.
pub fn fog_offset(elapsed: f32, drift: [f32; 2]) -> [f32; 2] {
    [(drift[0] * elapsed) % FOG_WRAP, (drift[1] * elapsed) % FOG_WRAP]
}

// ---------------------------------------------------------------------------
// Particles
// ---------------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleKind {
    /// Drifting dust motes by day.
    Dust,
    /// Pulsing fireflies at night.
    Firefly,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    pub brightness: f32,
}

/// Fill `out` with `count` particles at `elapsed`.
///
/// Each particle's anchor, orbit and phase come from a seeded sequence keyed
/// by its index, so particle `i` is the same particle at every tier.
pub fn particles(kind: ParticleKind, count: usize, elapsed: f32, config: &AnimationConfig, out: &mut Vec<Particle>) {
    out.clear();
    out.reserve(count);
    let extent = config.particle_extent;
    let [h_min, h_max] = config.particle_height;
    for i in 0..count {
        let mut seq = SeededSequence::new(PARTICLE_SEED.wrapping_add(i as u32 * 31));
        let anchor = Vec3::new(
            seq.range(-extent, extent),
            seq.range(h_min, h_max),
            seq.range(-extent, extent),
        );
        let radius = seq.range(0.5, 2.5);
        let speed = config.particle_speed * seq.range(0.5, 1.5);
        let phase = seq.next_f32() * std::f32::consts::TAU;

        let t = elapsed * speed + phase;
        let (position, brightness) = match kind {
            ParticleKind::Firefly => {
                let offset = Vec3::new(t.sin(), (t * 1.3).sin() * 0.4, (t * 0.8).cos()) * radius;
                let pulse = 0.5 + 0.5 * (elapsed * 2.2 + phase).sin();
                (anchor + offset, pulse)
            }
            ParticleKind::Dust => {
                // Slow lateral drift with a gentle bob
                let offset = Vec3::new((t * 0.3).sin() * radius, (t * 0.5).sin() * 0.2, (t * 0.2).cos() * radius);
                (anchor + offset, 0.3)
            }
        };
        out.push(Particle { position, brightness });
    }
}

// ---------------------------------------------------------------------------
// Light flicker
// ---------------------------------------------------------------------------

/// Picks which lights flicker.
///
/// The subset is a set of entity ids, re-chosen only when the reshuffle
/// interval has passed. Between reshuffles a chosen light keeps flickering
/// while it stays in the draw list, however the rest of the list changes.
#[derive(Clone, Debug)]
pub struct LightFlicker {
    reshuffle_secs: f32,
    depth: f32,
    chosen: Vec<String>,
    last_shuffle: Option<f32>,
    shuffles: u32,
}

impl LightFlicker {
    pub fn new(config: &AnimationConfig) -> Self {
        Self {
            reshuffle_secs: config.flicker_reshuffle_secs.max(0.0),
            depth: config.flicker_depth.clamp(0.0, 1.0),
            chosen: Vec::new(),
            last_shuffle: None,
            shuffles: 0,
        }
    }

    /// Ids chosen at the last reshuffle, sorted.
    pub fn chosen(&self) -> &[String] {
        &self.chosen
    }

    pub fn is_chosen(&self, id: &str) -> bool {
        self.chosen.binary_search_by(|c| c.as_str().cmp(id)).is_ok()
    }

    pub fn shuffles(&self) -> u32 {
        self.shuffles
    }

    /// Re-choose up to `max_flicker` of `lights` once the interval has
    /// passed. Returns true when a new subset was chosen.
    ///
    /// Inside the interval only a lowered `max_flicker` touches the subset:
    /// it is trimmed, never re-drawn.
    pub fn update(&mut self, elapsed: f32, lights: &[&str], max_flicker: usize) -> bool {
        let due = match self.last_shuffle {
            None => true,
            Some(last) => elapsed - last >= self.reshuffle_secs || elapsed < last,
        };
        if !due {
            self.chosen.truncate(max_flicker);
            return false;
        }

        let take = max_flicker.min(lights.len());
        let mut seq = SeededSequence::new(FLICKER_SEED.wrapping_add(self.shuffles));
        // Partial Fisher-Yates over the current lights
        let mut pool: Vec<&str> = lights.to_vec();
        for i in 0..take {
            let j = i + seq.index_below(pool.len() - i);
            pool.swap(i, j);
        }
        let mut chosen: Vec<String> = pool[..take].iter().map(|id| id.to_string()).collect();
        chosen.sort_unstable();
        chosen.dedup();

        self.chosen = chosen;
        self.last_shuffle = Some(elapsed);
        self.shuffles = self.shuffles.wrapping_add(1);
        true
    }

    /// Intensity multiplier per entry of `lights` at `elapsed`, and the
    /// indices of the entries that flicker.
    pub fn intensities(&self, elapsed: f32, lights: &[&str], out: &mut Vec<f32>) -> Vec<usize> {
        out.clear();
        out.resize(lights.len(), 1.0);
        let mut flickering = Vec::new();
        for (i, id) in lights.iter().enumerate() {
            if !self.is_chosen(id) {
                continue;
            }
            // Phase follows the entity, not its draw-list slot
            let fi = (id_seed(id) % 1024) as f32;
            let wobble = 0.5 + 0.25 * (elapsed * 17.0 + fi * 1.3).sin() + 0.25 * (elapsed * 7.3 + fi * 2.1).sin();
            out[i] = 1.0 - self.depth * wobble.clamp(0.0, 1.0);
            flickering.push(i);
        }
        flickering
    }

    pub fn reset(&mut self) {
        self.chosen.clear();
        self.last_shuffle = None;
        self.shuffles = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sway_bounded_and_phase_dependent() {
        let cfg = AnimationConfig::default();
        let sway = SwayParams::new(3.7, &cfg);
        for i in 0..50 {
            assert!(sway.angle(i as f32 * 0.3).abs() <= cfg.wind_amplitude + 1e-6);
        }
        assert_ne!(sway.angle(0.0), sway.angle(1.0));
    }

    #[test]
    fn test_fog_offset_linear_in_time() {
        let a = fog_offset(2.0, [0.5, 0.25]);
        assert_eq!(a, [1.0, 0.5]);
        assert_eq!(fog_offset(0.0, [0.5, 0.25]), [0.0, 0.0]);
    }

    #[test]
    fn test_particles_frame_rate_independent() {
        let cfg = AnimationConfig::default();
        let mut a = Vec::new();
        let mut b = Vec::new();
        particles(ParticleKind::Firefly, 16, 12.5, &cfg, &mut a);
        // Same elapsed reached through a different number of frames gives the same result
        particles(ParticleKind::Firefly, 16, 3.0, &cfg, &mut b);
        particles(ParticleKind::Firefly, 16, 12.5, &cfg, &mut b);
        assert_eq!(a, b);
        assert_eq!(a.len(), 16);
    }

    #[test]
    fn test_particle_prefix_stable_across_counts() {
        let cfg = AnimationConfig::default();
        let mut few = Vec::new();
        let mut many = Vec::new();
        particles(ParticleKind::Dust, 4, 1.0, &cfg, &mut few);
        particles(ParticleKind::Dust, 20, 1.0, &cfg, &mut many);
        assert_eq!(few[..], many[..4]);
    }

    fn light_ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("lamp{i:02}")).collect()
    }

    fn refs(ids: &[String]) -> Vec<&str> {
        ids.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_flicker_reshuffles_on_interval_only() {
        let cfg = AnimationConfig::default();
        let ids = light_ids(30);
        let lights = refs(&ids);
        let mut flicker = LightFlicker::new(&cfg);
        assert!(flicker.update(0.0, &lights, 5));
        assert_eq!(flicker.chosen().len(), 5);

        // Many frames inside the interval keep the same subset
        let first = flicker.chosen().to_vec();
        for frame in 1..80 {
            assert!(!flicker.update(frame as f32 / 60.0, &lights, 5));
        }
        assert_eq!(flicker.chosen(), first.as_slice());

        assert!(flicker.update(1.5, &lights, 5));
        assert_eq!(flicker.shuffles(), 2);
    }

    #[test]
    fn test_varying_light_count_keeps_subset_within_interval() {
        let cfg = AnimationConfig::default();
        let ids = light_ids(21);
        let mut flicker = LightFlicker::new(&cfg);
        assert!(flicker.update(0.0, &refs(&ids[..20]), 4));
        let first = flicker.chosen().to_vec();

        let mut reshuffles = 0;
        for frame in 1..60 {
            let n = if frame % 2 == 0 { 20 } else { 21 };
            if flicker.update(frame as f32 / 60.0, &refs(&ids[..n]), 4) {
                reshuffles += 1;
            }
        }
        assert_eq!(reshuffles, 0);
        assert_eq!(flicker.chosen(), first.as_slice());
    }

    #[test]
    fn test_flicker_follows_entity_not_slot() {
        let cfg = AnimationConfig::default();
        let ids = light_ids(8);
        let mut flicker = LightFlicker::new(&cfg);
        flicker.update(0.0, &refs(&ids), 3);
        let chosen = flicker.chosen().to_vec();

        // An earlier light leaves the draw list; the same entities still flicker
        let shifted: Vec<&str> = ids[1..].iter().map(String::as_str).collect();
        flicker.update(0.1, &shifted, 3);
        let mut out = Vec::new();
        let flickering = flicker.intensities(0.1, &shifted, &mut out);
        for &i in &flickering {
            assert!(chosen.iter().any(|c| c == shifted[i]));
        }
        let expected = chosen.iter().filter(|c| c.as_str() != ids[0]).count();
        assert_eq!(flickering.len(), expected);
    }

    #[test]
    fn test_lowered_budget_trims_without_redraw() {
        let cfg = AnimationConfig::default();
        let ids = light_ids(10);
        let mut flicker = LightFlicker::new(&cfg);
        flicker.update(0.0, &refs(&ids), 4);
        let first = flicker.chosen().to_vec();
        assert!(!flicker.update(0.2, &refs(&ids), 2));
        assert_eq!(flicker.chosen(), &first[..2]);
    }

    #[test]
    fn test_intensities_only_dim_subset() {
        let cfg = AnimationConfig::default();
        let ids = light_ids(8);
        let lights = refs(&ids);
        let mut flicker = LightFlicker::new(&cfg);
        flicker.update(0.0, &lights, 3);
        let mut out = Vec::new();
        let flickering = flicker.intensities(0.4, &lights, &mut out);
        assert_eq!(out.len(), 8);
        assert_eq!(flickering.len(), 3);
        for (i, v) in out.iter().enumerate() {
            if flickering.contains(&i) {
                assert!(*v <= 1.0 && *v >= 1.0 - cfg.flicker_depth);
            } else {
                assert_eq!(*v, 1.0);
            }
        }
    }
}
